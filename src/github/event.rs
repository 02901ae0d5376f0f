//! Run context from the GitHub Actions environment.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Deserialize;
use tracing::warn;

/// Identifying inputs for one run, taken from the Actions environment.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// `owner/repo` slug.
    pub repo: String,
    /// Pull request number.
    pub pr_number: u64,
    /// Head commit SHA of the pull request.
    pub head_sha: String,
    /// API token.
    pub token: String,
}

#[derive(Deserialize, Default)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
    #[serde(default)]
    number: Option<u64>,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    head: Option<HeadPayload>,
}

#[derive(Deserialize)]
struct HeadPayload {
    #[serde(default)]
    sha: Option<String>,
}

impl RunContext {
    /// Loads the run context from the GitHub Actions environment.
    ///
    /// Returns `None` when any required input (`GITHUB_TOKEN`,
    /// `GITHUB_REPOSITORY`, `GITHUB_EVENT_PATH`) is absent or the event is
    /// not a pull request; callers treat that as a silent no-op.
    pub fn from_env() -> Result<Option<Self>> {
        let token = crate::utils::settings::get_env_var("GITHUB_TOKEN").ok();
        let repo = std::env::var("GITHUB_REPOSITORY").ok();
        let event_path = std::env::var("GITHUB_EVENT_PATH").ok();

        let (Some(token), Some(repo), Some(event_path)) = (token, repo, event_path) else {
            warn!("GITHUB_TOKEN, GITHUB_REPOSITORY, or GITHUB_EVENT_PATH not set; nothing to do");
            return Ok(None);
        };

        Self::from_event_file(Path::new(&event_path), repo, token)
    }

    /// Builds the context from an event payload file.
    pub fn from_event_file(event_path: &Path, repo: String, token: String) -> Result<Option<Self>> {
        let content = std::fs::read_to_string(event_path)
            .with_context(|| format!("Failed to read event file: {}", event_path.display()))?;
        let event: EventPayload = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse event file: {}", event_path.display()))?;

        let pr = event.pull_request.as_ref();
        let pr_number = pr.and_then(|p| p.number).or(event.number);
        let head_sha = pr.and_then(|p| p.head.as_ref()).and_then(|h| h.sha.clone());

        match (pr_number, head_sha) {
            (Some(pr_number), Some(head_sha)) => Ok(Some(Self {
                repo,
                pr_number,
                head_sha,
                token,
            })),
            _ => {
                warn!("Not a pull_request event or missing head SHA; nothing to do");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_event(content: &str) -> (TempDir, std::path::PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("event.json");
        fs::write(&path, content).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn pull_request_event_yields_context() {
        let (_guard, path) = write_event(
            r#"{"pull_request": {"number": 12, "head": {"sha": "abcdef0123456789"}}}"#,
        );
        let context =
            RunContext::from_event_file(&path, "owner/repo".to_string(), "tok".to_string())
                .unwrap()
                .unwrap();
        assert_eq!(context.repo, "owner/repo");
        assert_eq!(context.pr_number, 12);
        assert_eq!(context.head_sha, "abcdef0123456789");
    }

    #[test]
    fn top_level_number_is_a_fallback() {
        let (_guard, path) =
            write_event(r#"{"number": 4, "pull_request": {"head": {"sha": "feedbeef"}}}"#);
        let context =
            RunContext::from_event_file(&path, "o/r".to_string(), "tok".to_string())
                .unwrap()
                .unwrap();
        assert_eq!(context.pr_number, 4);
    }

    #[test]
    fn non_pr_event_is_a_no_op() {
        let (_guard, path) = write_event(r#"{"ref": "refs/heads/main"}"#);
        let context =
            RunContext::from_event_file(&path, "o/r".to_string(), "tok".to_string()).unwrap();
        assert!(context.is_none());
    }

    #[test]
    fn missing_head_sha_is_a_no_op() {
        let (_guard, path) = write_event(r#"{"pull_request": {"number": 9}}"#);
        let context =
            RunContext::from_event_file(&path, "o/r".to_string(), "tok".to_string()).unwrap();
        assert!(context.is_none());
    }

    #[test]
    fn unreadable_event_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        let result = RunContext::from_event_file(&path, "o/r".to_string(), "tok".to_string());
        assert!(result.is_err());
    }
}

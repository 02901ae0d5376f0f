//! GitHub REST client: PR file listings, file contents, report comments.

use base64::Engine as _;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::error::GithubError;
use crate::report::REPORT_MARKER;

/// Default public GitHub API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Files whose declared size exceeds this are not fetched inline.
pub const MAX_INLINE_FILE_SIZE: u64 = 1_500_000;

/// Page size for paginated listings.
const PAGE_SIZE: usize = 100;

/// Change status of a file within a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    /// File was added.
    Added,
    /// File content was modified.
    Modified,
    /// File was deleted.
    Removed,
    /// File was renamed.
    Renamed,
    /// Any other status the API reports (copied, changed, unchanged).
    #[serde(other)]
    #[default]
    Other,
}

/// One changed file from the PR file listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangedFile {
    /// Path within the repository.
    #[serde(rename = "filename")]
    pub path: String,
    /// Change status reported by the API.
    #[serde(default)]
    pub status: ChangeStatus,
}

/// Outcome of a file-content fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Decoded file bytes.
    Bytes(Vec<u8>),
    /// File exceeds [`MAX_INLINE_FILE_SIZE`]; not fetched.
    TooLarge,
    /// File is absent at the requested revision (or not a regular file).
    NotFound,
}

#[derive(Deserialize)]
struct ContentsResponse {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Deserialize)]
struct IssueComment {
    id: u64,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Deserialize)]
struct CommentResponse {
    id: u64,
}

/// GitHub REST API client.
///
/// Explicitly constructed and passed around; holds its own HTTP client and
/// credentials rather than relying on process-wide session state.
pub struct GithubClient {
    http: Client,
    base_url: String,
    token: String,
}

impl GithubClient {
    /// Creates a new client for `base_url` (the public API when `None`).
    pub fn new(token: String, base_url: Option<String>) -> Result<Self, GithubError> {
        let http = Client::builder()
            .timeout(super::REQUEST_TIMEOUT)
            .user_agent(concat!("noteguard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GithubError::NetworkError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// Lists every changed file of a pull request, in stable API order.
    ///
    /// Pages through the listing until a short page is returned.
    pub async fn list_pr_files(
        &self,
        repo: &str,
        pr_number: u64,
    ) -> Result<Vec<ChangedFile>, GithubError> {
        let mut files = Vec::new();
        let mut page = 1u32;
        loop {
            let response = self
                .request(Method::GET, &format!("/repos/{repo}/pulls/{pr_number}/files"))
                .query(&[
                    ("per_page", PAGE_SIZE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await
                .map_err(|e| GithubError::NetworkError(e.to_string()))?;
            let response = check_status(response).await?;

            let chunk: Vec<ChangedFile> = response
                .json()
                .await
                .map_err(|e| GithubError::InvalidResponseFormat(e.to_string()))?;
            let short_page = chunk.len() < PAGE_SIZE;
            files.extend(chunk);
            if short_page {
                break;
            }
            page += 1;
        }

        debug!(repo, pr_number, file_count = files.len(), "Listed PR files");
        Ok(files)
    }

    /// Fetches a file's bytes at a revision via the contents API.
    ///
    /// Returns [`FileContent::NotFound`] for 404s and non-file entries, and
    /// [`FileContent::TooLarge`] instead of fetching oversized payloads.
    pub async fn fetch_file_content(
        &self,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<FileContent, GithubError> {
        let response = self
            .request(Method::GET, &format!("/repos/{repo}/contents/{path}"))
            .query(&[("ref", git_ref)])
            .send()
            .await
            .map_err(|e| GithubError::NetworkError(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(repo, path, git_ref, "File not found at revision");
            return Ok(FileContent::NotFound);
        }
        let response = check_status(response).await?;

        let contents: ContentsResponse = response
            .json()
            .await
            .map_err(|e| GithubError::InvalidResponseFormat(e.to_string()))?;

        if contents.kind != "file" {
            return Ok(FileContent::NotFound);
        }
        if contents.size > MAX_INLINE_FILE_SIZE {
            debug!(repo, path, size = contents.size, "Skipping oversized file");
            return Ok(FileContent::TooLarge);
        }

        if contents.encoding == "base64" {
            // The API wraps base64 payloads with embedded newlines.
            let cleaned: String = contents
                .content
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(cleaned)
                .map_err(|e| {
                    GithubError::InvalidResponseFormat(format!("bad base64 payload: {e}"))
                })?;
            return Ok(FileContent::Bytes(bytes));
        }

        Ok(FileContent::Bytes(contents.content.into_bytes()))
    }

    /// Finds an earlier report comment by its hidden marker.
    ///
    /// Scans each page of issue comments newest-first so the most recent
    /// marker wins within a page.
    pub async fn find_report_comment(
        &self,
        repo: &str,
        pr_number: u64,
    ) -> Result<Option<u64>, GithubError> {
        let mut page = 1u32;
        loop {
            let response = self
                .request(
                    Method::GET,
                    &format!("/repos/{repo}/issues/{pr_number}/comments"),
                )
                .query(&[
                    ("per_page", PAGE_SIZE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await
                .map_err(|e| GithubError::NetworkError(e.to_string()))?;
            let response = check_status(response).await?;

            let comments: Vec<IssueComment> = response
                .json()
                .await
                .map_err(|e| GithubError::InvalidResponseFormat(e.to_string()))?;
            if comments.is_empty() {
                return Ok(None);
            }

            for comment in comments.iter().rev() {
                if comment
                    .body
                    .as_deref()
                    .is_some_and(|body| body.contains(REPORT_MARKER))
                {
                    debug!(comment_id = comment.id, "Found existing report comment");
                    return Ok(Some(comment.id));
                }
            }

            if comments.len() < PAGE_SIZE {
                return Ok(None);
            }
            page += 1;
        }
    }

    /// Creates a new report comment, or edits `existing` in place.
    ///
    /// Returns the id of the created or updated comment.
    pub async fn publish_comment(
        &self,
        repo: &str,
        pr_number: u64,
        body: &str,
        existing: Option<u64>,
    ) -> Result<u64, GithubError> {
        let payload = json!({ "body": body });
        let response = match existing {
            Some(comment_id) => {
                info!(comment_id, "Updating existing report comment");
                self.request(
                    Method::PATCH,
                    &format!("/repos/{repo}/issues/comments/{comment_id}"),
                )
            }
            None => {
                info!(repo, pr_number, "Posting new report comment");
                self.request(
                    Method::POST,
                    &format!("/repos/{repo}/issues/{pr_number}/comments"),
                )
            }
        }
        .json(&payload)
        .send()
        .await
        .map_err(|e| GithubError::NetworkError(e.to_string()))?;
        let response = check_status(response).await?;

        let comment: CommentResponse = response
            .json()
            .await
            .map_err(|e| GithubError::InvalidResponseFormat(e.to_string()))?;
        Ok(comment.id)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GithubError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response.text().await.unwrap_or_else(|e| {
        debug!("Failed to read error response body: {e}");
        String::new()
    });
    Err(GithubError::ApiRequestFailed(format!(
        "HTTP {status}: {error_text}"
    )))
}

//! Run command — inspect the current pull request and post the report.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::classify::{classify, FileKind};
use crate::github::{ChangeStatus, ChangedFile, FileContent, GithubClient, RunContext};
use crate::metrics::{load_metrics, DEFAULT_METRICS_FILE};
use crate::notebook::{self, Verdict};
use crate::report::{build_report, NotebookResult};

/// Run command options.
#[derive(Parser)]
pub struct RunCommand {
    /// Path to the CI-produced metrics file.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_METRICS_FILE)]
    pub metrics_file: PathBuf,

    /// Prints the report body to stdout instead of posting a comment.
    #[arg(long)]
    pub dry_run: bool,
}

impl RunCommand {
    /// Executes the run command.
    pub async fn execute(self) -> Result<()> {
        let Some(context) = RunContext::from_env()? else {
            // Outside a pull_request workflow there is nothing to report.
            return Ok(());
        };

        let api_url = std::env::var("GITHUB_API_URL").ok();
        let client = GithubClient::new(context.token.clone(), api_url)?;

        let files = client
            .list_pr_files(&context.repo, context.pr_number)
            .await?;
        let (notebook_paths, data_files) = partition_files(&files);

        let mut notebooks: Vec<NotebookResult> = Vec::new();
        for path in notebook_paths {
            let content = client
                .fetch_file_content(&context.repo, &path, &context.head_sha)
                .await?;
            notebooks.push(NotebookResult {
                path,
                verdict: evaluate_content(&content),
            });
        }
        debug!(
            notebook_count = notebooks.len(),
            data_file_count = data_files.len(),
            "Classified changed files"
        );

        let metrics = load_metrics(&self.metrics_file);
        let body = build_report(
            context.pr_number,
            &context.head_sha,
            &notebooks,
            &data_files,
            &metrics,
        );

        if self.dry_run {
            println!("{body}");
            return Ok(());
        }

        let existing = client
            .find_report_comment(&context.repo, context.pr_number)
            .await?;
        let comment_id = client
            .publish_comment(&context.repo, context.pr_number, &body, existing)
            .await?;
        match existing {
            Some(_) => println!("Updated comment {comment_id}"),
            None => println!("Posted new comment {comment_id}"),
        }

        Ok(())
    }
}

/// Splits a change set into notebook paths and data-artifact paths, in
/// listing order. Removed files are excluded before classification runs.
fn partition_files(files: &[ChangedFile]) -> (Vec<String>, Vec<String>) {
    let mut notebook_paths = Vec::new();
    let mut data_files = Vec::new();
    for file in files {
        if file.status == ChangeStatus::Removed {
            continue;
        }
        match classify(&file.path) {
            FileKind::Notebook => notebook_paths.push(file.path.clone()),
            FileKind::DataArtifact => data_files.push(file.path.clone()),
            FileKind::Other => {}
        }
    }
    (notebook_paths, data_files)
}

/// Turns a fetch outcome into a verdict, substituting for the two cases the
/// engine never sees (oversized file, unparsable bytes). A vanished file is
/// treated as empty bytes and lands on the parse-failure path.
fn evaluate_content(content: &FileContent) -> Verdict {
    match content {
        FileContent::TooLarge => Verdict::skipped_too_large(),
        FileContent::NotFound => evaluate_bytes(&[]),
        FileContent::Bytes(bytes) => evaluate_bytes(bytes),
    }
}

fn evaluate_bytes(bytes: &[u8]) -> Verdict {
    match notebook::parse(bytes) {
        Ok(parsed) => notebook::inspect(&parsed),
        Err(e) => Verdict::unparsable(e.category()),
    }
}

//! Inspect command — check local notebook files without the GitHub API.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::notebook::{self, Verdict};

/// Inspect command options.
#[derive(Parser)]
pub struct InspectCommand {
    /// Notebook files to inspect.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Exits non-zero if any notebook still has outputs.
    #[arg(long)]
    pub strict: bool,
}

impl InspectCommand {
    /// Executes the inspect command.
    pub fn execute(self) -> Result<()> {
        let mut dirty = 0usize;
        for path in &self.files {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let verdict = match notebook::parse(&bytes) {
                Ok(parsed) => notebook::inspect(&parsed),
                Err(e) => Verdict::unparsable(e.category()),
            };
            if verdict.has_outputs {
                dirty += 1;
            }
            println!("{}: {}", path.display(), verdict.status_note);
            for warning in &verdict.warnings {
                println!("  warning: {warning}");
            }
        }

        if self.strict && dirty > 0 {
            anyhow::bail!("{dirty} notebook(s) still contain outputs");
        }
        Ok(())
    }
}

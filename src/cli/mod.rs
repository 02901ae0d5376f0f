//! CLI interface for noteguard

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod inspect;
pub mod run;

/// noteguard: notebook hygiene checks for pull requests
#[derive(Parser)]
#[command(name = "noteguard")]
#[command(about = "Notebook hygiene checks for pull requests", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect the current pull request and post a summary comment
    Run(run::RunCommand),
    /// Inspect local notebook files without touching the GitHub API
    Inspect(inspect::InspectCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run(run_cmd) => run_cmd.execute().await,
            Commands::Inspect(inspect_cmd) => inspect_cmd.execute(),
        }
    }
}

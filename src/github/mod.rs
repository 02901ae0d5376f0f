//! GitHub REST API collaborators.

use std::time::Duration;

pub mod client;
pub mod error;
pub mod event;

pub use client::{ChangeStatus, ChangedFile, FileContent, GithubClient};
pub use error::GithubError;
pub use event::RunContext;

/// Timeout applied to every API request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

//! # noteguard
//!
//! Pull request hygiene bot for Jupyter notebooks and data artifacts.
//!
//! ## Features
//!
//! - Flags notebooks with committed outputs, non-default kernels, oversized
//!   cells, and out-of-order execution counts
//! - Lists changed data artifacts and surfaces CI-produced model metrics
//! - Posts a single marker-tagged PR comment, updated in place on re-runs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod classify;
pub mod cli;
pub mod github;
pub mod metrics;
pub mod notebook;
pub mod report;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of noteguard.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

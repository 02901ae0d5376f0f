//! Utility modules for noteguard.

pub mod settings;

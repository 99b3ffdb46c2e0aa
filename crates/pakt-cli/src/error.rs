//! Error handling for the pakt CLI.
//!
//! Domain errors convert into [`CliError`] via `#[from]`; `main` turns the
//! result into a miette report with [`cli_error_to_miette`].

mod report;

use std::path::PathBuf;
use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Build options or compiler settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] pakt_config::ConfigError),

    /// The project graph could not be loaded
    #[error("Graph error: {0}")]
    Graph(#[from] pakt_graph::Error),

    /// Manifest synthesis failed
    #[error(transparent)]
    Manifest(#[from] pakt_manifest::Error),

    /// Invalid or missing command-line arguments
    #[error("Invalid argument: {message}\n\nHint: {hint}")]
    InvalidArgument { message: String, hint: String },

    /// The working directory could not be determined
    #[error("Cannot read the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// The manifest could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
            hint: hint.into(),
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

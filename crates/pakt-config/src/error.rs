//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for '{field}'{}", .hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    // Compiler settings (tsconfig) errors
    #[error("invalid compiler settings in {}: {message}", .path.display())]
    InvalidCompilerSettings { path: PathBuf, message: String },

    #[error("cannot resolve extends '{specifier}' from {}", .from.display())]
    ExtendsNotFound { specifier: String, from: PathBuf },

    #[error("circular extends chain at {}", .0.display())]
    ExtendsCycle(PathBuf),
}

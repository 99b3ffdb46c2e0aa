//! Error types for manifest synthesis.

use pakt_config::ConfigError;
use pakt_graph::EdgeType;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort manifest emission for the current build.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The project is not part of the graph.
    #[error("project '{0}' not found in graph")]
    NotFound(String),

    /// The graph or an input file cannot produce a valid manifest.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// An edge that should have been appended once was appended again.
    #[error("dependency {from} -> {to} ({edge_type}) was injected twice")]
    DuplicateInjection {
        from: String,
        to: String,
        edge_type: EdgeType,
    },
}

impl From<pakt_graph::Error> for Error {
    fn from(err: pakt_graph::Error) -> Self {
        match err {
            pakt_graph::Error::ProjectNotFound(id) => Error::NotFound(id),
            pakt_graph::Error::DuplicateInjection {
                from,
                to,
                edge_type,
            } => Error::DuplicateInjection {
                from,
                to,
                edge_type,
            },
            other => Error::Malformed(other.to_string()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Malformed(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Malformed(format!("invalid package.json: {err}"))
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::NotFound(_) => "PROJECT_NOT_FOUND",
            Error::Malformed(_) => "MALFORMED_INPUT",
            Error::DuplicateInjection { .. } => "DUPLICATE_INJECTION",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::NotFound(id) => Some(Box::new(format!(
                "Check that '{id}' is a project id in the graph (not a package name)."
            ))),
            Error::Malformed(_) => Some(Box::new(
                "Regenerate the project graph and check that every external package records a version.",
            )),
            Error::DuplicateInjection { .. } => Some(Box::new(
                "This is an internal consistency error. Please report it with the graph that triggered it.",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn test_graph_errors_map_to_taxonomy() {
        let err: Error = pakt_graph::Error::ProjectNotFound("app".into()).into();
        assert!(matches!(err, Error::NotFound(ref id) if id == "app"));

        let err: Error = pakt_graph::Error::InvalidGraph("bad".into()).into();
        assert!(matches!(err, Error::Malformed(_)));

        let err: Error = pakt_graph::Error::DuplicateInjection {
            from: "app".into(),
            to: "npm:tslib".into(),
            edge_type: EdgeType::Static,
        }
        .into();
        assert!(matches!(err, Error::DuplicateInjection { .. }));
    }

    #[test]
    fn test_config_errors_are_malformed() {
        let err: Error = ConfigError::ExtendsCycle("tsconfig.json".into()).into();
        assert!(matches!(err, Error::Malformed(ref msg) if msg.contains("tsconfig.json")));
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = Error::NotFound("app".into());
        assert_eq!(err.code().unwrap().to_string(), "PROJECT_NOT_FOUND");
        assert!(err.help().unwrap().to_string().contains("'app'"));
    }
}

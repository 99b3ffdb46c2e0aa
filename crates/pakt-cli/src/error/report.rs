//! Conversion from CLI errors to miette reports.

use miette::Report;

use crate::error::CliError;

/// Convert a [`CliError`] into a miette [`Report`].
///
/// Manifest errors carry their own diagnostic code and help text.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Manifest(e) => Report::new(e),
        CliError::Graph(e) => miette::miette!(
            help = "Regenerate the graph file; it must contain `nodes`, `externalNodes` and `dependencies`.",
            "Graph error: {}",
            e
        ),
        CliError::Config(e) => miette::miette!(
            help = "Check pakt.toml, PAKT_* variables and the tsconfig chain.",
            "Configuration error: {}",
            e
        ),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_errors_keep_their_code() {
        let report = cli_error_to_miette(CliError::Manifest(pakt_manifest::Error::NotFound(
            "api".into(),
        )));
        assert_eq!(report.code().unwrap().to_string(), "PROJECT_NOT_FOUND");
    }

    #[test]
    fn test_graph_errors_have_help() {
        let report = cli_error_to_miette(CliError::Graph(pakt_graph::Error::InvalidGraph(
            "bad".into(),
        )));
        assert!(report.help().is_some());
        assert!(report.to_string().contains("bad"));
    }
}

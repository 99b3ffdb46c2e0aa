//! Helpers command implementation.

use pakt_config::CompilerSettings;
use pakt_graph::{DependencyEdge, ProjectGraph, helper_edge_to_inject, resolve_helper_dependencies};

use crate::cli::HelpersArgs;
use crate::error::Result;

/// Execute the helpers command.
pub fn execute(args: HelpersArgs) -> Result<()> {
    let graph = ProjectGraph::from_json_file(&args.graph)?;
    let import_helpers = args
        .ts_config
        .as_deref()
        .map(CompilerSettings::load)
        .transpose()?
        .map(|settings| settings.import_helpers());

    for line in report(&graph, &args.project, import_helpers)? {
        println!("{line}");
    }
    Ok(())
}

/// Lines describing the helper edges of `project`.
///
/// With `import_helpers` known, the last line states what a build injects.
pub fn report(
    graph: &ProjectGraph,
    project: &str,
    import_helpers: Option<bool>,
) -> Result<Vec<String>> {
    let existing = resolve_helper_dependencies(graph, project)?;

    let mut lines: Vec<String> = existing.iter().map(describe).collect();
    if lines.is_empty() {
        lines.push(format!("{project} has no helper dependencies"));
    }

    if let Some(enabled) = import_helpers {
        lines.push(match helper_edge_to_inject(project, enabled, &existing) {
            Some(edge) => format!("inject: {}", describe(&edge)),
            None if enabled => "inject: nothing (helper already present)".to_string(),
            None => "inject: nothing (importHelpers is off)".to_string(),
        });
    }

    Ok(lines)
}

fn describe(edge: &DependencyEdge) -> String {
    format!("{} -> {} ({})", edge.source, edge.target, edge.edge_type)
}

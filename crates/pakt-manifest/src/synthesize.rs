//! Manifest synthesis from the project graph.
//!
//! The walk starts at the root project and follows runtime edges
//! ([`EdgeType::is_runtime`](pakt_graph::EdgeType::is_runtime)). Workspace
//! projects are walked through but never listed; external packages are
//! listed with the version recorded on their graph node.

use std::collections::BTreeMap;

use pakt_config::BuildOptions;
use pakt_graph::{GraphView, ProjectNode};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::manifest::{ManifestTemplate, PackageManifest};

/// Version written when neither the project nor its template declares one.
pub const DEFAULT_VERSION: &str = "0.0.1";

/// Synthesize the manifest of `project` without a template.
pub fn synthesize<G>(project: &str, graph: &G, options: &BuildOptions) -> Result<PackageManifest>
where
    G: GraphView + ?Sized,
{
    synthesize_with_template(project, graph, options, None)
}

/// Synthesize the manifest of `project` on top of its own package.json.
///
/// Declared `dependencies` and `peerDependencies` win over graph results for
/// the same package. `devDependencies` never survive.
pub fn synthesize_with_template<G>(
    project: &str,
    graph: &G,
    options: &BuildOptions,
    template: Option<&ManifestTemplate>,
) -> Result<PackageManifest>
where
    G: GraphView + ?Sized,
{
    let root = graph
        .project(project)
        .ok_or_else(|| Error::NotFound(project.to_string()))?;

    let collected = collect_runtime_dependencies(graph, project)?;

    let mut dependencies = template
        .map(|t| t.dependencies.clone())
        .unwrap_or_default();
    let peer_dependencies = template
        .map(|t| t.peer_dependencies.clone())
        .unwrap_or_default();

    for (package, version) in collected {
        if dependencies.contains_key(&package) || peer_dependencies.contains_key(&package) {
            trace!(package = %package, "declared by template, keeping declared range");
            continue;
        }
        dependencies.insert(package, version);
    }

    let extra = template
        .map(ManifestTemplate::passthrough_fields)
        .unwrap_or_default();

    let manifest = PackageManifest {
        name: header_name(root, template),
        version: header_version(root, template),
        main: entry_point(root, template, options),
        dependencies,
        peer_dependencies,
        extra,
    };

    debug!(
        project,
        name = %manifest.name,
        dependencies = manifest.dependencies.len(),
        "synthesized manifest"
    );
    Ok(manifest)
}

/// Every external package reachable from `project` over runtime edges,
/// mapped to its recorded version.
///
/// Internal cycles are safe. When two reachable nodes name the same package,
/// the first one found in edge order wins.
pub fn collect_runtime_dependencies<G>(
    graph: &G,
    project: &str,
) -> Result<BTreeMap<String, String>>
where
    G: GraphView + ?Sized,
{
    if !graph.contains_project(project) {
        return Err(Error::NotFound(project.to_string()));
    }

    let mut dependencies = BTreeMap::new();
    let mut visited = FxHashSet::default();
    let mut stack = vec![project.to_string()];
    visited.insert(project.to_string());

    while let Some(current) = stack.pop() {
        let mut internal = Vec::new();

        for edge in graph.edges(&current) {
            if !edge.edge_type.is_runtime() {
                trace!(source = %edge.source, target = %edge.target, "skipping non-runtime edge");
                continue;
            }

            if graph.contains_project(&edge.target) {
                if visited.insert(edge.target.clone()) {
                    internal.push(edge.target.clone());
                }
                continue;
            }

            let Some(external) = graph.external(&edge.target) else {
                return Err(Error::Malformed(format!(
                    "'{}' depends on '{}', which is neither a project nor an external package",
                    edge.source, edge.target
                )));
            };
            let version = external.version.clone().ok_or_else(|| {
                Error::Malformed(format!(
                    "external package '{}' has no version recorded in the graph",
                    external.name
                ))
            })?;

            dependencies
                .entry(external.package_name().to_string())
                .or_insert(version);
        }

        // Reverse so the first internal dependency is walked first.
        stack.extend(internal.into_iter().rev());
    }

    Ok(dependencies)
}

fn header_name(root: &ProjectNode, template: Option<&ManifestTemplate>) -> String {
    root.metadata
        .package_name
        .clone()
        .or_else(|| template.and_then(|t| t.name.clone()))
        .unwrap_or_else(|| root.name.clone())
}

fn header_version(root: &ProjectNode, template: Option<&ManifestTemplate>) -> String {
    root.metadata
        .version
        .clone()
        .or_else(|| template.and_then(|t| t.version.clone()))
        .unwrap_or_else(|| DEFAULT_VERSION.to_string())
}

fn entry_point(
    root: &ProjectNode,
    template: Option<&ManifestTemplate>,
    options: &BuildOptions,
) -> String {
    root.metadata
        .main
        .clone()
        .or_else(|| template.and_then(|t| t.main.clone()))
        .unwrap_or_else(|| options.output_file_name.clone())
}

//! Compiler runtime helper dependencies.
//!
//! TypeScript with `importHelpers` and SWC with `externalHelpers` compile
//! down-levelled syntax into imports of a helper package instead of inlining
//! the helpers. Those imports do not exist in source, so the graph builder
//! cannot see them; this module finds the helper edges a project already has
//! and injects the missing one when the compiler is configured to need it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::edge::DependencyEdge;
use crate::graph::{GraphMut, GraphView};
use crate::{Error, Result};

/// Known compiler runtime helper packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelperDependency {
    /// `tslib`, required by `tsc` with `importHelpers`
    Tsc,
    /// `@swc/helpers`, required by SWC with `externalHelpers`
    Swc,
}

impl HelperDependency {
    pub const ALL: [HelperDependency; 2] = [HelperDependency::Tsc, HelperDependency::Swc];

    /// External node key this helper resolves to.
    pub fn target(self) -> &'static str {
        match self {
            HelperDependency::Tsc => "npm:tslib",
            HelperDependency::Swc => "npm:@swc/helpers",
        }
    }

    /// npm package name emitted into manifests.
    pub fn package_name(self) -> &'static str {
        match self {
            HelperDependency::Tsc => "tslib",
            HelperDependency::Swc => "@swc/helpers",
        }
    }

    /// Map an edge target back to a helper, if it is one.
    pub fn from_target(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|helper| helper.target() == target)
    }
}

/// The helper injected for `importHelpers`.
pub const CANONICAL_HELPER: HelperDependency = HelperDependency::Tsc;

/// Return the edges of `project` that point at a compiler helper package.
///
/// Order follows the graph's edge order. Fails with
/// [`Error::ProjectNotFound`] if `project` is not in the graph.
pub fn resolve_helper_dependencies<G>(graph: &G, project: &str) -> Result<Vec<DependencyEdge>>
where
    G: GraphView + ?Sized,
{
    if !graph.contains_project(project) {
        return Err(Error::ProjectNotFound(project.to_string()));
    }

    Ok(graph
        .edges(project)
        .filter(|edge| HelperDependency::from_target(&edge.target).is_some())
        .cloned()
        .collect())
}

/// Decide whether `project` needs a synthetic edge to the canonical helper.
///
/// Returns the edge to append iff `import_helpers` is set and none of
/// `existing` already targets the canonical helper.
pub fn helper_edge_to_inject(
    project: &str,
    import_helpers: bool,
    existing: &[DependencyEdge],
) -> Option<DependencyEdge> {
    if !import_helpers {
        return None;
    }
    let target = CANONICAL_HELPER.target();
    if existing.iter().any(|edge| edge.target == target) {
        return None;
    }
    Some(DependencyEdge::new_static(project, target))
}

/// Apply [`helper_edge_to_inject`] to `graph`.
///
/// The graph's current edges are checked again before appending, so calling
/// this twice with the same stale `existing` set injects a single edge.
/// Returns the appended edge, if any.
pub fn maybe_inject_helper_dependency<G>(
    graph: &mut G,
    project: &str,
    import_helpers: bool,
    existing: &[DependencyEdge],
) -> Result<Option<DependencyEdge>>
where
    G: GraphMut + ?Sized,
{
    if !graph.contains_project(project) {
        return Err(Error::ProjectNotFound(project.to_string()));
    }

    let Some(edge) = helper_edge_to_inject(project, import_helpers, existing) else {
        debug!(project, import_helpers, "no helper dependency injection needed");
        return Ok(None);
    };

    if graph.edges(project).any(|current| current.target == edge.target) {
        debug!(project, target = %edge.target, "helper dependency already present in graph");
        return Ok(None);
    }

    debug!(project, target = %edge.target, "injecting helper dependency");
    graph.append_dependency(edge.clone())?;
    Ok(Some(edge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::EdgeType;
    use crate::graph::ProjectGraph;
    use crate::overlay::GraphOverlay;
    use crate::project::{ExternalNode, ProjectNode, ProjectType};

    fn graph_with(edges: &[(&str, EdgeType)]) -> ProjectGraph {
        let mut graph = ProjectGraph::new();
        graph.add_project(ProjectNode::new("app", ProjectType::App)).unwrap();
        graph.add_project(ProjectNode::new("lib", ProjectType::Lib)).unwrap();
        graph.add_external(ExternalNode::npm("tslib", "2.6.2")).unwrap();
        graph.add_external(ExternalNode::npm("@swc/helpers", "0.5.3")).unwrap();
        graph.add_external(ExternalNode::npm("left-pad", "1.3.0")).unwrap();
        for (target, edge_type) in edges {
            graph
                .add_dependency(DependencyEdge::new("app", *target, *edge_type))
                .unwrap();
        }
        graph
    }

    #[test]
    fn test_helper_targets() {
        assert_eq!(HelperDependency::Tsc.target(), "npm:tslib");
        assert_eq!(HelperDependency::Swc.package_name(), "@swc/helpers");
        assert_eq!(
            HelperDependency::from_target("npm:@swc/helpers"),
            Some(HelperDependency::Swc)
        );
        assert_eq!(HelperDependency::from_target("npm:left-pad"), None);
        assert_eq!(HelperDependency::from_target("tslib"), None);
    }

    #[test]
    fn test_resolve_keeps_only_helpers_in_order() {
        let graph = graph_with(&[
            ("npm:@swc/helpers", EdgeType::Static),
            ("lib", EdgeType::Static),
            ("npm:tslib", EdgeType::Dynamic),
            ("npm:left-pad", EdgeType::Static),
        ]);

        let helpers = resolve_helper_dependencies(&graph, "app").unwrap();
        let targets: Vec<_> = helpers.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, vec!["npm:@swc/helpers", "npm:tslib"]);
    }

    #[test]
    fn test_resolve_unknown_project() {
        let graph = graph_with(&[]);
        let err = resolve_helper_dependencies(&graph, "ghost").unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound(id) if id == "ghost"));
    }

    #[test]
    fn test_resolve_project_without_edges() {
        let graph = graph_with(&[]);
        assert!(resolve_helper_dependencies(&graph, "lib").unwrap().is_empty());
    }

    #[test]
    fn test_decision_flag_disabled() {
        assert_eq!(helper_edge_to_inject("app", false, &[]), None);
    }

    #[test]
    fn test_decision_existing_helper() {
        let existing = vec![DependencyEdge::new("app", "npm:tslib", EdgeType::Dynamic)];
        assert_eq!(helper_edge_to_inject("app", true, &existing), None);
    }

    #[test]
    fn test_decision_other_helper_does_not_count() {
        let existing = vec![DependencyEdge::new_static("app", "npm:@swc/helpers")];
        assert_eq!(
            helper_edge_to_inject("app", true, &existing),
            Some(DependencyEdge::new_static("app", "npm:tslib"))
        );
    }

    #[test]
    fn test_inject_twice_with_stale_set_adds_one_edge() {
        let mut graph = graph_with(&[("lib", EdgeType::Static)]);
        let existing = resolve_helper_dependencies(&graph, "app").unwrap();

        let first = maybe_inject_helper_dependency(&mut graph, "app", true, &existing).unwrap();
        let second = maybe_inject_helper_dependency(&mut graph, "app", true, &existing).unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        let helper_edges = graph
            .dependencies_of("app")
            .iter()
            .filter(|e| e.target == "npm:tslib")
            .count();
        assert_eq!(helper_edges, 1);
    }

    #[test]
    fn test_inject_disabled_leaves_graph_untouched() {
        let mut graph = graph_with(&[("lib", EdgeType::Static)]);
        let before = graph.clone();
        let injected = maybe_inject_helper_dependency(&mut graph, "app", false, &[]).unwrap();
        assert!(injected.is_none());
        assert_eq!(graph, before);
    }

    #[test]
    fn test_inject_noop_when_helper_already_present() {
        let mut graph = graph_with(&[("npm:tslib", EdgeType::Static)]);
        let existing = resolve_helper_dependencies(&graph, "app").unwrap();
        let before = graph.clone();
        assert!(
            maybe_inject_helper_dependency(&mut graph, "app", true, &existing)
                .unwrap()
                .is_none()
        );
        assert_eq!(graph, before);
    }

    #[test]
    fn test_inject_into_overlay() {
        let graph = graph_with(&[]);
        let mut overlay = GraphOverlay::new(&graph);
        let existing = resolve_helper_dependencies(&overlay, "app").unwrap();
        maybe_inject_helper_dependency(&mut overlay, "app", true, &existing).unwrap();

        assert_eq!(resolve_helper_dependencies(&overlay, "app").unwrap().len(), 1);
        assert!(resolve_helper_dependencies(&graph, "app").unwrap().is_empty());
    }

    #[test]
    fn test_inject_unknown_project() {
        let mut graph = graph_with(&[]);
        let err = maybe_inject_helper_dependency(&mut graph, "ghost", true, &[]).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound(_)));
    }
}

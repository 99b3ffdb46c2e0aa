//! In-memory project graph.
//!
//! The graph is built once by an external collaborator (or loaded from JSON)
//! and then shared read-only between builds. Per-build edge injection goes
//! through [`GraphOverlay`](crate::GraphOverlay) so the shared instance never
//! changes underneath a long-lived watch process.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::edge::DependencyEdge;
use crate::project::{ExternalNode, ProjectNode};
use crate::{Error, Result};

/// Read access shared by [`ProjectGraph`] and [`GraphOverlay`](crate::GraphOverlay).
pub trait GraphView {
    /// Look up a workspace project.
    fn project(&self, id: &str) -> Option<&ProjectNode>;

    /// Look up an external package node by key.
    fn external(&self, key: &str) -> Option<&ExternalNode>;

    /// Outgoing edges of `project`, in insertion order.
    fn edges(&self, project: &str) -> Box<dyn Iterator<Item = &DependencyEdge> + '_>;

    fn contains_project(&self, id: &str) -> bool {
        self.project(id).is_some()
    }
}

/// Append-only edge mutation.
pub trait GraphMut: GraphView {
    /// Append `edge` to its source's edge list.
    ///
    /// Fails with [`Error::ProjectNotFound`] for an unknown source and with
    /// [`Error::DuplicateInjection`] if the identical edge already exists.
    fn append_dependency(&mut self, edge: DependencyEdge) -> Result<()>;
}

/// Project dependency graph: projects, external packages and ordered edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphRepr", into = "GraphRepr")]
pub struct ProjectGraph {
    nodes: IndexMap<String, ProjectNode>,
    external_nodes: IndexMap<String, ExternalNode>,
    dependencies: IndexMap<String, Vec<DependencyEdge>>,
}

/// Wire shape of the graph; validated on the way into [`ProjectGraph`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphRepr {
    #[serde(default)]
    nodes: IndexMap<String, ProjectNode>,
    #[serde(default)]
    external_nodes: IndexMap<String, ExternalNode>,
    #[serde(default)]
    dependencies: IndexMap<String, Vec<DependencyEdge>>,
}

impl ProjectGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a graph from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and validate a graph from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a workspace project.
    pub fn add_project(&mut self, node: ProjectNode) -> Result<()> {
        if node.name.is_empty() {
            return Err(Error::InvalidGraph("project name cannot be empty".to_string()));
        }
        if self.external_nodes.contains_key(&node.name) {
            return Err(Error::InvalidGraph(format!(
                "'{}' is already registered as an external node",
                node.name
            )));
        }
        if self.nodes.contains_key(&node.name) {
            return Err(Error::InvalidGraph(format!(
                "project '{}' is registered twice",
                node.name
            )));
        }
        if let Some(external) = self
            .external_nodes
            .values()
            .find(|external| external.package_name() == node.name)
        {
            return Err(Error::InvalidGraph(format!(
                "project '{}' has the same name as package '{}'",
                node.name, external.name
            )));
        }
        self.nodes.insert(node.name.clone(), node);
        Ok(())
    }

    /// Add an external package node. Re-adding the same key replaces it.
    ///
    /// Neither the key nor the npm package name may equal a project id, so a
    /// manifest's `dependencies` can never list a workspace project.
    pub fn add_external(&mut self, node: ExternalNode) -> Result<()> {
        if self.nodes.contains_key(&node.name) {
            return Err(Error::InvalidGraph(format!(
                "'{}' is already registered as a project",
                node.name
            )));
        }
        if self.nodes.contains_key(node.package_name()) {
            return Err(Error::InvalidGraph(format!(
                "package '{}' has the same name as project '{}'",
                node.name,
                node.package_name()
            )));
        }
        self.external_nodes.insert(node.name.clone(), node);
        Ok(())
    }

    /// Builder-style edge insertion used while constructing a graph.
    pub fn add_dependency(&mut self, edge: DependencyEdge) -> Result<()> {
        self.append_dependency(edge)
    }

    /// All edges recorded for `project` (empty if none).
    pub fn dependencies_of(&self, project: &str) -> &[DependencyEdge] {
        self.dependencies
            .get(project)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn projects(&self) -> impl Iterator<Item = &ProjectNode> {
        self.nodes.values()
    }

    pub fn externals(&self) -> impl Iterator<Item = &ExternalNode> {
        self.external_nodes.values()
    }

    /// True when `target` names a workspace project rather than a package.
    pub fn is_internal(&self, target: &str) -> bool {
        self.nodes.contains_key(target)
    }

    pub fn project_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(Vec::len).sum()
    }
}

impl GraphView for ProjectGraph {
    fn project(&self, id: &str) -> Option<&ProjectNode> {
        self.nodes.get(id)
    }

    fn external(&self, key: &str) -> Option<&ExternalNode> {
        self.external_nodes.get(key)
    }

    fn edges(&self, project: &str) -> Box<dyn Iterator<Item = &DependencyEdge> + '_> {
        Box::new(self.dependencies_of(project).iter())
    }
}

impl GraphMut for ProjectGraph {
    fn append_dependency(&mut self, edge: DependencyEdge) -> Result<()> {
        if !self.nodes.contains_key(&edge.source) {
            return Err(Error::ProjectNotFound(edge.source));
        }
        let edges = self.dependencies.entry(edge.source.clone()).or_default();
        if edges.iter().any(|existing| existing.same_triple(&edge)) {
            return Err(Error::DuplicateInjection {
                from: edge.source,
                to: edge.target,
                edge_type: edge.edge_type,
            });
        }
        edges.push(edge);
        Ok(())
    }
}

impl TryFrom<GraphRepr> for ProjectGraph {
    type Error = Error;

    fn try_from(repr: GraphRepr) -> Result<Self> {
        let mut graph = ProjectGraph::new();

        for (key, node) in repr.nodes {
            if key != node.name {
                return Err(Error::InvalidGraph(format!(
                    "project key '{key}' does not match its name '{}'",
                    node.name
                )));
            }
            graph.add_project(node)?;
        }

        for (key, node) in repr.external_nodes {
            if key != node.name {
                return Err(Error::InvalidGraph(format!(
                    "external node key '{key}' does not match its name '{}'",
                    node.name
                )));
            }
            graph.add_external(node)?;
        }

        for (source, edges) in repr.dependencies {
            if !graph.nodes.contains_key(&source) {
                return Err(Error::InvalidGraph(format!(
                    "dependencies recorded for unknown project '{source}'"
                )));
            }
            for edge in edges {
                if edge.source != source {
                    return Err(Error::InvalidGraph(format!(
                        "edge {} -> {} is listed under '{source}'",
                        edge.source, edge.target
                    )));
                }
                graph.append_dependency(edge).map_err(|err| match err {
                    Error::DuplicateInjection { from, to, edge_type } => Error::InvalidGraph(
                        format!("duplicate {edge_type} edge {from} -> {to}"),
                    ),
                    other => other,
                })?;
            }
        }

        Ok(graph)
    }
}

impl From<ProjectGraph> for GraphRepr {
    fn from(graph: ProjectGraph) -> Self {
        GraphRepr {
            nodes: graph.nodes,
            external_nodes: graph.external_nodes,
            dependencies: graph.dependencies,
        }
    }
}

//! Per-build view over a shared graph.
//!
//! A watch-mode host keeps one [`ProjectGraph`] alive across rebuilds. Edges
//! injected while finalizing one build must not survive into the next, so
//! injections land in an overlay that is dropped with the build pass.

use indexmap::IndexMap;

use crate::edge::DependencyEdge;
use crate::graph::{GraphMut, GraphView, ProjectGraph};
use crate::project::{ExternalNode, ProjectNode};
use crate::{Error, Result};

/// Borrowed graph plus edges appended during the current build.
#[derive(Debug, Clone)]
pub struct GraphOverlay<'g> {
    base: &'g ProjectGraph,
    added: IndexMap<String, Vec<DependencyEdge>>,
}

impl<'g> GraphOverlay<'g> {
    pub fn new(base: &'g ProjectGraph) -> Self {
        Self {
            base,
            added: IndexMap::new(),
        }
    }

    /// The shared graph underneath this overlay.
    pub fn base(&self) -> &'g ProjectGraph {
        self.base
    }

    /// Edges appended through this overlay, in insertion order.
    pub fn added_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.added.values().flatten()
    }

    pub fn is_pristine(&self) -> bool {
        self.added.is_empty()
    }

    /// Materialize the overlay into an owned graph.
    pub fn to_graph(&self) -> Result<ProjectGraph> {
        let mut graph = self.base.clone();
        for edge in self.added_edges() {
            graph.append_dependency(edge.clone())?;
        }
        Ok(graph)
    }
}

impl GraphView for GraphOverlay<'_> {
    fn project(&self, id: &str) -> Option<&ProjectNode> {
        self.base.project(id)
    }

    fn external(&self, key: &str) -> Option<&ExternalNode> {
        self.base.external(key)
    }

    fn edges(&self, project: &str) -> Box<dyn Iterator<Item = &DependencyEdge> + '_> {
        let added = self.added.get(project).into_iter().flatten();
        Box::new(self.base.edges(project).chain(added))
    }
}

impl GraphMut for GraphOverlay<'_> {
    fn append_dependency(&mut self, edge: DependencyEdge) -> Result<()> {
        if !self.base.contains_project(&edge.source) {
            return Err(Error::ProjectNotFound(edge.source));
        }
        if self.edges(&edge.source).any(|existing| existing.same_triple(&edge)) {
            return Err(Error::DuplicateInjection {
                from: edge.source,
                to: edge.target,
                edge_type: edge.edge_type,
            });
        }
        self.added.entry(edge.source.clone()).or_default().push(edge);
        Ok(())
    }
}

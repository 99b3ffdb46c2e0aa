//! # pakt-graph
//!
//! Project dependency graph for manifest synthesis.
//!
//! The graph records workspace projects, the external npm packages they use,
//! and the ordered edges between them. It is produced by an external graph
//! builder, loaded here from JSON, and shared read-only between builds.
//!
//! ## Overview
//!
//! - [`ProjectGraph`]: owned graph with append-only edge insertion
//! - [`GraphOverlay`]: per-build view that collects injected edges without
//!   touching the shared graph
//! - [`resolve_helper_dependencies`] / [`maybe_inject_helper_dependency`]:
//!   compiler runtime helper handling (`tslib`, `@swc/helpers`)
//!
//! ## Quick Start
//!
//! ```rust
//! use pakt_graph::{
//!     DependencyEdge, ExternalNode, GraphOverlay, ProjectGraph, ProjectNode, ProjectType,
//!     maybe_inject_helper_dependency, resolve_helper_dependencies,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = ProjectGraph::new();
//! graph.add_project(ProjectNode::new("app", ProjectType::App))?;
//! graph.add_external(ExternalNode::npm("tslib", "2.6.2"))?;
//!
//! let mut overlay = GraphOverlay::new(&graph);
//! let existing = resolve_helper_dependencies(&overlay, "app")?;
//! let injected = maybe_inject_helper_dependency(&mut overlay, "app", true, &existing)?;
//!
//! assert_eq!(injected, Some(DependencyEdge::new_static("app", "npm:tslib")));
//! assert!(graph.dependencies_of("app").is_empty());
//! # Ok(())
//! # }
//! ```

pub mod edge;
pub mod graph;
pub mod helpers;
pub mod overlay;
pub mod project;

pub use edge::{DependencyEdge, EdgeType};
pub use graph::{GraphMut, GraphView, ProjectGraph};
pub use helpers::{
    CANONICAL_HELPER, HelperDependency, helper_edge_to_inject, maybe_inject_helper_dependency,
    resolve_helper_dependencies,
};
pub use overlay::GraphOverlay;
pub use project::{
    ExternalNode, NPM_PREFIX, ProjectMetadata, ProjectNode, ProjectType, extract_package_name,
};

use std::path::PathBuf;

/// Error types for graph operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested project is not part of the graph.
    #[error("project '{0}' not found in graph")]
    ProjectNotFound(String),

    /// An identical edge was appended twice.
    #[error("edge {from} -> {to} ({edge_type}) is already present")]
    DuplicateInjection {
        from: String,
        to: String,
        edge_type: EdgeType,
    },

    /// Structural problem in a graph being built or loaded.
    #[error("invalid project graph: {0}")]
    InvalidGraph(String),

    /// Graph file could not be read.
    #[error("failed to read graph file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Graph JSON could not be parsed.
    #[error("invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

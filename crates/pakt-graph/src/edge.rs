//! Dependency edges between projects and external packages.

use serde::{Deserialize, Serialize};

/// How a project depends on its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// A static `import`/`require` found in source.
    Static,
    /// A dynamic `import()` found in source.
    Dynamic,
    /// A declared dependency with no import behind it (build ordering,
    /// type-only references).
    Implicit,
}

impl EdgeType {
    /// Whether an edge of this type is needed when the built output runs.
    ///
    /// Static and dynamic imports execute at runtime. Implicit edges only
    /// order builds or carry type references, so they never contribute to a
    /// runtime manifest and are not followed during traversal.
    pub fn is_runtime(self) -> bool {
        match self {
            EdgeType::Static | EdgeType::Dynamic => true,
            EdgeType::Implicit => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeType::Static => "static",
            EdgeType::Dynamic => "dynamic",
            EdgeType::Implicit => "implicit",
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed edge from a project to another project or an external package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Project id the edge starts from.
    pub source: String,
    /// Project id or external node key (e.g. `npm:tslib`).
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

impl DependencyEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, edge_type: EdgeType) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            edge_type,
        }
    }

    /// Shorthand for a static edge.
    pub fn new_static(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(source, target, EdgeType::Static)
    }

    /// True when both edges describe the same (source, target, type) triple.
    pub fn same_triple(&self, other: &DependencyEdge) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.edge_type == other.edge_type
    }
}

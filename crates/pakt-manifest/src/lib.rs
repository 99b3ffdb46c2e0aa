//! # pakt-manifest
//!
//! Build-time `package.json` synthesis.
//!
//! Given the workspace [`ProjectGraph`](pakt_graph::ProjectGraph) and the
//! build options of one project, this crate derives the exact set of npm
//! packages the compiled output needs at runtime and produces a deployable
//! manifest: header fields from the project, a sorted `dependencies` map,
//! `main` defaulted to the build's entry file, and no `devDependencies`.
//!
//! ## Quick Start
//!
//! ```rust
//! use pakt_config::{BuildOptions, CompilerSettings};
//! use pakt_graph::{DependencyEdge, ExternalNode, ProjectGraph, ProjectNode, ProjectType};
//! use pakt_manifest::{ManifestRequest, finalize_build};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = ProjectGraph::new();
//! graph.add_project(ProjectNode::new("app", ProjectType::App).with_package("app", "1.0.0"))?;
//! graph.add_project(ProjectNode::new("lib", ProjectType::Lib))?;
//! graph.add_external(ExternalNode::npm("left-pad", "1.3.0"))?;
//! graph.add_dependency(DependencyEdge::new_static("app", "lib"))?;
//! graph.add_dependency(DependencyEdge::new_static("lib", "npm:left-pad"))?;
//!
//! let options = BuildOptions::new("app");
//! let compiler = CompilerSettings::default();
//! let asset = finalize_build(&graph, &ManifestRequest::new(&options, &compiler))?;
//!
//! assert_eq!(asset.filename, "package.json");
//! assert_eq!(asset.manifest.dependencies["left-pad"], "1.3.0");
//! assert_eq!(asset.manifest.main, "main.js");
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `rolldown-integration` (default): [`PackageJsonPlugin`], which emits the
//!   manifest from rolldown's `generate_bundle` hook.

pub mod error;
pub mod finalize;
pub mod manifest;
pub mod synthesize;

#[cfg(feature = "rolldown-integration")]
pub mod plugin;

pub use error::{Error, Result};
pub use finalize::{
    BuildInputs, MANIFEST_FILE_NAME, ManifestAsset, ManifestRequest, finalize_build,
};
pub use manifest::{ManifestTemplate, PackageManifest};
pub use synthesize::{
    DEFAULT_VERSION, collect_runtime_dependencies, synthesize, synthesize_with_template,
};

#[cfg(feature = "rolldown-integration")]
pub use plugin::PackageJsonPlugin;

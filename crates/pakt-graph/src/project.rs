//! Graph nodes: workspace projects and external npm packages.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix used by external node keys (`npm:left-pad`).
pub const NPM_PREFIX: &str = "npm:";

/// Kind of workspace project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Deployable application
    App,
    /// Library consumed by other projects
    #[default]
    Lib,
    /// End-to-end test project
    E2e,
}

/// Package metadata declared by a project (usually from its own package.json).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    /// Declared npm package name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Declared package version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Declared entry point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
}

/// A project inside the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNode {
    pub name: String,
    #[serde(rename = "type", default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub source_root: PathBuf,
    #[serde(default)]
    pub metadata: ProjectMetadata,
}

impl ProjectNode {
    pub fn new(name: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            name: name.into(),
            project_type,
            source_root: PathBuf::new(),
            metadata: ProjectMetadata::default(),
        }
    }

    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }

    pub fn with_package(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.metadata.package_name = Some(name.into());
        self.metadata.version = Some(version.into());
        self
    }

    pub fn with_main(mut self, main: impl Into<String>) -> Self {
        self.metadata.main = Some(main.into());
        self
    }
}

/// An external package the workspace depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalNode {
    /// Graph key, e.g. `npm:@swc/helpers`
    pub name: String,
    /// npm package name. Derived from `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Installed version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ExternalNode {
    /// Create an npm node keyed as `npm:<package>`.
    pub fn npm(package: impl Into<String>, version: impl Into<String>) -> Self {
        let package = package.into();
        Self {
            name: format!("{NPM_PREFIX}{package}"),
            package_name: Some(package),
            version: Some(version.into()),
        }
    }

    /// The npm package name this node stands for.
    pub fn package_name(&self) -> &str {
        match &self.package_name {
            Some(name) => name,
            None => extract_package_name(self.name.strip_prefix(NPM_PREFIX).unwrap_or(&self.name)),
        }
    }
}

/// Extract the base package name from an npm import specifier.
///
/// This handles scoped packages correctly:
/// - `@foo/bar` -> `@foo/bar`
/// - `@foo/bar/baz` -> `@foo/bar`
/// - `lodash` -> `lodash`
/// - `lodash/fp` -> `lodash`
///
/// # Example
///
/// ```
/// # use pakt_graph::extract_package_name;
/// assert_eq!(extract_package_name("@swc/helpers/_/_interop"), "@swc/helpers");
/// assert_eq!(extract_package_name("tslib"), "tslib");
/// ```
pub fn extract_package_name(specifier: &str) -> &str {
    if specifier.is_empty() {
        return specifier;
    }

    if specifier.starts_with('@') {
        if let Some(first_slash) = specifier.find('/') {
            if let Some(second_slash) = specifier[first_slash + 1..].find('/') {
                return &specifier[..first_slash + 1 + second_slash];
            }
        }
        return specifier;
    }

    match specifier.find('/') {
        Some(slash_idx) => &specifier[..slash_idx],
        None => specifier,
    }
}

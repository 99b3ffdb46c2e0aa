//! Build-finalize orchestration.
//!
//! [`finalize_build`] is what a bundler hook calls once per build pass:
//! resolve existing helper edges, inject the compiler helper into a
//! per-build overlay when `importHelpers` is on, synthesize, serialize.
//! The shared graph is only read.

use pakt_config::{BuildOptions, CompilerSettings};
use pakt_graph::{
    DependencyEdge, GraphOverlay, ProjectGraph, maybe_inject_helper_dependency,
    resolve_helper_dependencies,
};
use tracing::{debug, info};

use crate::error::Result;
use crate::manifest::{ManifestTemplate, PackageManifest};
use crate::synthesize::synthesize_with_template;

/// Name of the emitted asset.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Everything a single pass needs besides the graph.
#[derive(Debug, Clone, Copy)]
pub struct ManifestRequest<'a> {
    pub options: &'a BuildOptions,
    pub compiler: &'a CompilerSettings,
    pub template: Option<&'a ManifestTemplate>,
}

impl<'a> ManifestRequest<'a> {
    pub fn new(options: &'a BuildOptions, compiler: &'a CompilerSettings) -> Self {
        Self {
            options,
            compiler,
            template: None,
        }
    }

    pub fn with_template(mut self, template: Option<&'a ManifestTemplate>) -> Self {
        self.template = template;
        self
    }
}

/// Inputs read from disk by the adapters before calling [`finalize_build`].
#[derive(Debug, Clone, Default)]
pub struct BuildInputs {
    pub compiler: CompilerSettings,
    pub template: Option<ManifestTemplate>,
}

impl BuildInputs {
    /// Load the compiler settings and optional template named by `options`.
    ///
    /// Unreadable or invalid files surface as
    /// [`Error::Malformed`](crate::Error::Malformed).
    pub fn load(options: &BuildOptions) -> Result<Self> {
        let compiler = CompilerSettings::load(&options.ts_config)?;
        let template = options
            .template
            .as_deref()
            .map(ManifestTemplate::from_path)
            .transpose()?;
        Ok(Self { compiler, template })
    }

    pub fn request<'a>(&'a self, options: &'a BuildOptions) -> ManifestRequest<'a> {
        ManifestRequest::new(options, &self.compiler).with_template(self.template.as_ref())
    }
}

/// The serialized manifest, ready to hand to the bundler's asset list.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestAsset {
    pub filename: String,
    pub source: String,
    pub manifest: PackageManifest,
    /// Helper edge added for this pass, if any
    pub injected: Option<DependencyEdge>,
}

/// Run one build-finalize pass for `request.options.project`.
///
/// Any error aborts the pass; nothing is emitted. An existing helper edge of
/// any type, `implicit` included, counts as already depending on the helper.
pub fn finalize_build(
    graph: &ProjectGraph,
    request: &ManifestRequest<'_>,
) -> Result<ManifestAsset> {
    let project = request.options.project.as_str();
    let import_helpers = request.compiler.import_helpers();

    let mut overlay = GraphOverlay::new(graph);
    let existing = resolve_helper_dependencies(&overlay, project)?;
    debug!(project, existing = existing.len(), import_helpers, "resolved helper dependencies");

    let injected =
        maybe_inject_helper_dependency(&mut overlay, project, import_helpers, &existing)?;

    let manifest = synthesize_with_template(project, &overlay, request.options, request.template)?;
    let source = manifest.to_json_string()?;

    info!(
        project,
        dependencies = manifest.dependencies.len(),
        "emitting {MANIFEST_FILE_NAME}"
    );

    Ok(ManifestAsset {
        filename: MANIFEST_FILE_NAME.to_string(),
        source,
        manifest,
        injected,
    })
}

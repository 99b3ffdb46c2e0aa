//! Rolldown plugin that emits `package.json` alongside the bundle.
//!
//! The plugin runs in `generate_bundle`, after chunks are rendered and before
//! anything is written, and hands the manifest to rolldown as an asset.

use std::borrow::Cow;
use std::sync::Arc;

use pakt_config::BuildOptions;
use pakt_graph::{GraphView, ProjectGraph};
use rolldown_common::{Output, OutputAsset};
use rolldown_plugin::{HookGenerateBundleArgs, HookNoopReturn, HookUsage, Plugin, PluginContext};
use tracing::warn;

use crate::error::Error;
use crate::finalize::{BuildInputs, MANIFEST_FILE_NAME, ManifestAsset, finalize_build};

/// Emits the synthesized manifest of one project on every build pass.
///
/// The graph is shared and never modified; watch-mode rebuilds can reuse the
/// same plugin instance.
#[derive(Debug, Clone)]
pub struct PackageJsonPlugin {
    graph: Arc<ProjectGraph>,
    options: Arc<BuildOptions>,
}

impl PackageJsonPlugin {
    pub fn new(graph: Arc<ProjectGraph>, options: BuildOptions) -> Self {
        Self {
            graph,
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Run one pass without rolldown; compiler settings and template are
    /// read from disk every time.
    pub fn render(&self) -> crate::Result<ManifestAsset> {
        if !self.graph.contains_project(&self.options.project) {
            return Err(Error::NotFound(self.options.project.clone()));
        }
        let inputs = BuildInputs::load(&self.options)?;
        finalize_build(&self.graph, &inputs.request(&self.options))
    }
}

impl Plugin for PackageJsonPlugin {
    fn name(&self) -> Cow<'static, str> {
        "pakt-package-json".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::GenerateBundle
    }

    fn generate_bundle(
        &self,
        _ctx: &PluginContext,
        args: &mut HookGenerateBundleArgs<'_>,
    ) -> impl std::future::Future<Output = HookNoopReturn> + Send {
        let plugin = self.clone();

        async move {
            if has_manifest(args.bundle.iter()) {
                warn!(
                    project = %plugin.options.project,
                    "bundle already contains {MANIFEST_FILE_NAME}, not emitting another"
                );
                return Ok(());
            }

            let asset = plugin.render()?;
            args.bundle.push(to_output(asset));
            Ok(())
        }
    }
}

/// True when a `package.json` asset is already part of the bundle.
pub fn has_manifest<'a>(mut bundle: impl Iterator<Item = &'a Output>) -> bool {
    bundle.any(|output| match output {
        Output::Asset(asset) => asset.filename.as_str() == MANIFEST_FILE_NAME,
        Output::Chunk(_) => false,
    })
}

/// Wrap a manifest as a rolldown asset.
pub fn to_output(asset: ManifestAsset) -> Output {
    let asset = OutputAsset {
        names: vec![],
        original_file_names: vec![],
        filename: asset.filename.into(),
        source: asset.source.into(),
    };
    Output::Asset(Arc::new(asset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finalize::ManifestRequest;
    use pakt_config::CompilerSettings;
    use pakt_graph::{ProjectNode, ProjectType};
    use std::fs;

    fn graph() -> Arc<ProjectGraph> {
        let mut graph = ProjectGraph::new();
        graph
            .add_project(ProjectNode::new("api", ProjectType::App).with_package("api", "0.1.0"))
            .unwrap();
        Arc::new(graph)
    }

    #[test]
    fn test_plugin_name() {
        let plugin = PackageJsonPlugin::new(graph(), BuildOptions::new("api"));
        assert_eq!(plugin.name(), "pakt-package-json");
    }

    #[test]
    fn test_detects_existing_manifest() {
        let graph = graph();
        let options = BuildOptions::new("api");
        let settings = CompilerSettings::default();
        let asset = finalize_build(&graph, &ManifestRequest::new(&options, &settings)).unwrap();

        let bundle = vec![to_output(asset)];
        assert!(has_manifest(bundle.iter()));
        assert!(!has_manifest(std::iter::empty()));
    }

    #[test]
    fn test_render_reads_tsconfig_each_pass() {
        let dir = tempfile::TempDir::new().unwrap();
        let tsconfig = dir.path().join("tsconfig.json");
        fs::write(&tsconfig, r#"{ "compilerOptions": {} }"#).unwrap();

        let plugin = PackageJsonPlugin::new(graph(), BuildOptions::new("api").ts_config(&tsconfig));
        let asset = plugin.render().unwrap();
        assert_eq!(asset.manifest.main, "main.js");
        assert!(asset.manifest.dependencies.is_empty());

        fs::remove_file(&tsconfig).unwrap();
        assert!(plugin.render().is_err());
    }

    #[test]
    fn test_unknown_project_reported_before_tsconfig() {
        let dir = tempfile::TempDir::new().unwrap();
        let options = BuildOptions::new("ghost").ts_config(dir.path().join("missing.json"));
        let plugin = PackageJsonPlugin::new(graph(), options);

        let err = plugin.render().unwrap_err();
        assert!(matches!(err, Error::NotFound(ref id) if id == "ghost"));
    }
}

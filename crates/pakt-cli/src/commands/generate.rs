//! Generate command implementation.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use pakt_config::BuildOptions;
use pakt_graph::{GraphView, ProjectGraph};
use pakt_manifest::{BuildInputs, ManifestAsset, finalize_build};
use tracing::{debug, info};

use crate::cli::GenerateArgs;
use crate::error::{CliError, Result};

/// Execute the generate command.
///
/// 1. Layer build options (defaults, config file, `PAKT_*`, flags)
/// 2. Load the graph, compiler settings and template
/// 3. Run one finalize pass
/// 4. Write `<output_path>/package.json`, or print it with `--dry-run`
pub fn execute(args: GenerateArgs) -> Result<()> {
    let cwd = env::current_dir().map_err(CliError::CurrentDir)?;
    let (options, asset) = run(&cwd, &args)?;

    if args.dry_run {
        print!("{}", asset.source);
        return Ok(());
    }

    let path = write_manifest(&options.output_path, &asset)?;
    info!(
        project = %options.project,
        path = %path.display(),
        dependencies = asset.manifest.dependencies.len(),
        "wrote manifest"
    );
    Ok(())
}

/// Load every input relative to `cwd` and synthesize the manifest.
pub fn run(cwd: &Path, args: &GenerateArgs) -> Result<(BuildOptions, ManifestAsset)> {
    let options = BuildOptions::load(cwd, args.config.as_deref(), &args.overrides())?;
    debug!(?options, "resolved build options");

    let graph_path = options.graph.as_deref().ok_or_else(|| {
        CliError::invalid_argument(
            "no project graph given",
            "pass --graph <FILE> or set `graph` in pakt.toml",
        )
    })?;
    let graph = ProjectGraph::from_json_file(&resolve(cwd, graph_path))?;
    debug!(
        projects = graph.project_count(),
        edges = graph.edge_count(),
        "loaded project graph"
    );

    if !graph.contains_project(&options.project) {
        return Err(pakt_manifest::Error::NotFound(options.project.clone()).into());
    }

    let options = BuildOptions {
        ts_config: resolve(cwd, &options.ts_config),
        output_path: resolve(cwd, &options.output_path),
        template: options.template.as_deref().map(|p| resolve(cwd, p)),
        ..options
    };

    let inputs = BuildInputs::load(&options)?;
    let asset = finalize_build(&graph, &inputs.request(&options))?;
    Ok((options, asset))
}

fn write_manifest(output_path: &Path, asset: &ManifestAsset) -> Result<PathBuf> {
    fs::create_dir_all(output_path).map_err(|source| CliError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;
    let path = output_path.join(&asset.filename);
    fs::write(&path, &asset.source).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

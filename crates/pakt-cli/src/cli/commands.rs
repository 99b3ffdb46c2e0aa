use clap::{Args, Subcommand};
use std::path::PathBuf;

use pakt_config::BuildOptionsOverrides;

/// Available pakt subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate package.json for a project
    ///
    /// Walks the project graph from the project, collects every external
    /// package it needs at runtime, adds the TypeScript helper library when
    /// `importHelpers` is on, and writes `<output-path>/package.json`.
    Generate(GenerateArgs),

    /// List compiler helper dependencies of a project
    ///
    /// Prints the project's edges to `tslib` / `@swc/helpers`, and with
    /// `--ts-config` the edge that a build would inject.
    Helpers(HelpersArgs),
}

/// Arguments for the generate command
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Project id in the graph
    #[arg(short, long, value_name = "ID")]
    pub project: Option<String>,

    /// Serialized project graph (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// TypeScript config of the project
    #[arg(long, value_name = "FILE")]
    pub ts_config: Option<PathBuf>,

    /// Entry file used as `main` when the project declares none
    #[arg(long, value_name = "NAME")]
    pub output_file_name: Option<String>,

    /// Directory to write package.json into
    #[arg(short, long, value_name = "DIR")]
    pub output_path: Option<PathBuf>,

    /// The project's own package.json to merge under the generated one
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Config file (defaults to pakt.toml / pakt.json in the working directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the manifest instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Flags that take precedence over config files and environment.
    pub fn overrides(&self) -> BuildOptionsOverrides {
        BuildOptionsOverrides {
            project: self.project.clone(),
            ts_config: self.ts_config.clone(),
            output_file_name: self.output_file_name.clone(),
            output_path: self.output_path.clone(),
            graph: self.graph.clone(),
            template: self.template.clone(),
        }
    }
}

/// Arguments for the helpers command
#[derive(Args, Debug)]
pub struct HelpersArgs {
    /// Project id in the graph
    #[arg(short, long, value_name = "ID")]
    pub project: String,

    /// Serialized project graph (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub graph: PathBuf,

    /// TypeScript config; when given, also report the edge a build would inject
    #[arg(long, value_name = "FILE")]
    pub ts_config: Option<PathBuf>,
}

//! Build options consumed by manifest synthesis.
//!
//! Options are layered with figment. Priority, lowest first:
//! defaults < `pakt.toml` / `pakt.json` < `PAKT_*` environment < overrides.

use std::path::{Component, Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};

pub const DEFAULT_OUTPUT_FILE_NAME: &str = "main.js";
pub const DEFAULT_OUTPUT_PATH: &str = "dist";
pub const DEFAULT_TS_CONFIG: &str = "tsconfig.json";

/// Config file names searched by [`BuildOptions::discover`], in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["pakt.toml", "pakt.json"];

/// Options read once per build. Immutable for the duration of the build.
///
/// Keys are snake_case in every source so config files, `PAKT_*` variables
/// and overrides land on the same figment keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Project id in the graph the manifest is generated for
    #[serde(default)]
    pub project: String,

    /// Path to the compiler settings (tsconfig) of the project
    pub ts_config: PathBuf,

    /// Entry file used as `main` when the project declares none
    pub output_file_name: String,

    /// Directory the build writes its assets to
    pub output_path: PathBuf,

    /// Serialized project graph, for hosts that load it from disk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<PathBuf>,

    /// Base package.json merged under the generated manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            project: String::new(),
            ts_config: PathBuf::from(DEFAULT_TS_CONFIG),
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            graph: None,
            template: None,
        }
    }
}

/// Values that take precedence over every other source (CLI flags).
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildOptionsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts_config: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl BuildOptions {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Self::default()
        }
    }

    pub fn ts_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.ts_config = path.into();
        self
    }

    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    /// Find a config file in `root`.
    pub fn discover(root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
    }

    /// Load options from all sources and validate them.
    ///
    /// `config_path` is used when given (it must exist); otherwise `root` is
    /// searched with [`BuildOptions::discover`].
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        overrides: &BuildOptionsOverrides,
    ) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(root),
        };

        if let Some(path) = config_file {
            debug!(path = %path.display(), "loading build options");
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(&path)),
                _ => figment.merge(Toml::file(&path)),
            };
        }

        figment = figment
            .merge(Env::prefixed("PAKT_"))
            .merge(Serialized::defaults(overrides));

        let options: Self = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "options".to_string(),
            hint: Some(e.to_string()),
        })?;

        options.validate()?;
        Ok(options)
    }

    /// Check field-level invariants.
    pub fn validate(&self) -> Result<()> {
        if self.project.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "project".to_string(),
                hint: Some("name the project to generate a manifest for".to_string()),
            });
        }

        let file_name = Path::new(&self.output_file_name);
        if self.output_file_name.is_empty()
            || file_name.is_absolute()
            || file_name
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ConfigError::InvalidValue {
                field: "output_file_name".to_string(),
                hint: Some(format!(
                    "'{}' must be a relative path inside the output directory",
                    self.output_file_name
                )),
            });
        }

        Ok(())
    }
}

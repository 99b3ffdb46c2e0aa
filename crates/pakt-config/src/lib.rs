//! Configuration for pakt: build options and TypeScript compiler settings.

pub mod compiler;
pub mod error;
pub mod options;

pub use compiler::{CompilerSettings, strip_jsonc};
pub use error::{ConfigError, Result};
pub use options::{
    BuildOptions, BuildOptionsOverrides, CONFIG_FILE_NAMES, DEFAULT_OUTPUT_FILE_NAME,
    DEFAULT_OUTPUT_PATH, DEFAULT_TS_CONFIG,
};

//! Pakt CLI - generate runtime `package.json` files from a project graph.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - `commands` - one module per subcommand
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use pakt_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, true, true);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;

pub use error::{CliError, Result};

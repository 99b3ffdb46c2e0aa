//! Command implementations.
//!
//! - [`generate`] - synthesize and write package.json
//! - [`helpers`] - inspect compiler helper edges

pub mod generate;
pub mod helpers;

pub use generate::execute as generate_execute;
pub use helpers::execute as helpers_execute;

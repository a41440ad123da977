//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod parse;
pub mod utils;

// Re-export main command functions
pub use models::{OutputFormat, ParseArgs};
pub use parse::{execute_parse, execute_parse_to, validate_args};
pub use utils::{display_types, display_version};

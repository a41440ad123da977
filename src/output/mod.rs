//! Output renderers for a read result.
//!
//! This module renders a model to any writer:
//! - JSON (pretty)
//! - Text listing with a summary line

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{model_to_string, write_model_json};
pub use text::{format_event, write_model_text};

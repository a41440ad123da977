use clap::ValueEnum;
use std::path::PathBuf;

/// How the parse command renders the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the parse command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ParseArgs {
    /// G1 log written with -XX:+PrintGCDetails
    pub input: PathBuf,

    /// Rendering of the model on stdout
    pub format: OutputFormat,

    /// Fail when any line had to be skipped
    pub strict: bool,
}

impl Default for ParseArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("gc.log"),
            format: OutputFormat::Text,
            strict: false,
        }
    }
}

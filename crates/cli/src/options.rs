use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Print `done!` on success
    #[default]
    Text,
    /// Print a JSON report of every rewritten file
    Json,
}

/// Handling of bytes that are not valid UTF-8
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Abort on the first invalid byte
    Strict,
    /// Drop invalid bytes
    #[default]
    Skip,
    /// Replace invalid bytes with U+FFFD
    Replace,
}

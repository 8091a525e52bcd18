use crate::options::{DecodePolicy, TextEncoding};
use derive_builder::Builder;
use std::path::PathBuf;

/// A literal line prefix and the text written after it on a matching line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub prefix: String,
    pub suffix: String,
}

impl Replacement {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

/// One file to rewrite, relative to the project root.
///
/// Replacements are scanned in order; the first prefix that matches a line
/// wins.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Target {
    pub label: String,
    pub path: PathBuf,
    #[builder(default)]
    pub encoding: TextEncoding,
    #[builder(default)]
    pub decode: DecodePolicy,
    #[builder(default)]
    pub replacements: Vec<Replacement>,
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct Config {
    /// Directory every target path is resolved against.
    #[builder(default = "PathBuf::from(\".\")")]
    pub root: PathBuf,
    #[builder(default)]
    pub targets: Vec<Target>,
    #[builder(default)]
    pub dry_run: bool,
}

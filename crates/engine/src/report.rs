use serde::Serialize;
use std::path::PathBuf;

/// What happened to one target file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub label: String,
    pub path: PathBuf,
    pub lines: usize,
    pub replaced: usize,
    pub changed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// Total number of lines replaced across all files.
    #[must_use]
    pub fn replaced(&self) -> usize {
        self.files.iter().map(|f| f.replaced).sum()
    }
}

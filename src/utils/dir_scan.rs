use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::patch::{PatchError, DEFAULT_SUFFIX};

/// Selects which files in a directory a run touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Exact file names to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

impl FileFilter {
    pub fn new(suffix: impl Into<String>) -> Self {
        FileFilter {
            suffix: suffix.into(),
            exclude: Vec::new(),
        }
    }

    pub fn excluding(mut self, name: impl Into<String>) -> Self {
        self.exclude.push(name.into());
        self
    }

    pub fn matches(&self, name: &str) -> bool {
        name.ends_with(&self.suffix) && !self.exclude.iter().any(|e| e == name)
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        FileFilter::new(DEFAULT_SUFFIX)
    }
}

/// List all file names (not paths) in a directory.
/// Only returns regular files, not subdirectories.
pub fn list_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;

        if file_type.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                files.push(name.to_string());
            }
        }
    }

    files.sort();
    Ok(files)
}

/// List the files in `dir` (non-recursive) accepted by `filter`, sorted by name.
pub fn scan(dir: &Path, filter: &FileFilter) -> Result<Vec<String>, PatchError> {
    let files = list_files(dir).map_err(|e| PatchError::ScanFailed {
        dir: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let (matched, skipped): (Vec<String>, Vec<String>) =
        files.into_iter().partition(|name| filter.matches(name));

    debug!(
        "scanned {}: {} matched, {} skipped",
        dir.display(),
        matched.len(),
        skipped.len()
    );

    Ok(matched)
}

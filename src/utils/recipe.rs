use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::patch::{ConditionalRule, MarkerRule};
use crate::utils::dir_scan::FileFilter;

/// The rewrite a recipe performs on every selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Rule {
    Marker(MarkerRule),
    Conditional(ConditionalRule),
}

/// One patch run: where to look, which files, and what to rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Directory to patch. May be left out and given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    #[serde(flatten)]
    pub filter: FileFilter,
    pub rule: Rule,
}

impl Recipe {
    pub fn load(path: &Path) -> io::Result<Recipe> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn to_json(&self) -> io::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

pub mod conditional_apply;
pub mod marker_apply;
pub mod preset;
pub mod recipe_run;

use std::fmt;

use crate::patch::RewriteAction;

/// Reported once per file a run has written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Marker found and block replaced
    Fixed { file: String },
    /// File rewritten by the conditional patcher, whether or not it changed
    Updated {
        file: String,
        action: RewriteAction,
        label: Option<String>,
    },
}

impl Status {
    pub fn file(&self) -> &str {
        match self {
            Status::Fixed { file } => file,
            Status::Updated { file, .. } => file,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Fixed { file } => write!(f, "✅ Fixed {}", file),
            Status::Updated { file, label: None, .. } => write!(f, "✅ Updated {}", file),
            Status::Updated { file, label: Some(label), .. } => {
                write!(f, "✅ Updated {} in {}", label, file)
            }
        }
    }
}

use std::fmt;

/// Error type for patch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// Target directory could not be listed
    ScanFailed { dir: String, reason: String },
    /// File could not be read
    ReadFailed { file: String, reason: String },
    /// File could not be written back
    WriteFailed { file: String, reason: String },
    /// Block pattern is not a valid regular expression
    InvalidPattern { pattern: String, reason: String },
    /// Recipe could not be loaded or is incomplete
    RecipeError { reason: String },
    /// No built-in preset with this name
    UnknownPreset(String),
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::ScanFailed { dir, reason } => {
                write!(f, "failed to scan directory '{}': {}", dir, reason)
            }
            PatchError::ReadFailed { file, reason } => {
                write!(f, "failed to read '{}': {}", file, reason)
            }
            PatchError::WriteFailed { file, reason } => {
                write!(f, "failed to write '{}': {}", file, reason)
            }
            PatchError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid block pattern '{}': {}", pattern, reason)
            }
            PatchError::RecipeError { reason } => {
                write!(f, "recipe error: {}", reason)
            }
            PatchError::UnknownPreset(name) => {
                write!(f, "unknown preset '{}'", name)
            }
        }
    }
}

impl std::error::Error for PatchError {}

use std::fs;
use std::path::Path;

use log::debug;
use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::patch::constants::INSERT_SEPARATOR;
use crate::patch::error::PatchError;
use crate::utils::hash::hash_bytes;

/// Insert a method when it is missing, or replace it when it is already there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalRule {
    /// Text whose presence anywhere in the file means the method exists.
    pub signature: String,
    /// Neighbouring method openings to insert before, in order of preference.
    pub anchors: Vec<String>,
    /// Span of the existing method. Compiled with `.` matching newlines.
    pub pattern: String,
    pub replacement: String,
    /// What the method is, for status lines (`Updated <label> in <file>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// What a rewrite did to the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteAction {
    /// Replacement inserted before the first occurrence of this anchor
    Inserted { anchor: String },
    /// First pattern match replaced
    Replaced,
    /// No anchor or pattern match; text is unchanged
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub action: RewriteAction,
}

/// A [`ConditionalRule`] with its pattern compiled.
#[derive(Debug, Clone)]
pub struct ConditionalPatcher {
    rule: ConditionalRule,
    pattern: Regex,
}

impl ConditionalPatcher {
    pub fn new(rule: ConditionalRule) -> Result<Self, PatchError> {
        let pattern = RegexBuilder::new(&rule.pattern)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| PatchError::InvalidPattern {
                pattern: rule.pattern.clone(),
                reason: e.to_string(),
            })?;
        Ok(ConditionalPatcher { rule, pattern })
    }

    pub fn rule(&self) -> &ConditionalRule {
        &self.rule
    }

    pub fn rewrite(&self, content: &str) -> Rewrite {
        let rule = &self.rule;

        if !content.contains(&rule.signature) {
            let anchor = rule.anchors.iter().find(|a| content.contains(a.as_str()));
            return match anchor {
                Some(anchor) => {
                    let insertion = format!("{}{}{}", rule.replacement, INSERT_SEPARATOR, anchor);
                    Rewrite {
                        content: content.replacen(anchor.as_str(), &insertion, 1),
                        action: RewriteAction::Inserted { anchor: anchor.clone() },
                    }
                }
                None => Rewrite {
                    content: content.to_string(),
                    action: RewriteAction::Unchanged,
                },
            };
        }

        if !self.pattern.is_match(content) {
            return Rewrite {
                content: content.to_string(),
                action: RewriteAction::Unchanged,
            };
        }

        Rewrite {
            content: self
                .pattern
                .replacen(content, 1, NoExpand(&rule.replacement))
                .into_owned(),
            action: RewriteAction::Replaced,
        }
    }

    /// Rewrite the file at `path`. The file is always written back, even when
    /// the text did not change.
    pub fn patch_file(&self, path: &Path) -> Result<RewriteAction, PatchError> {
        let file = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| PatchError::ReadFailed {
            file: file.clone(),
            reason: e.to_string(),
        })?;

        let rewrite = self.rewrite(&content);
        debug!(
            "{}: {:?}, {} -> {}",
            file,
            rewrite.action,
            hash_bytes(content.as_bytes()),
            hash_bytes(rewrite.content.as_bytes())
        );

        fs::write(path, rewrite.content).map_err(|e| PatchError::WriteFailed {
            file,
            reason: e.to_string(),
        })?;

        Ok(rewrite.action)
    }
}

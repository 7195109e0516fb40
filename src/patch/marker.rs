use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::patch::constants::CLOSING_BRACE;
use crate::patch::error::PatchError;
use crate::utils::hash::hash_bytes;

/// How the end of a marked block is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockEnd {
    /// First line after the marker whose trimmed content is a lone `}`.
    /// A nested block closing on its own line ends the match early.
    #[default]
    LoneBrace,
    /// Line on which the brace depth opened by the block returns to zero.
    /// Braces inside strings and comments are counted too.
    Balanced,
}

/// Replace the method whose opening line contains `marker`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRule {
    pub marker: String,
    pub replacement: String,
    #[serde(default)]
    pub block_end: BlockEnd,
}

impl MarkerRule {
    pub fn new(marker: impl Into<String>, replacement: impl Into<String>) -> Self {
        MarkerRule {
            marker: marker.into(),
            replacement: replacement.into(),
            block_end: BlockEnd::default(),
        }
    }

    pub fn with_block_end(mut self, block_end: BlockEnd) -> Self {
        self.block_end = block_end;
        self
    }
}

fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

/// Tracks the block currently being dropped.
#[derive(Clone, Copy)]
enum Block {
    Outside,
    /// Lone-brace rule: waiting for a `}` line.
    Open,
    /// Balanced rule: current depth, and whether an opening brace was seen yet.
    Nested { depth: i64, opened: bool },
}

/// Rewrite `content` line by line, replacing the marked block.
///
/// Lines keep their original terminators. The marker line itself is replaced by
/// `rule.replacement` followed by a newline; every following line up to and
/// including the closing line is dropped. Returns `None` when no line contains
/// the marker.
pub fn replace_marked_block(content: &str, rule: &MarkerRule) -> Option<String> {
    let mut output = String::with_capacity(content.len());
    let mut block = Block::Outside;
    let mut found = false;

    for line in content.split_inclusive('\n') {
        match block {
            Block::Outside => {
                if !line.contains(&rule.marker) {
                    output.push_str(line);
                    continue;
                }
                output.push_str(&rule.replacement);
                output.push('\n');
                found = true;
                block = match rule.block_end {
                    BlockEnd::LoneBrace => Block::Open,
                    BlockEnd::Balanced => {
                        let depth = brace_delta(line);
                        let opened = line.contains('{');
                        if opened && depth <= 0 {
                            Block::Outside
                        } else {
                            Block::Nested { depth, opened }
                        }
                    }
                };
            }
            Block::Open => {
                if line.trim() == CLOSING_BRACE {
                    block = Block::Outside;
                }
            }
            Block::Nested { depth, opened } => {
                let depth = depth + brace_delta(line);
                let opened = opened || line.contains('{');
                block = if opened && depth <= 0 {
                    Block::Outside
                } else {
                    Block::Nested { depth, opened }
                };
            }
        }
    }

    found.then_some(output)
}

/// Apply `rule` to the file at `path`.
///
/// The file is only written when the marker was found. Returns whether it was.
pub fn patch_file(path: &Path, rule: &MarkerRule) -> Result<bool, PatchError> {
    let file = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| PatchError::ReadFailed {
        file: file.clone(),
        reason: e.to_string(),
    })?;

    let Some(patched) = replace_marked_block(&content, rule) else {
        debug!("marker not found in {}", file);
        return Ok(false);
    };

    debug!(
        "{}: {} -> {}",
        file,
        hash_bytes(content.as_bytes()),
        hash_bytes(patched.as_bytes())
    );

    fs::write(path, patched).map_err(|e| PatchError::WriteFailed {
        file,
        reason: e.to_string(),
    })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const REPLACEMENT: &str = "  a() {\n    return 1;\n  }";

    #[test]
    fn replaces_block_with_brace_on_next_line() {
        let rule = MarkerRule::new("a()", "<replacement>");

        let result = replace_marked_block("a()\n{\n  x\n}\n", &rule).unwrap();

        assert_eq!(result, "<replacement>\n");
    }

    #[test]
    fn keeps_surrounding_lines() {
        let content = "class C {\n  a() {\n    old();\n  }\n\n  b() {}\n}\n";
        let rule = MarkerRule::new("a() {", REPLACEMENT);

        let result = replace_marked_block(content, &rule).unwrap();

        assert_eq!(
            result,
            "class C {\n  a() {\n    return 1;\n  }\n\n  b() {}\n}\n"
        );
    }

    #[test]
    fn missing_marker_returns_none() {
        let rule = MarkerRule::new("missing()", REPLACEMENT);

        assert!(replace_marked_block("class C {\n  a() {}\n}\n", &rule).is_none());
    }

    #[test]
    fn nested_lone_brace_truncates_block() {
        let content = "  a() {\n    if (x) {\n      y();\n    }\n    z();\n  }\n}\n";
        let rule = MarkerRule::new("a() {", "NEW");

        let result = replace_marked_block(content, &rule).unwrap();

        // The nested `}` closes the block; the rest of the old body survives.
        assert_eq!(result, "NEW\n    z();\n  }\n}\n");
    }

    #[test]
    fn balanced_rule_skips_nested_blocks() {
        let content = "  a() {\n    if (x) {\n      y();\n    }\n    z();\n  }\n}\n";
        let rule = MarkerRule::new("a() {", "NEW").with_block_end(BlockEnd::Balanced);

        let result = replace_marked_block(content, &rule).unwrap();

        assert_eq!(result, "NEW\n}\n");
    }

    #[test]
    fn balanced_rule_waits_for_opening_brace() {
        let rule = MarkerRule::new("a()", "NEW").with_block_end(BlockEnd::Balanced);

        let result = replace_marked_block("a()\n{\n  x\n}\ntail\n", &rule).unwrap();

        assert_eq!(result, "NEW\ntail\n");
    }

    #[test]
    fn balanced_rule_single_line_method() {
        let rule = MarkerRule::new("a()", "NEW").with_block_end(BlockEnd::Balanced);

        let result = replace_marked_block("a() { return; }\nnext\n", &rule).unwrap();

        assert_eq!(result, "NEW\nnext\n");
    }

    #[test]
    fn preserves_crlf_outside_block() {
        let rule = MarkerRule::new("a()", "NEW");

        let result = replace_marked_block("x\r\na()\r\n}\r\ny\r\n", &rule).unwrap();

        assert_eq!(result, "x\r\nNEW\ny\r\n");
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let content = "class C {\n  a() {\n    old();\n  }\n}\n";
        let rule = MarkerRule::new("a() {", REPLACEMENT);

        let once = replace_marked_block(content, &rule).unwrap();
        let twice = replace_marked_block(&once, &rule).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn patch_file_rewrites_when_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("socket.ts");
        fs::write(&path, "a()\n{\n  x\n}\n").unwrap();

        let found = patch_file(&path, &MarkerRule::new("a()", "NEW")).unwrap();

        assert!(found);
        assert_eq!(fs::read_to_string(&path).unwrap(), "NEW\n");
    }

    #[test]
    fn patch_file_leaves_unmatched_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("socket.ts");
        fs::write(&path, "b()\n{\n}\n").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let found = patch_file(&path, &MarkerRule::new("a()", "NEW")).unwrap();

        assert!(!found);
        assert_eq!(fs::read_to_string(&path).unwrap(), "b()\n{\n}\n");
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn patch_file_missing_file_returns_read_error() {
        let dir = tempdir().unwrap();

        let result = patch_file(&dir.path().join("missing.ts"), &MarkerRule::new("a()", "NEW"));

        assert!(matches!(result, Err(PatchError::ReadFailed { .. })));
    }
}

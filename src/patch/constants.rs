/// Filename suffix of the files a run patches when none is given
pub const DEFAULT_SUFFIX: &str = ".ts";
/// Trimmed content of the line that closes a block under the lone-brace rule
pub const CLOSING_BRACE: &str = "}";
/// Placed between an inserted block and the anchor it precedes: a blank line,
/// then the member indentation the anchor had before insertion.
pub const INSERT_SEPARATOR: &str = "\n\n  ";

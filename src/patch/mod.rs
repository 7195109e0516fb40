pub mod conditional;
mod constants;
mod error;
pub mod marker;
pub mod presets;

// Re-export public items
pub use conditional::{ConditionalPatcher, ConditionalRule, Rewrite, RewriteAction};
pub use constants::{CLOSING_BRACE, DEFAULT_SUFFIX, INSERT_SEPARATOR};
pub use error::PatchError;
pub use marker::{BlockEnd, MarkerRule, replace_marked_block};

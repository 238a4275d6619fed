//! # Inline Parsing
//!
//! Cursor-based inline parsing with explicit raw zones.
//!
//! ## Architecture
//!
//! Inline parsing runs after block parsing and only over text that blocks
//! hand it: paragraph lines, heading text, list item bodies and blockquote
//! lines. Code blocks never reach it.
//!
//! The parser walks the text once and at every position tries the
//! constructs in precedence order:
//! - Code spans are raw zones: nothing inside them is parsed, and closing
//!   delimiters of other constructs are never searched for inside them
//! - Links (`[label](url)`), whose label is parsed again without links
//! - Strong (`**text**`) before emphasis (`*text*`), so a bold marker can
//!   never be half-consumed as italic
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode` tree
//! - **`kinds`**: Inline-specific types with owned delimiters
//! - **`cursor`**: `Cursor` for byte-by-byte scanning with position tracking
//! - **`parser`**: `parse_inline()` main entry point with `try_parse_*` helpers

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::{InlineNode, plain_text};

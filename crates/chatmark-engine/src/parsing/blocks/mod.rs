//! # Block Parsing
//!
//! Two-phase, line-based block parsing.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a `LineClass`
//!    containing local facts (indentation-free remainder, blank status, fence detection)
//!
//! 2. **Block Construction** (`builder`): A `BlockBuilder` keeps one open leaf
//!    (paragraph or list run) plus an optional open fence, and emits `BlockNode`s
//!    as they close. Inline parsing happens when a block is emitted.
//!
//! ## Modules
//!
//! - **`types`**: Core types (`BlockNode`, `BlockKind`, `List`, `ListItem`, `ItemBody`)
//! - **`kinds`**: Block-specific types with owned delimiters (BlockQuote, CodeFence, Heading, ListMarker)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`open`**: `try_open_leaf` dispatch for detecting block openers
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - Fenced code blocks are raw zones: no block/inline parsing inside
//! - An unterminated fence is not a code block; its lines are parsed as if
//!   the fence line were ordinary text
//! - Lists and quotes are never emitted inside a paragraph
//! - No empty paragraph is ever emitted

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use types::{BlockKind, BlockNode, ItemBody, List, ListItem, ListKind};

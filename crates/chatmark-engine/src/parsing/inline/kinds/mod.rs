//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `TICK = b'\`'` - raw zone that suppresses other parsing
//! - **`Emphasis`**: `STRONG = b"**"`, `STAR = b'*'`
//! - **`Link`**: `OPEN = b'['`, `LABEL_CLOSE = b']'`, `URL_OPEN = b'('`, `CLOSE = b')'`
//!
//! The parser calls these constants; it never hardcodes `**` or `` ` ``.

pub mod code_span;
pub mod emphasis;
pub mod link;

pub use code_span::CodeSpan;
pub use emphasis::Emphasis;
pub use link::Link;

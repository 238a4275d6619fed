use crate::parsing::{lines::LineRef, span::Span};

use super::kinds::{CodeFence, FenceSig};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone, Copy)]
pub struct LineClass<'a> {
    /// Full byte span of this line.
    pub line: Span,
    /// Whether the line is blank (whitespace only).
    pub is_blank: bool,
    /// The line as written, without its newline.
    pub raw: &'a str,
    /// The line with leading indentation removed. Block openers are
    /// recognised on this.
    pub remainder: &'a str,
    /// If the remainder looks like a fence opener/closer.
    pub fence_sig: Option<FenceSig<'a>>,
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    pub fn classify<'a>(&self, lr: &LineRef<'a>) -> LineClass<'a> {
        let remainder = lr.text.trim_start();
        LineClass {
            line: lr.span,
            is_blank: remainder.trim_end().is_empty(),
            raw: lr.text,
            remainder,
            fence_sig: CodeFence::sig(remainder),
        }
    }
}

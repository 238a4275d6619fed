//! Markdown-subset parsing: a line-based block scanner feeding an inline
//! scanner, producing a typed tree that owns no markup.

pub mod blocks;
pub mod inline;
pub mod lines;
pub mod span;

use blocks::{BlockBuilder, BlockNode, MarkdownLineClassifier};
use lines::lines_with_spans;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockNode>,
}

/// Where one block came from in the message text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockOutline<'a> {
    pub kind: &'static str,
    pub start: usize,
    pub end: usize,
    /// The block's source lines, trailing newline included.
    pub source: &'a str,
}

impl ParsedDoc {
    /// Lists each block with its byte range and source lines.
    ///
    /// `src` must be the text this document was parsed from; blocks whose
    /// span does not fit it get an empty `source`.
    pub fn outline<'a>(&self, src: &'a str) -> Vec<BlockOutline<'a>> {
        self.blocks
            .iter()
            .map(|block| BlockOutline {
                kind: block.kind.name(),
                start: block.span.start,
                end: block.span.end,
                source: block.span.slice(src).unwrap_or_default(),
            })
            .collect()
    }
}

/// Parses a message into blocks. Total: every input yields a document,
/// possibly with no blocks.
pub fn parse_document(src: &str) -> ParsedDoc {
    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new();

    for lr in lines_with_spans(src) {
        builder.push(classifier.classify(&lr));
    }

    ParsedDoc {
        blocks: builder.finish(),
    }
}

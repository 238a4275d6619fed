use crate::parsing::{inline::InlineNode, span::Span};

/// The kind of a block, with its inline content already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// `#`, `##` or `###` heading.
    Heading { level: u8, content: Vec<InlineNode> },
    /// Consecutive text lines; inner newlines are `InlineNode::LineBreak`.
    Paragraph { content: Vec<InlineNode> },
    /// A closed ```` ``` ```` fence. Content is raw.
    CodeBlock {
        language: Option<String>,
        content: String,
    },
    /// A contiguous run of items of one list kind.
    List(List),
    /// A single `>` line.
    BlockQuote { content: Vec<InlineNode> },
}

impl BlockKind {
    /// Short lowercase name of the block kind.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Heading { .. } => "heading",
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::CodeBlock { .. } => "code_block",
            BlockKind::List(List {
                kind: ListKind::Ordered { .. },
                ..
            }) => "ordered_list",
            BlockKind::List(_) => "bullet_list",
            BlockKind::BlockQuote { .. } => "blockquote",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Numbered items; `start` is the number written on the first item.
    Ordered { start: u64 },
    Bullet,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub kind: ListKind,
    pub items: Vec<ListItem>,
}

/// A single list item.
///
/// Titled items (`N. **title**: body`) carry their title separately. Their
/// body keeps source order: text lines and nested bullet runs alternate as
/// they were written. Every other item has `title: None` and at most one
/// text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub title: Option<Vec<InlineNode>>,
    pub body: Vec<ItemBody>,
}

/// One run inside a list item's body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemBody {
    /// Consecutive text lines; inner newlines are `InlineNode::LineBreak`.
    Text(Vec<InlineNode>),
    /// Consecutive `- ` lines under a titled item.
    List(List),
}

impl ListItem {
    /// An untitled item holding a single text run.
    pub fn plain(content: Vec<InlineNode>) -> Self {
        Self {
            title: None,
            body: if content.is_empty() {
                vec![]
            } else {
                vec![ItemBody::Text(content)]
            },
        }
    }
}

/// A parsed block node with the span of the source lines it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub kind: BlockKind,
    /// Byte span of the block's lines, including delimiters and newlines.
    pub span: Span,
}

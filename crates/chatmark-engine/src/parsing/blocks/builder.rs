use crate::parsing::{inline::parse_inline, span::Span};

use super::{
    classify::LineClass,
    kinds::CodeFence,
    open::{BlockOpen, try_open_leaf},
    types::{BlockKind, BlockNode, ItemBody, List, ListItem, ListKind},
};

/// A fence that has opened but not yet closed.
///
/// Its lines are held back: if the input ends first they are replayed as
/// ordinary lines.
struct OpenFence<'a> {
    opener: LineClass<'a>,
    language: Option<&'a str>,
    lines: Vec<LineClass<'a>>,
}

/// A line that belongs to an open item.
enum ItemPart<'a> {
    Text(&'a str),
    Bullet(&'a str),
}

struct ItemBuilder<'a> {
    title: Option<&'a str>,
    parts: Vec<ItemPart<'a>>,
}

impl<'a> ItemBuilder<'a> {
    fn new(title: Option<&'a str>, text: &'a str) -> Self {
        Self {
            title,
            parts: vec![ItemPart::Text(text)],
        }
    }

    /// Groups the item's lines into runs, keeping their order. Adjacent text
    /// lines join into one run; adjacent bullets form one nested list.
    fn build(self) -> ListItem {
        let mut body = vec![];
        let mut text: Vec<&str> = vec![];
        let mut bullets: Vec<ListItem> = vec![];
        for part in self.parts {
            match part {
                ItemPart::Text(line) => {
                    flush_bullets(&mut body, &mut bullets);
                    if !line.is_empty() {
                        text.push(line);
                    }
                }
                ItemPart::Bullet(line) => {
                    flush_text(&mut body, &mut text);
                    bullets.push(ListItem::plain(parse_inline(line)));
                }
            }
        }
        flush_text(&mut body, &mut text);
        flush_bullets(&mut body, &mut bullets);

        ListItem {
            title: self.title.map(parse_inline),
            body,
        }
    }
}

fn flush_text(body: &mut Vec<ItemBody>, text: &mut Vec<&str>) {
    if text.is_empty() {
        return;
    }
    let content = parse_inline(&text.join("\n"));
    text.clear();
    if !content.is_empty() {
        body.push(ItemBody::Text(content));
    }
}

fn flush_bullets(body: &mut Vec<ItemBody>, bullets: &mut Vec<ListItem>) {
    if !bullets.is_empty() {
        body.push(ItemBody::List(List {
            kind: ListKind::Bullet,
            items: std::mem::take(bullets),
        }));
    }
}

enum LeafState<'a> {
    None,
    Paragraph {
        span: Span,
        lines: Vec<&'a str>,
    },
    List {
        span: Span,
        kind: ListKind,
        items: Vec<ItemBuilder<'a>>,
    },
}

impl LeafState<'_> {
    fn is_ordered_list(&self) -> bool {
        matches!(
            self,
            LeafState::List {
                kind: ListKind::Ordered { .. },
                ..
            }
        )
    }

    fn is_bullet_list(&self) -> bool {
        matches!(
            self,
            LeafState::List {
                kind: ListKind::Bullet,
                ..
            }
        )
    }

    /// True while the last open item is a titled item, whose body and
    /// nested bullets continue over the following lines.
    fn in_titled_item(&self) -> bool {
        match self {
            LeafState::List { items, .. } => items.last().is_some_and(|i| i.title.is_some()),
            _ => false,
        }
    }
}

/// Turns classified lines into block nodes.
///
/// Push lines in order with [`BlockBuilder::push`], then call
/// [`BlockBuilder::finish`].
pub struct BlockBuilder<'a> {
    fence: Option<OpenFence<'a>>,
    leaf: LeafState<'a>,
    out: Vec<BlockNode>,
}

impl<'a> BlockBuilder<'a> {
    pub fn new() -> Self {
        Self {
            fence: None,
            leaf: LeafState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: LineClass<'a>) {
        if self.fence.is_some() {
            self.consume_fence_line(c);
            return;
        }

        if c.is_blank {
            self.flush_leaf();
            return;
        }

        let Some(open) = try_open_leaf(c.remainder) else {
            self.push_text(&c);
            return;
        };

        // Inside a titled item only standalone blocks and the next number
        // end the body.
        if self.leaf.in_titled_item() && open.is_standalone() {
            self.flush_leaf();
        }

        match open {
            BlockOpen::FencedCode { language } => {
                // The pending leaf stays open until the fence closes.
                self.fence = Some(OpenFence {
                    opener: c,
                    language,
                    lines: vec![],
                });
            }
            BlockOpen::Heading { level, text } => {
                self.flush_leaf();
                self.out.push(BlockNode {
                    kind: BlockKind::Heading {
                        level,
                        content: parse_inline(text),
                    },
                    span: c.line,
                });
            }
            BlockOpen::Quote { text } => {
                self.flush_leaf();
                self.out.push(BlockNode {
                    kind: BlockKind::BlockQuote {
                        content: parse_inline(text),
                    },
                    span: c.line,
                });
            }
            BlockOpen::Titled {
                number,
                title,
                body,
            } => self.push_numbered(
                c.line,
                number,
                ItemBuilder::new(Some(title), body),
            ),
            BlockOpen::Numbered { number, text } => self.push_numbered(
                c.line,
                number,
                ItemBuilder::new(None, text),
            ),
            BlockOpen::Bullet { text } => self.push_bullet(c.line, text),
        }
    }

    pub fn finish(mut self) -> Vec<BlockNode> {
        // EOF: an unterminated fence is not code. Its opener becomes text
        // and the held-back lines are parsed normally.
        while let Some(fence) = self.fence.take() {
            log::trace!(
                "unterminated code fence at {:?}, treating as text",
                fence.opener.line
            );
            self.push_text(&fence.opener);
            for line in fence.lines {
                self.push(line);
            }
        }
        self.flush_leaf();
        self.out
    }

    fn consume_fence_line(&mut self, c: LineClass<'a>) {
        if !CodeFence::closes(c.fence_sig) {
            if let Some(fence) = self.fence.as_mut() {
                fence.lines.push(c);
            }
            return;
        }
        if let Some(fence) = self.fence.take() {
            self.flush_leaf();
            let content = fence
                .lines
                .iter()
                .map(|l| l.raw)
                .collect::<Vec<_>>()
                .join("\n");
            self.out.push(BlockNode {
                kind: BlockKind::CodeBlock {
                    language: fence.language.map(str::to_string),
                    content,
                },
                span: fence.opener.line.cover(c.line),
            });
        }
    }

    fn push_text(&mut self, c: &LineClass<'a>) {
        let continues = matches!(self.leaf, LeafState::Paragraph { .. }) || self.leaf.in_titled_item();
        if !continues {
            self.flush_leaf();
            self.leaf = LeafState::Paragraph {
                span: c.line,
                lines: vec![],
            };
        }

        match &mut self.leaf {
            LeafState::Paragraph { span, lines } => {
                *span = span.cover(c.line);
                lines.push(c.raw);
            }
            LeafState::List { span, items, .. } => {
                *span = span.cover(c.line);
                if let Some(item) = items.last_mut() {
                    item.parts.push(ItemPart::Text(c.remainder.trim_end()));
                }
            }
            LeafState::None => {}
        }
    }

    fn push_numbered(&mut self, line: Span, number: u64, item: ItemBuilder<'a>) {
        if !self.leaf.is_ordered_list() {
            self.flush_leaf();
            self.leaf = LeafState::List {
                span: line,
                kind: ListKind::Ordered { start: number },
                items: vec![],
            };
        }
        if let LeafState::List { span, items, .. } = &mut self.leaf {
            *span = span.cover(line);
            items.push(item);
        }
    }

    fn push_bullet(&mut self, line: Span, text: &'a str) {
        let nests = self.leaf.in_titled_item();
        if !nests && !self.leaf.is_bullet_list() {
            self.flush_leaf();
            self.leaf = LeafState::List {
                span: line,
                kind: ListKind::Bullet,
                items: vec![],
            };
        }
        if let LeafState::List { span, items, .. } = &mut self.leaf {
            *span = span.cover(line);
            if nests {
                if let Some(item) = items.last_mut() {
                    item.parts.push(ItemPart::Bullet(text));
                }
            } else {
                items.push(ItemBuilder::new(None, text));
            }
        }
    }

    fn flush_leaf(&mut self) {
        match std::mem::replace(&mut self.leaf, LeafState::None) {
            LeafState::None => {}
            LeafState::Paragraph { span, lines } => {
                let content = parse_inline(&lines.join("\n"));
                if !content.is_empty() {
                    self.out.push(BlockNode {
                        kind: BlockKind::Paragraph { content },
                        span,
                    });
                }
            }
            LeafState::List { span, kind, items } => {
                self.out.push(BlockNode {
                    kind: BlockKind::List(List {
                        kind,
                        items: items.into_iter().map(ItemBuilder::build).collect(),
                    }),
                    span,
                });
            }
        }
    }
}

impl Default for BlockBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

//! Serializes a parsed document to an HTML fragment.
//!
//! Every piece of source text reaches the output through [`escape_into`]
//! exactly once; markup strings written here are the only unescaped output.

use crate::{
    escape::escape_into,
    links::LinkRegistry,
    parsing::{
        blocks::{BlockKind, BlockNode, ItemBody, List, ListItem, ListKind},
        inline::{InlineNode, plain_text},
    },
    render::RenderOptions,
};

pub(crate) struct HtmlWriter<'r> {
    out: String,
    options: &'r RenderOptions,
    links: &'r mut LinkRegistry,
}

impl<'r> HtmlWriter<'r> {
    pub(crate) fn new(options: &'r RenderOptions, links: &'r mut LinkRegistry) -> Self {
        Self {
            out: String::new(),
            options,
            links,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    /// Writes blocks separated by a single newline.
    pub(crate) fn write_blocks(&mut self, blocks: &[BlockNode]) {
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.write_block(&block.kind);
        }
    }

    fn write_block(&mut self, kind: &BlockKind) {
        match kind {
            BlockKind::Heading { level, content } => {
                let tag = format!("h{level}");
                self.open(&tag);
                self.write_inlines(content);
                self.close(&tag);
            }
            BlockKind::Paragraph { content } => {
                self.open("p");
                self.write_inlines(content);
                self.close("p");
            }
            BlockKind::CodeBlock { language, content } => {
                self.out.push_str("<pre><code");
                if let Some(lang) = language.as_deref().filter(|_| self.options.code_language_class)
                {
                    self.out.push_str(" class=\"language-");
                    escape_into(lang, &mut self.out);
                    self.out.push('"');
                }
                self.out.push('>');
                escape_into(content, &mut self.out);
                self.out.push_str("</code></pre>");
            }
            BlockKind::List(list) => self.write_list(list, true),
            BlockKind::BlockQuote { content } => {
                self.open("blockquote");
                self.write_inlines(content);
                self.close("blockquote");
            }
        }
    }

    /// Top-level lists put each item on its own line; nested lists sit
    /// inline inside their parent item.
    fn write_list(&mut self, list: &List, line_per_item: bool) {
        let tag = match list.kind {
            ListKind::Ordered { start } => {
                if start == 1 {
                    self.out.push_str("<ol>");
                } else {
                    self.out.push_str(&format!("<ol start=\"{start}\">"));
                }
                "ol"
            }
            ListKind::Bullet => {
                self.out.push_str("<ul>");
                "ul"
            }
        };
        for item in &list.items {
            if line_per_item {
                self.out.push('\n');
            }
            self.write_item(item);
        }
        if line_per_item {
            self.out.push('\n');
        }
        self.close(tag);
    }

    fn write_item(&mut self, item: &ListItem) {
        self.open("li");
        if let Some(title) = &item.title {
            self.open("strong");
            self.write_inlines(title);
            self.close("strong");
            self.out.push(':');
            if matches!(item.body.first(), Some(ItemBody::Text(_))) {
                self.out.push(' ');
            }
        }
        for part in &item.body {
            match part {
                ItemBody::Text(content) => self.write_inlines(content),
                ItemBody::List(nested) => self.write_list(nested, false),
            }
        }
        self.close("li");
    }

    fn write_inlines(&mut self, nodes: &[InlineNode]) {
        for node in nodes {
            match node {
                InlineNode::Text(t) => escape_into(t, &mut self.out),
                InlineNode::Code(t) => {
                    self.open("code");
                    escape_into(t, &mut self.out);
                    self.close("code");
                }
                InlineNode::Strong(children) => {
                    self.open("strong");
                    self.write_inlines(children);
                    self.close("strong");
                }
                InlineNode::Emphasis(children) => {
                    self.open("em");
                    self.write_inlines(children);
                    self.close("em");
                }
                InlineNode::Link { url, label } => self.write_link(url, label),
                InlineNode::LineBreak => self.out.push_str("<br>"),
            }
        }
    }

    fn write_link(&mut self, url: &str, label: &[InlineNode]) {
        let id = self.links.register(url, &plain_text(label));
        let options = self.options;
        let class = options.link_class.as_str();

        self.out.push_str("<button type=\"button\" class=\"");
        escape_into(class, &mut self.out);
        self.out.push_str(&format!("\" data-link-id=\"{id}\" title=\""));
        escape_into(url, &mut self.out);
        self.out.push_str("\">");
        self.write_inlines(label);
        self.out.push_str("<span class=\"");
        escape_into(class, &mut self.out);
        self.out.push_str("-icon\" aria-hidden=\"true\">");
        escape_into(&options.link_icon, &mut self.out);
        self.out.push_str("</span></button>");
    }

    fn open(&mut self, tag: &str) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
    }

    fn close(&mut self, tag: &str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_document;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn html(src: &str) -> String {
        let options = RenderOptions::default();
        let mut links = LinkRegistry::new(Arc::new(|_: &str, _: &str| {}));
        let mut w = HtmlWriter::new(&options, &mut links);
        w.write_blocks(&parse_document(src).blocks);
        w.finish()
    }

    #[test]
    fn blocks_are_joined_by_newlines() {
        assert_eq!(html("# T\n\npara"), "<h1>T</h1>\n<p>para</p>");
    }

    #[test]
    fn code_block_language_class_can_be_disabled() {
        let options = RenderOptions {
            code_language_class: false,
            ..RenderOptions::default()
        };
        let mut links = LinkRegistry::new(Arc::new(|_: &str, _: &str| {}));
        let mut w = HtmlWriter::new(&options, &mut links);
        w.write_blocks(&parse_document("```rust\nfn x() {}\n```").blocks);
        assert_eq!(w.finish(), "<pre><code>fn x() {}</code></pre>");
    }

    #[test]
    fn ordered_list_start_attribute() {
        assert_eq!(
            html("3. c\n4. d"),
            "<ol start=\"3\">\n<li>c</li>\n<li>d</li>\n</ol>"
        );
    }

    #[test]
    fn titled_item_with_empty_body() {
        assert_eq!(
            html("1. **Only title**:"),
            "<ol>\n<li><strong>Only title</strong>:</li>\n</ol>"
        );
    }

    #[test]
    fn nested_bullets_stay_inside_item() {
        assert_eq!(
            html("1. **A**: x\n- one\n- two"),
            "<ol>\n<li><strong>A</strong>: x<ul><li>one</li><li>two</li></ul></li>\n</ol>"
        );
    }

    #[test]
    fn text_after_nested_bullets_follows_them() {
        assert_eq!(
            html("1. **A**: x\n- s\ntail"),
            "<ol>\n<li><strong>A</strong>: x<ul><li>s</li></ul>tail</li>\n</ol>"
        );
        assert_eq!(
            html("1. **A**: x\nmore\n- s\ntail"),
            "<ol>\n<li><strong>A</strong>: x<br>more<ul><li>s</li></ul>tail</li>\n</ol>"
        );
    }

    #[test]
    fn titled_item_opening_with_bullets_has_no_space() {
        assert_eq!(
            html("1. **A**:\n- s"),
            "<ol>\n<li><strong>A</strong>:<ul><li>s</li></ul></li>\n</ol>"
        );
    }

    #[test]
    fn link_registers_plain_label() {
        let options = RenderOptions::default();
        let mut links = LinkRegistry::new(Arc::new(|_: &str, _: &str| {}));
        let mut w = HtmlWriter::new(&options, &mut links);
        w.write_blocks(&parse_document("[**NHS** `guide`](https://nhs.uk)").blocks);
        let out = w.finish();

        let entry = links.entries().next().cloned().unwrap();
        assert_eq!(entry.label, "NHS guide");
        assert_eq!(entry.url, "https://nhs.uk");
        assert_eq!(
            out,
            format!(
                "<p><button type=\"button\" class=\"source-link\" data-link-id=\"{}\" \
                 title=\"https://nhs.uk\"><strong>NHS</strong> <code>guide</code>\
                 <span class=\"source-link-icon\" aria-hidden=\"true\">🔗</span></button></p>",
                entry.id
            )
        );
    }
}

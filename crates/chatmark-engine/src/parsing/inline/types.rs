/// A parsed inline node.
///
/// Text is kept raw (unescaped); escaping happens once, when the tree is
/// serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Plain text that isn't part of any special construct.
    Text(String),
    /// A code span. This is a raw zone: its content is never parsed.
    Code(String),
    /// `**text**`
    Strong(Vec<InlineNode>),
    /// `*text*`
    Emphasis(Vec<InlineNode>),
    /// `[label](url)`. The label never contains another link.
    Link {
        url: String,
        label: Vec<InlineNode>,
    },
    /// A single newline inside a block.
    LineBreak,
}

/// Flattens nodes to the text a reader would see, without markup.
pub fn plain_text(nodes: &[InlineNode]) -> String {
    let mut out = String::new();
    push_plain(nodes, &mut out);
    out
}

fn push_plain(nodes: &[InlineNode], out: &mut String) {
    for node in nodes {
        match node {
            InlineNode::Text(t) | InlineNode::Code(t) => out.push_str(t),
            InlineNode::Strong(children) | InlineNode::Emphasis(children) => {
                push_plain(children, out)
            }
            InlineNode::Link { label, .. } => push_plain(label, out),
            InlineNode::LineBreak => out.push(' '),
        }
    }
}

use super::span::Span;

/// A reference to a single line of the source with its byte span.
#[derive(Debug, Clone, Copy)]
pub struct LineRef<'a> {
    /// Byte span of this line (includes the newline if present).
    pub span: Span,
    /// The line text without its trailing `\n` / `\r\n`.
    pub text: &'a str,
}

/// Returns an iterator over lines with their byte spans.
///
/// Spans keep the newline so that consecutive spans tile the whole input,
/// which is what block spans rely on.
pub fn lines_with_spans(src: &str) -> impl Iterator<Item = LineRef<'_>> + '_ {
    let mut offset = 0usize;
    src.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        LineRef {
            span: Span { start, end: offset },
            text: raw.trim_end_matches(['\r', '\n']),
        }
    })
}

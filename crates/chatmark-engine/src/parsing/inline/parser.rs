use std::collections::HashMap;

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Emphasis, Link},
    types::InlineNode,
};

/// Parses inline content into a sequence of [`InlineNode`]s.
///
/// # Precedence
/// At every position the parser tries, in order: code span, link, strong,
/// emphasis. Code spans are raw zones; closing delimiters of the other
/// constructs are never matched inside them. Strong, emphasis and link
/// labels do not cross a newline.
///
/// # Returns
/// A vector of inline nodes covering the entire input. Text between special
/// constructs is emitted as `InlineNode::Text`, newlines as
/// `InlineNode::LineBreak`. Anything that does not close is left as text.
///
/// # Complexity
/// Linear in the input for every nesting level: closer searches are
/// remembered per call, so a line full of openers that never close
/// is scanned once rather than once per opener.
pub fn parse_inline(s: &str) -> Vec<InlineNode> {
    parse_nodes(s, true)
}

/// One forward search for a closer, starting at `from`.
///
/// The search visited every position in `from..=until` except the interiors
/// of the code spans it stepped over. A search started at any visited
/// position walks the same suffix and so gets the same answer.
#[derive(Debug)]
struct Scan {
    from: usize,
    until: usize,
    found: Option<usize>,
    /// `(start, end)` of skipped code spans, in order. Positions strictly
    /// between `start` and `end` were not visited.
    skipped: Vec<(usize, usize)>,
}

impl Scan {
    fn covers(&self, pos: usize) -> bool {
        if pos < self.from || pos > self.until {
            return false;
        }
        let i = self.skipped.partition_point(|&(start, _)| start < pos);
        !(i > 0 && pos < self.skipped[i - 1].1)
    }
}

/// Closer searches already made over the text being parsed.
#[derive(Debug, Default)]
struct ScanMemo {
    strong: Option<Scan>,
    emphasis: Option<Scan>,
    label: Option<Scan>,
    url: Option<Scan>,
    /// Backtick run length -> the earliest position after which no run of
    /// exactly that length occurs.
    unclosed_ticks: HashMap<usize, usize>,
}

fn parse_nodes(s: &str, allow_links: bool) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s);
    let mut memo = ScanMemo::default();
    let mut out = vec![];
    let mut text_start = cur.pos();

    while !cur.eof() {
        let start = cur.pos();
        if let Some(node) = try_parse_at(&mut cur, allow_links, &mut memo) {
            flush_text(&mut out, cur.slice(text_start, start));
            out.push(node);
            text_start = cur.pos();
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, cur.slice(text_start, s.len()));
    out
}

/// Emits accumulated text, turning each newline into a `LineBreak`.
fn flush_text(out: &mut Vec<InlineNode>, text: &str) {
    for (i, piece) in text.split('\n').enumerate() {
        if i > 0 {
            out.push(InlineNode::LineBreak);
        }
        if !piece.is_empty() {
            out.push(InlineNode::Text(piece.to_string()));
        }
    }
}

/// Dispatches on the byte under the cursor. Only ASCII delimiters can start
/// a construct, so every successful parse begins on a char boundary.
fn try_parse_at(
    cur: &mut Cursor<'_>,
    allow_links: bool,
    memo: &mut ScanMemo,
) -> Option<InlineNode> {
    match cur.peek()? {
        CodeSpan::TICK => try_parse_code_span(cur, memo),
        Link::OPEN if allow_links => try_parse_link(cur, memo),
        Emphasis::STAR => try_parse_strong(cur, allow_links, memo)
            .or_else(|| try_parse_emphasis(cur, allow_links, memo)),
        _ => None,
    }
}

/// If a complete code span opens at the cursor, returns the position just
/// past its closing backtick run.
///
/// A cursor sitting inside a backtick run never opens a span.
fn code_span_end(cur: &Cursor<'_>, unclosed: &mut HashMap<usize, usize>) -> Option<usize> {
    if cur.prev() == Some(CodeSpan::TICK) {
        return None;
    }
    let n = cur.run_len(CodeSpan::TICK);
    if n == 0 {
        return None;
    }
    let after = cur.pos() + n;
    if unclosed.get(&n).is_some_and(|&from| after >= from) {
        return None;
    }

    let mut ahead = cur.clone();
    ahead.bump_n(n);
    while !ahead.eof() {
        let m = ahead.run_len(CodeSpan::TICK);
        if m == 0 {
            ahead.bump();
            continue;
        }
        if m == n {
            return Some(ahead.pos() + m);
        }
        ahead.bump_n(m);
    }
    unclosed.insert(n, after);
    None
}

/// Scans forward for the first position where `is_close` holds.
///
/// Complete code spans are stepped over whole; a newline ends the search.
fn find_close(
    mut ahead: Cursor<'_>,
    unclosed: &mut HashMap<usize, usize>,
    is_close: impl Fn(&Cursor<'_>) -> bool,
) -> Scan {
    let from = ahead.pos();
    let mut skipped = vec![];
    while let Some(b) = ahead.peek() {
        if b == b'\n' {
            break;
        }
        if is_close(&ahead) {
            return Scan {
                from,
                until: ahead.pos(),
                found: Some(ahead.pos()),
                skipped,
            };
        }
        if let Some(end) = code_span_end(&ahead, unclosed) {
            skipped.push((ahead.pos(), end));
            ahead.bump_n(end - ahead.pos());
            continue;
        }
        ahead.bump();
    }
    Scan {
        from,
        until: ahead.pos(),
        found: None,
        skipped,
    }
}

/// [`find_close`], answered from `slot` when an earlier search already
/// walked over `ahead`'s position.
fn find_close_cached(
    slot: &mut Option<Scan>,
    unclosed: &mut HashMap<usize, usize>,
    ahead: Cursor<'_>,
    is_close: impl Fn(&Cursor<'_>) -> bool,
) -> Option<usize> {
    if let Some(scan) = slot.as_ref().filter(|scan| scan.covers(ahead.pos())) {
        return scan.found;
    }
    let scan = find_close(ahead, unclosed, is_close);
    let found = scan.found;
    *slot = Some(scan);
    found
}

/// Attempts to parse a code span starting at the current position.
///
/// Returns `None` if not at a backtick run or if the span isn't closed.
/// The cursor only moves on success.
fn try_parse_code_span(cur: &mut Cursor<'_>, memo: &mut ScanMemo) -> Option<InlineNode> {
    let end = code_span_end(cur, &mut memo.unclosed_ticks)?;
    let n = cur.run_len(CodeSpan::TICK);
    let inner = cur.slice(cur.pos() + n, end - n).to_string();
    cur.bump_n(end - cur.pos());
    Some(InlineNode::Code(inner))
}

/// Finds the `)` ending a link URL that starts at `ahead`. URLs are not
/// raw-zone aware and stop at a newline.
fn find_url_close(slot: &mut Option<Scan>, mut ahead: Cursor<'_>) -> Option<usize> {
    if let Some(scan) = slot.as_ref().filter(|scan| scan.covers(ahead.pos())) {
        return scan.found;
    }
    let from = ahead.pos();
    let found = loop {
        match ahead.peek() {
            Some(Link::CLOSE) => break Some(ahead.pos()),
            Some(b'\n') | None => break None,
            Some(_) => {
                ahead.bump();
            }
        }
    };
    *slot = Some(Scan {
        from,
        until: ahead.pos(),
        found,
        skipped: vec![],
    });
    found
}

/// Attempts to parse `[label](url)` starting at the current position.
///
/// The label must be non-empty and is parsed again with links disabled.
/// The URL runs to the first `)` and is trimmed; an empty URL is no link.
fn try_parse_link(cur: &mut Cursor<'_>, memo: &mut ScanMemo) -> Option<InlineNode> {
    if cur.peek() != Some(Link::OPEN) {
        return None;
    }

    let mut ahead = cur.clone();
    ahead.bump(); // [
    let label_start = ahead.pos();
    let label_end = find_close_cached(
        &mut memo.label,
        &mut memo.unclosed_ticks,
        ahead.clone(),
        |c| c.peek() == Some(Link::LABEL_CLOSE),
    )?;
    if label_end == label_start {
        return None;
    }
    ahead.bump_n(label_end - ahead.pos());
    ahead.bump(); // ]

    if ahead.peek() != Some(Link::URL_OPEN) {
        return None;
    }
    ahead.bump(); // (
    let url_start = ahead.pos();
    let url_end = find_url_close(&mut memo.url, ahead.clone())?;
    let url = cur.slice(url_start, url_end).trim();
    if url.is_empty() {
        return None;
    }
    ahead.bump_n(url_end + 1 - ahead.pos()); // url and )

    let node = InlineNode::Link {
        url: url.to_string(),
        label: parse_nodes(cur.slice(label_start, label_end), false),
    };
    *cur = ahead;
    Some(node)
}

/// Attempts to parse `**text**` starting at the current position.
///
/// When the closer is part of a longer run of stars, the last two close the
/// span so that `***x***` nests emphasis inside strong. A closer right after
/// the opener makes no span, so runs of bare stars stay text.
fn try_parse_strong(
    cur: &mut Cursor<'_>,
    allow_links: bool,
    memo: &mut ScanMemo,
) -> Option<InlineNode> {
    if !cur.starts_with(Emphasis::STRONG) {
        return None;
    }

    let mut ahead = cur.clone();
    ahead.bump_n(Emphasis::STRONG.len());
    let inner_start = ahead.pos();
    let run_start = find_close_cached(&mut memo.strong, &mut memo.unclosed_ticks, ahead, |c| {
        c.starts_with(Emphasis::STRONG)
    })?;
    if run_start == inner_start {
        return None;
    }

    let mut closer = cur.clone();
    closer.bump_n(run_start - cur.pos());
    let inner_end = run_start + closer.run_len(Emphasis::STAR) - Emphasis::STRONG.len();

    let inner = cur.slice(inner_start, inner_end);
    cur.bump_n(inner_end + Emphasis::STRONG.len() - cur.pos());
    Some(InlineNode::Strong(parse_nodes(inner, allow_links)))
}

/// Attempts to parse `*text*` starting at the current position.
///
/// Neither star may touch another star; see [`Emphasis::can_open`].
fn try_parse_emphasis(
    cur: &mut Cursor<'_>,
    allow_links: bool,
    memo: &mut ScanMemo,
) -> Option<InlineNode> {
    if cur.peek() != Some(Emphasis::STAR) || !Emphasis::can_open(cur.prev(), cur.peek_at(1)) {
        return None;
    }

    let mut ahead = cur.clone();
    ahead.bump(); // *
    let inner_start = ahead.pos();
    let inner_end = find_close_cached(&mut memo.emphasis, &mut memo.unclosed_ticks, ahead, |c| {
        c.peek() == Some(Emphasis::STAR) && Emphasis::can_close(c.prev(), c.peek_at(1))
    })?;

    let inner = cur.slice(inner_start, inner_end);
    cur.bump_n(inner_end + 1 - cur.pos());
    Some(InlineNode::Emphasis(parse_nodes(inner, allow_links)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> InlineNode {
        InlineNode::Text(s.to_string())
    }

    #[test]
    fn parse_simple_text() {
        assert_eq!(parse_inline("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn parse_code_span() {
        assert_eq!(
            parse_inline("run `cargo test` now"),
            vec![
                text("run "),
                InlineNode::Code("cargo test".into()),
                text(" now")
            ]
        );
    }

    #[test]
    fn double_backtick_span_may_contain_single_tick() {
        assert_eq!(
            parse_inline("``a ` b``"),
            vec![InlineNode::Code("a ` b".into())]
        );
    }

    #[test]
    fn code_span_suppresses_emphasis_and_links() {
        let nodes = parse_inline("`**not bold** [no](link)`");
        assert_eq!(nodes.len(), 1);
        assert!(matches!(nodes[0], InlineNode::Code(_)));
    }

    #[test]
    fn unclosed_code_span_becomes_text() {
        assert_eq!(parse_inline("`unclosed code"), vec![text("`unclosed code")]);
        assert_eq!(parse_inline("``a`"), vec![text("``a`")]);
    }

    #[test]
    fn strong_is_matched_before_emphasis() {
        assert_eq!(
            parse_inline("**bold** and *italic*"),
            vec![
                InlineNode::Strong(vec![text("bold")]),
                text(" and "),
                InlineNode::Emphasis(vec![text("italic")]),
            ]
        );
    }

    #[test]
    fn triple_star_nests_emphasis_in_strong() {
        assert_eq!(
            parse_inline("***both***"),
            vec![InlineNode::Strong(vec![InlineNode::Emphasis(vec![text(
                "both"
            )])])]
        );
    }

    #[test]
    fn emphasis_can_contain_strong() {
        assert_eq!(
            parse_inline("*a **b** c*"),
            vec![InlineNode::Emphasis(vec![
                text("a "),
                InlineNode::Strong(vec![text("b")]),
                text(" c"),
            ])]
        );
    }

    #[test]
    fn lone_stars_between_spaces_stay_text() {
        assert_eq!(parse_inline("2 * 3 * 4"), vec![text("2 * 3 * 4")]);
    }

    #[test]
    fn emphasis_closer_inside_code_is_ignored() {
        assert_eq!(
            parse_inline("*a `b*` c*"),
            vec![InlineNode::Emphasis(vec![
                text("a "),
                InlineNode::Code("b*".into()),
                text(" c"),
            ])]
        );
    }

    #[test]
    fn emphasis_does_not_cross_lines() {
        assert_eq!(
            parse_inline("*a\nb*"),
            vec![text("*a"), InlineNode::LineBreak, text("b*")]
        );
    }

    #[test]
    fn empty_strong_is_text() {
        assert_eq!(parse_inline("****"), vec![text("****")]);
    }

    #[test]
    fn parse_link() {
        assert_eq!(
            parse_inline("see [NHS](https://nhs.uk/page) for more"),
            vec![
                text("see "),
                InlineNode::Link {
                    url: "https://nhs.uk/page".into(),
                    label: vec![text("NHS")],
                },
                text(" for more"),
            ]
        );
    }

    #[test]
    fn link_label_is_parsed_without_links() {
        let nodes = parse_inline("[**Cancer** `guide`](https://x.org)");
        assert_eq!(
            nodes,
            vec![InlineNode::Link {
                url: "https://x.org".into(),
                label: vec![
                    InlineNode::Strong(vec![text("Cancer")]),
                    text(" "),
                    InlineNode::Code("guide".into()),
                ],
            }]
        );
    }

    #[test]
    fn bracket_inside_label_ends_label_early() {
        let nodes = parse_inline("[a [b](c)](https://x.org)");
        match &nodes[0] {
            InlineNode::Link { url, label } => {
                assert_eq!(url, "c");
                assert_eq!(label, &vec![text("a [b")]);
            }
            other => panic!("expected Link, got {other:?}"),
        }
        assert_eq!(nodes[1], text("](https://x.org)"));
    }

    #[test]
    fn star_in_url_is_not_emphasis() {
        assert_eq!(
            parse_inline("[x](https://a.org/*p*)"),
            vec![InlineNode::Link {
                url: "https://a.org/*p*".into(),
                label: vec![text("x")],
            }]
        );
    }

    #[test]
    fn incomplete_links_become_text() {
        assert_eq!(parse_inline("[label] (url)"), vec![text("[label] (url)")]);
        assert_eq!(parse_inline("[](url)"), vec![text("[](url)")]);
        assert_eq!(parse_inline("[label]( )"), vec![text("[label]( )")]);
        assert_eq!(parse_inline("[label](url"), vec![text("[label](url")]);
    }

    #[test]
    fn newline_becomes_line_break() {
        assert_eq!(
            parse_inline("one\ntwo"),
            vec![text("one"), InlineNode::LineBreak, text("two")]
        );
    }

    #[test]
    fn multibyte_text_around_delimiters() {
        assert_eq!(
            parse_inline("café **thé** ☕"),
            vec![
                text("café "),
                InlineNode::Strong(vec![text("thé")]),
                text(" ☕")
            ]
        );
    }

    #[test]
    fn openers_that_never_close_stay_text() {
        assert_eq!(parse_inline("*a *b *c"), vec![text("*a *b *c")]);
        assert_eq!(parse_inline("**a **b"), vec![text("**a **b")]);
        assert_eq!(parse_inline("[a [b [c"), vec![text("[a [b [c")]);
        assert_eq!(parse_inline("[a](b [c](d"), vec![text("[a](b [c](d")]);
    }

    #[test]
    fn failed_line_does_not_hide_closers_on_next_line() {
        assert_eq!(
            parse_inline("*a *b\n*c*"),
            vec![
                text("*a *b"),
                InlineNode::LineBreak,
                InlineNode::Emphasis(vec![text("c")]),
            ]
        );
        assert_eq!(
            parse_inline("**a\n**b**"),
            vec![
                text("**a"),
                InlineNode::LineBreak,
                InlineNode::Strong(vec![text("b")]),
            ]
        );
    }

    #[test]
    fn label_without_url_does_not_hide_later_link() {
        assert_eq!(
            parse_inline("[a ] [b](u)"),
            vec![
                text("[a ] "),
                InlineNode::Link {
                    url: "u".into(),
                    label: vec![text("b")],
                },
            ]
        );
    }

    #[test]
    fn unclosed_single_tick_does_not_block_double_span() {
        assert_eq!(
            parse_inline("` a `` b ``"),
            vec![text("` a "), InlineNode::Code(" b ".into())]
        );
    }

    #[test]
    fn long_star_runs_stay_text() {
        let stars = "*".repeat(64);
        assert_eq!(parse_inline(&stars), vec![text(&stars)]);
    }

    #[test]
    fn scan_covers_visited_positions_only() {
        let scan = Scan {
            from: 0,
            until: 10,
            found: None,
            skipped: vec![(2, 6)],
        };
        assert!(scan.covers(0));
        assert!(scan.covers(2));
        assert!(!scan.covers(3));
        assert!(!scan.covers(5));
        assert!(scan.covers(6));
        assert!(scan.covers(10));
        assert!(!scan.covers(11));
    }
}

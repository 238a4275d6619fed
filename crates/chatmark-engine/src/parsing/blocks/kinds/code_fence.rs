/// What a line that looks like a fence carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig<'a> {
    /// First word after the backticks, if any.
    pub language: Option<&'a str>,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    /// Returns the fence signature if the (indentation-stripped) line opens
    /// or closes a fence.
    ///
    /// A line like ```` ```x``` ```` is inline code, not a fence.
    pub fn sig(line: &str) -> Option<FenceSig<'_>> {
        let rest = line.strip_prefix(Self::BACKTICKS)?.trim_start_matches('`');
        if rest.contains('`') {
            return None;
        }
        Some(FenceSig {
            language: rest.split_whitespace().next(),
        })
    }

    /// Any fence-looking line closes an open fence.
    pub fn closes(sig: Option<FenceSig<'_>>) -> bool {
        sig.is_some()
    }
}

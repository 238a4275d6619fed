/// Blockquote block type with owned delimiter constant.
///
/// All blockquote-related syntax knowledge lives here, not scattered in
/// classifier code. Quotes are one level deep and one line long: a second
/// `>` is part of the quoted text.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips a single blockquote prefix (and one following space) from a
    /// line that has already had its indentation removed.
    ///
    /// Returns `None` when the line is not a quote.
    pub fn strip_prefix(s: &str) -> Option<&str> {
        let rest = s.strip_prefix(Self::PREFIX)?;
        Some(rest.strip_prefix(' ').unwrap_or(rest))
    }
}

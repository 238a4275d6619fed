/// List item markers: `- text`, `* text` and `N. text`.
pub struct ListMarker;

/// A numbered item of the form `N. **title**: body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Titled<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

impl ListMarker {
    pub const BULLETS: [char; 2] = ['-', '*'];
    pub const NUMBER_DOT: char = '.';
    pub const TITLE_OPEN: &'static str = "**";
    pub const TITLE_CLOSE: &'static str = "**:";

    /// Parses a bullet item, returning its text.
    pub fn bullet(line: &str) -> Option<&str> {
        let mut chars = line.chars();
        let marker = chars.next()?;
        if !Self::BULLETS.contains(&marker) {
            return None;
        }
        line[marker.len_utf8()..].strip_prefix(' ')
    }

    /// Parses a numbered item, returning its number and text.
    pub fn numbered(line: &str) -> Option<(u64, &str)> {
        let digits = line.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || digits > 9 {
            return None;
        }
        let number = line[..digits].parse().ok()?;
        let text = line[digits..]
            .strip_prefix(Self::NUMBER_DOT)?
            .strip_prefix(' ')?;
        Some((number, text))
    }

    /// Splits a numbered item's text into title and body when it reads
    /// `**title**: body`.
    pub fn titled(text: &str) -> Option<Titled<'_>> {
        let rest = text.strip_prefix(Self::TITLE_OPEN)?;
        let end = rest.find(Self::TITLE_OPEN)?;
        if end == 0 || !rest[end..].starts_with(Self::TITLE_CLOSE) {
            return None;
        }
        Some(Titled {
            title: &rest[..end],
            body: rest[end + Self::TITLE_CLOSE.len()..].trim_start(),
        })
    }
}

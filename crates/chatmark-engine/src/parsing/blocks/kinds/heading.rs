/// ATX-style headings, limited to three levels.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: u8 = 3;

    /// Parses `# text`, `## text` or `### text`.
    ///
    /// The marker run must be followed by a space, so `####` and `#tag`
    /// are not headings. The longest run wins by construction: the whole
    /// run is counted before deciding.
    pub fn parse(line: &str) -> Option<(u8, &str)> {
        let level = line.chars().take_while(|&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL as usize {
            return None;
        }
        let text = line[level..].strip_prefix(' ')?;
        Some((level as u8, text.trim()))
    }
}

/// Strong and emphasis delimiters.
pub struct Emphasis;

impl Emphasis {
    pub const STRONG: &'static [u8; 2] = b"**";
    pub const STAR: u8 = b'*';

    /// A lone `*` may open emphasis only when neither neighbour is another
    /// `*` and it is directly followed by text.
    pub fn can_open(prev: Option<u8>, next: Option<u8>) -> bool {
        prev != Some(Self::STAR)
            && matches!(next, Some(b) if b != Self::STAR && !b.is_ascii_whitespace())
    }

    /// The mirror rule for the closing `*`.
    pub fn can_close(prev: Option<u8>, next: Option<u8>) -> bool {
        next != Some(Self::STAR)
            && matches!(prev, Some(b) if b != Self::STAR && !b.is_ascii_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_next_to_star_never_opens() {
        assert!(!Emphasis::can_open(Some(b'*'), Some(b'a')));
        assert!(!Emphasis::can_open(None, Some(b'*')));
    }

    #[test]
    fn star_before_space_does_not_open() {
        assert!(!Emphasis::can_open(Some(b'2'), Some(b' ')));
        assert!(!Emphasis::can_open(None, None));
        assert!(Emphasis::can_open(Some(b' '), Some(b'a')));
    }

    #[test]
    fn closing_rules_mirror_opening() {
        assert!(Emphasis::can_close(Some(b'a'), None));
        assert!(Emphasis::can_close(Some(b'a'), Some(b' ')));
        assert!(!Emphasis::can_close(Some(b' '), Some(b'a')));
        assert!(!Emphasis::can_close(Some(b'a'), Some(b'*')));
    }
}

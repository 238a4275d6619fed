use super::kinds::{BlockQuote, CodeFence, Heading, ListMarker};

/// A block opener recognised on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOpen<'a> {
    FencedCode {
        language: Option<&'a str>,
    },
    Heading {
        level: u8,
        text: &'a str,
    },
    Quote {
        text: &'a str,
    },
    /// `N. **title**: body`
    Titled {
        number: u64,
        title: &'a str,
        body: &'a str,
    },
    Numbered {
        number: u64,
        text: &'a str,
    },
    Bullet {
        text: &'a str,
    },
}

impl BlockOpen<'_> {
    /// Openers that always start a block of their own, as opposed to list
    /// items which may continue a run.
    pub fn is_standalone(&self) -> bool {
        matches!(
            self,
            BlockOpen::FencedCode { .. } | BlockOpen::Heading { .. } | BlockOpen::Quote { .. }
        )
    }
}

/// Detects a block opener on an indentation-stripped line.
///
/// Precedence: fence, heading, quote, titled item, numbered item, bullet.
pub fn try_open_leaf(remainder: &str) -> Option<BlockOpen<'_>> {
    if let Some(sig) = CodeFence::sig(remainder) {
        return Some(BlockOpen::FencedCode {
            language: sig.language,
        });
    }
    if let Some((level, text)) = Heading::parse(remainder) {
        return Some(BlockOpen::Heading { level, text });
    }
    if let Some(text) = BlockQuote::strip_prefix(remainder) {
        return Some(BlockOpen::Quote { text });
    }
    if let Some((number, text)) = ListMarker::numbered(remainder) {
        if let Some(titled) = ListMarker::titled(text) {
            return Some(BlockOpen::Titled {
                number,
                title: titled.title,
                body: titled.body,
            });
        }
        return Some(BlockOpen::Numbered { number, text });
    }
    if let Some(text) = ListMarker::bullet(remainder) {
        return Some(BlockOpen::Bullet { text });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_beats_everything() {
        assert_eq!(
            try_open_leaf("```python"),
            Some(BlockOpen::FencedCode {
                language: Some("python")
            })
        );
    }

    #[test]
    fn titled_beats_plain_numbered() {
        assert_eq!(
            try_open_leaf("2. **Hydrate**: drink water"),
            Some(BlockOpen::Titled {
                number: 2,
                title: "Hydrate",
                body: "drink water"
            })
        );
        assert_eq!(
            try_open_leaf("2. **Hydrate** often"),
            Some(BlockOpen::Numbered {
                number: 2,
                text: "**Hydrate** often"
            })
        );
    }

    #[test]
    fn plain_text_opens_nothing() {
        assert_eq!(try_open_leaf("Just a sentence."), None);
        assert_eq!(try_open_leaf("*emphasis* first"), None);
    }

    #[test]
    fn standalone_openers() {
        assert!(try_open_leaf("# Title").unwrap().is_standalone());
        assert!(try_open_leaf("> quote").unwrap().is_standalone());
        assert!(!try_open_leaf("- item").unwrap().is_standalone());
    }
}

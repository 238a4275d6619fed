/// `[label](url)` delimiters.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const LABEL_CLOSE: u8 = b']';
    pub const URL_OPEN: u8 = b'(';
    pub const CLOSE: u8 = b')';
}

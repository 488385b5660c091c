//! Positions and comments expressed against the full component text.

/// Byte range into the full component source (end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Comment syntax a comment was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `/* ... */` or `/** ... */`
    Block,
    /// `// ...`
    Line,
    /// `<!-- ... -->` in the markup
    Html,
}

/// A comment from anywhere in the component, with its delimiters removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceComment {
    pub style: CommentStyle,
    pub range: ByteRange,
    pub text: String,
}

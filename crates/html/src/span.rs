//! Source span types recorded by the tokenizer and tree builder.

/// Half-open byte span `[start, end)` into the source text.
///
/// Invariant: both ends sit on UTF-8 boundaries of the input the span was
/// produced from. The tokenizer only cuts at ASCII structural bytes, so this
/// holds for every span it emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must be <= end");
        Self { start, end }
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns the spanned text, or `None` if the span does not fit `source`.
    pub fn slice(self, source: &str) -> Option<&str> {
        source.get(self.start..self.end)
    }
}

/// Location of a whole node in the source.
///
/// Elements carry the span of their opening tag and, when the source closes
/// them explicitly, of their closing tag. Text and comment nodes only set
/// `start`/`end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
    pub start_tag: Option<Span>,
    pub end_tag: Option<Span>,
}

impl SourceSpan {
    /// Location of a text or comment node.
    pub fn text(span: Span) -> Self {
        Self {
            start: span.start,
            end: span.end,
            start_tag: None,
            end_tag: None,
        }
    }

    /// Location of an element that has only been opened so far.
    pub fn open_element(start_tag: Span) -> Self {
        Self {
            start: start_tag.start,
            end: start_tag.end,
            start_tag: Some(start_tag),
            end_tag: None,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.span().slice(source)
    }
}

//! Selection boundaries in rendered content and byte ranges in source text.

use crate::node::NodeId;

/// One end of a selection in the rendered content.
///
/// For a text node `offset` is a byte index into the node's value. For an
/// element, `0` means "before the first child" and `k` means "after the
/// `k`-th child".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: usize,
}

impl Boundary {
    #[inline]
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A live selection as delivered by the host, already in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub start: Boundary,
    pub end: Boundary,
}

impl Selection {
    #[inline]
    pub fn new(start: Boundary, end: Boundary) -> Self {
        Self { start, end }
    }

    /// A caret: both boundaries are the same position.
    #[inline]
    pub fn collapsed(at: Boundary) -> Self {
        Self { start: at, end: at }
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Byte range `[start, end)` into the source the content was rendered from.
///
/// The range is always normalized such that `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl SourceRange {
    /// Create a new range, normalized so `start <= end`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns the covered source text, or `None` when the range is out of
    /// bounds or splits a UTF-8 character.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_range_normalizes() {
        let range = SourceRange::new(10, 5);
        assert_eq!(range.start, 5);
        assert_eq!(range.end, 10);
        assert_eq!(range.len(), 5);
    }

    #[test]
    fn source_range_is_empty() {
        assert!(SourceRange::new(3, 3).is_empty());
        assert!(!SourceRange::new(3, 5).is_empty());
    }

    #[test]
    fn source_range_slice_rejects_bad_ranges() {
        let source = "<p>é</p>";
        assert_eq!(SourceRange::new(3, 5).slice(source), Some("é"));
        assert_eq!(SourceRange::new(3, 4).slice(source), None);
        assert_eq!(SourceRange::new(0, 99).slice(source), None);
    }

    #[test]
    fn collapsed_selection_has_equal_boundaries() {
        let node = NodeId::new(0, 1);
        assert!(Selection::collapsed(Boundary::new(node, 2)).is_collapsed());
        assert!(!Selection::new(Boundary::new(node, 2), Boundary::new(node, 3)).is_collapsed());
    }
}

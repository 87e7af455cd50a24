//! Selection boundaries → source byte offsets.
//!
//! Resolution is a pure query over one generation's tree and span index. Every
//! failure mode (unmapped node, offset out of range, foreign handle, collapsed
//! selection) surfaces as `None`.

use crate::cursor::TreeCursor;
use crate::node::{ContentKind, NodeId};
use crate::selection::{Boundary, Selection, SourceRange};
use crate::span_index::SourceSpanIndex;
use crate::tree::ContentTree;

#[derive(Clone, Copy, Debug)]
pub struct SelectionResolver<'a> {
    tree: &'a ContentTree,
    index: &'a SourceSpanIndex,
}

impl<'a> SelectionResolver<'a> {
    pub fn new(tree: &'a ContentTree, index: &'a SourceSpanIndex) -> Self {
        debug_assert_eq!(tree.generation(), index.generation());
        Self { tree, index }
    }

    pub fn resolve_selection(&self, selection: &Selection) -> Option<SourceRange> {
        self.resolve(selection.start, selection.end)
    }

    /// Source range covered by the selection `start..end`.
    ///
    /// A reversed result is swapped into order rather than rejected.
    pub fn resolve(&self, start: Boundary, end: Boundary) -> Option<SourceRange> {
        if start == end {
            return None;
        }
        let from = self.resolve_boundary(start);
        let to = self.resolve_boundary(end);
        match (from, to) {
            (Some(from), Some(to)) => {
                if from > to {
                    log::debug!(
                        target: "selection_map.resolve",
                        "reversed selection {from}..{to}, swapping"
                    );
                }
                Some(SourceRange::new(from, to))
            }
            _ => {
                log::debug!(
                    target: "selection_map.resolve",
                    "unresolved selection: start {start:?} -> {from:?}, end {end:?} -> {to:?}"
                );
                None
            }
        }
    }

    /// Source offset of a single boundary.
    pub fn resolve_boundary(&self, boundary: Boundary) -> Option<usize> {
        let Some(node) = self.tree.get(boundary.node) else {
            log::debug!(
                target: "selection_map.resolve",
                "boundary node {:?} is not part of generation {}",
                boundary.node,
                self.tree.generation()
            );
            return None;
        };
        match node.kind() {
            ContentKind::Text { value } => {
                let span = self.index.get(boundary.node)?;
                if boundary.offset > value.len() {
                    return None;
                }
                Some(span.start + boundary.offset)
            }
            ContentKind::Element { .. } => {
                let k = boundary.offset;
                if k == 0 {
                    return self.element_start(boundary.node);
                }
                let child = self.tree.child_at(boundary.node, k - 1)?;
                self.end_position(child)
            }
        }
    }

    /// Where content ending at `node` stops in the source: the end of a text
    /// node, or the start of an element's closing tag (its full end when the
    /// element was closed implicitly).
    pub fn end_position(&self, node: NodeId) -> Option<usize> {
        let span = self.index.get(node)?;
        match self.tree.get(node)?.kind() {
            ContentKind::Text { .. } => Some(span.end),
            ContentKind::Element { .. } => Some(span.end_tag.map_or(span.end, |tag| tag.start)),
        }
    }

    /// Offset for "before the first child" of `element`: the end of the nearest
    /// meaningful content before it, else the start of its own opening tag.
    fn element_start(&self, element: NodeId) -> Option<usize> {
        let mut cursor = TreeCursor::new(self.tree, element)?;
        if let Some(previous) = cursor.previous_content() {
            log::trace!(
                target: "selection_map.resolve",
                "element {element:?} at offset 0 follows {previous:?}"
            );
            return self.end_position(previous);
        }
        self.index.get(element).map(|span| span.start)
    }
}

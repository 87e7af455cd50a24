//! Parent / previous-sibling navigation over a content tree.

use crate::node::NodeId;
use crate::tree::{ContentTree, ROOT_INDEX};

/// A position in a [`ContentTree`] that moves by arena lookups only.
#[derive(Clone, Copy, Debug)]
pub struct TreeCursor<'a> {
    tree: &'a ContentTree,
    index: usize,
}

impl<'a> TreeCursor<'a> {
    /// `None` when `node` does not belong to `tree`.
    pub fn new(tree: &'a ContentTree, node: NodeId) -> Option<Self> {
        tree.contains(node).then_some(Self {
            tree,
            index: node.index(),
        })
    }

    pub fn node(&self) -> NodeId {
        NodeId::new(self.tree.generation(), self.index)
    }

    pub fn is_root(&self) -> bool {
        self.index == ROOT_INDEX
    }

    pub fn to_previous_sibling(&mut self) -> bool {
        match self.tree.node(self.index).prev_sibling {
            Some(prev) => {
                self.index = prev;
                true
            }
            None => false,
        }
    }

    pub fn to_parent(&mut self) -> bool {
        match self.tree.node(self.index).parent {
            Some(parent) => {
                self.index = parent;
                true
            }
            None => false,
        }
    }

    /// Nearest meaningful content before the cursor in document order.
    ///
    /// Whitespace-only text siblings are stepped over. When a node has no
    /// previous sibling the search continues from its parent, but never from the
    /// container itself. The cursor is left where the search stopped.
    pub fn previous_content(&mut self) -> Option<NodeId> {
        loop {
            if self.to_previous_sibling() {
                if self.tree.node(self.index).is_whitespace_text() {
                    continue;
                }
                return Some(self.node());
            }
            if !self.to_parent() || self.is_root() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ContentKind;

    fn element(name: &str) -> ContentKind {
        ContentKind::Element {
            name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    fn text(value: &str) -> ContentKind {
        ContentKind::Text {
            value: value.to_string(),
        }
    }

    #[test]
    fn previous_content_skips_whitespace_siblings() {
        let mut tree = ContentTree::new(0);
        let a = tree.push_child(ROOT_INDEX, text("A"));
        tree.push_child(ROOT_INDEX, text("  \n"));
        let p = tree.push_child(ROOT_INDEX, element("p"));
        let p_id = tree.node_id(p).expect("p exists");
        let mut cursor = TreeCursor::new(&tree, p_id).expect("cursor");
        assert_eq!(cursor.previous_content(), tree.node_id(a));
    }

    #[test]
    fn previous_content_climbs_to_parent_siblings() {
        let mut tree = ContentTree::new(0);
        let before = tree.push_child(ROOT_INDEX, element("h1"));
        let div = tree.push_child(ROOT_INDEX, element("div"));
        let inner = tree.push_child(div, element("p"));
        let inner_id = tree.node_id(inner).expect("inner exists");
        let mut cursor = TreeCursor::new(&tree, inner_id).expect("cursor");
        assert_eq!(cursor.previous_content(), tree.node_id(before));
    }

    #[test]
    fn previous_content_stops_at_container() {
        let mut tree = ContentTree::new(0);
        let div = tree.push_child(ROOT_INDEX, element("div"));
        tree.push_child(div, text(" "));
        let p = tree.push_child(div, element("p"));
        let p_id = tree.node_id(p).expect("p exists");
        let mut cursor = TreeCursor::new(&tree, p_id).expect("cursor");
        assert_eq!(cursor.previous_content(), None);
        assert!(cursor.is_root());
    }

    #[test]
    fn cursor_rejects_foreign_nodes() {
        let tree = ContentTree::new(1);
        let other = ContentTree::new(2);
        assert!(TreeCursor::new(&tree, other.root()).is_none());
    }
}

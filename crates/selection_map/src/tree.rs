//! Arena holding the rendered content of one generation.

use crate::node::{ContentKind, ContentNode, NodeId};
use crate::selection::Boundary;
use html::Attribute;

/// Arena index of the container every render populates.
pub const ROOT_INDEX: usize = 0;

pub const CONTAINER_TAG: &str = "div";
pub const SENTINEL_TAG: &str = "div";
pub const SENTINEL_TEXT: &str = "\u{200B}";

/// Rendered content of one render generation.
///
/// Node 0 is the container; everything the renderer produces hangs below it.
/// Nodes are never removed, so arena indices stay valid for the life of the tree.
#[derive(Clone, Debug)]
pub struct ContentTree {
    generation: u64,
    nodes: Vec<ContentNode>,
    sentinel: Option<usize>,
}

impl ContentTree {
    pub(crate) fn new(generation: u64) -> Self {
        Self::with_capacity(generation, 1)
    }

    pub(crate) fn with_capacity(generation: u64, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(ContentNode::new(
            ContentKind::Element {
                name: CONTAINER_TAG.to_string(),
                attributes: Vec::new(),
            },
            None,
        ));
        Self {
            generation,
            nodes,
            sentinel: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn root(&self) -> NodeId {
        NodeId::new(self.generation, ROOT_INDEX)
    }

    /// Number of nodes, container included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Handle for arena index `index`, if such a node exists.
    pub fn node_id(&self, index: usize) -> Option<NodeId> {
        (index < self.nodes.len()).then(|| NodeId::new(self.generation, index))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&ContentNode> {
        self.slot(id).map(|index| &self.nodes[index])
    }

    pub(crate) fn node(&self, index: usize) -> &ContentNode {
        &self.nodes[index]
    }

    fn slot(&self, id: NodeId) -> Option<usize> {
        if id.generation() != self.generation {
            return None;
        }
        let index = id.index();
        (index < self.nodes.len()).then_some(index)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let index = self.slot(id)?;
        self.nodes[index]
            .parent
            .map(|parent| NodeId::new(self.generation, parent))
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.slot(id)?;
        self.nodes[index]
            .prev_sibling
            .map(|prev| NodeId::new(self.generation, prev))
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.get(id).map_or(0, ContentNode::child_count)
    }

    /// The `k`-th child (0-based) of `id`.
    pub fn child_at(&self, id: NodeId, k: usize) -> Option<NodeId> {
        let node = self.get(id)?;
        node.children
            .get(k)
            .map(|&child| NodeId::new(self.generation, child))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let generation = self.generation;
        self.get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&child| NodeId::new(generation, child))
    }

    /// The trailing sentinel appended by the last render.
    pub fn sentinel(&self) -> Option<NodeId> {
        self.sentinel.map(|index| NodeId::new(self.generation, index))
    }

    /// True for the sentinel and its zero-width text child.
    pub fn is_sentinel(&self, id: NodeId) -> bool {
        let Some(sentinel) = self.sentinel else {
            return false;
        };
        self.slot(id)
            .is_some_and(|index| index == sentinel || self.nodes[index].parent == Some(sentinel))
    }

    /// Appends an element under `parent`. Returns `None` when `parent` is not an
    /// element of this tree. Children of the container go before the sentinel.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: &str,
        attributes: Vec<Attribute>,
    ) -> Option<NodeId> {
        let parent = self.element_slot(parent)?;
        let kind = ContentKind::Element {
            name: name.to_ascii_lowercase(),
            attributes,
        };
        Some(NodeId::new(self.generation, self.insert_child(parent, kind)))
    }

    /// Appends a text node under `parent`, with the same rules as [`Self::append_element`].
    pub fn append_text(&mut self, parent: NodeId, value: &str) -> Option<NodeId> {
        let parent = self.element_slot(parent)?;
        let kind = ContentKind::Text {
            value: value.to_string(),
        };
        Some(NodeId::new(self.generation, self.insert_child(parent, kind)))
    }

    fn element_slot(&self, id: NodeId) -> Option<usize> {
        self.slot(id).filter(|&index| self.nodes[index].is_element())
    }

    fn insert_child(&mut self, parent: usize, kind: ContentKind) -> usize {
        match self.sentinel {
            Some(sentinel) if parent == ROOT_INDEX => self.insert_before(parent, sentinel, kind),
            _ => self.push_child(parent, kind),
        }
    }

    /// Appends `kind` as the last child of `parent`, returning its arena index.
    pub(crate) fn push_child(&mut self, parent: usize, kind: ContentKind) -> usize {
        let index = self.nodes.len();
        let mut node = ContentNode::new(kind, Some(parent));
        node.prev_sibling = self.nodes[parent].children.last().copied();
        self.nodes.push(node);
        self.nodes[parent].children.push(index);
        index
    }

    fn insert_before(&mut self, parent: usize, before: usize, kind: ContentKind) -> usize {
        let Some(position) = self.nodes[parent].children.iter().position(|&c| c == before) else {
            return self.push_child(parent, kind);
        };
        let index = self.nodes.len();
        let mut node = ContentNode::new(kind, Some(parent));
        node.prev_sibling = self.nodes[before].prev_sibling;
        self.nodes.push(node);
        self.nodes[before].prev_sibling = Some(index);
        self.nodes[parent].children.insert(position, index);
        index
    }

    pub(crate) fn push_sentinel(&mut self) -> usize {
        let sentinel = self.push_child(
            ROOT_INDEX,
            ContentKind::Element {
                name: SENTINEL_TAG.to_string(),
                attributes: vec![
                    (
                        "style".to_string(),
                        Some("height: 0; overflow: hidden".to_string()),
                    ),
                    ("data-sentinel".to_string(), Some("true".to_string())),
                ],
            },
        );
        self.push_child(
            sentinel,
            ContentKind::Text {
                value: SENTINEL_TEXT.to_string(),
            },
        );
        self.sentinel = Some(sentinel);
        sentinel
    }

    /// Same nodes in the same shape, regardless of generation.
    pub fn structurally_eq(&self, other: &ContentTree) -> bool {
        self.nodes == other.nodes && self.sentinel == other.sentinel
    }

    /// Text between two boundaries in document order, as a host would report
    /// the selected string. `None` if either boundary does not address this tree.
    pub fn text_between(&self, start: Boundary, end: Boundary) -> Option<String> {
        let flat = FlatText::build(self);
        let a = flat.position(self, start)?;
        let b = flat.position(self, end)?;
        Some(flat.text[a.min(b)..a.max(b)].to_string())
    }
}

/// Concatenated text of the tree with each node's subtree extent in it.
struct FlatText {
    text: String,
    starts: Vec<usize>,
    ends: Vec<usize>,
}

impl FlatText {
    fn build(tree: &ContentTree) -> Self {
        let count = tree.nodes.len();
        let mut flat = FlatText {
            text: String::new(),
            starts: vec![0; count],
            ends: vec![0; count],
        };
        let mut stack: Vec<(usize, bool)> = vec![(ROOT_INDEX, false)];
        while let Some((index, visited)) = stack.pop() {
            if visited {
                flat.ends[index] = flat.text.len();
                continue;
            }
            flat.starts[index] = flat.text.len();
            let node = &tree.nodes[index];
            if let Some(value) = node.text() {
                flat.text.push_str(value);
            }
            stack.push((index, true));
            for &child in node.children.iter().rev() {
                stack.push((child, false));
            }
        }
        flat
    }

    fn position(&self, tree: &ContentTree, boundary: Boundary) -> Option<usize> {
        let index = tree.slot(boundary.node)?;
        let node = &tree.nodes[index];
        match node.text() {
            Some(value) => value
                .is_char_boundary(boundary.offset)
                .then(|| self.starts[index] + boundary.offset),
            None => match node.children.get(boundary.offset) {
                Some(&child) => Some(self.starts[child]),
                None if boundary.offset == node.children.len() => Some(self.ends[index]),
                None => None,
            },
        }
    }
}

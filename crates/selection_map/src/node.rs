//! Content nodes and their handles.

use html::Attribute;

/// Copyable handle to a node of one render generation.
///
/// Handles are only meaningful for the [`ContentTree`](crate::ContentTree) that
/// issued them: every lookup checks the generation, so a handle kept across a
/// re-render resolves to nothing instead of to an unrelated node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    generation: u64,
    index: u32,
}

impl NodeId {
    #[inline]
    pub(crate) fn new(generation: u64, index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize);
        Self {
            generation,
            index: index as u32,
        }
    }

    /// Render generation this handle belongs to.
    #[inline]
    pub const fn generation(self) -> u64 {
        self.generation
    }

    /// Arena index within its generation. The container is always index 0.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Element {
        name: String,
        attributes: Vec<Attribute>,
    },
    Text {
        value: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentNode {
    pub(crate) kind: ContentKind,
    pub(crate) parent: Option<usize>,
    pub(crate) prev_sibling: Option<usize>,
    pub(crate) children: Vec<usize>,
}

impl ContentNode {
    pub(crate) fn new(kind: ContentKind, parent: Option<usize>) -> Self {
        Self {
            kind,
            parent,
            prev_sibling: None,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &ContentKind {
        &self.kind
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, ContentKind::Element { .. })
    }

    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            ContentKind::Element { name, .. } => Some(name),
            ContentKind::Text { .. } => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ContentKind::Text { value } => Some(value),
            ContentKind::Element { .. } => None,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match &self.kind {
            ContentKind::Element { attributes, .. } => attributes,
            ContentKind::Text { .. } => &[],
        }
    }

    /// First value of attribute `name`; `Some("")` for a valueless attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    /// Text made only of whitespace. Elements never count as whitespace.
    pub fn is_whitespace_text(&self) -> bool {
        self.text().is_some_and(|value| value.trim().is_empty())
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

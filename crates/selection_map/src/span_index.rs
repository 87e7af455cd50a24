//! Node identity → source span map for one render generation.

use crate::node::NodeId;
use html::SourceSpan;

/// Dense map from arena index to the source location of that node.
///
/// Keyed by node identity, never by node value: two equal text nodes at
/// different positions keep their own spans. Entries of another generation
/// are never visible through [`SourceSpanIndex::get`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceSpanIndex {
    generation: u64,
    spans: Vec<Option<SourceSpan>>,
    mapped: usize,
}

impl SourceSpanIndex {
    pub(crate) fn new(generation: u64) -> Self {
        Self::with_capacity(generation, 0)
    }

    pub(crate) fn with_capacity(generation: u64, capacity: usize) -> Self {
        Self {
            generation,
            spans: Vec::with_capacity(capacity),
            mapped: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn insert(&mut self, index: usize, span: SourceSpan) {
        if self.spans.len() <= index {
            self.spans.resize(index + 1, None);
        }
        if self.spans[index].replace(span).is_none() {
            self.mapped += 1;
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&SourceSpan> {
        if id.generation() != self.generation {
            return None;
        }
        self.spans.get(id.index())?.as_ref()
    }

    /// Number of mapped nodes.
    pub fn len(&self) -> usize {
        self.mapped
    }

    pub fn is_empty(&self) -> bool {
        self.mapped == 0
    }
}

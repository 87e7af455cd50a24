//! The rendered view: current generation plus the render and selection entry points.

use crate::node::NodeId;
use crate::render::{InputMode, RenderOptions, render_content};
use crate::resolve::SelectionResolver;
use crate::selection::{Selection, SourceRange};
use crate::span_index::SourceSpanIndex;
use crate::store::SelectionSink;
use crate::tree::ContentTree;
use html::ParseNode;

/// Everything one render produced. Replaced as a unit.
#[derive(Clone, Debug)]
struct Generation {
    tree: ContentTree,
    index: SourceSpanIndex,
    source: String,
}

/// A selection mapped back to its source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionResult {
    pub range: SourceRange,
    /// `source[range]`.
    pub source_snippet: String,
    /// Rendered text between the two boundaries.
    pub selected_text: String,
}

/// Rendered content kept in sync with the source it came from.
///
/// `render` replaces the tree, the span index and the source together, so a
/// selection is always resolved against the index of the tree it was made in.
#[derive(Clone, Debug)]
pub struct ContentView {
    current: Generation,
    options: RenderOptions,
}

impl Default for ContentView {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl ContentView {
    /// An empty view: only the container exists and nothing resolves.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            current: Generation {
                tree: ContentTree::new(0),
                index: SourceSpanIndex::new(0),
                source: String::new(),
            },
            options,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn tree(&self) -> &ContentTree {
        &self.current.tree
    }

    /// Host-side mutation of the rendered tree. Nodes added here are never indexed.
    pub fn tree_mut(&mut self) -> &mut ContentTree {
        &mut self.current.tree
    }

    pub fn index(&self) -> &SourceSpanIndex {
        &self.current.index
    }

    pub fn source(&self) -> &str {
        &self.current.source
    }

    pub fn generation(&self) -> u64 {
        self.current.tree.generation()
    }

    /// Handle for arena index `index` of the current generation.
    pub fn node_at_index(&self, index: usize) -> Option<NodeId> {
        self.current.tree.node_id(index)
    }

    pub fn resolver(&self) -> SelectionResolver<'_> {
        SelectionResolver::new(&self.current.tree, &self.current.index)
    }

    /// Renders `parse_tree`, which must have been parsed from `source`.
    pub fn render(&mut self, parse_tree: &ParseNode, source: &str) {
        let generation = self.generation() + 1;
        let (tree, index) = render_content(parse_tree, generation, &self.options);
        log::debug!(
            target: "selection_map.view",
            "installing generation {generation} ({} nodes, {} mapped, {} source bytes)",
            tree.node_count(),
            index.len(),
            source.len()
        );
        self.current = Generation {
            tree,
            index,
            source: source.to_string(),
        };
    }

    /// Parses `markup` with the view's options, then renders it.
    pub fn render_markup(&mut self, markup: &str) {
        let parse_tree = match self.options.mode {
            InputMode::Document => html::parse(markup, self.options.parse),
            InputMode::Fragment => html::parse_fragment(markup, self.options.parse),
        };
        self.render(&parse_tree, markup);
    }

    pub fn resolve(&self, selection: &Selection) -> Option<SourceRange> {
        self.resolver().resolve_selection(selection)
    }

    /// Resolves `selection` and slices the source; `None` for collapsed or
    /// unresolvable selections.
    pub fn map_selection(&self, selection: &Selection) -> Option<SelectionResult> {
        let range = self.resolve(selection)?;
        let Some(snippet) = range.slice(&self.current.source) else {
            log::debug!(
                target: "selection_map.view",
                "range {}..{} is not a valid slice of the source",
                range.start,
                range.end
            );
            return None;
        };
        let selected_text = self
            .current
            .tree
            .text_between(selection.start, selection.end)
            .unwrap_or_default();
        Some(SelectionResult {
            range,
            source_snippet: snippet.to_string(),
            selected_text,
        })
    }

    /// Selection entry point.
    ///
    /// - no live selection: the sink is cleared;
    /// - a selection outside the current content: ignored;
    /// - otherwise the sink receives the snippet, or is cleared when the
    ///   selection does not map back to the source.
    pub fn handle_selection_change(
        &self,
        selection: Option<Selection>,
        sink: &mut impl SelectionSink,
    ) {
        let Some(selection) = selection else {
            sink.clear_selection();
            return;
        };
        let tree = &self.current.tree;
        if !tree.contains(selection.start.node) || !tree.contains(selection.end.node) {
            log::debug!(
                target: "selection_map.view",
                "ignoring selection outside generation {}",
                tree.generation()
            );
            return;
        }
        match self.map_selection(&selection) {
            Some(result) => sink.set_selection(result.source_snippet),
            None => sink.clear_selection(),
        }
    }
}

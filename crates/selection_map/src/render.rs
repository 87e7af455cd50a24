//! Parse tree → content tree transformation, recording source spans as it goes.

use crate::node::ContentKind;
use crate::span_index::SourceSpanIndex;
use crate::tree::{ContentTree, ROOT_INDEX};
use html::traverse::{content_children, count_nodes};
use html::{Attribute, ParseNode, ParseOptions, SourceSpan};

/// How markup handed to [`ContentView::render_markup`](crate::ContentView::render_markup)
/// is parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Full document; content is the children of `body`.
    #[default]
    Document,
    /// Body content without document wrappers.
    Fragment,
}

/// Configuration for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub mode: InputMode,
    pub parse: ParseOptions,
    /// Add `data-source-*` attributes to mapped elements.
    pub debug_attributes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: InputMode::Document,
            parse: ParseOptions::default(),
            debug_attributes: false,
        }
    }
}

/// Builds the content tree and span index of one generation from a parse tree.
pub(crate) fn render_content(
    parse_tree: &ParseNode,
    generation: u64,
    options: &RenderOptions,
) -> (ContentTree, SourceSpanIndex) {
    let content = content_children(parse_tree);
    // Upper bound: everything below the parse root plus container and sentinel pair.
    let capacity = content.iter().map(count_nodes).sum::<usize>() + 3;
    let mut tree = ContentTree::with_capacity(generation, capacity);
    let mut index = SourceSpanIndex::with_capacity(generation, capacity);

    let mut stack: Vec<(&ParseNode, usize)> = Vec::with_capacity(64);
    for node in content.iter().rev() {
        stack.push((node, ROOT_INDEX));
    }

    let mut skipped = 0usize;
    while let Some((node, parent)) = stack.pop() {
        match node {
            ParseNode::Comment { .. } => skipped += 1,
            ParseNode::Text { value, .. } if parent == ROOT_INDEX && value.trim().is_empty() => {
                skipped += 1;
            }
            ParseNode::Text { value, location } => {
                let created = tree.push_child(
                    parent,
                    ContentKind::Text {
                        value: value.clone(),
                    },
                );
                if let Some(location) = location {
                    index.insert(created, *location);
                }
            }
            ParseNode::Element {
                name,
                attributes,
                children,
                location,
            } => {
                let mut attributes = attributes.clone();
                if options.debug_attributes
                    && let Some(location) = location
                {
                    push_debug_attributes(&mut attributes, location);
                }
                let created = tree.push_child(
                    parent,
                    ContentKind::Element {
                        name: name.clone(),
                        attributes,
                    },
                );
                if let Some(location) = location {
                    index.insert(created, *location);
                }
                for child in children.iter().rev() {
                    stack.push((child, created));
                }
            }
            ParseNode::Document { .. } | ParseNode::Fragment { .. } => {
                log::debug!(target: "selection_map.render", "nested document root skipped");
                skipped += 1;
            }
        }
    }

    tree.push_sentinel();
    log::trace!(
        target: "selection_map.render",
        "generation {generation}: {} nodes, {} mapped, {skipped} skipped",
        tree.node_count(),
        index.len()
    );
    (tree, index)
}

fn push_debug_attributes(attributes: &mut Vec<Attribute>, location: &SourceSpan) {
    attributes.push((
        "data-source-start".to_string(),
        Some(location.start.to_string()),
    ));
    attributes.push(("data-source-end".to_string(), Some(location.end.to_string())));
    if let Some(start_tag) = location.start_tag {
        attributes.push((
            "data-source-start-tag-end".to_string(),
            Some(start_tag.end.to_string()),
        ));
    }
    if let Some(end_tag) = location.end_tag {
        attributes.push((
            "data-source-end-tag-start".to_string(),
            Some(end_tag.start.to_string()),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::parse_fragment;

    fn render(source: &str, options: RenderOptions) -> (ContentTree, SourceSpanIndex) {
        let frag = parse_fragment(source, options.parse);
        render_content(&frag, 1, &options)
    }

    #[test]
    fn comments_are_skipped_at_every_level() {
        let (tree, _) = render("<!--a--><p>x<!--b-->y</p>", RenderOptions::default());
        let root = tree.root();
        assert_eq!(tree.child_count(root), 2);
        let p = tree.child_at(root, 0).expect("p");
        assert_eq!(tree.child_count(p), 2);
    }

    #[test]
    fn nested_whitespace_text_is_kept() {
        let (tree, index) = render("<p>a <b>b</b> </p>", RenderOptions::default());
        let p = tree.child_at(tree.root(), 0).expect("p");
        assert_eq!(tree.child_count(p), 3);
        let trailing = tree.child_at(p, 2).expect("trailing text");
        assert!(tree.get(trailing).is_some_and(|n| n.is_whitespace_text()));
        assert!(index.get(trailing).is_some());
    }

    #[test]
    fn sentinel_is_last_and_unmapped() {
        let (tree, index) = render("<p>x</p>", RenderOptions::default());
        let sentinel = tree.sentinel().expect("sentinel");
        let last = tree.child_at(tree.root(), tree.child_count(tree.root()) - 1);
        assert_eq!(last, Some(sentinel));
        let node = tree.get(sentinel).expect("sentinel node");
        assert_eq!(node.attr("data-sentinel"), Some("true"));
        assert_eq!(node.attr("style"), Some("height: 0; overflow: hidden"));
        let zwsp = tree.child_at(sentinel, 0).expect("zwsp text");
        assert_eq!(tree.get(zwsp).and_then(|n| n.text()), Some("\u{200B}"));
        assert!(index.get(sentinel).is_none());
        assert!(index.get(zwsp).is_none());
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn debug_attributes_follow_verbatim_attributes() {
        let options = RenderOptions {
            debug_attributes: true,
            ..RenderOptions::default()
        };
        let (tree, _) = render("<p class=lead>x</p>", options);
        let p = tree.child_at(tree.root(), 0).expect("p");
        let names: Vec<&str> = tree
            .get(p)
            .expect("p node")
            .attributes()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "class",
                "data-source-start",
                "data-source-end",
                "data-source-start-tag-end",
                "data-source-end-tag-start",
            ]
        );
        let node = tree.get(p).expect("p node");
        assert_eq!(node.attr("data-source-end"), Some("19"));
        assert_eq!(node.attr("data-source-end-tag-start"), Some("15"));
    }

    #[test]
    fn nodes_without_location_are_rendered_but_not_indexed() {
        let options = RenderOptions {
            parse: ParseOptions {
                source_locations: false,
            },
            debug_attributes: true,
            ..RenderOptions::default()
        };
        let (tree, index) = render("<p>x</p>", options);
        assert_eq!(tree.child_count(tree.root()), 2);
        assert!(index.is_empty());
        let p = tree.child_at(tree.root(), 0).expect("p");
        assert!(tree.get(p).is_some_and(|n| n.attributes().is_empty()));
    }

    #[test]
    fn deep_nesting_renders_without_recursion() {
        let depth = 5_000;
        let source = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let (tree, index) = render(&source, RenderOptions::default());
        // container + divs + text + sentinel pair
        assert_eq!(tree.node_count(), depth + 4);
        assert_eq!(index.len(), depth + 1);
    }
}

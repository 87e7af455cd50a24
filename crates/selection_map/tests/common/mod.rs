#![allow(dead_code)]

use selection_map::{ContentTree, ContentView, InputMode, NodeId, RenderOptions};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn fragment_view(markup: &str) -> ContentView {
    init_logging();
    let mut view = ContentView::new(RenderOptions {
        mode: InputMode::Fragment,
        ..RenderOptions::default()
    });
    view.render_markup(markup);
    view
}

pub fn document_view(markup: &str) -> ContentView {
    init_logging();
    let mut view = ContentView::default();
    view.render_markup(markup);
    view
}

/// Follows child positions from the container.
pub fn node_at_path(tree: &ContentTree, path: &[usize]) -> NodeId {
    path.iter().fold(tree.root(), |node, &k| {
        tree.child_at(node, k)
            .unwrap_or_else(|| panic!("no child {k} on path {path:?}"))
    })
}

/// First text node (document order) whose value equals `value`.
pub fn text_node(tree: &ContentTree, value: &str) -> NodeId {
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        if tree.get(node).and_then(|n| n.text()) == Some(value) {
            return node;
        }
        let children: Vec<NodeId> = tree.children(node).collect();
        stack.extend(children.into_iter().rev());
    }
    panic!("no text node {value:?}");
}

use proptest::prelude::*;
use selection_map::{
    Boundary, ContentKind, ContentTree, ContentView, InputMode, NodeId, RenderOptions, Selection,
    SourceSpanIndex,
};

const TAGS: &[&str] = &["div", "span", "b", "em", "i", "section"];

fn markup() -> impl Strategy<Value = String> {
    let text = "[a-zA-Z0-9 ]{1,8}";
    text.prop_recursive(4, 48, 4, |inner| {
        (
            prop::sample::select(TAGS),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(tag, children)| format!("<{tag}>{}</{tag}>", children.concat()))
    })
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(markup(), 1..5).prop_map(|parts| parts.join("\n"))
}

fn render(source: &str) -> ContentView {
    let mut view = ContentView::new(RenderOptions {
        mode: InputMode::Fragment,
        ..RenderOptions::default()
    });
    view.render_markup(source);
    view
}

fn preorder(tree: &ContentTree) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        out.push(node);
        let children: Vec<NodeId> = tree.children(node).collect();
        stack.extend(children.into_iter().rev());
    }
    out
}

fn mapped(tree: &ContentTree, index: &SourceSpanIndex) -> Vec<NodeId> {
    preorder(tree)
        .into_iter()
        .filter(|&node| index.get(node).is_some())
        .collect()
}

proptest! {
    #[test]
    fn sibling_spans_never_overlap(source in document()) {
        let view = render(&source);
        let tree = view.tree();
        for node in preorder(tree) {
            let mut previous_end = 0;
            for child in tree.children(node) {
                if let Some(span) = view.index().get(child) {
                    prop_assert!(span.start >= previous_end, "siblings overlap in {source:?}");
                    prop_assert!(span.start <= span.end);
                    previous_end = span.end;
                }
            }
        }
    }

    #[test]
    fn spans_reproduce_node_markup(source in document()) {
        let view = render(&source);
        let tree = view.tree();
        for node in mapped(tree, view.index()) {
            let span = view.index().get(node).copied().expect("mapped");
            let slice = span.slice(&source).expect("span is a valid slice");
            match tree.get(node).expect("node").kind() {
                ContentKind::Text { value } => prop_assert_eq!(slice, value.as_str()),
                ContentKind::Element { name, .. } => {
                    let open = format!("<{name}>");
                    let close = format!("</{name}>");
                    prop_assert!(slice.starts_with(&open));
                    prop_assert!(slice.ends_with(&close));
                }
            }
        }
    }

    #[test]
    fn whole_text_selection_round_trips(source in document()) {
        let view = render(&source);
        let tree = view.tree();
        for node in mapped(tree, view.index()) {
            let Some(value) = tree.get(node).and_then(|n| n.text()) else {
                continue;
            };
            let selection = Selection::new(Boundary::new(node, 0), Boundary::new(node, value.len()));
            let result = view.map_selection(&selection).expect("text selection maps");
            prop_assert_eq!(&result.source_snippet, value);
            prop_assert_eq!(&result.selected_text, value);
        }
    }

    #[test]
    fn rendering_is_idempotent(source in document()) {
        let first = render(&source);
        let mut second = render(&source);
        second.render_markup(&source);
        prop_assert!(first.tree().structurally_eq(second.tree()));

        for node in preorder(first.tree()) {
            let child_count = first.tree().child_count(node);
            let same = second.node_at_index(node.index()).expect("same shape");
            for offset in 0..=child_count {
                let a = first.resolver().resolve_boundary(Boundary::new(node, offset));
                let b = second.resolver().resolve_boundary(Boundary::new(same, offset));
                prop_assert_eq!(a, b);
            }
        }
    }
}

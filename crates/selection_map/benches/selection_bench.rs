use criterion::{Criterion, black_box, criterion_group, criterion_main};
use html::perf_fixtures::make_document;
use html::{ParseOptions, parse};
use selection_map::{Boundary, ContentView, NodeId, Selection};

const BLOCKS: usize = 5_000;

fn last_text(view: &ContentView) -> NodeId {
    let tree = view.tree();
    (0..tree.node_count())
        .rev()
        .filter_map(|index| tree.node_id(index))
        .find(|&id| {
            !tree.is_sentinel(id)
                && tree
                    .get(id)
                    .and_then(|node| node.text())
                    .is_some_and(|text| !text.trim().is_empty())
        })
        .unwrap_or_else(|| tree.root())
}

fn bench_render(c: &mut Criterion) {
    let source = make_document(BLOCKS);
    let doc = parse(&source, ParseOptions::default());
    let mut view = ContentView::default();
    c.bench_function("bench_render_document", |b| {
        b.iter(|| {
            view.render(black_box(&doc), &source);
            black_box(view.generation());
        });
    });
}

fn bench_render_markup_end_to_end(c: &mut Criterion) {
    let source = make_document(BLOCKS);
    let mut view = ContentView::default();
    c.bench_function("bench_render_markup_end_to_end", |b| {
        b.iter(|| {
            view.render_markup(black_box(&source));
            black_box(view.generation());
        });
    });
}

fn bench_resolve_full_selection(c: &mut Criterion) {
    let source = make_document(BLOCKS);
    let mut view = ContentView::default();
    view.render_markup(&source);
    let first = view.tree().child_at(view.tree().root(), 0).unwrap_or(view.tree().root());
    let last = last_text(&view);
    let selection = Selection::new(Boundary::new(first, 0), Boundary::new(last, 1));
    c.bench_function("bench_resolve_full_selection", |b| {
        b.iter(|| black_box(view.resolve(black_box(&selection))));
    });
    c.bench_function("bench_map_full_selection", |b| {
        b.iter(|| black_box(view.map_selection(black_box(&selection))));
    });
}

criterion_group!(
    benches,
    bench_render,
    bench_render_markup_end_to_end,
    bench_resolve_full_selection
);
criterion_main!(benches);

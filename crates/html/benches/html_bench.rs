use criterion::{Criterion, black_box, criterion_group, criterion_main};
use html::perf_fixtures::{make_blocks, make_document, make_rawtext_adversarial};
use html::{ParseOptions, TreeMode, build_tree, parse, tokenize};

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 20_000;

fn bench_tokenize_small(c: &mut Criterion) {
    let input = make_blocks(SMALL_BLOCKS);
    c.bench_function("bench_tokenize_small", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(&input));
            black_box(tokens.len());
        });
    });
}

fn bench_tokenize_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_tokenize_large", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(&input));
            black_box(tokens.len());
        });
    });
}

fn bench_tree_build_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    let tokens = tokenize(&input);
    c.bench_function("bench_tree_build_large", |b| {
        b.iter(|| {
            let tree = build_tree(
                black_box(&tokens),
                input.len(),
                TreeMode::Fragment,
                ParseOptions::default(),
            );
            black_box(tree);
        });
    });
}

fn bench_parse_document_end_to_end(c: &mut Criterion) {
    let input = make_document(LARGE_BLOCKS);
    c.bench_function("bench_parse_document_end_to_end", |b| {
        b.iter(|| {
            let doc = parse(black_box(&input), ParseOptions::default());
            black_box(doc);
        });
    });
}

fn bench_tokenize_rawtext_adversarial(c: &mut Criterion) {
    let input = make_rawtext_adversarial(512 * 1024);
    c.bench_function("bench_tokenize_rawtext_adversarial", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(&input));
            black_box(tokens.len());
        });
    });
}

criterion_group!(
    benches,
    bench_tokenize_small,
    bench_tokenize_large,
    bench_tree_build_large,
    bench_parse_document_end_to_end,
    bench_tokenize_rawtext_adversarial
);
criterion_main!(benches);

#![no_main]

use libfuzzer_sys::fuzz_target;
use selection_map::{Boundary, ContentView, InputMode, RenderOptions, Selection};

fuzz_target!(|data: &[u8]| {
    let (selector, markup) = match data.split_first() {
        Some((&first, rest)) => (first, rest),
        None => return,
    };
    let Ok(markup) = std::str::from_utf8(markup) else {
        return;
    };
    let mode = if selector & 1 == 0 {
        InputMode::Document
    } else {
        InputMode::Fragment
    };
    let mut view = ContentView::new(RenderOptions {
        mode,
        ..RenderOptions::default()
    });
    view.render_markup(markup);

    let tree = view.tree();
    let count = tree.node_count();
    let pick = |salt: usize| tree.node_id((selector as usize).wrapping_mul(31).wrapping_add(salt) % count);
    let (Some(a), Some(b)) = (pick(7), pick(13)) else {
        return;
    };
    for offset in 0..4 {
        let selection = Selection::new(Boundary::new(a, offset), Boundary::new(b, offset + 1));
        if let Some(range) = view.resolve(&selection) {
            assert!(range.start <= range.end);
            assert!(range.end <= markup.len(), "range past end of source");
        }
        let _ = view.map_selection(&selection);
    }
});

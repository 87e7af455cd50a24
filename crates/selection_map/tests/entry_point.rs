mod common;

use common::{document_view, text_node};
use selection_map::{Boundary, Selection, SelectionSink, SelectionStore};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct RecordingSink {
    calls: Vec<Option<String>>,
}

impl SelectionSink for RecordingSink {
    fn set_selection(&mut self, snippet: String) {
        self.calls.push(Some(snippet));
    }

    fn clear_selection(&mut self) {
        self.calls.push(None);
    }
}

#[test]
fn no_live_selection_clears_the_sink() {
    let view = document_view("<p>Hello</p>");
    let mut sink = RecordingSink::default();
    view.handle_selection_change(None, &mut sink);
    assert_eq!(sink.calls, vec![None]);
}

#[test]
fn mapped_selection_sets_the_snippet() {
    let view = document_view("<p>Hello <b>world</b></p>");
    let hello = text_node(view.tree(), "Hello ");
    let world = text_node(view.tree(), "world");
    let selection = Selection::new(Boundary::new(hello, 0), Boundary::new(world, 5));

    let mut store = SelectionStore::new();
    view.handle_selection_change(Some(selection), &mut store);
    assert_eq!(store.get(), Some("Hello <b>world"));
    assert_eq!(store.revision(), 1);
}

#[test]
fn unmappable_selection_clears_the_sink() {
    let view = document_view("<p>Hello</p>");
    let hello = text_node(view.tree(), "Hello");
    let mut sink = RecordingSink::default();

    view.handle_selection_change(Some(Selection::collapsed(Boundary::new(hello, 1))), &mut sink);
    let sentinel_text = view
        .tree()
        .child_at(view.tree().sentinel().expect("sentinel"), 0)
        .expect("sentinel text");
    view.handle_selection_change(
        Some(Selection::new(Boundary::new(hello, 1), Boundary::new(sentinel_text, 1))),
        &mut sink,
    );
    assert_eq!(sink.calls, vec![None, None]);
}

#[test]
fn selection_outside_the_current_content_is_ignored() {
    let mut view = document_view("<p>Hello</p>");
    let stale = text_node(view.tree(), "Hello");
    view.render_markup("<p>Hello</p>");

    let mut sink = RecordingSink::default();
    view.handle_selection_change(
        Some(Selection::new(Boundary::new(stale, 0), Boundary::new(stale, 5))),
        &mut sink,
    );
    assert!(sink.calls.is_empty());
}

#[test]
fn store_subscribers_follow_selection_changes() {
    let view = document_view("<p>A</p><p>B</p>");
    let a = text_node(view.tree(), "A");
    let b = text_node(view.tree(), "B");

    let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
    let mut store = SelectionStore::new();
    let log = Rc::clone(&seen);
    store.subscribe(move |value| log.borrow_mut().push(value.map(str::to_string)));

    view.handle_selection_change(
        Some(Selection::new(Boundary::new(a, 0), Boundary::new(b, 1))),
        &mut store,
    );
    view.handle_selection_change(None, &mut store);

    assert_eq!(
        *seen.borrow(),
        vec![Some("A</p><p>B".to_string()), None]
    );
    assert_eq!(store.get(), None);
}

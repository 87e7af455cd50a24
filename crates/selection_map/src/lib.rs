//! Renders markup into a content tree while keeping an exact map from every
//! rendered node back to the source bytes that produced it, and resolves
//! selections made in that content back into source byte ranges.
//!
//! ```
//! use selection_map::{Boundary, ContentView, Selection};
//!
//! let mut view = ContentView::default();
//! view.render_markup("<p>Hello</p>");
//!
//! let p = view.tree().child_at(view.tree().root(), 0).unwrap();
//! let text = view.tree().child_at(p, 0).unwrap();
//! let selection = Selection::new(Boundary::new(text, 0), Boundary::new(text, 5));
//!
//! let result = view.map_selection(&selection).unwrap();
//! assert_eq!((result.range.start, result.range.end), (3, 8));
//! assert_eq!(result.source_snippet, "Hello");
//! ```

pub mod outline;

mod cursor;
mod node;
mod render;
mod resolve;
mod selection;
mod span_index;
mod store;
mod tree;
mod view;

pub use crate::cursor::TreeCursor;
pub use crate::node::{ContentKind, ContentNode, NodeId};
pub use crate::render::{InputMode, RenderOptions};
pub use crate::resolve::SelectionResolver;
pub use crate::selection::{Boundary, Selection, SourceRange};
pub use crate::span_index::SourceSpanIndex;
pub use crate::store::{SelectionSink, SelectionStore, SubscriptionId};
pub use crate::tree::{ContentTree, ROOT_INDEX, SENTINEL_TEXT};
pub use crate::view::{ContentView, SelectionResult};
pub use html::{ParseOptions, SourceSpan, Span};

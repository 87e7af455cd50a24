//! Outline of a rendered tree: one line per node with its arena index and
//! source span, so boundaries can be addressed as `INDEX:OFFSET`.

use crate::node::ContentKind;
use crate::span_index::SourceSpanIndex;
use crate::tree::{ContentTree, ROOT_INDEX};
use html::debug::{
    INDENT_STEP, IndentGuard, PREVIEW_CHARS, push_element_head, push_location,
    push_preview_replace_newlines,
};

pub fn outline_from_content(tree: &ContentTree, index: &SourceSpanIndex, cap: usize) -> Vec<String> {
    fn walk(
        tree: &ContentTree,
        spans: &SourceSpanIndex,
        node_index: usize,
        indent: &mut String,
        out: &mut Vec<String>,
        left: &mut usize,
    ) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let node = tree.node(node_index);
        let id = tree.node_id(node_index);
        let mut line = String::with_capacity(indent.len() + 64);
        line.push_str(indent);
        line.push('[');
        line.push_str(&node_index.to_string());
        line.push_str("] ");
        match node.kind() {
            ContentKind::Element { name, attributes } => {
                push_element_head(&mut line, name, attributes);
            }
            ContentKind::Text { value } => {
                line.push('"');
                push_preview_replace_newlines(&mut line, value, PREVIEW_CHARS);
                line.push('"');
            }
        }
        if id.is_some_and(|id| tree.is_sentinel(id)) {
            line.push_str("  (sentinel)");
        } else {
            push_location(&mut line, id.and_then(|id| spans.get(id)));
        }
        out.push(line);

        if node.children.is_empty() {
            return;
        }
        indent.push_str(INDENT_STEP);
        let guard = IndentGuard {
            indent,
            step: INDENT_STEP.len(),
        };
        for &child in &node.children {
            walk(tree, spans, child, &mut *guard.indent, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    let mut indent = String::new();
    walk(tree, index, ROOT_INDEX, &mut indent, &mut out, &mut left);
    out
}

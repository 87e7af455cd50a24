use crate::span::SourceSpan;
use crate::{Attribute, ParseNode};

pub struct IndentGuard<'a> {
    pub indent: &'a mut String,
    pub step: usize,
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        let new_len = self.indent.len() - self.step;
        self.indent.truncate(new_len);
    }
}

pub const INDENT_STEP: &str = "  ";
pub const PREVIEW_CHARS: usize = 40;

pub fn trimmed_nonempty_slice(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

pub fn push_preview_replace_newlines(out: &mut String, s: &str, max_chars: usize) {
    let mut truncated = false;
    for (i, ch) in s.chars().enumerate() {
        if i == max_chars {
            truncated = true;
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
    if truncated {
        out.push('…');
    }
}

pub fn push_element_head(out: &mut String, name: &str, attributes: &[Attribute]) {
    out.push('<');
    out.push_str(name);
    for key in ["id", "class"] {
        let value = attributes
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
            .unwrap_or("");
        if !value.is_empty() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
    out.push('>');
}

/// `  @start..end`, plus the end tag start when the element was closed explicitly.
pub fn push_location(out: &mut String, location: Option<&SourceSpan>) {
    let Some(loc) = location else {
        return;
    };
    out.push_str("  @");
    out.push_str(&loc.start.to_string());
    out.push_str("..");
    out.push_str(&loc.end.to_string());
    if let Some(end_tag) = loc.end_tag {
        out.push_str(" (end tag @");
        out.push_str(&end_tag.start.to_string());
        out.push(')');
    }
}

/// Indented outline of a parse tree, at most `cap` lines, with source locations.
pub fn outline_from_tree(root: &ParseNode, cap: usize) -> Vec<String> {
    fn walk(node: &ParseNode, indent: &mut String, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let mut line = String::with_capacity(indent.len() + 64);
        line.push_str(indent);
        match node {
            ParseNode::Document { doctype, .. } => match doctype {
                Some(dt) => {
                    line.push_str("<!");
                    line.push_str(dt);
                    line.push('>');
                }
                None => line.push_str("#document"),
            },
            ParseNode::Fragment { .. } => line.push_str("#fragment"),
            ParseNode::Element {
                name,
                attributes,
                location,
                ..
            } => {
                push_element_head(&mut line, name, attributes);
                push_location(&mut line, location.as_ref());
            }
            ParseNode::Text { value, location } => {
                let Some(trimmed) = trimmed_nonempty_slice(value) else {
                    // Whitespace-only text still consumes a line budget slot.
                    return;
                };
                line.push('"');
                push_preview_replace_newlines(&mut line, trimmed, PREVIEW_CHARS);
                line.push('"');
                push_location(&mut line, location.as_ref());
            }
            ParseNode::Comment { text, location } => {
                line.push_str("<!-- ");
                push_preview_replace_newlines(&mut line, text, PREVIEW_CHARS);
                line.push_str(" -->");
                push_location(&mut line, location.as_ref());
            }
        }
        out.push(line);

        let children = node.children();
        if children.is_empty() {
            return;
        }
        indent.push_str(INDENT_STEP);
        let guard = IndentGuard {
            indent,
            step: INDENT_STEP.len(),
        };
        for child in children {
            walk(child, &mut *guard.indent, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    let mut indent = String::new();
    walk(root, &mut indent, &mut out, &mut left);
    out
}

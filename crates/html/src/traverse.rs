use crate::ParseNode;

/// Children that make up the visible content of a parsed tree.
///
/// For a document that is the children of `html > body` (empty when there is no
/// body); for a fragment, its direct children; for an element, its children.
pub fn content_children(root: &ParseNode) -> &[ParseNode] {
    match root {
        ParseNode::Document { children, .. } => find_element(children, "html")
            .and_then(|html| find_element(html.children(), "body"))
            .map(ParseNode::children)
            .unwrap_or_default(),
        other => other.children(),
    }
}

pub fn find_element<'a>(nodes: &'a [ParseNode], name: &str) -> Option<&'a ParseNode> {
    nodes.iter().find(|node| node.is_element_named(name))
}

/// Number of nodes in the subtree rooted at `root`, `root` included.
pub fn count_nodes(root: &ParseNode) -> usize {
    let mut count = 0;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children());
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParseOptions, parse, parse_fragment};

    #[test]
    fn content_children_of_document_are_body_children() {
        let doc = parse("<title>x</title><p>a</p><p>b</p>", ParseOptions::default());
        let content = content_children(&doc);
        assert_eq!(content.len(), 2);
        assert!(content.iter().all(|n| n.is_element_named("p")));
    }

    #[test]
    fn content_children_of_fragment_are_its_children() {
        let frag = parse_fragment("a<b>c</b>", ParseOptions::default());
        assert_eq!(content_children(&frag).len(), 2);
    }

    #[test]
    fn document_without_body_has_no_content() {
        let doc = ParseNode::Document {
            doctype: None,
            children: Vec::new(),
        };
        assert!(content_children(&doc).is_empty());
    }

    #[test]
    fn count_nodes_includes_root() {
        let frag = parse_fragment("<div><b>x</b>y</div>", ParseOptions::default());
        assert_eq!(count_nodes(&frag), 5);
    }
}

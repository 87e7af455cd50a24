//! Arena-based tree builder turning spanned tokens into a `ParseNode` tree.
//!
//! Document mode follows the shape of the HTML insertion modes closely enough for
//! real-world documents: `html`/`head`/`body` are synthesized when missing (without
//! locations), metadata before the body goes into `head`, and the common implied
//! end tags (`p`, `li`, `dd`/`dt`, `option`) are applied. It is not a full HTML5
//! tree builder: no adoption agency, no foster parenting, no template contents.
//!
//! Location contract:
//! - an element closed by its own end tag gets `end_tag` and `end = end_tag.end`;
//! - an element closed implicitly ends where the token that closed it starts (or at
//!   end of input) and has no `end_tag`;
//! - void and self-closing elements end at the end of their start tag.

use crate::span::{SourceSpan, Span};
use crate::types::{Attribute, ParseNode, ParseOptions, Token};

/// Whether tokens are built into a full document or a bare fragment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TreeMode {
    #[default]
    Document,
    Fragment,
}

const HEAD_CONTENT: &[&str] = &["base", "link", "meta", "style", "script", "title"];

const CLOSES_P: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "li",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

const SCOPE_BOUNDARIES: &[&str] = &[
    "applet", "body", "button", "caption", "html", "marquee", "object", "table", "td",
    "template", "th",
];

/// Element names whose implied end tags need a stack search; counted so the
/// search is skipped entirely when none are open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tracked {
    P,
    ListItem,
    Definition,
    SelectOption,
}

impl Tracked {
    fn of(name: &str) -> Option<Self> {
        match name {
            "p" => Some(Self::P),
            "li" => Some(Self::ListItem),
            "dd" | "dt" => Some(Self::Definition),
            "option" => Some(Self::SelectOption),
            _ => None,
        }
    }
}

pub fn build_tree(tokens: &[Token], input_len: usize, mode: TreeMode, options: ParseOptions) -> ParseNode {
    let mut builder = TreeBuilder::new(mode, tokens.len());
    for token in tokens {
        builder.push_token(token);
    }
    builder.finish(input_len);
    log::trace!(
        target: "html.tree_builder",
        "built {} nodes from {} tokens ({mode:?})",
        builder.arena.nodes.len(),
        tokens.len()
    );
    builder.arena.into_tree(mode, options.source_locations)
}

struct TreeBuilder {
    arena: NodeArena,
    mode: TreeMode,
    open_elements: Vec<usize>,
    tracked_open: [usize; 4],
    html: Option<usize>,
    head: Option<usize>,
    body: Option<usize>,
    head_closed: bool,
}

const ROOT: usize = 0;

impl TreeBuilder {
    fn new(mode: TreeMode, token_hint: usize) -> Self {
        let mut arena = NodeArena::with_capacity(token_hint + 4);
        arena.push(ArenaNode::Root {
            doctype: None,
            children: Vec::new(),
        });
        Self {
            arena,
            mode,
            open_elements: Vec::new(),
            tracked_open: [0; 4],
            html: None,
            head: None,
            body: None,
            head_closed: false,
        }
    }

    fn current(&self) -> usize {
        self.open_elements.last().copied().unwrap_or(ROOT)
    }

    fn push_token(&mut self, token: &Token) {
        match self.mode {
            TreeMode::Fragment => self.push_in_fragment(token),
            TreeMode::Document if self.body.is_none() => self.push_before_body(token),
            TreeMode::Document => self.push_in_body(token),
        }
    }

    fn push_in_fragment(&mut self, token: &Token) {
        match token {
            Token::Doctype { .. } => {}
            Token::StartTag { name, .. } | Token::EndTag { name, .. }
                if matches!(name.as_str(), "html" | "head" | "body") =>
            {
                log::trace!(target: "html.tree_builder", "ignoring <{name}> in fragment");
            }
            _ => self.push_in_body(token),
        }
    }

    fn push_before_body(&mut self, token: &Token) {
        match token {
            Token::Doctype { text, .. } => {
                if self.html.is_none() {
                    self.arena.set_doctype(text.clone());
                }
            }
            Token::Comment { .. } => self.insert_leaf(token),
            Token::Text { text, span } => {
                if text.trim().is_empty() {
                    if self.html.is_some() {
                        self.insert_leaf(token);
                    }
                } else {
                    self.ensure_body(span.start);
                    self.insert_leaf(token);
                }
            }
            Token::StartTag { name, span, .. } if name == "html" => {
                if self.html.is_none() {
                    let index = self.insert_element(token, Some(SourceSpan::open_element(*span)));
                    self.html = Some(index);
                }
            }
            Token::StartTag { name, span, .. } if name == "head" => {
                if self.head.is_none() {
                    self.ensure_html();
                    let index = self.insert_element(token, Some(SourceSpan::open_element(*span)));
                    self.head = Some(index);
                }
            }
            Token::StartTag { name, span, .. } if name == "body" => {
                self.ensure_html();
                self.close_head(span.start);
                let index = self.insert_element(token, Some(SourceSpan::open_element(*span)));
                self.body = Some(index);
            }
            Token::StartTag { name, span, .. } => {
                if !self.head_closed && HEAD_CONTENT.contains(&name.as_str()) {
                    self.ensure_head();
                } else {
                    self.ensure_body(span.start);
                }
                self.insert_start_tag(token);
            }
            Token::EndTag { name, span } if name == "head" => {
                if let Some(head) = self.head
                    && let Some(pos) = self.open_elements.iter().rposition(|&i| i == head)
                {
                    self.close_at(pos, span.start, Some(*span));
                    self.head_closed = true;
                }
            }
            Token::EndTag { name, .. } if matches!(name.as_str(), "html" | "body") => {
                log::trace!(target: "html.tree_builder", "ignoring </{name}> before body");
            }
            Token::EndTag { .. } => self.close_by_end_tag(token),
        }
    }

    fn push_in_body(&mut self, token: &Token) {
        match token {
            Token::Doctype { .. } => {}
            Token::Comment { .. } | Token::Text { .. } => self.insert_leaf(token),
            Token::StartTag { name, .. } if matches!(name.as_str(), "html" | "head" | "body") => {
                log::trace!(target: "html.tree_builder", "ignoring <{name}> in body");
            }
            Token::StartTag { .. } => self.insert_start_tag(token),
            Token::EndTag { name, span } if name == "body" || name == "html" => {
                // Body stays the insertion point; trailing content still lands in it.
                let Some(body) = self.body else { return };
                if let Some(pos) = self.open_elements.iter().rposition(|&i| i == body) {
                    self.close_above(pos, span.start);
                }
                let target = if name == "body" { Some(body) } else { self.html };
                if let Some(target) = target {
                    self.arena.record_end_tag(target, *span);
                }
            }
            Token::EndTag { name, .. } if name == "head" => {}
            Token::EndTag { .. } => self.close_by_end_tag(token),
        }
    }

    fn ensure_html(&mut self) {
        if self.html.is_none() {
            let index = self.arena.add_child(
                ROOT,
                ArenaNode::element("html".to_string(), Vec::new(), None),
            );
            self.push_open(index);
            self.html = Some(index);
        }
    }

    fn ensure_head(&mut self) {
        self.ensure_html();
        if self.head.is_none() {
            let parent = self.current();
            let index = self.arena.add_child(
                parent,
                ArenaNode::element("head".to_string(), Vec::new(), None),
            );
            self.push_open(index);
            self.head = Some(index);
        }
    }

    fn ensure_body(&mut self, at: usize) {
        self.ensure_html();
        if self.body.is_some() {
            return;
        }
        self.close_head(at);
        let parent = self.current();
        let index = self.arena.add_child(
            parent,
            ArenaNode::element("body".to_string(), Vec::new(), None),
        );
        self.push_open(index);
        self.body = Some(index);
    }

    /// Ends the head section, synthesizing an empty `head` when the source had none.
    fn close_head(&mut self, at: usize) {
        match (self.head, self.html) {
            (Some(head), _) => {
                if let Some(pos) = self.open_elements.iter().rposition(|&i| i == head) {
                    self.close_at(pos, at, None);
                }
            }
            (None, Some(html)) => {
                let index = self.arena.add_child(
                    html,
                    ArenaNode::element("head".to_string(), Vec::new(), None),
                );
                self.head = Some(index);
            }
            (None, None) => {}
        }
        self.head_closed = true;
    }

    fn insert_leaf(&mut self, token: &Token) {
        let parent = self.current();
        let node = match token {
            Token::Text { text, span } => ArenaNode::Text {
                value: text.clone(),
                location: Some(SourceSpan::text(*span)),
            },
            Token::Comment { text, span } => ArenaNode::Comment {
                text: text.clone(),
                location: Some(SourceSpan::text(*span)),
            },
            _ => unreachable!("insert_leaf called with a tag token"),
        };
        self.arena.add_child(parent, node);
    }

    fn insert_start_tag(&mut self, token: &Token) {
        let Token::StartTag { name, span, .. } = token else {
            return;
        };
        self.apply_implied_end_tags(name, span.start);
        self.insert_element(token, Some(SourceSpan::open_element(*span)));
    }

    fn insert_element(&mut self, token: &Token, location: Option<SourceSpan>) -> usize {
        let Token::StartTag {
            name,
            attributes,
            self_closing,
            ..
        } = token
        else {
            unreachable!("insert_element called with a non start tag token");
        };
        let parent = self.current();
        let index = self.arena.add_child(
            parent,
            ArenaNode::element(name.clone(), attributes.clone(), location),
        );
        if !*self_closing {
            self.push_open(index);
        }
        index
    }

    fn apply_implied_end_tags(&mut self, name: &str, at: usize) {
        if CLOSES_P.contains(&name)
            && let Some(pos) = self.find_open(Tracked::P, SCOPE_BOUNDARIES, &[])
        {
            log::trace!(target: "html.tree_builder", "<{name}> implies </p> at {at}");
            self.close_at(pos, at, None);
        }
        let (tracked, stops): (Tracked, &[&str]) = match name {
            "li" => (Tracked::ListItem, &["ul", "ol"]),
            "dd" | "dt" => (Tracked::Definition, &["dl"]),
            "option" | "optgroup" => {
                if self
                    .open_elements
                    .last()
                    .is_some_and(|&top| self.arena.is_element_named(top, "option"))
                {
                    let pos = self.open_elements.len() - 1;
                    self.close_at(pos, at, None);
                }
                return;
            }
            _ => return,
        };
        if let Some(pos) = self.find_open(tracked, SCOPE_BOUNDARIES, stops) {
            log::trace!(target: "html.tree_builder", "<{name}> implies an end tag at {at}");
            self.close_at(pos, at, None);
        }
    }

    /// Position in the open-element stack of the nearest element of kind `tracked`,
    /// searching from the top and giving up at any of the stop names.
    fn find_open(&self, tracked: Tracked, boundaries: &[&str], stops: &[&str]) -> Option<usize> {
        if self.tracked_open[tracked as usize] == 0 {
            return None;
        }
        for (pos, &index) in self.open_elements.iter().enumerate().rev() {
            let name = self.arena.element_name(index)?;
            if Tracked::of(name) == Some(tracked) {
                return Some(pos);
            }
            if boundaries.contains(&name) || stops.contains(&name) {
                return None;
            }
        }
        None
    }

    fn close_by_end_tag(&mut self, token: &Token) {
        let Token::EndTag { name, span } = token else {
            return;
        };
        for pos in (0..self.open_elements.len()).rev() {
            let index = self.open_elements[pos];
            let Some(open_name) = self.arena.element_name(index) else {
                break;
            };
            if open_name == name {
                self.close_at(pos, span.start, Some(*span));
                return;
            }
            if matches!(open_name, "html" | "body" | "head") {
                break;
            }
        }
        log::trace!(target: "html.tree_builder", "ignoring stray </{name}> at {}", span.start);
    }

    /// Implicitly closes everything above `pos` at `at`.
    fn close_above(&mut self, pos: usize, at: usize) {
        while self.open_elements.len() > pos + 1 {
            if let Some(index) = self.pop_open() {
                self.arena.close_implicitly(index, at);
            }
        }
    }

    /// Closes the element at `pos` and everything above it. Elements above are
    /// closed implicitly at `at`; the target takes `end_tag` when given.
    fn close_at(&mut self, pos: usize, at: usize, end_tag: Option<Span>) {
        self.close_above(pos, at);
        if let Some(index) = self.pop_open() {
            match end_tag {
                Some(span) => self.arena.record_end_tag(index, span),
                None => self.arena.close_implicitly(index, at),
            }
        }
    }

    fn push_open(&mut self, index: usize) {
        if let Some(tracked) = self.arena.element_name(index).and_then(Tracked::of) {
            self.tracked_open[tracked as usize] += 1;
        }
        self.open_elements.push(index);
    }

    fn pop_open(&mut self) -> Option<usize> {
        let index = self.open_elements.pop()?;
        if let Some(tracked) = self.arena.element_name(index).and_then(Tracked::of) {
            self.tracked_open[tracked as usize] -= 1;
        }
        Some(index)
    }

    fn finish(&mut self, input_len: usize) {
        while let Some(index) = self.pop_open() {
            self.arena.close_implicitly(index, input_len);
        }
    }
}

#[derive(Debug)]
enum ArenaNode {
    Root {
        doctype: Option<String>,
        children: Vec<usize>,
    },
    Element {
        name: String,
        attributes: Vec<Attribute>,
        children: Vec<usize>,
        location: Option<SourceSpan>,
    },
    Text {
        value: String,
        location: Option<SourceSpan>,
    },
    Comment {
        text: String,
        location: Option<SourceSpan>,
    },
}

impl ArenaNode {
    fn element(name: String, attributes: Vec<Attribute>, location: Option<SourceSpan>) -> Self {
        ArenaNode::Element {
            name,
            attributes,
            children: Vec::new(),
            location,
        }
    }

    fn children(&self) -> Option<&[usize]> {
        match self {
            ArenaNode::Root { children, .. } | ArenaNode::Element { children, .. } => {
                Some(children)
            }
            ArenaNode::Text { .. } | ArenaNode::Comment { .. } => None,
        }
    }
}

#[derive(Debug)]
struct NodeArena {
    nodes: Vec<ArenaNode>,
}

impl NodeArena {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, node: ArenaNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    fn add_child(&mut self, parent_index: usize, child: ArenaNode) -> usize {
        let child_index = self.push(child);
        match &mut self.nodes[parent_index] {
            ArenaNode::Root { children, .. } | ArenaNode::Element { children, .. } => {
                children.push(child_index);
            }
            _ => unreachable!("tree builder parent cannot have children"),
        }
        child_index
    }

    fn set_doctype(&mut self, doctype: String) {
        let ArenaNode::Root { doctype: dt, .. } = &mut self.nodes[ROOT] else {
            unreachable!("tree builder root is always at index 0");
        };
        *dt = Some(doctype);
    }

    fn element_name(&self, node_index: usize) -> Option<&str> {
        match &self.nodes[node_index] {
            ArenaNode::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    fn is_element_named(&self, node_index: usize, target: &str) -> bool {
        self.element_name(node_index) == Some(target)
    }

    fn location_mut(&mut self, node_index: usize) -> Option<&mut SourceSpan> {
        match &mut self.nodes[node_index] {
            ArenaNode::Element { location, .. } => location.as_mut(),
            _ => None,
        }
    }

    fn record_end_tag(&mut self, node_index: usize, end_tag: Span) {
        if let Some(location) = self.location_mut(node_index) {
            location.end_tag = Some(end_tag);
            location.end = end_tag.end;
        }
    }

    /// Elements closed by the end of another construct keep any end tag they saw;
    /// void/self-closing elements are never on the open stack and keep their tag end.
    fn close_implicitly(&mut self, node_index: usize, at: usize) {
        if let Some(location) = self.location_mut(node_index)
            && location.end_tag.is_none()
        {
            debug_assert!(at >= location.start);
            location.end = at.max(location.end);
        }
    }

    fn into_tree(self, mode: TreeMode, keep_locations: bool) -> ParseNode {
        let mut nodes = self.nodes;
        let mut built_nodes: Vec<ParseNode> = Vec::with_capacity(nodes.len());
        let strip = |location: &mut Option<SourceSpan>| {
            if keep_locations {
                location.take()
            } else {
                None
            }
        };

        fn take_children(n: usize, built: &mut Vec<ParseNode>) -> Vec<ParseNode> {
            let children = built.split_off(built.len() - n);
            debug_assert_eq!(children.len(), n);
            children
        }

        // Iterative postorder over the arena: on the second visit of a node all of its
        // direct children are the last `child_count` entries of `built_nodes`, in order.
        let mut stack: Vec<(usize, bool)> = vec![(ROOT, false)];
        while let Some((node_index, visited)) = stack.pop() {
            if !visited {
                stack.push((node_index, true));
                if let Some(children) = nodes[node_index].children() {
                    for &child_index in children.iter().rev() {
                        stack.push((child_index, false));
                    }
                }
                continue;
            }

            let node = match &mut nodes[node_index] {
                ArenaNode::Root { doctype, children } => {
                    let children = take_children(children.len(), &mut built_nodes);
                    match mode {
                        TreeMode::Document => ParseNode::Document {
                            doctype: doctype.take(),
                            children,
                        },
                        TreeMode::Fragment => ParseNode::Fragment { children },
                    }
                }
                ArenaNode::Element {
                    name,
                    attributes,
                    children,
                    location,
                } => ParseNode::Element {
                    name: std::mem::take(name),
                    attributes: std::mem::take(attributes),
                    children: take_children(children.len(), &mut built_nodes),
                    location: strip(location),
                },
                ArenaNode::Text { value, location } => ParseNode::Text {
                    value: std::mem::take(value),
                    location: strip(location),
                },
                ArenaNode::Comment { text, location } => ParseNode::Comment {
                    text: std::mem::take(text),
                    location: strip(location),
                },
            };
            built_nodes.push(node);
        }

        debug_assert_eq!(built_nodes.len(), 1, "tree builder builds exactly one root");
        built_nodes.pop().unwrap_or(ParseNode::Fragment {
            children: Vec::new(),
        })
    }
}

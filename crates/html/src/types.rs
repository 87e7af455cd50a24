use crate::span::{SourceSpan, Span};

pub type Attribute = (String, Option<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Doctype {
        text: String,
        span: Span,
    },
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
        span: Span,
    },
    EndTag {
        name: String,
        span: Span,
    },
    Comment {
        text: String,
        span: Span,
    },
    Text {
        text: String,
        span: Span,
    },
}

impl Token {
    pub fn span(&self) -> Span {
        match self {
            Token::Doctype { span, .. }
            | Token::StartTag { span, .. }
            | Token::EndTag { span, .. }
            | Token::Comment { span, .. }
            | Token::Text { span, .. } => *span,
        }
    }
}

/// Parsed markup, annotated with source locations when tracking is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    Document {
        doctype: Option<String>,
        children: Vec<ParseNode>,
    },
    Fragment {
        children: Vec<ParseNode>,
    },
    Element {
        name: String,
        attributes: Vec<Attribute>,
        children: Vec<ParseNode>,
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

impl ParseNode {
    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Document { children, .. }
            | ParseNode::Fragment { children }
            | ParseNode::Element { children, .. } => children,
            ParseNode::Text { .. } | ParseNode::Comment { .. } => &[],
        }
    }

    pub fn location(&self) -> Option<&SourceSpan> {
        match self {
            ParseNode::Element { location, .. }
            | ParseNode::Text { location, .. }
            | ParseNode::Comment { location, .. } => location.as_ref(),
            ParseNode::Document { .. } | ParseNode::Fragment { .. } => None,
        }
    }

    pub fn is_element_named(&self, target: &str) -> bool {
        matches!(self, ParseNode::Element { name, .. } if name.eq_ignore_ascii_case(target))
    }

    pub fn is_whitespace_text(&self) -> bool {
        matches!(self, ParseNode::Text { value, .. } if value.trim().is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Record a `SourceSpan` on every element, text and comment node.
    pub source_locations: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_locations: true,
        }
    }
}

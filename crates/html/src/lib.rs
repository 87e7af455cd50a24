//! Location-tracking markup parser.
//!
//! `parse`/`parse_fragment` tokenize the input and build a `ParseNode` tree in which
//! every element, text and comment node can carry the byte span of the markup it
//! came from.

pub mod debug;
pub mod perf_fixtures;
pub mod traverse;

mod builder;
mod entities;
mod span;
mod tokenizer;
mod types;

pub use crate::builder::{TreeMode, build_tree};
pub use crate::span::{SourceSpan, Span};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Attribute, ParseNode, ParseOptions, Token};

/// Parses `input` as a full document: the result is a `ParseNode::Document` with
/// `html`, `head` and `body` present.
pub fn parse(input: &str, options: ParseOptions) -> ParseNode {
    parse_with_mode(input, TreeMode::Document, options)
}

/// Parses `input` as body content: the result is a `ParseNode::Fragment`.
pub fn parse_fragment(input: &str, options: ParseOptions) -> ParseNode {
    parse_with_mode(input, TreeMode::Fragment, options)
}

pub fn parse_with_mode(input: &str, mode: TreeMode, options: ParseOptions) -> ParseNode {
    let tokens = tokenize(input);
    build_tree(&tokens, input.len(), mode, options)
}

//! Span-tracking HTML tokenizer with a constrained, practical tag-name character set.
//!
//! Every token records the byte span of the markup it was produced from, so the
//! tree builder can attach exact source locations to nodes.
//!
//! Supported tag-name characters (ASCII only): `[A-Za-z0-9:_-]`, first char a letter.
//! Attribute names use the same ASCII character class.
//!
//! Known limitations (intentional):
//! - Not a full HTML5 tokenizer/state machine (no HTML5 parse-error recovery).
//! - `<` that does not open a tag, end tag, comment or doctype is plain text.
//! - Raw text close-tag scanning accepts only ASCII whitespace before `>` (see
//!   `find_close_tag`).
use crate::entities::decode_entities;
use crate::span::Span;
use crate::types::{Attribute, Token};
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

/// Content model of an element whose body is not tokenized as markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TextContent {
    /// `script`, `style`: copied verbatim.
    Raw,
    /// `title`, `textarea`: character references decoded.
    Escapable,
}

fn text_content_of(name: &str) -> Option<(TextContent, &'static [u8])> {
    match name {
        "script" => Some((TextContent::Raw, b"</script")),
        "style" => Some((TextContent::Raw, b"</style")),
        "title" => Some((TextContent::Escapable, b"</title")),
        "textarea" => Some((TextContent::Escapable, b"</textarea")),
        _ => None,
    }
}

// it only attempts matches starting at ASCII <
// < cannot appear in UTF-8 continuation bytes
fn find_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let hay_bytes = haystack.as_bytes();
    let len = hay_bytes.len();
    let n = close_tag.len();
    debug_assert!(n >= 2);
    debug_assert!(close_tag[0] == b'<' && close_tag[1] == b'/');
    debug_assert!(close_tag.is_ascii());
    if len < n {
        return None;
    }
    let mut i = 0;
    while i + n <= len {
        let rel = memchr(b'<', &hay_bytes[i..])?;
        i += rel;
        if i + n > len {
            return None;
        }
        if hay_bytes[i + 1] == b'/' && starts_with_ignore_ascii_case_at(hay_bytes, i, close_tag) {
            let mut k = i + n;
            // HTML5 allows other parse-error paths like `</script foo>`, but we only
            // accept ASCII whitespace before `>` to keep the scan simple/alloc-free.
            while k < len && hay_bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && hay_bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Whether the `<` at `i` starts markup rather than literal text.
fn opens_markup(bytes: &[u8], i: usize) -> bool {
    debug_assert_eq!(bytes[i], b'<');
    match bytes.get(i + 1) {
        Some(b) if b.is_ascii_alphabetic() => true,
        Some(b'!') | Some(b'?') => true,
        Some(b'/') => i + 2 < bytes.len(),
        _ => false,
    }
}

fn next_markup(bytes: &[u8], mut from: usize) -> usize {
    while from < bytes.len() {
        let Some(rel) = memchr(b'<', &bytes[from..]) else {
            return bytes.len();
        };
        let at = from + rel;
        if opens_markup(bytes, at) {
            return at;
        }
        from = at + 1;
    }
    bytes.len()
}

/// End of the construct that closes at the next `>`, or end of input.
/// Returns `(body_end, token_end)`.
fn scan_to_gt(bytes: &[u8], from: usize) -> (usize, usize) {
    match memchr(b'>', &bytes[from..]) {
        Some(rel) => (from + rel, from + rel + 1),
        None => (bytes.len(), bytes.len()),
    }
}

fn push_text(out: &mut Vec<Token>, input: &str, start: usize, end: usize, decode: bool) {
    if start >= end {
        return;
    }
    debug_assert!(input.is_char_boundary(start));
    debug_assert!(input.is_char_boundary(end));
    let raw = &input[start..end];
    let text = if decode {
        decode_entities(raw).into_owned()
    } else {
        raw.to_string()
    };
    out.push(Token::Text {
        text,
        span: Span::new(start, end),
    });
}

/// Tokenizes `input`, recording the source span of every token.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    // Invariant: we scan by byte, but any slice endpoints must be UTF-8 char boundaries.
    // We only cut slices at ASCII structural bytes or at positions reached by scanning
    // ASCII-only tokens; therefore slice endpoints remain UTF-8 boundaries.
    while i < len {
        if bytes[i] != b'<' || !opens_markup(bytes, i) {
            let start = i;
            i = next_markup(bytes, i + 1);
            push_text(&mut out, input, start, i, true);
            continue;
        }

        if input[i..].starts_with(HTML_COMMENT_START) {
            let body_start = i + HTML_COMMENT_START.len();
            // Scan for the comment terminator once per comment (linear in comment length).
            let (body_end, end) = match input[body_start..].find(HTML_COMMENT_END) {
                Some(rel) => (
                    body_start + rel,
                    body_start + rel + HTML_COMMENT_END.len(),
                ),
                None => (len, len),
            };
            out.push(Token::Comment {
                text: input[body_start..body_end].to_string(),
                span: Span::new(i, end),
            });
            i = end;
            continue;
        }

        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            let (body_end, end) = scan_to_gt(bytes, i + 2);
            out.push(Token::Doctype {
                text: input[i + 2..body_end].trim().to_string(),
                span: Span::new(i, end),
            });
            i = end;
            continue;
        }

        if bytes[i + 1] == b'!' || bytes[i + 1] == b'?' {
            // Bogus comment: `<!foo>` keeps what follows `<!`, `<?xml ?>` keeps the `?`.
            let body_start = if bytes[i + 1] == b'!' { i + 2 } else { i + 1 };
            let (body_end, end) = scan_to_gt(bytes, body_start);
            out.push(Token::Comment {
                text: input[body_start..body_end].to_string(),
                span: Span::new(i, end),
            });
            i = end;
            continue;
        }

        if bytes[i + 1] == b'/' {
            i = scan_end_tag(input, i, &mut out);
            continue;
        }

        i = scan_start_tag(input, i, &mut out);
    }
    log::trace!(target: "html.tokenizer", "tokenized {} bytes into {} tokens", len, out.len());
    out
}

fn scan_end_tag(input: &str, i: usize, out: &mut Vec<Token>) -> usize {
    let bytes = input.as_bytes();
    let start = i + 2;
    if !bytes[start].is_ascii_alphabetic() {
        // `</>` is dropped; `</3 ...>` and friends become bogus comments.
        let (body_end, end) = scan_to_gt(bytes, start);
        if bytes[start] != b'>' {
            out.push(Token::Comment {
                text: input[start..body_end].to_string(),
                span: Span::new(i, end),
            });
        }
        return end;
    }
    let mut j = start;
    while j < bytes.len() && is_name_char(bytes[j]) {
        j += 1;
    }
    debug_assert!(input.is_char_boundary(j));
    let name = input[start..j].to_ascii_lowercase();
    let (_, end) = scan_to_gt(bytes, j);
    out.push(Token::EndTag {
        name,
        span: Span::new(i, end),
    });
    end
}

fn scan_start_tag(input: &str, i: usize, out: &mut Vec<Token>) -> usize {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let start = i + 1;
    let mut j = start;
    while j < len && is_name_char(bytes[j]) {
        j += 1;
    }
    debug_assert!(input.is_char_boundary(j));
    let name = input[start..j].to_ascii_lowercase();

    let mut k = j;
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut self_closing = false;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            break;
        }
        if bytes[k] == b'/' {
            if k + 1 < len && bytes[k + 1] == b'>' {
                self_closing = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }
        let name_start = k;
        while k < len && is_name_char(bytes[k]) {
            k += 1;
        }
        if name_start == k {
            // Skip a whole (possibly multi-byte) char we cannot use in a name.
            k += input[k..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        let attribute_name = input[name_start..k].to_ascii_lowercase();

        skip_whitespace(&mut k);
        let value = if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let vstart = k;
                k = memchr(quote, &bytes[k..]).map_or(len, |rel| k + rel);
                let raw = &input[vstart..k];
                if k < len {
                    k += 1;
                }
                Some(decode_entities(raw).into_owned())
            } else {
                let vstart = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                Some(decode_entities(&input[vstart..k]).into_owned())
            }
        } else {
            None
        };
        attributes.push((attribute_name, value));
    }
    if is_void_element(&name) {
        self_closing = true;
    }

    let content_start = k;
    let body = if self_closing {
        None
    } else {
        text_content_of(&name)
    };
    out.push(Token::StartTag {
        name: name.clone(),
        attributes,
        self_closing,
        span: Span::new(i, content_start),
    });

    let Some((content, close_tag)) = body else {
        return content_start;
    };
    let decode = content == TextContent::Escapable;
    match find_close_tag(&input[content_start..], close_tag) {
        Some((rel_start, rel_end)) => {
            let close_start = content_start + rel_start;
            push_text(out, input, content_start, close_start, decode);
            out.push(Token::EndTag {
                name,
                span: Span::new(close_start, content_start + rel_end),
            });
            content_start + rel_end
        }
        None => {
            // Unterminated: the rest of the input is element text; the tree builder
            // closes the element at end of input.
            push_text(out, input, content_start, len, decode);
            len
        }
    }
}

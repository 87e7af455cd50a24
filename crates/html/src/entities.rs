//! Character reference decoding for text and attribute values.
//!
//! Contract:
//! - Named references are decoded only when semicolon-terminated and listed in
//!   [`NAMED_REFERENCES`].
//! - Numeric references `&#123;` / `&#x1F4A9;` are decoded only when well-formed,
//!   semicolon-terminated and naming a valid Unicode scalar value.
//! - Anything else is copied through unchanged, byte for byte.
//!
//! Decoding never changes the source span of the token it belongs to; spans
//! always describe the raw markup.

use memchr::memchr;
use std::borrow::Cow;

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111
const MAX_NAME_LEN: usize = 8;

const NAMED_REFERENCES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("copy", '\u{00A9}'),
    ("reg", '\u{00AE}'),
    ("trade", '\u{2122}'),
    ("hellip", '\u{2026}'),
    ("mdash", '\u{2014}'),
    ("ndash", '\u{2013}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
    ("laquo", '\u{00AB}'),
    ("raquo", '\u{00BB}'),
    ("euro", '\u{20AC}'),
    ("middot", '\u{00B7}'),
    ("times", '\u{00D7}'),
];

/// Decode character references in `s`. Borrows when there is nothing to decode.
pub(crate) fn decode_entities(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut i = first;
    while i < bytes.len() {
        if bytes[i] != b'&' {
            // '&' is ASCII, so the next one is always a char boundary.
            let next = memchr(b'&', &bytes[i..]).map_or(bytes.len(), |rel| i + rel);
            out.push_str(&s[i..next]);
            i = next;
            continue;
        }
        match decode_reference(bytes, i) {
            Some((ch, consumed)) => {
                out.push(ch);
                i += consumed;
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
    }
    Cow::Owned(out)
}

/// Decode the reference starting at the `&` at `at`.
///
/// Returns the decoded char and the number of input bytes it replaces. Scans are
/// bounded by the digit/name limits so adversarial input stays linear.
fn decode_reference(bytes: &[u8], at: usize) -> Option<(char, usize)> {
    let rest = &bytes[at + 1..];
    if let Some(numeric) = rest.strip_prefix(b"#") {
        let (digits, radix, prefix_len) = match numeric.first() {
            Some(b'x' | b'X') => (&numeric[1..], 16, 2),
            _ => (numeric, 10, 1),
        };
        let max_digits = if radix == 16 {
            MAX_HEX_DIGITS
        } else {
            MAX_DEC_DIGITS
        };
        let len = digits
            .iter()
            .take(max_digits + 1)
            .take_while(|b| {
                if radix == 16 {
                    b.is_ascii_hexdigit()
                } else {
                    b.is_ascii_digit()
                }
            })
            .count();
        if len == 0 || len > max_digits || digits.get(len) != Some(&b';') {
            return None;
        }
        let text = std::str::from_utf8(&digits[..len]).ok()?;
        let ch = u32::from_str_radix(text, radix)
            .ok()
            .and_then(char::from_u32)?;
        // '&' + prefix + digits + ';'
        return Some((ch, 1 + prefix_len + len + 1));
    }

    let len = rest
        .iter()
        .take(MAX_NAME_LEN + 1)
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if len == 0 || len > MAX_NAME_LEN || rest.get(len) != Some(&b';') {
        return None;
    }
    let name = &rest[..len];
    NAMED_REFERENCES
        .iter()
        .find(|(candidate, _)| candidate.as_bytes() == name)
        .map(|&(_, ch)| (ch, len + 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrows_when_no_reference_present() {
        assert!(matches!(decode_entities("120×32"), Cow::Borrowed("120×32")));
    }

    #[test]
    fn decodes_named_references() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{00A0}b");
        assert_eq!(decode_entities("&copy; 2024&hellip;"), "© 2024…");
        assert_eq!(decode_entities("&ldquo;x&rdquo;"), "\u{201C}x\u{201D}");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode_entities("&#215;"), "×");
        assert_eq!(decode_entities("&#xD7;"), "×");
        assert_eq!(decode_entities("&#XD7;"), "×");
        assert_eq!(decode_entities("&#1114111;"), "\u{10FFFF}");
    }

    #[test]
    fn leaves_unknown_and_unterminated_references_alone() {
        assert_eq!(
            decode_entities("before &notanentity; after"),
            "before &notanentity; after"
        );
        assert_eq!(decode_entities("&amp"), "&amp");
        assert_eq!(decode_entities("loose &amp space"), "loose &amp space");
        assert_eq!(decode_entities("&#215 "), "&#215 ");
        assert_eq!(decode_entities("&#;"), "&#;");
        assert_eq!(decode_entities("&#x;"), "&#x;");
    }

    #[test]
    fn leaves_out_of_range_numerics_alone() {
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#x110000;"), "&#x110000;");
        assert_eq!(decode_entities("&#11141111;"), "&#11141111;");
        assert_eq!(decode_entities("&#x-1;"), "&#x-1;");
    }

    #[test]
    fn malformed_reference_does_not_swallow_the_next_one() {
        assert_eq!(decode_entities("&#xZZ;&amp;"), "&#xZZ;&");
        assert_eq!(decode_entities("&&amp;"), "&&");
    }

    #[test]
    fn decoding_is_stable_on_its_own_output() {
        for s in ["&", "&;", "&#xFFFFFFFF;", "&amp;&lt;&gt;&quot;&apos;&nbsp;", "π &amp; σ"] {
            let once = decode_entities(s).into_owned();
            assert!(once.len() <= s.len());
            assert_eq!(decode_entities(&once), once);
        }
    }

    #[test]
    fn long_numeric_runs_stay_unchanged() {
        let noisy = "&#123456789;".repeat(100);
        assert_eq!(decode_entities(&noisy), noisy);
    }
}

//! Splitting of value strings into text and placeholder segments.

use crate::{
    placeholder::parse_placeholder_with,
    types::Segment,
};

/// Splits a (preprocessed) value string into segments.
///
/// - `\` makes the next character literal text (so `\{` is a brace, not a
///   placeholder); the backslash itself is dropped.
/// - `{` starts a placeholder specifier that runs to the next `}`. A specifier
///   left open at the end of the string is parsed as far as it got.
/// - Empty text runs produce no segment.
///
/// ```rust
/// use sanat::tokenizer::tokenize;
/// use sanat::types::{DataType, Placeholder, Segment};
///
/// assert_eq!(
///     tokenize("Eka{d}toka"),
///     vec![
///         Segment::text("Eka"),
///         Segment::placeholder(Placeholder::new(DataType::Integer)),
///         Segment::text("toka"),
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Segment> {
    tokenize_with(text, &mut |_| {})
}

/// Like [`tokenize`], reporting malformed numbers inside specifiers to `report`.
pub fn tokenize_with(text: &str, report: &mut dyn FnMut(String)) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pending = String::new();
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    pending.push(escaped);
                }
            }
            '{' => {
                if !pending.is_empty() {
                    segments.push(Segment::text(std::mem::take(&mut pending)));
                }
                let body: String = chars.by_ref().take_while(|&c| c != '}').collect();
                segments.push(Segment::placeholder(parse_placeholder_with(&body, report)));
            }
            c => pending.push(c),
        }
    }

    if !pending.is_empty() {
        segments.push(Segment::text(pending));
    }

    segments
}

//! Typographic punctuation for raw values.

use super::Preprocessor;

/// Replaces straight quotes with curly ones and `...` with an ellipsis.
///
/// A quote opens when it starts the text or follows whitespace or an opening
/// bracket, and is followed by something other than whitespace; every other
/// quote closes (which also makes apostrophes come out right).
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartyPants;

impl Preprocessor for SmartyPants {
    fn process_raw_value(&self, value: &str) -> String {
        smarten(value)
    }
}

pub fn smarten(text: &str) -> String {
    let text = text.replace("...", "\u{2026}");
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        let (open, close) = match c {
            '\'' => ('\u{2018}', '\u{2019}'),
            '"' => ('\u{201C}', '\u{201D}'),
            _ => {
                out.push(c);
                continue;
            }
        };
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let after_boundary = prev.is_none_or(|p| p.is_whitespace() || "([{<\u{2014}\u{2013}-".contains(p));
        let before_content = next.is_some_and(|n| !n.is_whitespace());
        out.push(if after_boundary && before_content { open } else { close });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(input: &str) -> String {
        SmartyPants.process_raw_value(input)
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(sp(""), "");
        assert_eq!(sp("Hello"), "Hello");
    }

    #[test]
    fn test_quotes() {
        assert_eq!(sp("'Hello'"), "‘Hello’");
        assert_eq!(sp("\"Hello\""), "“Hello”");
        assert_eq!(sp("Ali's"), "Ali’s");
        assert_eq!(sp("Alis'"), "Alis’");
        assert_eq!(sp("She said \"hi\" (\"ok\")"), "She said “hi” (“ok”)");
    }

    #[test]
    fn test_ellipsis() {
        assert_eq!(sp("Loading..."), "Loading\u{2026}");
    }

    #[test]
    fn test_preserves_surrounding_whitespace() {
        assert_eq!(sp("\t'Hello'\t"), "\t‘Hello’\t");
        assert_eq!(sp("  'Hello'  "), "  ‘Hello’  ");
    }

    #[test]
    fn test_placeholders_untouched() {
        assert_eq!(sp("'{1:s}' is {d}"), "‘{1:s}’ is {d}");
    }
}

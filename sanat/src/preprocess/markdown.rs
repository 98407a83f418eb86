//! Markdown-to-HTML rendering of raw values.

use pulldown_cmark::{Options, Parser, html};

use super::{Preprocessor, surrounding_whitespace};

/// Renders each raw value as inline Markdown, producing an HTML fragment.
///
/// The surrounding `<p>` of single-paragraph output is removed and the
/// value's leading/trailing whitespace is kept as it was.
#[derive(Debug, Clone, Copy, Default)]
pub struct Markdown;

impl Preprocessor for Markdown {
    fn process_raw_value(&self, value: &str) -> String {
        html_from_markdown(value)
    }
}

pub fn html_from_markdown(md: &str) -> String {
    let (leading, trailing) = surrounding_whitespace(md);
    let content = md.trim();
    if content.is_empty() {
        return md.to_string();
    }

    let protected = protect_escapes(content);

    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_SMART_PUNCTUATION;
    let mut rendered = String::with_capacity(protected.len() * 3 / 2);
    html::push_html(&mut rendered, Parser::new_ext(&protected, options));

    let rendered = rendered.trim();
    let inner = rendered
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .unwrap_or(rendered);

    format!("{}{}{}", leading, restore_escapes(inner), trailing)
}

/// Tokenizer escapes and the private-use characters standing in for them
/// while Markdown runs. Markdown passes these characters through untouched,
/// in code spans and blocks as well as in running text.
const ESCAPES: [(char, char); 3] = [('\\', '\u{E000}'), ('{', '\u{E001}'), ('}', '\u{E002}')];

fn protect_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        let sentinel = match (c, chars.peek()) {
            ('\\', Some(&next)) => ESCAPES.iter().find(|(escaped, _)| *escaped == next),
            _ => None,
        };
        match sentinel {
            Some(&(_, sentinel)) => {
                out.push(sentinel);
                chars.next();
            }
            None => out.push(c),
        }
    }
    out
}

fn restore_escapes(rendered: &str) -> String {
    let mut out = String::with_capacity(rendered.len());
    for c in rendered.chars() {
        match ESCAPES.iter().find(|(_, sentinel)| *sentinel == c) {
            Some(&(escaped, _)) => {
                out.push('\\');
                out.push(escaped);
            }
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md(input: &str) -> String {
        Markdown.process_raw_value(input)
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(md(""), "");
        assert_eq!(md("Hello"), "Hello");
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(md("_Hello_"), "<em>Hello</em>");
        assert_eq!(md("*Hello*"), "<em>Hello</em>");
        assert_eq!(md("__Hello__"), "<strong>Hello</strong>");
        assert_eq!(md("**Hello**"), "<strong>Hello</strong>");
        assert_eq!(md("`Hello`"), "<code>Hello</code>");
        assert_eq!(md("~~Hello~~"), "<del>Hello</del>");
    }

    #[test]
    fn test_preserves_surrounding_whitespace() {
        assert_eq!(md("\t_Hello_\t"), "\t<em>Hello</em>\t");
        assert_eq!(md("  _Hello_  "), "  <em>Hello</em>  ");
        assert_eq!(md("   "), "   ");
    }

    #[test]
    fn test_placeholders_pass_through() {
        assert_eq!(md("Hello {@}, **{1:d}** new"), "Hello {@}, <strong>{1:d}</strong> new");
    }

    #[test]
    fn test_tokenizer_escapes_survive() {
        assert_eq!(md("a \\{b}"), "a \\{b}");
        assert_eq!(md("a \\{b\\}"), "a \\{b\\}");
        assert_eq!(md("C:\\\\dir"), "C:\\\\dir");
    }

    #[test]
    fn test_tokenizer_escapes_survive_in_code() {
        assert_eq!(md("Use `\\{name}` literally"), "Use <code>\\{name}</code> literally");
        assert_eq!(md("`a\\\\b`"), "<code>a\\\\b</code>");
    }

    #[test]
    fn test_markdown_escapes_still_apply() {
        assert_eq!(md("\\*not emphasis\\*"), "*not emphasis*");
    }
}

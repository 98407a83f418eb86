//! Apple `Localizable.strings` output.
//!
//! ```text
//! /* Comment for translators */
//! "Key" = "Value with %1$@ and %2$.2f";
//! ```

use crate::{
    error::Error,
    formats::{Item, Renderer, items, printf_specifier},
    types::{Placeholder, Platform, Segment, TranslationSet},
};

/// Renders `.strings` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Format;

impl Renderer for Format {
    fn render(&self, set: &TranslationSet, language: &str) -> Result<String, Error> {
        let mut out = format!(
            "/**\n * Generated by `Sanat`\n * Language: {}\n */\n\n",
            comment_safe(language)
        );

        for item in items(set, language, Platform::Apple) {
            match item {
                Item::SectionHeading(name) => {
                    out.push_str(&format!("\n/********** {} **********/\n\n", comment_safe(name)));
                }
                Item::Entry { translation, value } => {
                    if let Some(comment) = translation.comment.as_deref().filter(|c| !c.is_empty()) {
                        out.push_str(&format!("/* {} */\n", comment_safe(comment)));
                    }
                    out.push_str(&format!(
                        "\"{}\" = \"{}\";\n",
                        escape_key(&translation.key),
                        value_string(&value.segments)
                    ));
                }
            }
        }

        Ok(out)
    }
}

/// Renders one placeholder, e.g. `%3$.2f` or `%@`.
pub fn placeholder(placeholder: &Placeholder) -> String {
    printf_specifier(placeholder, '@')
}

/// Escapes literal text for use inside a quoted `.strings` value.
pub fn escape_value(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '%' => out.push_str("%%"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes a key; keys are not format strings, so `%` stays as is.
pub fn escape_key(key: &str) -> String {
    key.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /")
}

fn value_string(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Text { text } => escape_value(text),
            Segment::Placeholder(p) => placeholder(p),
        })
        .collect()
}

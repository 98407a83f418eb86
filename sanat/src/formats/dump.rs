//! Indented plain-text listing of the parsed model, for eyeballing what the
//! parser made of a document.

use std::fmt::Write;

use crate::{
    error::Error,
    formats::Renderer,
    types::{DataType, Placeholder, Segment, TranslationSet},
};

/// Lists the whole translation set; the language argument is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Format;

impl Renderer for Format {
    fn render(&self, set: &TranslationSet, _language: &str) -> Result<String, Error> {
        Ok(dump(set))
    }
}

/// Describes a placeholder, e.g. `<float>, 2 decimals, order #1`.
pub fn describe_placeholder(placeholder: &Placeholder) -> String {
    let mut out = format!("<{}>", placeholder.data_type);
    if placeholder.data_type == DataType::Float {
        if let Some(decimals) = placeholder.decimal_count {
            out.push_str(&format!(", {} decimals", decimals));
        }
    }
    if let Some(order) = placeholder.order_index {
        out.push_str(&format!(", order #{}", order));
    }
    out
}

fn dump(set: &TranslationSet) -> String {
    let mut out = String::new();
    let languages: Vec<&str> = set.languages.iter().map(String::as_str).collect();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Languages: {}", languages.join(", "));
    for section in &set.sections {
        let _ = writeln!(out, "Section: {}", section.name);
        for translation in &section.translations {
            let _ = writeln!(out, "  Translation: {}", translation.key);
            for platform in &translation.platforms {
                let _ = writeln!(out, "    Platform: {}", platform);
            }
            if !translation.tags.is_empty() {
                let _ = writeln!(out, "    Tags: {}", translation.tags.join(", "));
            }
            if let Some(comment) = &translation.comment {
                let _ = writeln!(out, "    Comment: {}", comment);
            }
            for value in &translation.values {
                let _ = writeln!(out, "    Language: {}", value.language);
                for segment in &value.segments {
                    match segment {
                        Segment::Text { text } => {
                            let _ = writeln!(out, "      Text: '{}'", text);
                        }
                        Segment::Placeholder(p) => {
                            let _ = writeln!(out, "       fmt: {}", describe_placeholder(p));
                        }
                    }
                }
            }
        }
    }
    out
}

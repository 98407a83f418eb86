//! Java XML properties output, as read by `Properties.loadFromXML`.
//!
//! Values are `java.text.MessageFormat` patterns, so placeholders are written
//! as `{0}`, `{1,number,integer}`, `{2,number,#.##}` and literal braces and
//! apostrophes have to be quoted.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    formats::{
        Item, Renderer, items,
        xml::{XmlDocument, escape_text},
    },
    types::{DataType, Piece, Placeholder, Platform, TranslationSet, Value},
};

lazy_static! {
    static ref BRACE_RUN: Regex = Regex::new(r"[{}]+").unwrap();
}

/// Renders `Properties_<lang>.xml` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Format;

impl Renderer for Format {
    fn render(&self, set: &TranslationSet, language: &str) -> Result<String, Error> {
        let mut doc = XmlDocument::new()?;
        doc.doctype("properties SYSTEM \"http://java.sun.com/dtd/properties.dtd\"")?;
        doc.comment(&format!(
            "\nJava XML Properties File\nGenerated by Sanat\nLanguage: {}\n",
            language
        ))?;
        doc.raw("\n")?;
        doc.start("properties", &[])?;
        doc.raw("\n")?;

        for item in items(set, language, Platform::Java) {
            match item {
                Item::SectionHeading(name) => {
                    doc.raw("\n  ")?;
                    doc.comment(&format!(" ********** {} ********** ", name))?;
                    doc.raw("\n\n")?;
                }
                Item::Entry { translation, value } => {
                    if let Some(comment) = translation.comment.as_deref().filter(|c| !c.is_empty()) {
                        doc.raw("  ")?;
                        doc.comment(&format!(" {} ", comment))?;
                        doc.raw("\n")?;
                    }
                    doc.raw("  ")?;
                    doc.element(
                        "entry",
                        &[("key", translation.key.as_str())],
                        &value_string(value),
                    )?;
                    doc.raw("\n")?;
                }
            }
        }

        doc.end("properties")?;
        doc.raw("\n")?;
        doc.finish()
    }
}

/// Renders one placeholder found at `positional_index` among the value's
/// placeholders. An explicit (1-based) order index wins over the position.
pub fn placeholder(placeholder: &Placeholder, positional_index: usize) -> String {
    let mut out = format!("{{{}", placeholder.effective_index(positional_index));
    match placeholder.data_type {
        DataType::Integer => out.push_str(",number,integer"),
        DataType::Float => {
            out.push_str(",number");
            match placeholder.decimal_count {
                Some(0) => out.push_str(",#"),
                Some(n) => out.push_str(&format!(",#.{}", "#".repeat(n))),
                None => {}
            }
        }
        DataType::Object | DataType::String => {}
    }
    out.push('}');
    out
}

/// Applies MessageFormat quoting and XML-escapes the result.
///
/// Runs of braces are wrapped in single quotes and literal single quotes
/// are doubled, merging adjacent quoted runs where MessageFormat allows it.
pub fn escape_value(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len());
    for (i, part) in text.split('\'').enumerate() {
        let part = BRACE_RUN.replace_all(part, "'$0'");
        if i == 0 || (quoted.ends_with('\'') && part.starts_with('\'')) {
            quoted.push_str(&part);
        } else {
            quoted.push_str("''");
            quoted.push_str(&part);
        }
    }
    escape_text(&quoted).into_owned()
}

fn value_string(value: &Value) -> String {
    value
        .pieces()
        .map(|piece| match piece {
            Piece::Text(text) => escape_value(text),
            Piece::Placeholder {
                positional_index,
                placeholder: p,
            } => placeholder(p, positional_index),
        })
        .collect()
}

//! Android `res/values*/strings.xml` output.

use crate::{
    error::Error,
    formats::{
        Item, Renderer, items, printf_specifier,
        xml::{XmlDocument, escape_text},
    },
    types::{Placeholder, Platform, Segment, TranslationSet},
};

/// Renders `strings.xml` resource files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Format;

impl Renderer for Format {
    fn render(&self, set: &TranslationSet, language: &str) -> Result<String, Error> {
        let mut doc = XmlDocument::new()?;
        doc.comment(&format!(" Generated by Sanat. Language: {} ", language))?;
        doc.raw("\n")?;
        doc.start("resources", &[])?;
        doc.raw("\n")?;

        for item in items(set, language, Platform::Android) {
            match item {
                Item::SectionHeading(name) => {
                    doc.raw("\n    ")?;
                    doc.comment(&format!(" ********** {} ********** ", name))?;
                    doc.raw("\n\n")?;
                }
                Item::Entry { translation, value } => {
                    if let Some(comment) = translation.comment.as_deref().filter(|c| !c.is_empty()) {
                        doc.raw("    ")?;
                        doc.comment(&format!(" {} ", comment))?;
                        doc.raw("\n")?;
                    }
                    doc.raw("    ")?;
                    doc.element(
                        "string",
                        &[("name", translation.key.as_str())],
                        &value_string(&value.segments),
                    )?;
                    doc.raw("\n")?;
                }
            }
        }

        doc.end("resources")?;
        doc.raw("\n")?;
        doc.finish()
    }
}

/// Renders one placeholder, e.g. `%3$.2f` or `%s`.
pub fn placeholder(placeholder: &Placeholder) -> String {
    printf_specifier(placeholder, 's')
}

/// Doubles `%` (values are format strings) and XML-escapes the result.
pub fn escape_value(text: &str) -> String {
    escape_text(&text.replace('%', "%%")).into_owned()
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

//! .NET / UWP resource output (`.resx` and `.resw`).
//!
//! Both flavors share the ResX schema; values are composite format strings
//! (`{0}`, `{1:F2}`) and keys have to be valid identifiers because code is
//! generated from them.

use crate::{
    error::Error,
    formats::{
        Item, Renderer, items,
        xml::{XmlDocument, escape_text},
    },
    types::{DataType, Piece, Placeholder, Platform, TranslationSet, Value},
};

const RESX_READER: &str = "System.Resources.ResXResourceReader, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";
const RESX_WRITER: &str = "System.Resources.ResXResourceWriter, System.Windows.Forms, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    /// `.resx`, for .NET desktop projects.
    #[default]
    Resx,
    /// `.resw`, for UWP / WinUI projects.
    Resw,
}

impl Flavor {
    fn description(&self) -> &'static str {
        match self {
            Flavor::Resx => ".NET ResX resource file",
            Flavor::Resw => "UWP ResW resource file",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Format {
    pub flavor: Flavor,
}

impl Format {
    pub fn new(flavor: Flavor) -> Self {
        Format { flavor }
    }
}

impl Renderer for Format {
    fn render(&self, set: &TranslationSet, language: &str) -> Result<String, Error> {
        let mut doc = XmlDocument::new()?;
        doc.comment(&format!(
            "\n{}\nGenerated by Sanat\nLanguage: {}\n",
            self.flavor.description(),
            language
        ))?;
        doc.raw("\n")?;
        doc.start("root", &[])?;
        doc.raw("\n")?;

        for (name, value) in [
            ("resmimetype", "text/microsoft-resx"),
            ("version", "2.0"),
            ("reader", RESX_READER),
            ("writer", RESX_WRITER),
        ] {
            doc.raw("  ")?;
            doc.start("resheader", &[("name", name)])?;
            doc.raw("\n    ")?;
            doc.element("value", &[], &escape_text(value))?;
            doc.raw("\n  ")?;
            doc.end("resheader")?;
            doc.raw("\n")?;
        }

        for item in items(set, language, Platform::Windows) {
            match item {
                Item::SectionHeading(name) => {
                    doc.raw("\n  ")?;
                    doc.comment(&format!(" ********** {} ********** ", name))?;
                    doc.raw("\n\n")?;
                }
                Item::Entry { translation, value } => {
                    let key = sanitize_key(&translation.key);
                    doc.raw("  ")?;
                    doc.start("data", &[("name", key.as_str()), ("xml:space", "preserve")])?;
                    doc.raw("\n    ")?;
                    doc.element("value", &[], &value_string(value))?;
                    if let Some(comment) = translation.comment.as_deref().filter(|c| !c.is_empty()) {
                        doc.raw("\n    ")?;
                        doc.element("comment", &[], &escape_text(comment))?;
                    }
                    doc.raw("\n  ")?;
                    doc.end("data")?;
                    doc.raw("\n")?;
                }
            }
        }

        doc.end("root")?;
        doc.raw("\n")?;
        doc.finish()
    }
}

/// Renders one placeholder found at `positional_index` among the value's
/// placeholders, e.g. `{0}` or `{2:F1}`.
pub fn placeholder(placeholder: &Placeholder, positional_index: usize) -> String {
    let index = placeholder.effective_index(positional_index);
    match (placeholder.data_type, placeholder.decimal_count) {
        (DataType::Float, Some(decimals)) => format!("{{{}:F{}}}", index, decimals),
        _ => format!("{{{}}}", index),
    }
}

/// XML-escapes literal text.
pub fn escape_value(text: &str) -> String {
    escape_text(text).into_owned()
}

/// Turns a key into a resource name usable as a C# identifier: anything but
/// letters, digits and `_` becomes `_`, and a leading digit gets a `_` prefix.
pub fn sanitize_key(key: &str) -> String {
    let mut out: String = key
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::xml::is_well_formed;
    use crate::types::Segment;

    fn ph(data_type: DataType, index: usize, decimals: Option<usize>, order: usize) -> String {
        let mut p = Placeholder::new(data_type).with_order_index(order);
        p.decimal_count = decimals;
        placeholder(&p, index)
    }

    fn single(section: &str, key: &str) -> TranslationSet {
        let mut set = TranslationSet::new();
        set.add_section(section)
            .add_translation(key)
            .add_value("en", vec![Segment::text("Some text")]);
        set
    }

    #[test]
    fn test_placeholder_data_types() {
        assert_eq!(ph(DataType::Object, 0, None, 0), "{0}");
        assert_eq!(ph(DataType::String, 0, None, 0), "{0}");
        assert_eq!(ph(DataType::Float, 0, None, 0), "{0}");
        assert_eq!(ph(DataType::Integer, 0, None, 0), "{0}");
    }

    #[test]
    fn test_placeholder_order_index() {
        assert_eq!(ph(DataType::Float, 77, None, 0), "{77}");
        assert_eq!(ph(DataType::Float, 0, None, 1), "{0}");
        assert_eq!(ph(DataType::Float, 0, None, 12), "{11}");
        assert_eq!(ph(DataType::Float, 77, None, 12), "{11}");
    }

    #[test]
    fn test_placeholder_decimal_count() {
        assert_eq!(ph(DataType::Float, 0, Some(0), 0), "{0:F0}");
        assert_eq!(ph(DataType::Float, 0, Some(1), 0), "{0:F1}");
        assert_eq!(ph(DataType::Float, 0, Some(34), 0), "{0:F34}");
        assert_eq!(ph(DataType::Float, 0, Some(1), 3), "{2:F1}");
        assert_eq!(ph(DataType::Object, 0, Some(1), 0), "{0}");
        assert_eq!(ph(DataType::String, 0, Some(1), 0), "{0}");
        assert_eq!(ph(DataType::Integer, 0, Some(1), 0), "{0}");
    }

    #[test]
    fn test_value_string_numbers_placeholders_only() {
        let mut reordered = Placeholder::new(DataType::Float).with_order_index(1);
        reordered.decimal_count = Some(2);
        let value = Value {
            language: "en".to_string(),
            segments: vec![
                Segment::text("<"),
                Segment::placeholder(Placeholder::new(DataType::String)),
                Segment::text("> costs "),
                Segment::placeholder(reordered),
            ],
        };
        assert_eq!(value_string(&value), "&lt;{0}&gt; costs {0:F2}");
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(escape_value(""), "");
        assert_eq!(escape_value("Foo"), "Foo");
        assert_eq!(escape_value("<Foo>"), "&lt;Foo&gt;");
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key(""), "");
        assert_eq!(sanitize_key("Foo"), "Foo");
        assert_eq!(sanitize_key("Foo.Bar"), "Foo_Bar");
        assert_eq!(sanitize_key("Foo Bar"), "Foo_Bar");
        assert_eq!(sanitize_key("<Foo>"), "_Foo_");
        assert_eq!(sanitize_key("1st"), "_1st");
        assert_eq!(sanitize_key("Päivä"), "Päivä");
    }

    #[test]
    fn test_render_document() {
        let xml = Format::new(Flavor::Resx)
            .render(&single("Sektion", "Foo.Bar"), "en")
            .unwrap();
        assert!(xml.contains("<resheader name=\"resmimetype\">"));
        assert!(xml.contains("<value>text/microsoft-resx</value>"));
        assert!(xml.contains("<data name=\"Foo_Bar\" xml:space=\"preserve\">"));
        assert!(xml.contains("<value>Some text</value>"));
        assert!(xml.contains(".NET ResX resource file"));
        assert!(is_well_formed(&xml));
    }

    #[test]
    fn test_render_resw_header() {
        let xml = Format::new(Flavor::Resw)
            .render(&single("Sektion", "Foo"), "fi")
            .unwrap();
        assert!(xml.contains("UWP ResW resource file"));
        assert!(xml.contains("Language: fi"));
    }

    #[test]
    fn test_render_comment_and_dashes() {
        let mut set = single("Sektion -- two dashes", "Foo");
        set.sections[0].translations[0].comment = Some("<Note>".to_string());
        let xml = Format::default().render(&set, "en").unwrap();
        assert!(xml.contains("<comment>&lt;Note&gt;</comment>"));
        assert!(is_well_formed(&xml), "-- in XML comment (section name)");
    }
}

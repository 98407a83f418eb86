//! Core, platform-agnostic types for sanat.
//! The document parser builds these; the emitters only read them.

use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// The whole parsed document: sections in source order plus every language
/// code that appeared on a value row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationSet {
    pub languages: BTreeSet<String>,
    pub sections: Vec<Section>,
}

impl TranslationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new section and returns it for filling in.
    pub fn add_section(&mut self, name: impl Into<String>) -> &mut Section {
        self.sections.push(Section {
            name: name.into(),
            translations: Vec::new(),
        });
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Iterates over every translation of every section, in document order.
    pub fn translations(&self) -> impl Iterator<Item = &Translation> {
        self.sections.iter().flat_map(|s| s.translations.iter())
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains(language)
    }
}

/// A named group of translations. The implicit leading section has an empty name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    pub name: String,
    pub translations: Vec<Translation>,
}

impl Section {
    pub fn add_translation(&mut self, key: impl Into<String>) -> &mut Translation {
        self.translations.push(Translation::new(key));
        let last = self.translations.len() - 1;
        &mut self.translations[last]
    }
}

/// One localizable key with its per-language values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Translation {
    pub key: String,

    /// Empty means "every platform".
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    #[serde(default)]
    pub platforms: BTreeSet<Platform>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub tags: Vec<String>,

    /// Note for translators, also written into generated files.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub comment: Option<String>,

    pub values: Vec<Value>,
}

impl Translation {
    pub fn new(key: impl Into<String>) -> Self {
        Translation {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn add_value(&mut self, language: impl Into<String>, segments: Vec<Segment>) -> &mut Value {
        self.values.push(Value {
            language: language.into(),
            segments,
        });
        let last = self.values.len() - 1;
        &mut self.values[last]
    }

    /// The first value written for `language`, if any.
    pub fn value_for_language(&self, language: &str) -> Option<&Value> {
        self.values.iter().find(|v| v.language == language)
    }

    pub fn is_for_platform(&self, platform: Platform) -> bool {
        self.platforms.is_empty() || self.platforms.contains(&platform)
    }
}

/// One localized rendering of a translation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Value {
    pub language: String,
    pub segments: Vec<Segment>,
}

impl Value {
    /// Walks the segments in order, numbering placeholders by their
    /// zero-based positional index (text segments do not count).
    pub fn pieces(&self) -> impl Iterator<Item = Piece<'_>> {
        let mut positional = 0;
        self.segments.iter().map(move |segment| match segment {
            Segment::Text { text } => Piece::Text(text),
            Segment::Placeholder(placeholder) => {
                positional += 1;
                Piece::Placeholder {
                    positional_index: positional - 1,
                    placeholder,
                }
            }
        })
    }

    /// The placeholders of this value with their positional index.
    pub fn placeholders(&self) -> impl Iterator<Item = (usize, &Placeholder)> {
        self.pieces().filter_map(|piece| match piece {
            Piece::Placeholder {
                positional_index,
                placeholder,
            } => Some((positional_index, placeholder)),
            Piece::Text(_) => None,
        })
    }
}

/// A segment of a [`Value`] as seen by an emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Text(&'a str),
    Placeholder {
        positional_index: usize,
        placeholder: &'a Placeholder,
    },
}

/// An atomic piece of a localized value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Segment {
    Text { text: String },
    Placeholder(Placeholder),
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text { text: text.into() }
    }

    pub fn placeholder(placeholder: Placeholder) -> Self {
        Segment::Placeholder(placeholder)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Segment::Text { text } => Some(text),
            Segment::Placeholder(_) => None,
        }
    }

    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            Segment::Text { .. } => None,
            Segment::Placeholder(p) => Some(p),
        }
    }
}

/// A platform-independent substitution point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    pub data_type: DataType,

    /// 1-based author-specified position; never `Some(0)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub order_index: Option<usize>,

    /// Only meaningful for [`DataType::Float`].
    #[serde(rename = "numberOfDecimals")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub decimal_count: Option<usize>,
}

impl Placeholder {
    pub fn new(data_type: DataType) -> Self {
        Placeholder {
            data_type,
            order_index: None,
            decimal_count: None,
        }
    }

    /// Sets the explicit order index; 0 means "none".
    pub fn with_order_index(mut self, order_index: usize) -> Self {
        self.order_index = (order_index > 0).then_some(order_index);
        self
    }

    pub fn with_decimal_count(mut self, decimal_count: usize) -> Self {
        self.decimal_count = Some(decimal_count);
        self
    }

    /// The decimal count, but only when it applies (float placeholders).
    pub fn float_decimals(&self) -> Option<usize> {
        match self.data_type {
            DataType::Float => self.decimal_count,
            _ => None,
        }
    }

    /// The zero-based output index: the explicit order index converted to
    /// 0-based if present, otherwise the positional index.
    pub fn effective_index(&self, positional_index: usize) -> usize {
        match self.order_index {
            Some(order) => order.saturating_sub(1),
            None => positional_index,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Untyped; the default.
    #[default]
    Object,
    Integer,
    String,
    Float,
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Object => write!(f, "object"),
            DataType::Integer => write!(f, "integer"),
            DataType::String => write!(f, "string"),
            DataType::Float => write!(f, "float"),
        }
    }
}

/// A target platform a translation can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Platform {
    Apple,
    Android,
    Windows,
    Java,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Apple,
        Platform::Android,
        Platform::Windows,
        Platform::Java,
    ];
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Apple => write!(f, "Apple"),
            Platform::Android => write!(f, "Android"),
            Platform::Windows => write!(f, "Windows"),
            Platform::Java => write!(f, "Java"),
        }
    }
}

/// Accepts platform names case-insensitively, ignoring surrounding whitespace.
impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apple" => Ok(Platform::Apple),
            "android" => Ok(Platform::Android),
            "windows" => Ok(Platform::Windows),
            "java" => Ok(Platform::Java),
            _ => Err(format!("Unknown platform value: '{}'", s)),
        }
    }
}

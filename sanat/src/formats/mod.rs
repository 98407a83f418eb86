//! All supported output formats for sanat.
//!
//! Every format is a [`Renderer`]: a pure function from a parsed
//! [`TranslationSet`] and a language code to the text of one resource file.
//! [`FormatType`] enumerates the built-in formats, and [`Registry`] maps
//! format names to renderers so callers can plug in their own.

pub mod android;
pub mod apple;
pub mod dump;
pub mod java;
pub mod json;
pub mod windows;
mod xml;

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    str::FromStr,
};

use tracing::debug;

// Reexporting the formats for easier access
pub use android::Format as AndroidFormat;
pub use apple::Format as AppleFormat;
pub use dump::Format as DumpFormat;
pub use java::Format as JavaFormat;
pub use json::Format as JsonFormat;
pub use windows::{Flavor as WindowsFlavor, Format as WindowsFormat};

use crate::{
    error::Error,
    types::{DataType, Placeholder, Platform, Translation, TranslationSet, Value},
};

/// Renders a translation set into the text of one resource file.
pub trait Renderer: Send + Sync {
    fn render(&self, set: &TranslationSet, language: &str) -> Result<String, Error>;
}

impl<F> Renderer for F
where
    F: Fn(&TranslationSet, &str) -> Result<String, Error> + Send + Sync,
{
    fn render(&self, set: &TranslationSet, language: &str) -> Result<String, Error> {
        self(set, language)
    }
}

/// The built-in output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Apple `Localizable.strings`.
    Apple,
    /// Android `strings.xml`.
    Android,
    /// Java XML properties for `Properties.loadFromXML`.
    Java,
    /// .NET `.resx`.
    WindowsResx,
    /// UWP `.resw`.
    WindowsResw,
    /// The whole model as JSON.
    Json,
    /// The whole model as an indented listing, for debugging.
    Dump,
}

impl FormatType {
    pub const ALL: [FormatType; 7] = [
        FormatType::Apple,
        FormatType::Android,
        FormatType::Java,
        FormatType::WindowsResx,
        FormatType::WindowsResw,
        FormatType::Json,
        FormatType::Dump,
    ];

    /// The name used on the command line and in the [`Registry`].
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::Apple => "apple",
            FormatType::Android => "android",
            FormatType::Java => "java",
            FormatType::WindowsResx => "windows-resx",
            FormatType::WindowsResw => "windows-resw",
            FormatType::Json => "json",
            FormatType::Dump => "dump",
        }
    }

    /// The platform tag whose translations this format emits, if it filters by platform.
    pub fn platform(&self) -> Option<Platform> {
        match self {
            FormatType::Apple => Some(Platform::Apple),
            FormatType::Android => Some(Platform::Android),
            FormatType::Java => Some(Platform::Java),
            FormatType::WindowsResx | FormatType::WindowsResw => Some(Platform::Windows),
            FormatType::Json | FormatType::Dump => None,
        }
    }

    /// Whether one file is rendered per language. JSON and dump describe the
    /// whole set at once and ignore the language argument.
    pub fn is_per_language(&self) -> bool {
        !matches!(self, FormatType::Json | FormatType::Dump)
    }

    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self {
            FormatType::Apple => Box::new(AppleFormat),
            FormatType::Android => Box::new(AndroidFormat),
            FormatType::Java => Box::new(JavaFormat),
            FormatType::WindowsResx => Box::new(WindowsFormat::new(WindowsFlavor::Resx)),
            FormatType::WindowsResw => Box::new(WindowsFormat::new(WindowsFlavor::Resw)),
            FormatType::Json => Box::new(JsonFormat),
            FormatType::Dump => Box::new(DumpFormat),
        }
    }

    pub fn render(&self, set: &TranslationSet, language: &str) -> Result<String, Error> {
        self.renderer().render(set, language)
    }
}

impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts the format names case-insensitively.
///
/// ```rust
/// use sanat::formats::FormatType;
/// assert_eq!("apple".parse::<FormatType>().unwrap(), FormatType::Apple);
/// assert_eq!("Windows-RESX".parse::<FormatType>().unwrap(), FormatType::WindowsResx);
/// assert!("ios".parse::<FormatType>().is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        FormatType::ALL
            .into_iter()
            .find(|format| format.name() == normalized)
            .ok_or_else(|| Error::unknown_format(s, FormatType::ALL.iter().map(|f| f.name())))
    }
}

/// Name → renderer table.
pub struct Registry {
    renderers: BTreeMap<String, Box<dyn Renderer>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// Creates a registry with no formats at all.
    pub fn empty() -> Self {
        Registry {
            renderers: BTreeMap::new(),
        }
    }

    /// Creates a registry holding every [`FormatType`].
    pub fn builtin() -> Self {
        let mut registry = Registry::empty();
        for format in FormatType::ALL {
            registry.register(format.name(), format.renderer());
        }
        registry
    }

    /// Adds a renderer, replacing any previous one of the same name.
    pub fn register(&mut self, name: impl Into<String>, renderer: Box<dyn Renderer>) {
        self.renderers.insert(name.into(), renderer);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Result<&dyn Renderer, Error> {
        self.renderers
            .get(name)
            .map(|r| r.as_ref())
            .ok_or_else(|| Error::unknown_format(name, self.names()))
    }

    pub fn render(&self, name: &str, set: &TranslationSet, language: &str) -> Result<String, Error> {
        debug!(format = name, language, "render");
        self.get(name)?.render(set, language)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// One thing an emitter writes, in output order.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Item<'a> {
    /// First emitted entry of a named section follows.
    SectionHeading(&'a str),
    Entry {
        translation: &'a Translation,
        value: &'a Value,
    },
}

/// Lists what an emitter for `platform` writes for `language`: translations
/// restricted to other platforms and translations without a value for the
/// language are skipped, and a section heading only appears in front of the
/// section's first written entry.
pub(crate) fn items<'a>(set: &'a TranslationSet, language: &str, platform: Platform) -> Vec<Item<'a>> {
    let mut out = Vec::new();
    for section in &set.sections {
        let mut heading_written = section.name.is_empty();
        for translation in &section.translations {
            if !translation.is_for_platform(platform) {
                continue;
            }
            let Some(value) = translation.value_for_language(language) else {
                continue;
            };
            if !heading_written {
                out.push(Item::SectionHeading(&section.name));
                heading_written = true;
            }
            out.push(Item::Entry { translation, value });
        }
    }
    out
}

/// printf-style conversion shared by the Apple and Android formats:
/// `%[<order>$][.<decimals>]<conversion>`, where untyped and string
/// placeholders use `object_conversion`.
pub(crate) fn printf_specifier(placeholder: &Placeholder, object_conversion: char) -> String {
    let mut out = String::from("%");
    if let Some(order) = placeholder.order_index {
        out.push_str(&format!("{}$", order));
    }
    if let Some(decimals) = placeholder.float_decimals() {
        out.push_str(&format!(".{}", decimals));
    }
    out.push(match placeholder.data_type {
        DataType::Integer => 'd',
        DataType::Float => 'f',
        DataType::String | DataType::Object => object_conversion,
    });
    out
}

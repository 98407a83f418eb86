#![forbid(unsafe_code)]
//! One translation document in, native string resources out.
//!
//! sanat reads a plain-text translation document, builds a
//! platform-agnostic [`TranslationSet`], and renders it as Apple
//! `.strings`, Android `strings.xml`, Java XML properties, or Windows
//! `.resx`/`.resw` files, translating each placeholder into the target's
//! own syntax.
//!
//! # Quick Start
//!
//! ```rust
//! use sanat::{formats::FormatType, parser::parse_str, preprocess::NoOp};
//!
//! let document = "=== Greeting ===\n  Hello\n    en = Hi {@}\n    fi = Moro {@}\n";
//! let set = parse_str(document, &NoOp)?;
//!
//! let xml = FormatType::Android.render(&set, "en")?;
//! assert!(xml.contains(r#"<string name="Hello">Hi %s</string>"#));
//!
//! let strings = FormatType::Apple.render(&set, "fi")?;
//! assert!(strings.contains(r#""Hello" = "Moro %@";"#));
//! # Ok::<(), sanat::Error>(())
//! ```
//!
//! # Placeholders
//!
//! Values may contain `{[order:]type[.decimals]}` specifiers where `type` is
//! `@` (object), `s` (string), `d` (integer) or `f` (float). A backslash makes
//! the next character literal, so `\{` is a plain brace.

pub mod error;
pub mod formats;
pub mod parser;
pub mod placeholder;
pub mod preprocess;
pub mod tokenizer;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::{Error, ParseError, ParseErrors},
    formats::{FormatType, Registry, Renderer},
    parser::{DocumentParser, ParseOptions, ParseOutcome, parse_file, parse_str},
    preprocess::{NoOp, Pipeline, Preprocessor},
    tokenizer::tokenize,
    types::{DataType, Piece, Placeholder, Platform, Section, Segment, Translation, TranslationSet, Value},
};

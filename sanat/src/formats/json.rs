//! The parsed model as JSON, for tooling that wants to consume sanat data.

use crate::{error::Error, formats::Renderer, types::TranslationSet};

/// Serializes the whole translation set; the language argument is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Format;

impl Renderer for Format {
    fn render(&self, set: &TranslationSet, _language: &str) -> Result<String, Error> {
        let mut out = serde_json::to_string_pretty(set)?;
        out.push('\n');
        Ok(out)
    }
}

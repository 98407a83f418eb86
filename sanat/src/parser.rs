//! The line-oriented parser for translation documents.
//!
//! A document looks like this:
//!
//! ```text
//! # comment
//! === Section name ===
//!   TranslationKey
//!     comment = Shown to translators
//!     platforms = apple, android
//!     tags = onboarding
//!     en = Hello {@}
//!     fi = "Moro {@}"
//! ```
//!
//! The row kind is decided purely by the number of leading whitespace
//! characters: 0 for section headers, 2 for keys, 4 for metadata and values.
//! Problems are collected with their line numbers and parsing carries on, so
//! one run reports every error in the file.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor, Read},
    path::Path,
};

use tracing::{debug, warn};

use crate::{
    error::{Error, ParseError, ParseErrors},
    preprocess::{NoOp, Preprocessor},
    tokenizer::tokenize_with,
    types::{Platform, TranslationSet},
};

/// Parse behavior options for [`DocumentParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip lines whose indentation is not 0, 2 or 4 instead of reporting them.
    pub lenient_indentation: bool,
    /// Also report the document's final key when it has no values.
    pub require_values_at_end: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            lenient_indentation: false,
            require_values_at_end: true,
        }
    }
}

impl ParseOptions {
    /// Creates default parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables skipping of unexpectedly indented lines.
    pub fn with_lenient_indentation(mut self, lenient: bool) -> Self {
        self.lenient_indentation = lenient;
        self
    }

    /// Enables/disables the "no values" check for the last key of the document.
    pub fn with_require_values_at_end(mut self, require: bool) -> Self {
        self.require_values_at_end = require;
        self
    }
}

/// The result of a best-effort parse: everything that could be built, plus
/// every problem found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub set: TranslationSet,
    pub errors: Vec<ParseError>,
}

impl ParseOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The translation set, unless any error was recorded.
    pub fn into_result(self) -> Result<TranslationSet, Error> {
        match ParseErrors::from_vec(self.errors) {
            None => Ok(self.set),
            Some(errors) => Err(Error::Parse(errors)),
        }
    }
}

/// Parses translation documents, running values through a [`Preprocessor`].
pub struct DocumentParser<'p> {
    options: ParseOptions,
    preprocessor: &'p dyn Preprocessor,
}

impl Default for DocumentParser<'static> {
    fn default() -> Self {
        DocumentParser::new(&NoOp)
    }
}

impl<'p> DocumentParser<'p> {
    pub fn new(preprocessor: &'p dyn Preprocessor) -> Self {
        DocumentParser {
            options: ParseOptions::default(),
            preprocessor,
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses a whole document, collecting errors instead of stopping at them.
    pub fn parse(&self, input: &str) -> ParseOutcome {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let mut state = ParseState::new(self);
        for (index, line) in input.lines().enumerate() {
            state.line_number = index + 1;
            state.process_line(line);
        }
        state.finish()
    }

    /// Parses a document from a string; fails if any error was found.
    pub fn parse_str(&self, input: &str) -> Result<TranslationSet, Error> {
        self.parse(input).into_result()
    }

    /// Parses a document from any reader.
    pub fn from_reader<R: BufRead>(&self, mut reader: R) -> Result<TranslationSet, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.parse_str(&content)
    }

    /// Parses a document from a file. A byte-order mark selects UTF-16 or
    /// UTF-8 decoding; without one the file is read as UTF-8.
    pub fn read_from<P: AsRef<Path>>(&self, path: P) -> Result<TranslationSet, Error> {
        self.read_outcome_from(path)?.into_result()
    }

    /// Like [`DocumentParser::read_from`], but keeps partial results and errors.
    pub fn read_outcome_from<P: AsRef<Path>>(&self, path: P) -> Result<ParseOutcome, Error> {
        let file = File::open(path.as_ref())?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);
        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded)?;
        debug!(path = %path.as_ref().display(), bytes = decoded.len(), "read translation document");
        Ok(self.parse(&decoded))
    }

    /// Parses a document from bytes.
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<TranslationSet, Error> {
        self.from_reader(BufReader::new(Cursor::new(bytes)))
    }
}

/// Parses a document with the given preprocessor and default options.
pub fn parse_str(input: &str, preprocessor: &dyn Preprocessor) -> Result<TranslationSet, Error> {
    DocumentParser::new(preprocessor).parse_str(input)
}

/// Reads and parses a document file with the given preprocessor and default options.
pub fn parse_file<P: AsRef<Path>>(
    path: P,
    preprocessor: &dyn Preprocessor,
) -> Result<TranslationSet, Error> {
    DocumentParser::new(preprocessor).read_from(path)
}

/// The key currently receiving metadata and value rows.
struct OpenKey {
    line: usize,
    key: String,
    has_values: bool,
}

struct ParseState<'a, 'p> {
    parser: &'a DocumentParser<'p>,
    set: TranslationSet,
    errors: Vec<ParseError>,
    open_key: Option<OpenKey>,
    line_number: usize,
}

impl<'a, 'p> ParseState<'a, 'p> {
    fn new(parser: &'a DocumentParser<'p>) -> Self {
        ParseState {
            parser,
            set: TranslationSet::new(),
            errors: Vec::new(),
            open_key: None,
            line_number: 0,
        }
    }

    fn report_at(&mut self, line: usize, message: String) {
        warn!(line, message = %message, "parse error");
        self.errors.push(ParseError::new(line, message));
    }

    fn report(&mut self, message: String) {
        self.report_at(self.line_number, message);
    }

    fn process_line(&mut self, raw_line: &str) {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        let Some(width) = leading_space_width(raw_line) else {
            if !self.parser.options.lenient_indentation {
                self.report(format!("Indentation must use spaces only: '{}'", raw_line));
            }
            return;
        };

        match width {
            0 => self.section_heading_row(raw_line, trimmed),
            2 => self.translation_key_row(trimmed),
            4 => self.metadata_row(raw_line, trimmed),
            _ if self.parser.options.lenient_indentation => {}
            width => self.report(format!(
                "Unexpected indentation of {} spaces (expected 0, 2 or 4): '{}'",
                width, raw_line
            )),
        }
    }

    fn section_heading_row(&mut self, raw_line: &str, trimmed: &str) {
        if !raw_line.starts_with("===") {
            self.report(format!(
                "Unknown un-indented line '{}'; prepend with === if section, indent if translation key.",
                raw_line
            ));
            return;
        }
        self.close_key();
        let name = trimmed.trim_matches(|c: char| c == '=' || c == ' ');
        debug!(line = self.line_number, section = name, "section");
        self.set.add_section(name);
    }

    fn translation_key_row(&mut self, trimmed: &str) {
        self.close_key();
        if self.set.sections.is_empty() {
            self.set.add_section("");
        }
        debug!(line = self.line_number, key = trimmed, "translation key");
        if let Some(section) = self.set.sections.last_mut() {
            section.add_translation(trimmed);
        }
        self.open_key = Some(OpenKey {
            line: self.line_number,
            key: trimmed.to_string(),
            has_values: false,
        });
    }

    fn metadata_row(&mut self, raw_line: &str, trimmed: &str) {
        if self.open_key.is_none() {
            self.report(format!("Loose line not in a translation block: {}", raw_line));
            return;
        }

        let Some((name, value)) = trimmed.split_once('=') else {
            self.report(format!("Cannot find separator '=' on line: {}", raw_line));
            return;
        };
        let name = name.trim();
        let value = unquoted(value.trim());

        match name.to_lowercase().as_str() {
            "platforms" => {
                let platforms = self.platforms_from_list(value);
                if let Some(translation) = self.current_translation() {
                    translation.platforms = platforms;
                }
            }
            "tags" => {
                let tags = components_from_list(value)
                    .map(str::to_string)
                    .collect();
                if let Some(translation) = self.current_translation() {
                    translation.tags = tags;
                }
            }
            "comment" => {
                let comment = value.to_string();
                if let Some(translation) = self.current_translation() {
                    translation.comment = Some(comment);
                }
            }
            _ => self.value_row(name, value),
        }
    }

    fn value_row(&mut self, language: &str, value: &str) {
        let preprocessor = self.parser.preprocessor;
        let raw = preprocessor.process_raw_value(value);

        let mut messages = Vec::new();
        let segments = tokenize_with(&raw, &mut |m| messages.push(m));
        for message in messages {
            self.report(message);
        }
        let segments = preprocessor.process_segments(segments);

        if let Some(translation) = self.current_translation() {
            translation.add_value(language, segments);
        }
        if let Some(open_key) = self.open_key.as_mut() {
            open_key.has_values = true;
        }
        self.set.languages.insert(language.to_string());
    }

    fn platforms_from_list(&mut self, list: &str) -> std::collections::BTreeSet<Platform> {
        let mut platforms = std::collections::BTreeSet::new();
        for name in components_from_list(list) {
            match name.parse::<Platform>() {
                Ok(platform) => {
                    platforms.insert(platform);
                }
                Err(message) => self.report(message),
            }
        }
        platforms
    }

    fn current_translation(&mut self) -> Option<&mut crate::types::Translation> {
        self.open_key.as_ref()?;
        self.set.sections.last_mut()?.translations.last_mut()
    }

    /// Ends the open key, reporting it if it never got a value.
    fn close_key(&mut self) {
        if let Some(open_key) = self.open_key.take() {
            if !open_key.has_values {
                self.report_at(
                    open_key.line,
                    format!("Translation '{}' has no values", open_key.key),
                );
            }
        }
    }

    fn finish(mut self) -> ParseOutcome {
        if self.parser.options.require_values_at_end {
            self.close_key();
        }
        debug!(
            sections = self.set.sections.len(),
            languages = self.set.languages.len(),
            errors = self.errors.len(),
            "parsed translation document"
        );
        ParseOutcome {
            set: self.set,
            errors: self.errors,
        }
    }
}

/// Number of leading spaces; `None` when the indentation contains any other
/// whitespace character.
fn leading_space_width(line: &str) -> Option<usize> {
    let indent = &line[..line.len() - line.trim_start().len()];
    indent.chars().all(|c| c == ' ').then_some(indent.len())
}

/// Strips one pair of wrapping double quotes.
fn unquoted(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
fn components_from_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

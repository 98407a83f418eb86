//! All error types for the sanat crate.
//!
//! Parse problems are recoverable and collected as [`ParseError`]s while the
//! document is read; everything else aborts the current operation.

use std::fmt::{Display, Formatter};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown output format `{name}`; known formats: {}", .known.join(", "))]
    UnknownFormat { name: String, known: Vec<String> },

    #[error("unknown preprocessor `{name}`; known preprocessors: {}", .known.join(", "))]
    UnknownPreprocessor { name: String, known: Vec<String> },

    #[error("{0}")]
    Parse(ParseErrors),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates an unknown-format error that lists the names which would have worked.
    pub fn unknown_format<I, S>(name: impl Into<String>, known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Error::UnknownFormat {
            name: name.into(),
            known: known.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an unknown-preprocessor error that lists the registered names.
    pub fn unknown_preprocessor<I, S>(name: impl Into<String>, known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Error::UnknownPreprocessor {
            name: name.into(),
            known: known.into_iter().map(Into::into).collect(),
        }
    }

    /// The collected parse errors, if this is a parse failure.
    pub fn parse_errors(&self) -> Option<&[ParseError]> {
        match self {
            Error::Parse(errors) => Some(errors.as_slice()),
            _ => None,
        }
    }
}

/// One problem found in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number in the source document.
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        ParseError {
            line,
            message: message.into(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Every parse error of a failed parse, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(Vec<ParseError>);

impl ParseErrors {
    /// Wraps the errors, or returns `None` when there is nothing to report.
    pub fn from_vec(errors: Vec<ParseError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(ParseErrors(errors))
        }
    }

    pub fn as_slice(&self) -> &[ParseError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for ParseErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error(s) while parsing", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

//! Optional text transforms applied while a document is parsed.
//!
//! A [`Preprocessor`] sees each language value twice: as the raw string right
//! after it is read from the document, and as the segment list produced by the
//! tokenizer. Both hooks default to the identity, so an implementation only
//! overrides what it needs.

pub mod markdown;
pub mod smartypants;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{error::Error, types::Segment};

pub use markdown::Markdown;
pub use smartypants::SmartyPants;

pub trait Preprocessor: Send + Sync {
    /// Transforms a raw value before it is tokenized.
    fn process_raw_value(&self, value: &str) -> String {
        value.to_string()
    }

    /// Transforms the segments of a value after tokenizing.
    fn process_segments(&self, segments: Vec<Segment>) -> Vec<Segment> {
        segments
    }
}

/// The default preprocessor, which changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOp;

impl Preprocessor for NoOp {}

/// Runs several preprocessors in order; the output of one is the input of the next.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Preprocessor>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: Box<dyn Preprocessor>) {
        self.stages.push(stage);
    }

    pub fn with(mut self, stage: impl Preprocessor + 'static) -> Self {
        self.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Builds a pipeline from a comma-separated list of preprocessor names,
    /// e.g. `"markdown, smartypants"`. Blank entries are skipped.
    pub fn from_names(names: &str) -> Result<Self, Error> {
        let mut pipeline = Pipeline::new();
        for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            pipeline.push(name.parse::<PreprocessorKind>()?.build());
        }
        Ok(pipeline)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}

impl Preprocessor for Pipeline {
    fn process_raw_value(&self, value: &str) -> String {
        self.stages
            .iter()
            .fold(value.to_string(), |acc, stage| stage.process_raw_value(&acc))
    }

    fn process_segments(&self, segments: Vec<Segment>) -> Vec<Segment> {
        self.stages
            .iter()
            .fold(segments, |acc, stage| stage.process_segments(acc))
    }
}

/// The built-in preprocessors, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreprocessorKind {
    Markdown,
    SmartyPants,
}

impl PreprocessorKind {
    pub const ALL: [PreprocessorKind; 2] = [PreprocessorKind::Markdown, PreprocessorKind::SmartyPants];

    pub fn name(&self) -> &'static str {
        match self {
            PreprocessorKind::Markdown => "markdown",
            PreprocessorKind::SmartyPants => "smartypants",
        }
    }

    pub fn build(&self) -> Box<dyn Preprocessor> {
        match self {
            PreprocessorKind::Markdown => Box::new(Markdown),
            PreprocessorKind::SmartyPants => Box::new(SmartyPants),
        }
    }
}

impl Display for PreprocessorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PreprocessorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        PreprocessorKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| {
                Error::unknown_preprocessor(s, PreprocessorKind::ALL.iter().map(|k| k.name()))
            })
    }
}

/// Splits off leading and trailing whitespace: `(leading, trailing)`.
pub(crate) fn surrounding_whitespace(text: &str) -> (&str, &str) {
    let trimmed_start = text.trim_start();
    let leading = &text[..text.len() - trimmed_start.len()];
    let trimmed = trimmed_start.trim_end();
    let trailing = &trimmed_start[trimmed.len()..];
    (leading, trailing)
}

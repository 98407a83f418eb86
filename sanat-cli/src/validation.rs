use std::path::Path;

use sanat::{
    DocumentParser, ParseOptions, Pipeline, TranslationSet,
    error::ParseError,
};
use tracing::info;
use unic_langid::LanguageIdentifier;

/// Validate file path exists and is a regular file
pub fn validate_file_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("File does not exist: {}", path.display()));
    }
    if !path.is_file() {
        return Err(format!("Path is not a file: {}", path.display()));
    }
    Ok(())
}

/// Validate output directory path: it may not exist yet, but must not be a file
pub fn validate_output_dir(path: &Path) -> Result<(), String> {
    if path.exists() && !path.is_dir() {
        return Err(format!("Output path is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Validate language code format using unic-langid
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }
    lang.parse::<LanguageIdentifier>().map(|_| ()).map_err(|_| {
        format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )
    })
}

/// Formats collected parse errors one per line, as `ERROR on line N: message`.
pub fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| format!("ERROR on line {}: {}", e.line, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads and parses the input document, turning every failure into a
/// printable message.
pub fn parse_input(
    input: &Path,
    pipeline: &Pipeline,
    options: ParseOptions,
) -> Result<TranslationSet, String> {
    validate_file_path(input)?;
    let outcome = DocumentParser::new(pipeline)
        .with_options(options)
        .read_outcome_from(input)
        .map_err(|e| format!("Cannot read {}: {}", input.display(), e))?;

    if !outcome.is_ok() {
        return Err(format_parse_errors(&outcome.errors));
    }
    info!(
        input = %input.display(),
        sections = outcome.set.sections.len(),
        languages = outcome.set.languages.len(),
        "parsed input"
    );
    Ok(outcome.set)
}

/// The `validate` command: parse only.
pub fn run_validate(input: &Path, pipeline: &Pipeline, options: ParseOptions) -> Result<(), String> {
    let set = parse_input(input, pipeline, options)?;
    println!(
        "✅ {} is valid: {} translations in {} sections, languages: {}",
        input.display(),
        set.translations().count(),
        set.sections.len(),
        set.languages.iter().cloned().collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

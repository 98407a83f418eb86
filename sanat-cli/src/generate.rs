use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use sanat::{FormatType, ParseOptions, Pipeline, TranslationSet};
use tracing::{debug, info};

use crate::{
    layout::output_path,
    validation::{parse_input, validate_language_code, validate_output_dir},
};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub format: FormatType,
    pub outdir: PathBuf,
    /// Languages to render; empty means every language in the document.
    pub languages: Vec<String>,
    pub parse_options: ParseOptions,
}

/// The `generate` command: parse, then render and write every requested
/// language. Nothing is written if the document has any parse error.
pub fn run_generate(options: &GenerateOptions, pipeline: &Pipeline) -> Result<Vec<PathBuf>, String> {
    validate_output_dir(&options.outdir)?;
    for language in &options.languages {
        validate_language_code(language)?;
    }

    let set = parse_input(&options.input, pipeline, options.parse_options.clone())?;
    let languages = languages_to_render(&set, options)?;

    let written = languages
        .par_iter()
        .map(|language| write_one(&set, options.format, &options.outdir, language))
        .collect::<Result<Vec<_>, String>>()?;

    info!(format = %options.format, files = written.len(), "generated");
    Ok(written)
}

fn languages_to_render(set: &TranslationSet, options: &GenerateOptions) -> Result<Vec<String>, String> {
    if !options.format.is_per_language() {
        // Whole-set formats produce a single file.
        return Ok(vec![String::new()]);
    }
    if options.languages.is_empty() {
        // Document languages become path components.
        for language in &set.languages {
            validate_language_code(language)
                .map_err(|e| format!("{} (in {})", e, options.input.display()))?;
        }
        return Ok(set.languages.iter().cloned().collect());
    }
    if let Some(missing) = options.languages.iter().find(|l| !set.has_language(l)) {
        return Err(format!(
            "Language '{}' does not appear in {}",
            missing,
            options.input.display()
        ));
    }
    Ok(options.languages.clone())
}

fn write_one(
    set: &TranslationSet,
    format: FormatType,
    outdir: &Path,
    language: &str,
) -> Result<PathBuf, String> {
    let content = format
        .render(set, language)
        .map_err(|e| format!("Cannot render {} for '{}': {}", format, language, e))?;
    let path = output_path(format, outdir, language);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Cannot create directory {}: {}", parent.display(), e))?;
    }
    fs::write(&path, content).map_err(|e| format!("Cannot write {}: {}", path.display(), e))?;
    debug!(path = %path.display(), language, "wrote");
    Ok(path)
}

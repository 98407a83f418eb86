//! CLI library for testing purposes

pub mod config;
pub mod generate;
pub mod layout;
pub mod logging;
pub mod validation;

pub use config::Config;
pub use generate::{GenerateOptions, run_generate};
pub use validation::run_validate;

use sanat::{Pipeline, preprocess::PreprocessorKind};

/// Builds the preprocessing pipeline from a comma-separated name list.
pub fn build_pipeline(names: Option<&str>) -> Result<Pipeline, String> {
    match names {
        None => Ok(Pipeline::new()),
        Some(names) => Pipeline::from_names(names).map_err(|e| e.to_string()),
    }
}

/// Text for the `formats` command.
pub fn formats_listing() -> String {
    let mut out = String::from("Output formats:\n");
    for format in sanat::FormatType::ALL {
        let scope = if format.is_per_language() {
            "one file per language"
        } else {
            "one file for all languages"
        };
        out.push_str(&format!("  {:<14} {}\n", format.name(), scope));
    }
    out.push_str("Preprocessors:\n");
    for kind in PreprocessorKind::ALL {
        out.push_str(&format!("  {}\n", kind.name()));
    }
    out
}

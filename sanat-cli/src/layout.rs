//! Where each format's files go inside the output directory.

use std::path::{Path, PathBuf};

use sanat::formats::FormatType;
use unic_langid::LanguageIdentifier;

/// The file `format` writes for `language` under `outdir`.
pub fn output_path(format: FormatType, outdir: &Path, language: &str) -> PathBuf {
    match format {
        FormatType::Apple => outdir.join(format!("{}.lproj", language)).join("Localizable.strings"),
        FormatType::Android => outdir.join(android_values_dir(language)).join("strings.xml"),
        FormatType::Java => outdir.join(format!("Properties_{}.xml", language)),
        FormatType::WindowsResx => outdir.join(format!("Resources.{}.resx", language)),
        FormatType::WindowsResw => outdir.join(language).join("Resources.resw"),
        FormatType::Json => outdir.join("translations.json"),
        FormatType::Dump => outdir.join("dump.txt"),
    }
}

/// Android resource qualifier directory for a language code: `values-fi`,
/// `values-pt-rBR` for a region, `values-b+sr+Latn` when a script is present.
/// Codes that are not valid BCP 47 are used verbatim.
pub fn android_values_dir(language: &str) -> String {
    let Ok(id) = language.parse::<LanguageIdentifier>() else {
        return format!("values-{}", language);
    };

    let lang = id.language.as_str();
    match (id.script, id.region) {
        (Some(script), region) => {
            let mut qualifier = format!("values-b+{}+{}", lang, script.as_str());
            if let Some(region) = region {
                qualifier.push('+');
                qualifier.push_str(region.as_str());
            }
            qualifier
        }
        (None, Some(region)) => format!("values-{}-r{}", lang, region.as_str()),
        (None, None) => format!("values-{}", lang),
    }
}

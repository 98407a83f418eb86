//! Optional `sanat.toml` defaults for the command line.
//!
//! ```toml
//! processors = "markdown,smartypants"
//! languages = ["en", "fi"]
//! lenient_indentation = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "sanat.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Comma-separated preprocessor names, used when `--processors` is absent.
    pub processors: Option<String>,
    /// Languages to generate, used when no `--lang` is given.
    pub languages: Vec<String>,
    pub lenient_indentation: bool,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("Invalid configuration: {}", e))
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config file {}: {}", path.display(), e))?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml(&text)
    }

    /// Loads `explicit` if given (it must exist), otherwise `./sanat.toml`
    /// if present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }
}

//! Format-agnostic loading of configuration and other structured inputs.
//!
//! The format is picked from the file extension:
//! - `.toml` -> TOML
//! - `.json` -> JSON
//! - `.yaml`, `.yml` -> YAML

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result};

/// Deserialize `path` according to its extension.
pub fn load_structured<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let parse_error = |format: &str, message: String| Error::ConfigParse {
        path: path.to_path_buf(),
        format: format.into(),
        message,
    };

    match extension.as_str() {
        "toml" => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
        "json" => serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string())),
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string()))
        }
        _ => Err(Error::UnsupportedFormat { extension }),
    }
}

/// Load a [`Config`] without validating it.
///
/// Callers typically apply command-line overrides before calling
/// [`Config::validate`].
pub fn load_config(path: &Path) -> Result<Config> {
    let config: Config = load_structured(path)?;
    tracing::debug!(path = %path.display(), document = %config.document, "Loaded configuration");
    Ok(config)
}

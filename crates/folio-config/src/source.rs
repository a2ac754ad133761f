//! Page configuration file loading.
//!
//! The page configuration is read into an untyped [`serde_json::Value`] so
//! that an already-compiled file can be recognised by its marker before any
//! typed parsing happens.

use std::path::Path;

use serde_json::Value;

use crate::ConfigError;

/// Serialization format of a page configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageFormat {
    Yaml,
    Json,
    Toml,
}

impl PageFormat {
    /// Detect the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Load a page configuration file.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, has an
/// unsupported extension or fails to parse.
pub fn load_page_config(path: &Path) -> Result<Value, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let format = PageFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;

    tracing::debug!(path = %path.display(), ?format, "Loading page configuration");
    parse_page_config(&content, format)
}

/// Parse page configuration text in the given format.
///
/// # Errors
///
/// Returns the format's parse error.
pub fn parse_page_config(content: &str, format: PageFormat) -> Result<Value, ConfigError> {
    let value = match format {
        PageFormat::Yaml => serde_yaml::from_str(content)?,
        PageFormat::Json => serde_json::from_str(content)?,
        PageFormat::Toml => toml::from_str(content)?,
    };
    Ok(value)
}

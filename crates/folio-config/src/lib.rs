//! Configuration management for Folio.
//!
//! Parses `folio.toml` project files with serde and provides auto-discovery
//! of the project file in parent directories. The page configuration itself
//! (YAML, JSON or TOML) is loaded with [`load_page_config`].
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `pages.config`
//! - `output.path`

mod expand;
mod source;

pub use source::{PageFormat, load_page_config, parse_page_config};

use folio_pages::{AcceptAll, ComponentRegistry, ComponentSet};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the page configuration file.
    pub pages_config: Option<PathBuf>,
    /// Override the output file.
    pub output_path: Option<PathBuf>,
    /// Override pretty-printing of the output.
    pub pretty: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Page configuration filename used when none is configured.
const DEFAULT_PAGES_FILENAME: &str = "pages.yaml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page configuration section (paths are relative strings from TOML).
    pages: PagesConfigRaw,
    /// Registered components.
    pub components: ComponentsConfig,
    /// Output section (paths are relative strings from TOML).
    output: OutputConfigRaw,

    /// Resolved page configuration (set after loading).
    #[serde(skip)]
    pub pages_resolved: PagesConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw page configuration section as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PagesConfigRaw {
    config: Option<String>,
}

/// Resolved page configuration section with absolute paths.
#[derive(Debug, Default)]
pub struct PagesConfig {
    /// Page configuration file to compile.
    pub config_file: PathBuf,
}

/// Component registration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ComponentsConfig {
    /// Names of the components `component` references may use.
    ///
    /// When unset, any non-empty name is accepted.
    pub known: Option<Vec<String>>,
}

impl ComponentsConfig {
    /// Build the registry used to check `component` references.
    #[must_use]
    pub fn registry(&self) -> Box<dyn ComponentRegistry> {
        match &self.known {
            Some(names) => Box::new(names.iter().cloned().collect::<ComponentSet>()),
            None => Box::new(AcceptAll),
        }
    }
}

/// Raw output section as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    path: Option<String>,
    pretty: Option<bool>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug)]
pub struct OutputConfig {
    /// Output file. `None` writes to stdout.
    pub path: Option<PathBuf>,
    /// Pretty-print the compiled JSON.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            pretty: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Page configuration file with an unknown extension.
    #[error("Unsupported page configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.path`").
        field: String,
        /// Error message (e.g., "${`FOLIO_OUT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(pages_config) = &settings.pages_config {
            self.pages_resolved.config_file.clone_from(pages_config);
        }
        if let Some(output_path) = &settings.output_path {
            self.output_resolved.path = Some(output_path.clone());
        }
        if let Some(pretty) = settings.pretty {
            self.output_resolved.pretty = pretty;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            pages: PagesConfigRaw::default(),
            components: ComponentsConfig::default(),
            output: OutputConfigRaw::default(),
            pages_resolved: PagesConfig {
                config_file: base.join(DEFAULT_PAGES_FILENAME),
            },
            output_resolved: OutputConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(names) = &self.components.known {
            for name in names {
                require_non_empty(name, "components.known")?;
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref file) = self.pages.config {
            self.pages.config = Some(expand::expand_env(file, "pages.config")?);
        }
        if let Some(ref path) = self.output.path {
            self.output.path = Some(expand::expand_env(path, "output.path")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_file = match self.pages.config.as_deref() {
            Some(file) => {
                require_non_empty(file, "pages.config")?;
                config_dir.join(file)
            }
            None => config_dir.join(DEFAULT_PAGES_FILENAME),
        };
        self.pages_resolved = PagesConfig { config_file };

        let path = match self.output.path.as_deref() {
            Some(path) => {
                require_non_empty(path, "output.path")?;
                Some(config_dir.join(path))
            }
            None => None,
        };
        self.output_resolved = OutputConfig {
            path,
            pretty: self.output.pretty.unwrap_or(true),
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.pages_resolved.config_file,
            PathBuf::from("/test/pages.yaml")
        );
        assert!(config.output_resolved.path.is_none());
        assert!(config.output_resolved.pretty);
        assert!(config.components.known.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.pages.config.is_none());
        assert!(config.components.known.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[pages]
config = "catalog.yaml"

[components]
known = ["Button", "Card"]

[output]
path = "build/pages.json"
pretty = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.pages.config.as_deref(), Some("catalog.yaml"));
        assert_eq!(
            config.components.known,
            Some(vec!["Button".to_owned(), "Card".to_owned()])
        );
        assert_eq!(config.output.path.as_deref(), Some("build/pages.json"));
        assert_eq!(config.output.pretty, Some(false));
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[pages]
config = "site/catalog.yaml"

[output]
path = "build/pages.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert_eq!(
            config.pages_resolved.config_file,
            PathBuf::from("/project/site/catalog.yaml")
        );
        assert_eq!(
            config.output_resolved.path,
            Some(PathBuf::from("/project/build/pages.json"))
        );
        assert!(config.output_resolved.pretty);
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert_eq!(
            config.pages_resolved.config_file,
            PathBuf::from("/project/pages.yaml")
        );
        assert!(config.output_resolved.path.is_none());
    }

    #[test]
    fn test_resolve_paths_rejects_empty_pages_config() {
        let mut config: Config = toml::from_str("[pages]\nconfig = \"\"\n").unwrap();

        let err = config.resolve_paths(Path::new("/project")).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("pages.config"));
    }

    #[test]
    fn test_validate_rejects_empty_component_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.components.known = Some(vec!["Button".to_owned(), " ".to_owned()]);

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("components.known"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_registry_from_known_components() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.components.known = Some(vec!["Button".to_owned()]);

        let registry = config.components.registry();

        assert!(registry.contains("Button"));
        assert!(!registry.contains("Card"));
    }

    #[test]
    fn test_registry_accepts_any_when_unset() {
        let config = Config::default_with_base(Path::new("/test"));

        let registry = config.components.registry();

        assert!(registry.contains("Anything"));
    }

    #[test]
    fn test_apply_cli_settings_pages_config() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            pages_config: Some(PathBuf::from("/custom/pages.json")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.pages_resolved.config_file,
            PathBuf::from("/custom/pages.json")
        );
        assert!(config.output_resolved.path.is_none()); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_output() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output_path: Some(PathBuf::from("/out/pages.json")),
            pretty: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.output_resolved.path,
            Some(PathBuf::from("/out/pages.json"))
        );
        assert!(!config.output_resolved.pretty);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.pages_resolved.config_file,
            PathBuf::from("/test/pages.yaml")
        );
        assert!(config.output_resolved.pretty);
    }

    #[test]
    fn test_expand_env_vars_output_path() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_OUT_DIR", "dist");
        }

        let toml = r#"
[output]
path = "${FOLIO_TEST_OUT_DIR}/pages.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.output.path.as_deref(), Some("dist/pages.json"));

        unsafe {
            std::env::remove_var("FOLIO_TEST_OUT_DIR");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_FOLIO_CONFIG_TEST");
        }

        let toml = r#"
[pages]
config = "${MISSING_VAR_FOLIO_CONFIG_TEST}/pages.yaml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_FOLIO_CONFIG_TEST"));
        assert!(err.to_string().contains("pages.config"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[pages]\nconfig = \"catalog.json\"\n\n[output]\npretty = false\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.pages_resolved.config_file,
            dir.path().join("catalog.json")
        );
        assert!(!config.output_resolved.pretty);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/folio.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[pages\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

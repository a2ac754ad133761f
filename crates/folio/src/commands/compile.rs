//! `folio compile` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::{CliSettings, Config, load_page_config};
use folio_pages::{CompiledConfig, configure};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the compile command.
#[derive(Args)]
pub(crate) struct CompileArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page configuration file (overrides config).
    #[arg(short, long, env = "FOLIO_PAGES")]
    pages: Option<PathBuf>,

    /// Output file (overrides config, default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CompileArgs {
    /// Execute the compile command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, compilation or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            pages_config: self.pages,
            output_path: self.output,
            pretty: self.compact.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let pages_file = &config.pages_resolved.config_file;
        output.info(&format!("Pages: {}", pages_file.display()));

        let value = load_page_config(pages_file)?;
        let registry = config.components.registry();
        let compiled = configure(value, &*registry)?;
        tracing::info!(
            routes = compiled.pages.len(),
            top_level = compiled.page_tree.len(),
            "Compiled page configuration"
        );

        let json = render_json(&compiled, config.output_resolved.pretty)?;
        match &config.output_resolved.path {
            Some(path) => {
                write_output(path, &json)?;
                output.success(&format!(
                    "Compiled {} routes into {}",
                    compiled.pages.len(),
                    path.display()
                ));
            }
            None => output.data(&json)?,
        }

        Ok(())
    }
}

/// Serialize the compiled configuration.
fn render_json(compiled: &CompiledConfig, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(compiled)?
    } else {
        serde_json::to_string(compiled)?
    };
    Ok(json)
}

/// Write output, creating parent directories as needed.
fn write_output(path: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    Ok(())
}

//! `folio check` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config, load_page_config};
use folio_pages::{Diagnostic, configure_with_sink};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page configuration file (overrides config).
    #[arg(short, long, env = "FOLIO_PAGES")]
    pages: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or any diagnostic is reported.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            pages_config: self.pages,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let pages_file = &config.pages_resolved.config_file;
        let value = load_page_config(pages_file)?;
        let registry = config.components.registry();

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let compiled = configure_with_sink(value, &*registry, &mut diagnostics)?;

        if diagnostics.is_empty() {
            output.success(&format!(
                "{}: no problems found ({} routes)",
                pages_file.display(),
                compiled.pages.len()
            ));
            return Ok(());
        }

        for diagnostic in &diagnostics {
            output.warning(&format!("warning[{}]: {diagnostic}", diagnostic.kind.code()));
        }
        output.info(&format!("Checked {}", pages_file.display()));

        Err(CliError::Validation(summary(diagnostics.len())))
    }
}

fn summary(count: usize) -> String {
    if count == 1 {
        "1 problem found".to_owned()
    } else {
        format!("{count} problems found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_pluralization() {
        assert_eq!(summary(1), "1 problem found");
        assert_eq!(summary(3), "3 problems found");
    }
}

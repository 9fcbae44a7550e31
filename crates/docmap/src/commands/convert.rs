//! `docmap convert` command implementation.

use std::path::PathBuf;

use clap::Args;
use docmap_config::{CliSettings, Config};
use docmap_core::{ConvertRequest, Converter, StdFileSystem};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Navigation file to convert (overrides config).
    #[arg(short, long, env = "DOCMAP_FILE")]
    file: Option<PathBuf>,

    /// Directory holding the content files; receives document.ditamap (overrides config).
    #[arg(short, long, env = "DOCMAP_DIR")]
    dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover docmap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the parsed navigation as JSON instead of writing the map.
    #[arg(long)]
    dump_navigation: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the conversion fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            file: self.file,
            dir: self.dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let request = config.convert_resolved.to_request();

        let converter = Converter::new(StdFileSystem);

        if self.dump_navigation {
            let doc = converter.load(&request)?;
            output.data(&serde_json::to_string_pretty(&doc)?)?;
            return Ok(());
        }

        log_request(&output, &request);
        let report = converter.convert(&request)?;

        if let Some(rename) = &report.renamed {
            output.detail(&format!(
                "Renamed {} -> {}",
                rename.from.display(),
                rename.to.display()
            ));
        }
        output.success(&format!(
            "Wrote {} ({} chapters, {} topics)",
            report.output.display(),
            report.chapters,
            report.topics
        ));
        Ok(())
    }
}

fn log_request(output: &Output, request: &ConvertRequest) {
    if let Some(file) = &request.file {
        output.info(&format!("Source: {}", file.display()));
    }
    if let Some(dir) = &request.dir {
        output.info(&format!("Output: {}", dir.display()));
    }
}

//! `autodoc run` command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use autodoc_command::{
    COMMAND_ID, CommandController, CommandRegistry, Extension, Outcome, PublishMode, Publishing,
    SourceText,
};
use autodoc_config::{CliSettings, Config, Flow};
use autodoc_confluence::{ConfluenceClient, PublishTarget};
use autodoc_generator::{DocumentationService, GeneratorClient};
use autodoc_preview::PreviewOptions;
use clap::{Args, ValueEnum};

use crate::error::CliError;
use crate::host::TerminalHost;
use crate::output::Output;

/// Flow selected on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum FlowArg {
    /// Generate and preview only.
    Preview,
    /// Preview, then ask whether to publish to Confluence.
    Publish,
}

impl From<FlowArg> for Flow {
    fn from(arg: FlowArg) -> Self {
        match arg {
            FlowArg::Preview => Flow::Preview,
            FlowArg::Publish => Flow::Publish,
        }
    }
}

/// Arguments for the run command.
#[derive(Args)]
pub(crate) struct RunArgs {
    /// Source file to document.
    file: Option<PathBuf>,

    /// Flow to run (overrides config).
    #[arg(long, value_enum)]
    flow: Option<FlowArg>,

    /// Image to embed in the published page (overrides config).
    #[arg(long)]
    diagram_image: Option<PathBuf>,

    /// Directory for preview files (overrides config).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover autodoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RunArgs {
    /// Execute the run command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, the source file cannot be
    /// read, or the command does not complete.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            flow: self.flow.map(Flow::from),
            diagram_image: self.diagram_image.clone(),
            output_dir: self.output_dir.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let controller = build_controller(&config)?;

        let document = self.file.as_deref().map(read_source).transpose()?;
        let host = TerminalHost::new(document, config.preview_resolved.output_dir.clone());

        let registry = CommandRegistry::new();
        let extension = Extension::activate(&registry, controller)?;
        let outcome = registry.execute(COMMAND_ID, &host)?;
        extension.deactivate();

        report(&output, &outcome)
    }
}

fn build_controller(config: &Config) -> Result<CommandController, CliError> {
    let flow = config.require_flow()?;
    let service: Arc<dyn DocumentationService> =
        Arc::new(GeneratorClient::from_config(config.require_generator()?));
    let preview = PreviewOptions::from_config(&config.preview_resolved);

    match flow {
        Flow::Preview => Ok(CommandController::preview(service, preview)),
        Flow::Publish => {
            let confluence = config.require_confluence()?;
            let publishing = Publishing {
                publisher: Arc::new(ConfluenceClient::from_config(confluence)),
                target: PublishTarget::from_config(confluence),
                mode: PublishMode::from_image(config.command_resolved.diagram_image.clone()),
            };
            Ok(CommandController::publish(service, preview, publishing))
        }
    }
}

fn read_source(path: &Path) -> Result<SourceText, CliError> {
    let text = std::fs::read_to_string(path)?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(SourceText::new(name, text))
}

fn report(output: &Output, outcome: &Outcome) -> Result<(), CliError> {
    match outcome {
        Outcome::Previewed { .. } => Ok(()),
        Outcome::Declined { .. } => {
            output.info("Not published.");
            Ok(())
        }
        Outcome::Published { page, url } => {
            output.info(&format!("ID: {}", page.id));
            output.info(&format!("Title: {}", page.title));
            output.info(&format!("URL: {url}"));
            Ok(())
        }
        Outcome::Failed(_) | Outcome::PublishFailed => Err(CliError::Incomplete(outcome.stage())),
    }
}

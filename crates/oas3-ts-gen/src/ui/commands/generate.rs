use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use serde_json::Value;

use crate::{
  generator::{
    metrics::{GenerationStats, GenerationWarning},
    orchestrator::Orchestrator,
  },
  render::{RenderConfig, TeraRenderer, TemplateRenderer, emit_document},
  ui::{Colors, GenerateCommand},
  utils::spec::{SpecLoader, describe_document, load_document},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateConfig {
  pub inputs: Vec<PathBuf>,
  pub output: PathBuf,
  pub templates_dir: Option<PathBuf>,
  pub request_import: String,
  pub disable_type_check: bool,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      templates,
      request_import,
      disable_type_check,
      verbose,
      quiet,
    } = command;

    if input.is_empty() {
      anyhow::bail!("At least one input file (-i) is required");
    }
    if let Some(dir) = &templates
      && !dir.is_dir()
    {
      anyhow::bail!("Templates directory {} does not exist", dir.display());
    }

    Ok(Self {
      inputs: input,
      output,
      templates_dir: templates,
      request_import,
      disable_type_check,
      verbose,
      quiet: quiet && !verbose,
    })
  }

  pub fn render_config(&self) -> RenderConfig {
    RenderConfig {
      templates_dir: self.templates_dir.clone(),
      request_import: self.request_import.clone(),
      disable_type_check: self.disable_type_check,
    }
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self, input: &Path) {
    self.info(
      &format!("Loading OpenAPI documents from: {}", input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self, label: &str, namespace: &str) {
    self.info(
      &format!("Generating {label} as namespace {namespace}...")
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Types generated:", stats.types_generated.to_string());
    self.stat("", format!("{} interfaces", stats.interfaces_generated));
    self.stat("", format!("{} enums", stats.enums_generated));
    self.stat("", format!("{} type aliases", stats.type_aliases_generated));
    self.stat("Operations converted:", stats.operations_converted.to_string());
    self.stat("Controllers:", stats.controllers_generated.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Reference cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  /// Skipped items are always reported; other warnings only in verbose mode.
  fn reported_warnings<'w>(&self, warnings: &'w [GenerationWarning]) -> Vec<&'w GenerationWarning> {
    warnings
      .iter()
      .filter(|warning| warning.is_skipped_item() || self.config.verbose)
      .collect()
  }

  fn print_warnings(&self, warnings: &[GenerationWarning]) {
    let reported = self.reported_warnings(warnings);
    if !reported.is_empty() && !self.config.quiet {
      println!();
    }
    for warning in reported {
      self.warning(warning);
    }
  }

  fn warning(&self, warning: &GenerationWarning) {
    let prefix = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
    eprintln!(
      "{} {}",
      prefix.with(self.colors.accent()),
      warning.to_string().with(self.colors.primary())
    );
  }

  fn error(&self, label: &str, error: &anyhow::Error) {
    eprintln!(
      "{} {label}: {}",
      "Error:".with(self.colors.accent()),
      format!("{error:#}").with(self.colors.primary())
    );
  }

  fn log_written(&self, files: &[PathBuf]) {
    self.info(
      &format!("Wrote {} files", files.len())
        .with(self.colors.primary())
        .to_string(),
    );
    if self.config.verbose && !self.config.quiet {
      for file in files {
        println!("              {}", file.display().to_string().with(self.colors.info()));
      }
    }
  }

  fn log_success(&self, documents: usize) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        format!("Successfully generated {documents} document(s) into {}", self.config.output.display())
          .with(self.colors.success())
      );
    }
  }
}

enum DocumentOutcome {
  Generated,
  Skipped,
}

async fn process_document<R: TemplateRenderer>(
  value: Value,
  label: &str,
  renderer: &R,
  render_config: &RenderConfig,
  config: &GenerateConfig,
  logger: &GenerateLogger<'_>,
) -> anyhow::Result<DocumentOutcome> {
  let document = match load_document(value) {
    Ok(document) => document,
    Err(reason) => {
      logger.warning(&GenerationWarning::DocumentSkipped {
        source: label.to_string(),
        reason,
      });
      return Ok(DocumentOutcome::Skipped);
    }
  };

  let orchestrator = Orchestrator::new(document);
  logger.log_generating(label, orchestrator.namespace());

  let generated = orchestrator.generate()?;
  logger.print_statistics(&generated.stats);
  logger.print_warnings(&generated.stats.warnings);

  let written = emit_document(renderer, render_config, &config.output, &generated).await?;
  logger.log_written(&written);

  Ok(DocumentOutcome::Generated)
}

/// Generates every document of every input. A failing document does not stop its siblings; the
/// command fails at the end if any document failed.
pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);
  let render_config = config.render_config();
  let renderer = TeraRenderer::load(&render_config)
    .await
    .context("failed to load templates")?;

  let mut generated = 0usize;
  let mut failed = vec![];

  for input in &config.inputs {
    logger.log_loading(input);

    let documents = match SpecLoader::open(input).await.and_then(|loader| loader.documents()) {
      Ok(documents) => documents,
      Err(error) => {
        let label = input.display().to_string();
        logger.error(&label, &error);
        failed.push(label);
        continue;
      }
    };

    for (index, value) in documents.into_iter().enumerate() {
      let label = format!("{} {}", input.display(), describe_document(&value, index));
      match process_document(value, &label, &renderer, &render_config, &config, &logger).await {
        Ok(DocumentOutcome::Generated) => generated += 1,
        Ok(DocumentOutcome::Skipped) => {}
        Err(error) => {
          logger.error(&label, &error);
          failed.push(label);
        }
      }
    }
  }

  if !failed.is_empty() {
    anyhow::bail!("generation failed for {} document(s): {}", failed.len(), failed.join(", "));
  }

  logger.log_success(generated);
  Ok(())
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};
use crate::render::DEFAULT_REQUEST_IMPORT;

#[derive(Parser, Debug)]
#[command(name = "oas3-ts-gen")]
#[command(author, version, about = "OpenAPI to TypeScript declaration and request-binding generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from OpenAPI documents
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate TypeScript declarations and request bindings
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// OpenAPI document to read (JSON or YAML); repeat for several files
  #[arg(short, long, value_name = "FILE", required = true)]
  pub input: Vec<PathBuf>,

  /// Directory receiving one subdirectory per document
  #[arg(short, long, value_name = "DIR")]
  pub output: PathBuf,

  /// Directory with `<kind>.tera` files overriding the built-in templates
  #[arg(long, value_name = "DIR")]
  pub templates: Option<PathBuf>,

  /// Import statement placed at the top of every request-binding file
  #[arg(long, value_name = "STMT", default_value = DEFAULT_REQUEST_IMPORT)]
  pub request_import: String,

  /// Prefix generated files with `// @ts-nocheck`
  #[arg(long, default_value_t = false)]
  pub disable_type_check: bool,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every operation with the function and controller it generates
  Operations {
    /// OpenAPI document to read (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}

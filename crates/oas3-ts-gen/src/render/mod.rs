//! Template rendering of generated documents.
//!
//! A [`TemplateRenderer`] turns JSON bindings into the text of one artifact; the writer decides
//! which artifacts a document produces and where they land.

pub(crate) mod bindings;
pub(crate) mod tera_renderer;
pub(crate) mod writer;

use std::path::PathBuf;

use serde_json::Value;
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

pub(crate) use self::{tera_renderer::TeraRenderer, writer::emit_document};

/// Import statement placed at the top of every request-binding file unless overridden.
pub const DEFAULT_REQUEST_IMPORT: &str = "import request from '@/utils/request';";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum TemplateKind {
  Interface,
  ServiceController,
  ServiceIndex,
  FinanceCenter,
}

impl TemplateKind {
  /// File name an override for this kind is read from inside a templates directory.
  pub fn override_file_name(self) -> String {
    format!("{self}.tera")
  }
}

#[derive(Debug, Error)]
pub enum RenderError {
  #[error("no template registered for '{kind}'")]
  MissingTemplate { kind: TemplateKind },
  #[error("failed to read template override {}", path.display())]
  Load {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error(transparent)]
  Template(#[from] tera::Error),
  #[error("bindings could not be serialized: {0}")]
  Bindings(#[from] serde_json::Error),
}

/// Renders one artifact from its bindings.
pub trait TemplateRenderer {
  fn has_template(&self, kind: TemplateKind) -> bool;

  fn render(&self, kind: TemplateKind, bindings: &Value) -> Result<String, RenderError>;
}

/// Settings handed to the renderer and writer for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
  /// Directory holding `<kind>.tera` files that replace the built-in templates
  pub templates_dir: Option<PathBuf>,
  pub request_import: String,
  pub disable_type_check: bool,
}

impl Default for RenderConfig {
  fn default() -> Self {
    Self {
      templates_dir: None,
      request_import: DEFAULT_REQUEST_IMPORT.to_string(),
      disable_type_check: false,
    }
  }
}

#[cfg(test)]
mod tests;

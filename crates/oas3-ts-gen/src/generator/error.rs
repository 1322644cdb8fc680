use std::path::PathBuf;

use thiserror::Error;

use crate::render::{RenderError, TemplateKind};

/// Errors that abort generation of a document.
#[derive(Debug, Error)]
pub enum GeneratorError {
  #[error("circular dependency between declarations involving '{type_name}': {}", cycle.join(" -> "))]
  CircularDependency { type_name: String, cycle: Vec<String> },

  #[error("failed to render {} with template '{kind}'", file.display())]
  Render {
    file: PathBuf,
    kind: TemplateKind,
    #[source]
    source: RenderError,
  },

  #[error("failed to write {} (template '{kind}')", file.display())]
  Write {
    file: PathBuf,
    kind: TemplateKind,
    #[source]
    source: std::io::Error,
  },
}

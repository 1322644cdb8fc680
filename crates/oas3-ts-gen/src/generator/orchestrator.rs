//! Orchestration for the OpenAPI to TypeScript generation pipeline.
//!
//! The `Orchestrator` owns one parsed document and runs every stage that does not touch the
//! filesystem: schema conversion, dependency ordering, operation conversion and controller
//! grouping. Rendering and writing the artifacts is left to [`crate::render`].
//!
//! ## Usage
//!
//! ```ignore
//! let document = load_document(value)?;
//! let orchestrator = Orchestrator::new(document);
//! let generated = orchestrator.generate()?;
//!
//! println!(
//!   "Generated {} types with {} warnings",
//!   generated.stats.types_generated,
//!   generated.stats.warnings.len()
//! );
//! ```

use crate::{
  document::OpenApiDocument,
  generator::{
    analyzer::sort_by_dependencies,
    ast::NamedType,
    controllers::{ControllerGroup, group_by_tag},
    converter::{OperationConverter, SchemaConverter},
    error::GeneratorError,
    metrics::{GenerationStats, GenerationWarning},
    schema_registry::SchemaRegistry,
  },
  naming::identifiers::sanitize_type_name,
};

/// Namespace used when a document has no title.
pub const DEFAULT_NAMESPACE: &str = "default_api";

/// Everything generated from one document, ready to be rendered.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
  /// Sanitized document title; names the output directory and the declaration namespace
  pub namespace: String,
  /// Declarations in dependency order
  pub declarations: Vec<NamedType>,
  /// Request bindings grouped by tag, in order of first appearance
  pub controllers: Vec<ControllerGroup>,
  pub stats: GenerationStats,
}

/// High-level orchestrator for generating TypeScript from one OpenAPI document.
pub struct Orchestrator {
  document: OpenApiDocument,
  namespace: String,
}

impl Orchestrator {
  pub fn new(document: OpenApiDocument) -> Self {
    let namespace = document_namespace(&document);
    Self { document, namespace }
  }

  pub fn namespace(&self) -> &str {
    &self.namespace
  }

  /// Runs the pipeline:
  /// 1. Converts every component schema into a named declaration
  /// 2. Orders the declarations by dependency
  /// 3. Converts every operation into a request binding
  /// 4. Groups the bindings into controllers by tag
  ///
  /// # Errors
  ///
  /// Returns [`GeneratorError::CircularDependency`] when declarations depend on each other
  /// in a cycle that cannot be ordered.
  pub fn generate(&self) -> Result<GeneratedDocument, GeneratorError> {
    let registry = SchemaRegistry::new(&self.document);
    let mut stats = GenerationStats::default();
    stats.record_cycles(registry.detect_cycles());

    let mut warnings = vec![];

    let declarations = SchemaConverter::new(&registry).convert_all(&mut warnings);
    let declarations = sort_by_dependencies(declarations)?;
    stats.record_named_types(&declarations);

    let controllers = self.convert_controllers(&registry, &mut warnings);
    stats.record_operations(controllers.iter().map(|group| group.operations.len()).sum());
    stats.record_controllers(controllers.len());
    stats.record_warnings(warnings);

    Ok(GeneratedDocument {
      namespace: self.namespace.clone(),
      declarations,
      controllers,
      stats,
    })
  }

  /// Request bindings grouped by tag, without converting or ordering declarations.
  ///
  /// Unlike [`Orchestrator::generate`] this cannot fail on a declaration cycle.
  pub fn controllers(&self, warnings: &mut Vec<GenerationWarning>) -> Vec<ControllerGroup> {
    let registry = SchemaRegistry::new(&self.document);
    self.convert_controllers(&registry, warnings)
  }

  fn convert_controllers(
    &self,
    registry: &SchemaRegistry<'_>,
    warnings: &mut Vec<GenerationWarning>,
  ) -> Vec<ControllerGroup> {
    let converter = OperationConverter::new(registry, &self.document.components, &self.namespace);
    let operations = converter.convert_document(&self.document, warnings);
    group_by_tag(operations, warnings)
  }
}

fn document_namespace(document: &OpenApiDocument) -> String {
  let title = document.info.title.trim();
  if title.is_empty() {
    DEFAULT_NAMESPACE.to_string()
  } else {
    sanitize_type_name(title)
  }
}

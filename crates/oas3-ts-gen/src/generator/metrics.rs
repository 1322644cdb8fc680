use strum::Display;

use crate::generator::ast::{NamedType, NamedTypeKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub types_generated: usize,
  pub interfaces_generated: usize,
  pub enums_generated: usize,
  pub type_aliases_generated: usize,
  pub operations_converted: usize,
  pub controllers_generated: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_named_type(&mut self, named_type: &NamedType) {
    self.types_generated += 1;
    match named_type.kind {
      NamedTypeKind::Interface => self.interfaces_generated += 1,
      NamedTypeKind::Enum => self.enums_generated += 1,
      NamedTypeKind::Union
      | NamedTypeKind::Intersection
      | NamedTypeKind::ArrayAlias
      | NamedTypeKind::TypeAlias
      | NamedTypeKind::BasicAlias => self.type_aliases_generated += 1,
    }
  }

  pub fn record_named_types(&mut self, named_types: &[NamedType]) {
    for named_type in named_types {
      self.record_named_type(named_type);
    }
  }

  pub fn record_operations(&mut self, count: usize) {
    self.operations_converted += count;
  }

  pub fn record_controllers(&mut self, count: usize) {
    self.controllers_generated += count;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Document {source} skipped: {reason}")]
  DocumentSkipped { source: String, reason: String },
  #[strum(to_string = "Entry '{key}' under '{context}' is malformed ({reason}); skipped")]
  MalformedEntry {
    context: String,
    key: String,
    reason: String,
  },
  #[strum(to_string = "Schema at '{context}' could not be classified ({detail}); using any")]
  UnclassifiedSchema { context: String, detail: String },
  #[strum(to_string = "Reference '{reference}' at '{context}' does not resolve; using any")]
  UnresolvedReference { context: String, reference: String },
  #[strum(to_string = "Reference to '{type_name}' at '{context}' is circular; using any")]
  CircularReference { context: String, type_name: String },
  #[strum(to_string = "Unsupported type '{type_name}' at '{context}'; using any")]
  UnsupportedPrimitive { context: String, type_name: String },
  #[strum(to_string = "Enum value {value} at '{context}' has no literal form and was dropped")]
  InvalidEnumValue { context: String, value: String },
  #[strum(to_string = "Schema '{schema_name}' maps to '{type_name}', which is already declared; skipped")]
  DuplicateTypeName { schema_name: String, type_name: String },
  #[strum(to_string = "Schema '{schema_name}' renamed to '{type_name}'")]
  TypeNameFallback { schema_name: String, type_name: String },
  #[strum(to_string = "[{operation}] parameter reference '{reference}' is not supported and was dropped")]
  ReferencedParameterSkipped { operation: String, reference: String },
  #[strum(to_string = "[{operation}] parameter '{name}' in {location} is not supported and was ignored")]
  UnsupportedParameterLocation {
    operation: String,
    name: String,
    location: String,
  },
  #[strum(to_string = "[{operation}] parameter '{name}' has no schema; using any")]
  MissingParameterSchema { operation: String, name: String },
  #[strum(to_string = "[{operation}] path parameter '{name}' is not declared; synthesized as string | number")]
  UndeclaredPathParameter { operation: String, name: String },
  #[strum(to_string = "Path '{path}' is malformed ({error}); emitted verbatim")]
  MalformedPathTemplate { path: String, error: String },
  #[strum(to_string = "Controller '{tag}' maps to '{path}', which is already taken; renamed to '{renamed}'")]
  ControllerPathCollision {
    tag: String,
    path: String,
    renamed: String,
  },
  #[strum(to_string = "Function '{function_name}' already exists in controller '{tag}'; renamed to '{renamed}'")]
  DuplicateFunctionName {
    tag: String,
    function_name: String,
    renamed: String,
  },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(
      self,
      Self::DocumentSkipped { .. } | Self::MalformedEntry { .. } | Self::DuplicateTypeName { .. }
    )
  }
}

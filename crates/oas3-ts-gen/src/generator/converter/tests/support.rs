use indexmap::IndexMap;
use serde_json::Value;

use crate::{
  document::{OpenApiDocument, SchemaNode},
  generator::{ast::NamedType, metrics::GenerationWarning},
};

pub(super) fn schema(value: Value) -> SchemaNode {
  serde_json::from_value(value).unwrap()
}

pub(super) fn schema_table(value: Value) -> IndexMap<String, SchemaNode> {
  serde_json::from_value(value).unwrap()
}

pub(super) fn document(value: Value) -> OpenApiDocument {
  serde_json::from_value(value).unwrap()
}

pub(super) fn find<'a>(types: &'a [NamedType], name: &str) -> &'a NamedType {
  types
    .iter()
    .find(|t| t.name == name)
    .unwrap_or_else(|| panic!("expected declaration {name}"))
}

pub(super) fn has_warning(warnings: &[GenerationWarning], predicate: impl Fn(&GenerationWarning) -> bool) -> bool {
  warnings.iter().any(predicate)
}

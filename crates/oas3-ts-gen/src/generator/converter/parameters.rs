use std::collections::HashSet;

use super::type_resolver::TypeResolver;
use crate::{
  document::{Parameter, ParameterLocation, ParameterOrRef, Referenceable},
  generator::{
    ast::{ApiParam, PathTemplate, TypeExpr},
    metrics::GenerationWarning,
  },
  naming::{
    identifiers::{RESERVED_WORDS, is_valid_identifier, to_ts_identifier},
    operations::ensure_unique,
  },
};

/// Names already bound inside a generated binding function: its arguments, its locals, the
/// imported request helper and the globals its body calls.
pub(crate) const BINDING_SCOPE_NAMES: &[&str] = &[
  "params", "body", "files", "options", "formData", "request", "FormData", "Object", "String", "JSON",
];

const BINDING_ALIAS_SUFFIX: &str = "Param";

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ParameterBuckets {
  pub(crate) query: Vec<ApiParam>,
  pub(crate) path: Vec<ApiParam>,
  pub(crate) header: Vec<ApiParam>,
}

/// Path-item parameters followed by operation parameters, keeping the last occurrence of each
/// `(location, name)` pair. Referenced parameters are dropped.
pub(crate) fn merge_parameters<'p>(
  path_level: &'p [ParameterOrRef],
  operation_level: &'p [ParameterOrRef],
  operation: &str,
  warnings: &mut Vec<GenerationWarning>,
) -> Vec<&'p Parameter> {
  let mut params: Vec<&Parameter> = vec![];

  for param in path_level.iter().chain(operation_level) {
    match param {
      Referenceable::Ref { ref_path } => warnings.push(GenerationWarning::ReferencedParameterSkipped {
        operation: operation.to_string(),
        reference: ref_path.clone(),
      }),
      Referenceable::Object(param) => {
        params.retain(|p| p.location != param.location || p.name != param.name);
        params.push(param);
      }
    }
  }

  params
}

/// Identifier a parameter value is bound to in generated code.
///
/// Names that would shadow something in [`BINDING_SCOPE_NAMES`] get a `Param` suffix.
pub(crate) fn binding_alias(name: &str) -> String {
  let alias = if is_valid_identifier(name) && !RESERVED_WORDS.contains(name) {
    name.to_string()
  } else {
    to_ts_identifier(name)
  };

  if BINDING_SCOPE_NAMES.contains(&alias.as_str()) {
    format!("{alias}{BINDING_ALIAS_SUFFIX}")
  } else {
    alias
  }
}

pub(crate) fn convert_parameters(
  resolver: &TypeResolver<'_>,
  params: &[&Parameter],
  operation: &str,
  warnings: &mut Vec<GenerationWarning>,
) -> ParameterBuckets {
  let mut buckets = ParameterBuckets::default();

  for param in params {
    let bucket = match param.location {
      ParameterLocation::Query => &mut buckets.query,
      ParameterLocation::Path => &mut buckets.path,
      ParameterLocation::Header => &mut buckets.header,
      ParameterLocation::Cookie | ParameterLocation::Unknown => {
        warnings.push(GenerationWarning::UnsupportedParameterLocation {
          operation: operation.to_string(),
          name: param.name.clone(),
          location: param.location.to_string(),
        });
        continue;
      }
    };

    let type_expr = if let Some(schema) = &param.schema {
      resolver.resolve(schema, &format!("{operation}.{}", param.name), warnings)
    } else {
      warnings.push(GenerationWarning::MissingParameterSchema {
        operation: operation.to_string(),
        name: param.name.clone(),
      });
      TypeExpr::Any
    };

    bucket.push(
      ApiParam::builder()
        .name(&param.name)
        .alias(binding_alias(&param.name))
        .type_expr(type_expr)
        .required(param.required)
        .maybe_description(param.description.clone())
        .build(),
    );
  }

  buckets
}

/// Adds a required `string | number` path parameter for every placeholder nothing declares.
pub(crate) fn synthesize_missing_path_params(
  template: &PathTemplate,
  buckets: &mut ParameterBuckets,
  operation: &str,
  warnings: &mut Vec<GenerationWarning>,
) {
  for name in template.param_names() {
    if buckets.path.iter().any(|param| param.name == name) {
      continue;
    }

    warnings.push(GenerationWarning::UndeclaredPathParameter {
      operation: operation.to_string(),
      name: name.to_string(),
    });
    buckets.path.push(
      ApiParam::builder()
        .name(name)
        .alias(binding_alias(name))
        .type_expr(TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Number]))
        .required(true)
        .build(),
    );
  }
}

/// Suffixes path parameter aliases so no two placeholders bind the same local.
pub(crate) fn dedupe_path_aliases(buckets: &mut ParameterBuckets) {
  let mut taken = HashSet::new();
  for param in &mut buckets.path {
    param.alias = ensure_unique(&param.alias, &taken);
    taken.insert(param.alias.clone());
  }
}

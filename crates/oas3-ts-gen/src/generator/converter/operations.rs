use itertools::Itertools;
use strum::IntoEnumIterator;

use super::{
  parameters::{
    binding_alias, convert_parameters, dedupe_path_aliases, merge_parameters, synthesize_missing_path_params,
  },
  requests::convert_request_body,
  responses::convert_response_type,
  type_resolver::TypeResolver,
};
use crate::{
  document::{Components, HttpMethod, OpenApiDocument, Operation, ParameterOrRef, RejectedEntry},
  generator::{
    ast::{ApiOperation, PathTemplate},
    controllers::operation_tag,
    metrics::GenerationWarning,
    schema_registry::SchemaRegistry,
  },
  naming::operations::operation_function_name,
};

/// Builds request-binding descriptors from the operations of a document.
pub(crate) struct OperationConverter<'a> {
  resolver: TypeResolver<'a>,
  components: &'a Components,
}

impl<'a> OperationConverter<'a> {
  /// Type expressions are qualified with `namespace` since bindings live outside the
  /// declaration file.
  pub(crate) fn new(registry: &'a SchemaRegistry<'a>, components: &'a Components, namespace: &'a str) -> Self {
    Self {
      resolver: TypeResolver::new(registry).with_namespace(namespace),
      components,
    }
  }

  /// Every operation in path order, methods within a path in `get, post, put, delete, patch` order.
  pub(crate) fn convert_document(
    &self,
    document: &OpenApiDocument,
    warnings: &mut Vec<GenerationWarning>,
  ) -> Vec<ApiOperation> {
    report_rejected(document.paths.rejected(), "paths", warnings);

    let mut operations = vec![];
    for (path, item) in &document.paths {
      for method in HttpMethod::iter() {
        if let Some(operation) = item.operation(method) {
          let tag = operation_tag(operation);
          operations.push(self.convert(method, path, &item.parameters, operation, tag, warnings));
        }
      }
    }
    operations
  }

  pub(crate) fn convert(
    &self,
    method: HttpMethod,
    path: &str,
    path_item_params: &[ParameterOrRef],
    operation: &Operation,
    tag: &str,
    warnings: &mut Vec<GenerationWarning>,
  ) -> ApiOperation {
    let label = operation
      .operation_id
      .clone()
      .unwrap_or_else(|| format!("{} {path}", method.as_upper()));

    let template = PathTemplate::parse(path).unwrap_or_else(|error| {
      warnings.push(GenerationWarning::MalformedPathTemplate {
        path: path.to_string(),
        error: error.to_string(),
      });
      PathTemplate::literal(path)
    });

    let merged = merge_parameters(path_item_params, &operation.parameters, &label, warnings);
    let mut buckets = convert_parameters(&self.resolver, &merged, &label, warnings);
    synthesize_missing_path_params(&template, &mut buckets, &label, warnings);
    dedupe_path_aliases(&mut buckets);

    let path_template = template.interpolate(|name| {
      buckets
        .path
        .iter()
        .find(|param| param.name == name)
        .map_or_else(|| binding_alias(name), |param| param.alias.clone())
    });

    let request = convert_request_body(
      &self.resolver,
      self.components,
      operation.request_body.as_ref(),
      &label,
      warnings,
    );
    report_rejected(operation.responses.rejected(), &format!("{label}.responses"), warnings);
    let response_type = convert_response_type(&self.resolver, self.components, &operation.responses, &label, warnings);

    ApiOperation::builder()
      .function_name(operation_function_name(
        operation.operation_id.as_deref(),
        method,
        tag,
        path,
      ))
      .method(method)
      .original_path(path)
      .path_template(path_template)
      .tag(tag)
      .maybe_description(operation_description(operation))
      .query_params(buckets.query)
      .path_params(buckets.path)
      .header_params(buckets.header)
      .maybe_body(request.body)
      .files(request.files)
      .has_form_data(request.has_form_data)
      .response_type(response_type)
      .deprecated(operation.deprecated)
      .build()
  }
}

fn report_rejected(rejected: &[RejectedEntry], context: &str, warnings: &mut Vec<GenerationWarning>) {
  warnings.extend(rejected.iter().map(|entry| GenerationWarning::MalformedEntry {
    context: context.to_string(),
    key: entry.key.clone(),
    reason: entry.reason.clone(),
  }));
}

fn operation_description(operation: &Operation) -> Option<String> {
  let text = [operation.summary.as_deref(), operation.description.as_deref()]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .join(" ");
  (!text.is_empty()).then_some(text)
}

use serde_json::json;

use super::support::{document, has_warning};
use crate::{
  document::HttpMethod,
  generator::{
    ast::{PathTemplate, TypeExpr},
    converter::{
      TypeResolver,
      parameters::{
        binding_alias, convert_parameters, dedupe_path_aliases, merge_parameters, synthesize_missing_path_params,
      },
    },
    metrics::GenerationWarning,
    schema_registry::SchemaRegistry,
  },
};

fn petstore_item() -> crate::document::OpenApiDocument {
  document(json!({
    "openapi": "3.0.0",
    "info": { "title": "Pets", "version": "1" },
    "paths": {
      "/pets/{petId}": {
        "parameters": [
          { "name": "petId", "in": "path", "schema": { "type": "string" } },
          { "name": "trace", "in": "header", "schema": { "type": "string" } }
        ],
        "get": {
          "parameters": [
            { "name": "petId", "in": "path", "required": true, "schema": { "type": "integer" } },
            { "name": "petId", "in": "query", "schema": { "type": "boolean" } },
            { "name": "session", "in": "cookie", "schema": { "type": "string" } },
            { "$ref": "#/components/parameters/Limit" }
          ]
        }
      }
    }
  }))
}

#[test]
fn test_operation_parameters_override_path_level() {
  let doc = petstore_item();
  let item = &doc.paths["/pets/{petId}"];
  let operation = item.operation(HttpMethod::Get).unwrap();
  let mut warnings = vec![];

  let merged = merge_parameters(&item.parameters, &operation.parameters, "getPet", &mut warnings);
  let keys = merged
    .iter()
    .map(|p| (p.name.as_str(), p.location.to_string()))
    .collect::<Vec<_>>();
  assert_eq!(
    keys,
    vec![
      ("trace", "header".to_string()),
      ("petId", "path".to_string()),
      ("petId", "query".to_string()),
      ("session", "cookie".to_string()),
    ]
  );
  assert!(merged[1].required, "the operation-level declaration wins");
  assert!(has_warning(&warnings, |w| matches!(
    w,
    GenerationWarning::ReferencedParameterSkipped { reference, .. } if reference == "#/components/parameters/Limit"
  )));
}

#[test]
fn test_parameters_bucketed_by_location() {
  let doc = petstore_item();
  let item = &doc.paths["/pets/{petId}"];
  let operation = item.operation(HttpMethod::Get).unwrap();
  let registry = SchemaRegistry::new(&doc);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  let merged = merge_parameters(&item.parameters, &operation.parameters, "getPet", &mut warnings);
  let buckets = convert_parameters(&resolver, &merged, "getPet", &mut warnings);

  assert_eq!(buckets.path.len(), 1);
  assert_eq!(buckets.path[0].type_expr, TypeExpr::Number);
  assert_eq!(buckets.query.len(), 1);
  assert_eq!(buckets.query[0].type_expr, TypeExpr::Boolean);
  assert_eq!(buckets.header.len(), 1);
  assert!(has_warning(&warnings, |w| matches!(
    w,
    GenerationWarning::UnsupportedParameterLocation { name, .. } if name == "session"
  )));
}

#[test]
fn test_missing_schema_is_any() {
  let doc = document(json!({
    "openapi": "3.0.0",
    "info": { "title": "Pets", "version": "1" },
    "paths": { "/pets": { "get": { "parameters": [{ "name": "q", "in": "query" }] } } }
  }));
  let operation = doc.paths["/pets"].operation(HttpMethod::Get).unwrap();
  let registry = SchemaRegistry::new(&doc);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  let merged = merge_parameters(&[], &operation.parameters, "listPets", &mut warnings);
  let buckets = convert_parameters(&resolver, &merged, "listPets", &mut warnings);
  assert_eq!(buckets.query[0].type_expr, TypeExpr::Any);
  assert!(!buckets.query[0].required);
  assert!(has_warning(&warnings, |w| matches!(
    w,
    GenerationWarning::MissingParameterSchema { .. }
  )));
}

#[test]
fn test_undeclared_path_params_synthesized() {
  let template = PathTemplate::parse("/stores/{storeId}/pets/{pet-id}").unwrap();
  let mut buckets = Default::default();
  let mut warnings = vec![];

  synthesize_missing_path_params(&template, &mut buckets, "getStorePet", &mut warnings);

  let names = buckets.path.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, vec!["storeId", "pet-id"]);
  assert!(buckets.path.iter().all(|p| p.required));
  assert_eq!(buckets.path[0].type_expr.to_string(), "string | number");
  assert_eq!(buckets.path[1].alias, "petId");
  assert_eq!(warnings.len(), 2);
}

#[test]
fn test_binding_alias() {
  assert_eq!(binding_alias("petId"), "petId");
  assert_eq!(binding_alias("pet-id"), "petId");
  assert_eq!(binding_alias("delete"), "_delete");
}

#[test]
fn test_binding_alias_avoids_function_scope_names() {
  for (name, alias) in [
    ("body", "bodyParam"),
    ("request", "requestParam"),
    ("params", "paramsParam"),
    ("form-data", "formDataParam"),
    ("options", "optionsParam"),
  ] {
    assert_eq!(binding_alias(name), alias, "alias for {name}");
  }
}

#[test]
fn test_path_aliases_are_unique() {
  let template = PathTemplate::parse("/pets/{pet-id}/{petId}").unwrap();
  let mut buckets = Default::default();
  let mut warnings = vec![];

  synthesize_missing_path_params(&template, &mut buckets, "getPet", &mut warnings);
  dedupe_path_aliases(&mut buckets);

  let aliases = buckets.path.iter().map(|p| p.alias.as_str()).collect::<Vec<_>>();
  assert_eq!(aliases, vec!["petId", "petId2"]);
}

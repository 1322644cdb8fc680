use serde_json::json;

use super::support::{has_warning, schema, schema_table};
use crate::generator::{
  ast::TypeExpr,
  converter::TypeResolver,
  metrics::GenerationWarning,
  schema_registry::{Dereferenced, SchemaRegistry, VisitStack},
};

#[test]
fn test_unmarked_schema_is_any() {
  let table = schema_table(json!({}));
  let registry = SchemaRegistry::from_schemas(&table);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  for value in [json!({}), json!({ "description": "anything" }), json!(true)] {
    let expr = resolver.resolve(&schema(value), "field", &mut warnings);
    assert_eq!(expr, TypeExpr::Any);
  }
  assert!(warnings.is_empty(), "unconstrained schemas should not warn: {warnings:?}");
}

#[test]
fn test_unclassified_schema_warns() {
  let table = schema_table(json!({}));
  let registry = SchemaRegistry::from_schemas(&table);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  let expr = resolver.resolve(&schema(json!("not a schema")), "field", &mut warnings);
  assert_eq!(expr, TypeExpr::Any);
  assert!(has_warning(&warnings, |w| matches!(
    w,
    GenerationWarning::UnclassifiedSchema { .. }
  )));
}

#[test]
fn test_primitives() {
  let table = schema_table(json!({}));
  let registry = SchemaRegistry::from_schemas(&table);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  let cases = [
    (json!({ "type": "integer", "format": "int64" }), "number"),
    (json!({ "type": "number" }), "number"),
    (json!({ "type": "string" }), "string"),
    (json!({ "type": "string", "format": "date-time" }), "string | Date"),
    (json!({ "type": "boolean" }), "boolean"),
    (json!({ "type": "string", "nullable": true }), "string | null"),
    (json!({ "type": ["integer", "null"] }), "number | null"),
    (json!({ "type": ["string", "integer"] }), "string | number"),
  ];
  for (value, expected) in cases {
    let rendered = resolver.resolve(&schema(value.clone()), "field", &mut warnings).to_string();
    assert_eq!(rendered, expected, "failed for schema {value}");
  }
  assert!(warnings.is_empty());
}

#[test]
fn test_unsupported_primitive_degrades_to_any() {
  let table = schema_table(json!({}));
  let registry = SchemaRegistry::from_schemas(&table);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  let expr = resolver.resolve(&schema(json!({ "type": "file" })), "upload", &mut warnings);
  assert_eq!(expr, TypeExpr::Any);
  assert!(has_warning(&warnings, |w| matches!(
    w,
    GenerationWarning::UnsupportedPrimitive { type_name, .. } if type_name == "file"
  )));
}

#[test]
fn test_enum_values_deduplicated() {
  let table = schema_table(json!({}));
  let registry = SchemaRegistry::from_schemas(&table);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  let expr = resolver.resolve(
    &schema(json!({ "enum": ["a", "b", "a", 1, null, { "x": 1 }] })),
    "status",
    &mut warnings,
  );
  assert_eq!(expr.to_string(), r#""a" | "b" | 1 | null"#);
  assert!(has_warning(&warnings, |w| matches!(
    w,
    GenerationWarning::InvalidEnumValue { .. }
  )));
}

#[test]
fn test_composition_keeps_every_member() {
  let table = schema_table(json!({ "A": { "type": "object" }, "B": { "type": "object" } }));
  let registry = SchemaRegistry::from_schemas(&table);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  let all_of = resolver.resolve(
    &schema(json!({ "allOf": [
      { "$ref": "#/components/schemas/A" },
      { "$ref": "#/components/schemas/B" },
      { "type": "object", "properties": { "extra": { "type": "string" } } }
    ] })),
    "field",
    &mut warnings,
  );
  let TypeExpr::Intersection(members) = &all_of else {
    panic!("expected intersection, got {all_of:?}");
  };
  assert_eq!(members.len(), 3);
  assert_eq!(all_of.to_string(), "(A & B & { extra?: string })");

  let one_of = resolver.resolve(
    &schema(json!({ "oneOf": [{ "type": "string" }, { "type": "integer" }, { "$ref": "#/components/schemas/A" }] })),
    "field",
    &mut warnings,
  );
  assert_eq!(one_of.to_string().split(" | ").count(), 3);
}

#[test]
fn test_array_items() {
  let table = schema_table(json!({ "Pet": { "type": "object" } }));
  let registry = SchemaRegistry::from_schemas(&table);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  let cases = [
    (json!({ "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }), "Pet[]"),
    (json!({ "type": "array" }), "any[]"),
    (
      json!({ "type": "array", "items": { "oneOf": [{ "type": "string" }, { "type": "number" }] } }),
      "(string | number)[]",
    ),
  ];
  for (value, expected) in cases {
    assert_eq!(resolver.resolve(&schema(value), "items", &mut warnings).to_string(), expected);
  }
}

#[test]
fn test_inline_objects() {
  let table = schema_table(json!({}));
  let registry = SchemaRegistry::from_schemas(&table);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  let expr = resolver.resolve(
    &schema(json!({
      "type": "object",
      "required": ["id"],
      "properties": {
        "id": { "type": "integer", "readOnly": true },
        "display-name": { "type": "string" }
      },
      "additionalProperties": { "type": "number" }
    })),
    "body",
    &mut warnings,
  );
  assert_eq!(
    expr.to_string(),
    r#"{ readonly id: number; "display-name"?: string; [key: string]: number }"#
  );

  let map = resolver.resolve(
    &schema(json!({ "type": "object", "additionalProperties": { "type": "string" } })),
    "map",
    &mut warnings,
  );
  assert_eq!(map.to_string(), "Record<string, string>");

  let bare = resolver.resolve(&schema(json!({ "type": "object" })), "bare", &mut warnings);
  assert_eq!(bare.to_string(), "Record<string, any>");
}

#[test]
fn test_reference_resolution() {
  let table = schema_table(json!({ "Pet": { "type": "object" }, "class": { "type": "string" } }));
  let registry = SchemaRegistry::from_schemas(&table);
  let mut warnings = vec![];

  let resolver = TypeResolver::new(&registry);
  let expr = resolver.resolve(&schema(json!({ "$ref": "#/components/schemas/Pet" })), "pet", &mut warnings);
  assert_eq!(expr, TypeExpr::Named("Pet".to_string()));

  let expr = resolver.resolve(&schema(json!({ "$ref": "#/components/schemas/class" })), "c", &mut warnings);
  assert_eq!(expr.to_string(), "__openAPI__class");

  let namespaced = TypeResolver::new(&registry).with_namespace("petsAPI");
  let expr = namespaced.resolve(&schema(json!({ "$ref": "#/components/schemas/Pet" })), "pet", &mut warnings);
  assert_eq!(expr.to_string(), "petsAPI.Pet");
  assert!(warnings.is_empty());
}

#[test]
fn test_unresolved_reference_degrades_to_any() {
  let table = schema_table(json!({}));
  let registry = SchemaRegistry::from_schemas(&table);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  let expr = resolver.resolve(&schema(json!({ "$ref": "#/components/schemas/Missing" })), "pet", &mut warnings);
  assert_eq!(expr, TypeExpr::Any);
  assert!(has_warning(&warnings, |w| matches!(
    w,
    GenerationWarning::UnresolvedReference { reference, .. } if reference == "#/components/schemas/Missing"
  )));
}

#[test]
fn test_reference_on_visit_stack_is_circular() {
  let table = schema_table(json!({ "Node": { "type": "object" } }));
  let registry = SchemaRegistry::from_schemas(&table);
  let resolver = TypeResolver::new(&registry);
  let mut warnings = vec![];

  let mut visited = VisitStack::default();
  visited.push("Node");
  let expr = resolver.resolve_with(
    &schema(json!({ "$ref": "#/components/schemas/Node" })),
    "Node.next",
    &mut visited,
    &mut warnings,
  );
  assert_eq!(expr, TypeExpr::Circular("Node".to_string()));
  assert_eq!(expr.to_string(), "any");
  assert!(has_warning(&warnings, |w| matches!(
    w,
    GenerationWarning::CircularReference { .. }
  )));
}

#[test]
fn test_dereference_chain_leaves_stack_empty() {
  let table = schema_table(json!({
    "A": { "$ref": "#/components/schemas/B" },
    "B": { "$ref": "#/components/schemas/C" },
    "C": { "type": "string" }
  }));
  let registry = SchemaRegistry::from_schemas(&table);

  let start = schema(json!({ "$ref": "#/components/schemas/A" }));
  let mut visited = VisitStack::default();
  let outcome = registry.dereference(&start, &mut visited);

  assert!(matches!(outcome, Dereferenced::Schema(target) if target.has_type("string")));
  assert!(visited.is_empty());

  // A sibling lookup after the first one sees no leftovers.
  let ref_schema = schema(json!({ "$ref": "#/components/schemas/B" }));
  let outcome = registry.dereference(&ref_schema, &mut visited);
  assert!(matches!(outcome, Dereferenced::Schema(_)));
  assert!(visited.is_empty());
}

#[test]
fn test_dereference_detects_loops() {
  let table = schema_table(json!({
    "A": { "$ref": "#/components/schemas/B" },
    "B": { "$ref": "#/components/schemas/A" }
  }));
  let registry = SchemaRegistry::from_schemas(&table);

  let mut visited = VisitStack::default();
  let ref_schema = schema(json!({ "$ref": "#/components/schemas/A" }));
  let outcome = registry.dereference(&ref_schema, &mut visited);
  assert_eq!(outcome, Dereferenced::Circular("A"));
  assert!(visited.is_empty());

  let ref_schema = schema(json!({ "$ref": "#/components/schemas/Nope" }));
  let outcome = registry.dereference(&ref_schema, &mut visited);
  assert_eq!(outcome, Dereferenced::Unresolved);
}

#[test]
fn test_detect_cycles_reports_reference_groups() {
  let table = schema_table(json!({
    "Node": { "type": "object", "properties": { "next": { "$ref": "#/components/schemas/Node" } } },
    "A": { "type": "object", "properties": { "b": { "$ref": "#/components/schemas/B" } } },
    "B": { "type": "object", "properties": { "a": { "$ref": "#/components/schemas/A" } } },
    "Leaf": { "type": "string" }
  }));
  let registry = SchemaRegistry::from_schemas(&table);

  let mut cycles = registry.detect_cycles();
  for cycle in &mut cycles {
    cycle.sort();
  }
  cycles.sort();

  assert_eq!(cycles, vec![vec!["A".to_string(), "B".to_string()], vec!["Node".to_string()]]);
}

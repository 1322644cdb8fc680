use serde_json::json;

use super::support::{find, has_warning, schema_table};
use crate::generator::{
  ast::{EnumValueType, Literal, NamedTypeKind, TypeExpr},
  converter::SchemaConverter,
  metrics::GenerationWarning,
  schema_registry::SchemaRegistry,
};

#[test]
fn test_declaration_kinds() {
  let table = schema_table(json!({
    "Pet": {
      "type": "object",
      "description": "A pet in the store",
      "required": ["id"],
      "properties": {
        "id": { "type": "integer" },
        "tag": { "type": "string", "description": "free-form tag" }
      }
    },
    "Status": { "type": "string", "enum": ["available", "pending", "sold"] },
    "Pets": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } },
    "PetOrId": { "oneOf": [{ "$ref": "#/components/schemas/Pet" }, { "type": "integer" }] },
    "Dog": { "allOf": [{ "$ref": "#/components/schemas/Pet" }, { "type": "object", "properties": { "bark": { "type": "boolean" } } }] },
    "Name": { "type": "string", "format": "email", "nullable": true }
  }));
  let registry = SchemaRegistry::from_schemas(&table);
  let mut warnings = vec![];
  let types = SchemaConverter::new(&registry).convert_all(&mut warnings);

  let kinds = types.iter().map(|t| (t.name.as_str(), t.kind)).collect::<Vec<_>>();
  assert_eq!(
    kinds,
    vec![
      ("Pet", NamedTypeKind::Interface),
      ("Status", NamedTypeKind::Enum),
      ("Pets", NamedTypeKind::ArrayAlias),
      ("PetOrId", NamedTypeKind::Union),
      ("Dog", NamedTypeKind::Intersection),
      ("Name", NamedTypeKind::BasicAlias),
    ]
  );

  let pet = find(&types, "Pet");
  assert_eq!(pet.description.as_deref(), Some("A pet in the store"));
  assert_eq!(pet.properties.len(), 2);
  assert!(pet.properties[0].required, "id is listed as required");
  assert!(!pet.properties[1].required);
  assert_eq!(pet.properties[1].description.as_deref(), Some("free-form tag"));
  assert_eq!(pet.expression(), "{ id: number; tag?: string }");

  assert_eq!(find(&types, "Pets").alias_body(), "Pet[]");
  assert_eq!(find(&types, "PetOrId").alias_body(), "Pet | number");
  assert_eq!(find(&types, "Dog").alias_body(), "Pet & { bark?: boolean }");

  let name = find(&types, "Name");
  assert!(name.nullable);
  assert_eq!(name.format.as_deref(), Some("email"));
  assert_eq!(name.alias_body(), "string | null");
  assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn test_string_enum_members() {
  let table = schema_table(json!({
    "Status": { "enum": ["available", "sold", "available"] },
    "Code": { "enum": [1, 2, 3] },
    "Label": { "enum": ["in stock", "gone"] }
  }));
  let registry = SchemaRegistry::from_schemas(&table);
  let mut warnings = vec![];
  let types = SchemaConverter::new(&registry).convert_all(&mut warnings);

  let status = find(&types, "Status");
  assert_eq!(status.value_type, Some(EnumValueType::String));
  let keys = status.enum_members.iter().map(|m| m.key.as_str()).collect::<Vec<_>>();
  assert_eq!(keys, vec!["available", "sold"]);
  assert_eq!(status.enum_members[1].value, Literal::String("sold".to_string()));

  let code = find(&types, "Code");
  assert_eq!(code.value_type, Some(EnumValueType::Number));
  assert!(code.enum_members.is_empty());
  assert_eq!(code.alias_body(), "1 | 2 | 3");

  let label = find(&types, "Label");
  assert!(label.enum_members.is_empty(), "values with spaces cannot name members");
  assert_eq!(label.alias_body(), r#""in stock" | "gone""#);
}

#[test]
fn test_empty_object_gets_index_signature() {
  let table = schema_table(json!({ "Bag": { "type": "object" } }));
  let registry = SchemaRegistry::from_schemas(&table);
  let mut warnings = vec![];
  let types = SchemaConverter::new(&registry).convert_all(&mut warnings);

  let bag = find(&types, "Bag");
  assert_eq!(bag.kind, NamedTypeKind::Interface);
  assert_eq!(bag.properties.len(), 1);
  assert!(bag.properties[0].is_index_signature);
  assert_eq!(bag.expression(), "{ [key: string]: any }");
}

#[test]
fn test_self_reference_is_kept_by_name() {
  let table = schema_table(json!({
    "Node": {
      "type": "object",
      "properties": {
        "value": { "type": "string" },
        "next": { "$ref": "#/components/schemas/Node" },
        "children": { "type": "array", "items": { "$ref": "#/components/schemas/Node" } }
      }
    }
  }));
  let registry = SchemaRegistry::from_schemas(&table);
  let mut warnings = vec![];
  let types = SchemaConverter::new(&registry).convert_all(&mut warnings);

  let node = find(&types, "Node");
  assert_eq!(node.properties[1].type_expr, TypeExpr::Named("Node".to_string()));
  assert_eq!(node.expression(), "{ value?: string; next?: Node; children?: Node[] }");
  assert!(warnings.is_empty());
}

#[test]
fn test_reference_component_becomes_alias() {
  let table = schema_table(json!({
    "Pet": { "type": "object", "properties": { "id": { "type": "integer" } } },
    "Animal": { "$ref": "#/components/schemas/Pet", "description": "Alias of Pet" },
    "Creature": { "$ref": "#/components/schemas/Animal" }
  }));
  let registry = SchemaRegistry::from_schemas(&table);
  let mut warnings = vec![];
  let types = SchemaConverter::new(&registry).convert_all(&mut warnings);

  let animal = find(&types, "Animal");
  assert_eq!(animal.kind, NamedTypeKind::TypeAlias);
  assert_eq!(animal.alias_body(), "Pet");
  assert_eq!(animal.description.as_deref(), Some("Alias of Pet"));

  let creature = find(&types, "Creature");
  assert_eq!(creature.kind, NamedTypeKind::TypeAlias);
  assert_eq!(creature.alias_body(), "Animal");
}

#[test]
fn test_circular_alias_degrades_to_any() {
  let table = schema_table(json!({
    "A": { "$ref": "#/components/schemas/B" },
    "B": { "$ref": "#/components/schemas/A" }
  }));
  let registry = SchemaRegistry::from_schemas(&table);
  let mut warnings = vec![];
  let types = SchemaConverter::new(&registry).convert_all(&mut warnings);

  let a = find(&types, "A");
  assert_eq!(a.kind, NamedTypeKind::BasicAlias);
  assert_eq!(a.alias_body(), "any");
  assert_eq!(a.description.as_deref(), Some("circular reference: A"));
  assert!(has_warning(&warnings, |w| matches!(
    w,
    GenerationWarning::CircularReference { context, .. } if context == "A"
  )));
}

#[test]
fn test_duplicate_and_fallback_names() {
  let table = schema_table(json!({
    "Pet-Item": { "type": "string" },
    "Pet_Item": { "type": "integer" },
    "404": { "type": "object" },
    "delete": { "type": "boolean" }
  }));
  let registry = SchemaRegistry::from_schemas(&table);
  let mut warnings = vec![];
  let types = SchemaConverter::new(&registry).convert_all(&mut warnings);

  let names = types.iter().map(|t| t.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, vec!["Pet_Item", "T404", "__openAPI__delete"]);
  assert_eq!(find(&types, "Pet_Item").alias_body(), "string", "first schema wins");

  assert!(has_warning(&warnings, |w| matches!(
    w,
    GenerationWarning::DuplicateTypeName { schema_name, .. } if schema_name == "Pet_Item"
  )));
  assert!(has_warning(&warnings, |w| matches!(
    w,
    GenerationWarning::TypeNameFallback { type_name, .. } if type_name == "T404"
  )));
}

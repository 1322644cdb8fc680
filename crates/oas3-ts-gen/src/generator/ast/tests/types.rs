use serde_json::json;

use crate::generator::ast::{Literal, Property, TypeExpr};

fn property(name: &str, type_expr: TypeExpr, required: bool) -> Property {
  Property {
    name: name.to_string(),
    type_expr,
    required,
    read_only: false,
    description: None,
    example: None,
    is_index_signature: false,
  }
}

#[test]
fn test_primitive_rendering() {
  assert_eq!(TypeExpr::Any.to_string(), "any");
  assert_eq!(TypeExpr::Circular("Node".to_string()).to_string(), "any");
  assert_eq!(TypeExpr::Date.to_string(), "Date");
  assert_eq!(TypeExpr::Named("petsAPI.Pet".to_string()).to_string(), "petsAPI.Pet");
}

#[test]
fn test_literal_rendering() {
  assert_eq!(Literal::from_value(&json!("a\"b")).unwrap().to_string(), r#""a\"b""#);
  assert_eq!(Literal::from_value(&json!(1.5)).unwrap().to_string(), "1.5");
  assert_eq!(Literal::from_value(&json!(false)).unwrap().to_string(), "false");
  assert_eq!(Literal::from_value(&json!(null)).unwrap().to_string(), "null");
  assert!(Literal::from_value(&json!([1])).is_none());
  assert!(Literal::from_value(&json!({ "a": 1 })).is_none());
}

#[test]
fn test_union_collapses() {
  assert_eq!(TypeExpr::union(vec![]), TypeExpr::Any);
  assert_eq!(TypeExpr::union(vec![TypeExpr::String]), TypeExpr::String);
  assert_eq!(
    TypeExpr::union(vec![TypeExpr::String, TypeExpr::Number]).to_string(),
    "string | number"
  );
}

#[test]
fn test_array_of_union_is_parenthesized() {
  let expr = TypeExpr::Array(Box::new(TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Number])));
  assert_eq!(expr.to_string(), "(string | number)[]");

  let expr = TypeExpr::Array(Box::new(TypeExpr::Array(Box::new(TypeExpr::String))));
  assert_eq!(expr.to_string(), "string[][]");
}

#[test]
fn test_intersection_rendering() {
  let expr = TypeExpr::Intersection(vec![
    TypeExpr::Named("Base".to_string()),
    TypeExpr::Union(vec![TypeExpr::Named("A".to_string()), TypeExpr::Named("B".to_string())]),
  ]);
  assert_eq!(expr.to_string(), "(Base & (A | B))");
  assert_eq!(expr.render_top_level(), "Base & (A | B)");
}

#[test]
fn test_nullable() {
  assert_eq!(TypeExpr::String.nullable().to_string(), "string | null");
  assert_eq!(TypeExpr::Any.nullable(), TypeExpr::Any);

  let already = TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Null]);
  assert_eq!(already.clone().nullable(), already);

  let union = TypeExpr::Union(vec![TypeExpr::String, TypeExpr::Number]).nullable();
  assert_eq!(union.to_string(), "string | number | null");
}

#[test]
fn test_object_rendering() {
  let mut readonly = property("id", TypeExpr::Number, true);
  readonly.read_only = true;

  let expr = TypeExpr::Object(vec![
    readonly,
    property("content-type", TypeExpr::String, false),
    Property::index_signature(TypeExpr::Any),
  ]);
  assert_eq!(
    expr.to_string(),
    r#"{ readonly id: number; "content-type"?: string; [key: string]: any }"#
  );
  assert_eq!(TypeExpr::Object(vec![]).to_string(), "{}");
}

#[test]
fn test_record_rendering() {
  let expr = TypeExpr::Record(Box::new(TypeExpr::Named("Pet".to_string())));
  assert_eq!(expr.to_string(), "Record<string, Pet>");
}

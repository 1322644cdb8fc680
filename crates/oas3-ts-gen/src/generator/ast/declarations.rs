use serde::Serialize;
use serde_json::Value;
use strum::Display;

use super::types::{Literal, Property, TypeExpr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum NamedTypeKind {
  Interface,
  Enum,
  Union,
  Intersection,
  ArrayAlias,
  TypeAlias,
  BasicAlias,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumValueType {
  String,
  Number,
  Mixed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
  pub key: String,
  pub value: Literal,
}

/// A top-level declaration emitted into the type-definition file.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
  pub name: String,
  pub kind: NamedTypeKind,
  pub description: Option<String>,
  /// Full expression of the declaration; interfaces carry their object literal here too.
  pub definition: TypeExpr,
  pub properties: Vec<Property>,
  /// Non-empty only when every enum value is a string usable as a member name.
  pub enum_members: Vec<EnumMember>,
  pub value_type: Option<EnumValueType>,
  pub format: Option<String>,
  pub nullable: bool,
  pub example: Option<Value>,
  pub read_only: bool,
}

impl NamedType {
  pub fn new(name: impl Into<String>, kind: NamedTypeKind, definition: TypeExpr) -> Self {
    Self {
      name: name.into(),
      kind,
      description: None,
      definition,
      properties: vec![],
      enum_members: vec![],
      value_type: None,
      format: None,
      nullable: false,
      example: None,
      read_only: false,
    }
  }

  /// The rendered expression the dependency scanner reads.
  pub fn expression(&self) -> String {
    self.definition.to_string()
  }

  /// Right-hand side of a `type Name = ...` declaration.
  pub fn alias_body(&self) -> String {
    self.definition.render_top_level()
  }
}

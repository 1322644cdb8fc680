use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A schema classified into exactly one [`SchemaKind`] plus the attributes every variant shares.
///
/// Deserialization never fails: values that are not schema objects, and schema objects whose
/// keywords have unexpected shapes, classify as [`SchemaKind::Unknown`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
  pub meta: SchemaMeta,
  pub kind: SchemaKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaMeta {
  pub title: Option<String>,
  pub description: Option<String>,
  pub format: Option<String>,
  pub nullable: bool,
  pub read_only: bool,
  pub example: Option<Value>,
}

impl SchemaMeta {
  /// Title and description joined by a single space, `None` when both are blank.
  pub fn documentation(&self) -> Option<String> {
    let text = [self.title.as_deref(), self.description.as_deref()]
      .into_iter()
      .flatten()
      .map(str::trim)
      .filter(|part| !part.is_empty())
      .join(" ");
    (!text.is_empty()).then_some(text)
  }
}

/// Classification of a schema, checked in priority order: reference, enum, composition, array,
/// object, primitive, unknown.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
  Reference(String),
  Enum(Vec<Value>),
  Composition {
    mode: CompositionMode,
    members: Vec<SchemaNode>,
  },
  Array(Option<Box<SchemaNode>>),
  Object(ObjectShape),
  Primitive(Vec<String>),
  /// `None` for an unconstrained schema such as `{}`, otherwise why it could not be classified.
  Unknown(Option<String>),
}

impl Default for SchemaKind {
  fn default() -> Self {
    Self::Unknown(None)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionMode {
  AllOf,
  OneOf,
  AnyOf,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectShape {
  pub properties: IndexMap<String, SchemaNode>,
  pub required: Vec<String>,
  pub additional: AdditionalProperties,
}

impl ObjectShape {
  pub fn is_required(&self, name: &str) -> bool {
    self.required.iter().any(|required| required == name)
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AdditionalProperties {
  #[default]
  Forbidden,
  Any,
  Schema(Box<SchemaNode>),
}

impl SchemaNode {
  pub fn reference(&self) -> Option<&str> {
    match &self.kind {
      SchemaKind::Reference(path) => Some(path),
      _ => None,
    }
  }

  pub fn has_type(&self, name: &str) -> bool {
    matches!(&self.kind, SchemaKind::Primitive(types) if types.iter().any(|t| t == name))
  }

  /// A `string` schema with `binary` format, i.e. an uploaded file.
  pub fn is_binary_string(&self) -> bool {
    self.has_type("string") && self.meta.format.as_deref() == Some("binary")
  }

  /// Visits every `$ref` pointer reachable from this schema without following them.
  pub fn for_each_reference<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
    match &self.kind {
      SchemaKind::Reference(path) => visit(path),
      SchemaKind::Composition { members, .. } => {
        for member in members {
          member.for_each_reference(visit);
        }
      }
      SchemaKind::Array(Some(items)) => items.for_each_reference(visit),
      SchemaKind::Object(shape) => {
        for property in shape.properties.values() {
          property.for_each_reference(visit);
        }
        if let AdditionalProperties::Schema(additional) = &shape.additional {
          additional.for_each_reference(visit);
        }
      }
      SchemaKind::Enum(_) | SchemaKind::Array(None) | SchemaKind::Primitive(_) | SchemaKind::Unknown(_) => {}
    }
  }
}

impl<'de> Deserialize<'de> for SchemaNode {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    SchemaRepr::deserialize(deserializer).map(Self::from)
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaRepr {
  Object(Box<RawSchema>),
  Bool(bool),
  Other(Value),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRepr {
  Single(String),
  Multiple(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AdditionalRepr {
  Bool(bool),
  Schema(Box<SchemaNode>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
  #[serde(rename = "$ref")]
  ref_path: Option<String>,
  #[serde(rename = "enum")]
  enum_values: Option<Vec<Value>>,
  #[serde(rename = "const")]
  const_value: Option<Value>,
  all_of: Option<Vec<SchemaNode>>,
  one_of: Option<Vec<SchemaNode>>,
  any_of: Option<Vec<SchemaNode>>,
  #[serde(rename = "type")]
  schema_type: Option<TypeRepr>,
  items: Option<Box<SchemaNode>>,
  properties: Option<IndexMap<String, SchemaNode>>,
  #[serde(default)]
  required: Vec<String>,
  additional_properties: Option<AdditionalRepr>,
  format: Option<String>,
  title: Option<String>,
  description: Option<String>,
  #[serde(default)]
  nullable: bool,
  #[serde(default)]
  read_only: bool,
  example: Option<Value>,
}

impl From<SchemaRepr> for SchemaNode {
  fn from(repr: SchemaRepr) -> Self {
    match repr {
      SchemaRepr::Object(raw) => Self::from(*raw),
      SchemaRepr::Bool(true) => Self::default(),
      SchemaRepr::Bool(false) => Self {
        meta: SchemaMeta::default(),
        kind: SchemaKind::Unknown(Some("boolean schema `false` admits no value".to_string())),
      },
      SchemaRepr::Other(value) => Self {
        meta: SchemaMeta::default(),
        kind: SchemaKind::Unknown(Some(format!("unexpected schema value `{value}`"))),
      },
    }
  }
}

impl From<RawSchema> for SchemaNode {
  fn from(raw: RawSchema) -> Self {
    let types = match raw.schema_type {
      Some(TypeRepr::Single(name)) => vec![name],
      Some(TypeRepr::Multiple(names)) => names,
      None => vec![],
    };

    let meta = SchemaMeta {
      title: raw.title,
      description: raw.description,
      format: raw.format,
      nullable: raw.nullable || types.iter().any(|t| t == "null"),
      read_only: raw.read_only,
      example: raw.example,
    };

    let non_empty = |members: Option<Vec<SchemaNode>>| members.filter(|m| !m.is_empty());

    let kind = if let Some(path) = raw.ref_path {
      SchemaKind::Reference(path)
    } else if let Some(values) = raw.enum_values.filter(|v| !v.is_empty()) {
      SchemaKind::Enum(values)
    } else if let Some(value) = raw.const_value {
      SchemaKind::Enum(vec![value])
    } else if let Some(members) = non_empty(raw.all_of) {
      SchemaKind::Composition {
        mode: CompositionMode::AllOf,
        members,
      }
    } else if let Some(members) = non_empty(raw.one_of) {
      SchemaKind::Composition {
        mode: CompositionMode::OneOf,
        members,
      }
    } else if let Some(members) = non_empty(raw.any_of) {
      SchemaKind::Composition {
        mode: CompositionMode::AnyOf,
        members,
      }
    } else if types.iter().any(|t| t == "array") {
      SchemaKind::Array(raw.items)
    } else if types.iter().any(|t| t == "object") || raw.properties.is_some() {
      SchemaKind::Object(ObjectShape {
        properties: raw.properties.unwrap_or_default(),
        required: raw.required,
        additional: match raw.additional_properties {
          None | Some(AdditionalRepr::Bool(false)) => AdditionalProperties::Forbidden,
          Some(AdditionalRepr::Bool(true)) => AdditionalProperties::Any,
          Some(AdditionalRepr::Schema(schema)) => AdditionalProperties::Schema(schema),
        },
      })
    } else if !types.is_empty() {
      SchemaKind::Primitive(types)
    } else {
      SchemaKind::Unknown(None)
    };

    Self { meta, kind }
  }
}

use serde_json::Value;

use crate::{
  document::{AdditionalProperties, CompositionMode, ObjectShape, SchemaKind, SchemaMeta, SchemaNode},
  generator::{
    ast::{Literal, Property, TypeExpr},
    metrics::GenerationWarning,
    schema_registry::{SchemaRegistry, VisitStack},
  },
  naming::identifiers::sanitize_type_name,
};

const NUMBER_TYPES: &[&str] = &[
  "int64", "integer", "long", "float", "double", "number", "int", "int32", "decimal",
];
const STRING_TYPES: &[&str] = &[
  "string",
  "email",
  "password",
  "uri",
  "url",
  "uuid",
  "byte",
  "binary",
  "hostname",
  "ipv4",
  "ipv6",
  "date",
  "date-time",
  "datetime",
];
const DATE_FORMATS: &[&str] = &["date", "date-time"];

/// Turns schemas into inline type expressions.
///
/// References resolve to the identifier of the component they point at. When a namespace is
/// set, that identifier is qualified with it, which is how request-binding files address the
/// declarations of the type-definition file.
pub(crate) struct TypeResolver<'a> {
  registry: &'a SchemaRegistry<'a>,
  namespace: Option<&'a str>,
}

impl<'a> TypeResolver<'a> {
  pub(crate) fn new(registry: &'a SchemaRegistry<'a>) -> Self {
    Self {
      registry,
      namespace: None,
    }
  }

  #[must_use]
  pub(crate) fn with_namespace(mut self, namespace: &'a str) -> Self {
    self.namespace = Some(namespace);
    self
  }

  pub(crate) fn registry(&self) -> &'a SchemaRegistry<'a> {
    self.registry
  }

  /// Identifier of the component `raw_name`, qualified with the namespace when one is set.
  pub(crate) fn type_name(&self, raw_name: &str) -> String {
    let name = sanitize_type_name(raw_name);
    match self.namespace {
      Some(namespace) => format!("{namespace}.{name}"),
      None => name,
    }
  }

  pub(crate) fn resolve(&self, schema: &SchemaNode, context: &str, warnings: &mut Vec<GenerationWarning>) -> TypeExpr {
    let mut visited = VisitStack::default();
    self.resolve_with(schema, context, &mut visited, warnings)
  }

  /// Resolves `schema` while `visited` holds the references being followed by the caller.
  pub(crate) fn resolve_with(
    &self,
    schema: &SchemaNode,
    context: &str,
    visited: &mut VisitStack,
    warnings: &mut Vec<GenerationWarning>,
  ) -> TypeExpr {
    match &schema.kind {
      SchemaKind::Reference(ref_path) => self.resolve_reference(ref_path, context, visited, warnings),
      SchemaKind::Enum(values) => {
        let literals = enum_literals(values, context, warnings);
        TypeExpr::union(literals.into_iter().map(TypeExpr::Literal).collect())
      }
      SchemaKind::Composition { mode, members } => {
        let exprs = self.resolve_members(*mode, members, context, visited, warnings);
        match mode {
          CompositionMode::AllOf => TypeExpr::Intersection(exprs),
          CompositionMode::OneOf | CompositionMode::AnyOf => TypeExpr::union(exprs),
        }
      }
      SchemaKind::Array(items) => {
        let item = match items {
          Some(items) => self.resolve_with(items, &format!("{context}[]"), visited, warnings),
          None => TypeExpr::Any,
        };
        TypeExpr::Array(Box::new(item))
      }
      SchemaKind::Object(shape) => self.resolve_object(shape, context, visited, warnings),
      SchemaKind::Primitive(types) => resolve_primitive(types, &schema.meta, context, warnings),
      SchemaKind::Unknown(reason) => {
        if let Some(detail) = reason {
          warnings.push(GenerationWarning::UnclassifiedSchema {
            context: context.to_string(),
            detail: detail.clone(),
          });
        }
        TypeExpr::Any
      }
    }
  }

  pub(crate) fn resolve_members(
    &self,
    mode: CompositionMode,
    members: &[SchemaNode],
    context: &str,
    visited: &mut VisitStack,
    warnings: &mut Vec<GenerationWarning>,
  ) -> Vec<TypeExpr> {
    let keyword = match mode {
      CompositionMode::AllOf => "allOf",
      CompositionMode::OneOf => "oneOf",
      CompositionMode::AnyOf => "anyOf",
    };
    members
      .iter()
      .enumerate()
      .map(|(index, member)| self.resolve_with(member, &format!("{context}.{keyword}[{index}]"), visited, warnings))
      .collect()
  }

  fn resolve_reference(
    &self,
    ref_path: &str,
    context: &str,
    visited: &VisitStack,
    warnings: &mut Vec<GenerationWarning>,
  ) -> TypeExpr {
    let Some((name, _)) = self.registry.lookup(ref_path) else {
      warnings.push(GenerationWarning::UnresolvedReference {
        context: context.to_string(),
        reference: ref_path.to_string(),
      });
      return TypeExpr::Any;
    };

    if visited.contains(name) {
      warnings.push(GenerationWarning::CircularReference {
        context: context.to_string(),
        type_name: name.to_string(),
      });
      return TypeExpr::Circular(name.to_string());
    }

    TypeExpr::Named(self.type_name(name))
  }

  fn resolve_object(
    &self,
    shape: &ObjectShape,
    context: &str,
    visited: &mut VisitStack,
    warnings: &mut Vec<GenerationWarning>,
  ) -> TypeExpr {
    if shape.properties.is_empty() {
      let value = match &shape.additional {
        AdditionalProperties::Schema(schema) => self.resolve_with(schema, &format!("{context}[*]"), visited, warnings),
        AdditionalProperties::Any | AdditionalProperties::Forbidden => TypeExpr::Any,
      };
      return TypeExpr::Record(Box::new(value));
    }

    TypeExpr::Object(self.object_properties(shape, context, visited, warnings))
  }

  /// Properties of an object schema in declaration order, followed by the index signature
  /// when additional properties are allowed.
  pub(crate) fn object_properties(
    &self,
    shape: &ObjectShape,
    context: &str,
    visited: &mut VisitStack,
    warnings: &mut Vec<GenerationWarning>,
  ) -> Vec<Property> {
    let mut properties = Vec::with_capacity(shape.properties.len() + 1);

    for (name, schema) in &shape.properties {
      let type_expr = self.resolve_with(schema, &format!("{context}.{name}"), visited, warnings);
      properties.push(Property {
        name: name.clone(),
        type_expr,
        required: shape.is_required(name),
        read_only: schema.meta.read_only,
        description: schema.meta.documentation(),
        example: schema.meta.example.clone(),
        is_index_signature: false,
      });
    }

    match &shape.additional {
      AdditionalProperties::Any => properties.push(Property::index_signature(TypeExpr::Any)),
      AdditionalProperties::Schema(schema) => {
        let value = self.resolve_with(schema, &format!("{context}[*]"), visited, warnings);
        properties.push(Property::index_signature(value));
      }
      AdditionalProperties::Forbidden => {}
    }

    properties
  }
}

/// Enum values as literals with duplicates collapsed; values without a literal form are dropped.
pub(crate) fn enum_literals(values: &[Value], context: &str, warnings: &mut Vec<GenerationWarning>) -> Vec<Literal> {
  let mut literals: Vec<Literal> = Vec::with_capacity(values.len());
  for value in values {
    match Literal::from_value(value) {
      Some(literal) if !literals.contains(&literal) => literals.push(literal),
      Some(_) => {}
      None => warnings.push(GenerationWarning::InvalidEnumValue {
        context: context.to_string(),
        value: value.to_string(),
      }),
    }
  }
  literals
}

fn resolve_primitive(
  types: &[String],
  meta: &SchemaMeta,
  context: &str,
  warnings: &mut Vec<GenerationWarning>,
) -> TypeExpr {
  let is_date = meta.format.as_deref().is_some_and(|format| DATE_FORMATS.contains(&format));
  let mut members: Vec<TypeExpr> = vec![];

  for type_name in types {
    let mapped = match type_name.as_str() {
      name if NUMBER_TYPES.contains(&name) => vec![TypeExpr::Number],
      name if STRING_TYPES.contains(&name) && is_date => vec![TypeExpr::String, TypeExpr::Date],
      name if STRING_TYPES.contains(&name) => vec![TypeExpr::String],
      "boolean" => vec![TypeExpr::Boolean],
      "null" => vec![TypeExpr::Null],
      other => {
        warnings.push(GenerationWarning::UnsupportedPrimitive {
          context: context.to_string(),
          type_name: other.to_string(),
        });
        vec![TypeExpr::Any]
      }
    };

    for member in mapped {
      if !members.contains(&member) {
        members.push(member);
      }
    }
  }

  let base = if members.contains(&TypeExpr::Any) {
    TypeExpr::Any
  } else {
    TypeExpr::union(members)
  };

  if meta.nullable { base.nullable() } else { base }
}

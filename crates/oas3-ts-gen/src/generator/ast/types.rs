use std::fmt::{self, Display, Write as _};

use serde_json::{Number, Value};

use crate::naming::identifiers::property_key;

/// An inline type expression in the emitted language.
///
/// Rendering goes through [`Display`]; the rendered text is what templates embed and what the
/// dependency scanner reads.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
  Any,
  /// `any` pinned in place of a reference that is already being resolved.
  Circular(String),
  String,
  Number,
  Boolean,
  Null,
  Date,
  Literal(Literal),
  Named(String),
  Union(Vec<TypeExpr>),
  Intersection(Vec<TypeExpr>),
  Array(Box<TypeExpr>),
  Object(Vec<Property>),
  Record(Box<TypeExpr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
  String(String),
  Number(Number),
  Boolean(bool),
  Null,
}

impl Literal {
  /// Converts an enum value; arrays and objects have no literal form.
  pub fn from_value(value: &Value) -> Option<Self> {
    match value {
      Value::String(text) => Some(Self::String(text.clone())),
      Value::Number(number) => Some(Self::Number(number.clone())),
      Value::Bool(flag) => Some(Self::Boolean(*flag)),
      Value::Null => Some(Self::Null),
      Value::Array(_) | Value::Object(_) => None,
    }
  }
}

impl Display for Literal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::String(text) => write!(f, "{}", Value::String(text.clone())),
      Self::Number(number) => write!(f, "{number}"),
      Self::Boolean(flag) => write!(f, "{flag}"),
      Self::Null => f.write_str("null"),
    }
  }
}

/// A member of an object type: a named property or the string-keyed index signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
  pub name: String,
  pub type_expr: TypeExpr,
  pub required: bool,
  pub read_only: bool,
  pub description: Option<String>,
  pub example: Option<Value>,
  pub is_index_signature: bool,
}

impl Property {
  pub fn index_signature(type_expr: TypeExpr) -> Self {
    Self {
      name: "[key: string]".to_string(),
      type_expr,
      required: true,
      read_only: false,
      description: None,
      example: None,
      is_index_signature: true,
    }
  }

  /// The key as written in source: quoted when not an identifier, verbatim for index signatures.
  pub fn key(&self) -> String {
    if self.is_index_signature {
      self.name.clone()
    } else {
      property_key(&self.name)
    }
  }
}

impl Display for Property {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.read_only {
      f.write_str("readonly ")?;
    }
    f.write_str(&self.key())?;
    if !self.required {
      f.write_char('?')?;
    }
    write!(f, ": {}", self.type_expr)
  }
}

impl TypeExpr {
  /// Union of `members`, collapsing a single member and degrading an empty list to `any`.
  pub fn union(mut members: Vec<TypeExpr>) -> Self {
    match members.len() {
      0 => Self::Any,
      1 => members.remove(0),
      _ => Self::Union(members),
    }
  }

  pub fn is_union(&self) -> bool {
    matches!(self, Self::Union(_))
  }

  pub fn is_any(&self) -> bool {
    matches!(self, Self::Any | Self::Circular(_))
  }

  fn admits_null(&self) -> bool {
    match self {
      Self::Null | Self::Literal(Literal::Null) => true,
      Self::Union(members) => members.iter().any(Self::admits_null),
      _ => false,
    }
  }

  /// Appends `null` to the expression unless it is `any` or already admits `null`.
  #[must_use]
  pub fn nullable(self) -> Self {
    if self.is_any() || self.admits_null() {
      return self;
    }
    match self {
      Self::Union(mut members) => {
        members.push(Self::Null);
        Self::Union(members)
      }
      other => Self::Union(vec![other, Self::Null]),
    }
  }

  /// Top-level alias body: like [`Display`] but without the parentheses around an intersection.
  pub fn render_top_level(&self) -> String {
    match self {
      Self::Intersection(members) => {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_members(&mut out, members, " & ");
        out
      }
      other => other.to_string(),
    }
  }
}

fn write_members(out: &mut impl fmt::Write, members: &[TypeExpr], separator: &str) -> fmt::Result {
  for (index, member) in members.iter().enumerate() {
    if index > 0 {
      out.write_str(separator)?;
    }
    if member.is_union() {
      write!(out, "({member})")?;
    } else {
      write!(out, "{member}")?;
    }
  }
  Ok(())
}

impl Display for TypeExpr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Any | Self::Circular(_) => f.write_str("any"),
      Self::String => f.write_str("string"),
      Self::Number => f.write_str("number"),
      Self::Boolean => f.write_str("boolean"),
      Self::Null => f.write_str("null"),
      Self::Date => f.write_str("Date"),
      Self::Literal(literal) => write!(f, "{literal}"),
      Self::Named(name) => f.write_str(name),
      Self::Union(members) => write_members(f, members, " | "),
      Self::Intersection(members) => {
        f.write_char('(')?;
        write_members(f, members, " & ")?;
        f.write_char(')')
      }
      Self::Array(item) if item.is_union() => write!(f, "({item})[]"),
      Self::Array(item) => write!(f, "{item}[]"),
      Self::Record(value) => write!(f, "Record<string, {value}>"),
      Self::Object(properties) if properties.is_empty() => f.write_str("{}"),
      Self::Object(properties) => {
        f.write_str("{ ")?;
        for (index, property) in properties.iter().enumerate() {
          if index > 0 {
            f.write_str("; ")?;
          }
          write!(f, "{property}")?;
        }
        f.write_str(" }")
      }
    }
  }
}

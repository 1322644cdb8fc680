//! Serde object model for the subset of an OpenAPI 3.x document the generator reads.
//!
//! Maps are [`IndexMap`]s so paths, responses, schemas and properties keep the order they
//! have in the source document. Unknown keywords are ignored. The paths and responses maps are
//! [`ExtensibleMap`]s: `x-` extension keys are skipped and malformed entries are set aside
//! instead of failing the whole document.

pub mod schema;

use std::ops::Deref;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use strum::{Display, EnumIter};

pub use schema::{AdditionalProperties, CompositionMode, ObjectShape, SchemaKind, SchemaMeta, SchemaNode};

#[derive(Debug, Clone, Deserialize)]
pub struct OpenApiDocument {
  pub openapi: String,
  pub info: Info,
  #[serde(default)]
  pub paths: ExtensibleMap<PathItem>,
  #[serde(default)]
  pub components: Components,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Info {
  pub title: String,
  pub version: String,
  #[serde(default)]
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
  #[serde(default)]
  pub schemas: IndexMap<String, SchemaNode>,
  #[serde(default)]
  pub request_bodies: IndexMap<String, RequestBody>,
  #[serde(default)]
  pub responses: IndexMap<String, Response>,
}

/// Prefix of specification extension keys.
pub const EXTENSION_PREFIX: &str = "x-";

/// A map entry that failed to deserialize and was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
  pub key: String,
  pub reason: String,
}

/// Keyed map of an object that also admits `x-` extension keys.
///
/// Extension keys are dropped. An entry whose value does not deserialize as `T` is recorded in
/// [`ExtensibleMap::rejected`] and the remaining entries are kept.
#[derive(Debug, Clone)]
pub struct ExtensibleMap<T> {
  entries: IndexMap<String, T>,
  rejected: Vec<RejectedEntry>,
}

impl<T> ExtensibleMap<T> {
  pub fn rejected(&self) -> &[RejectedEntry] {
    &self.rejected
  }
}

impl<T> Default for ExtensibleMap<T> {
  fn default() -> Self {
    Self {
      entries: IndexMap::new(),
      rejected: vec![],
    }
  }
}

impl<T> Deref for ExtensibleMap<T> {
  type Target = IndexMap<String, T>;

  fn deref(&self) -> &Self::Target {
    &self.entries
  }
}

impl<'a, T> IntoIterator for &'a ExtensibleMap<T> {
  type Item = (&'a String, &'a T);
  type IntoIter = indexmap::map::Iter<'a, String, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}

impl<T: DeserializeOwned> FromIterator<(String, Value)> for ExtensibleMap<T> {
  fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
    let mut map = Self::default();
    for (key, value) in iter {
      if key.starts_with(EXTENSION_PREFIX) {
        continue;
      }
      match serde_json::from_value(value) {
        Ok(entry) => {
          map.entries.insert(key, entry);
        }
        Err(err) => map.rejected.push(RejectedEntry {
          key,
          reason: err.to_string(),
        }),
      }
    }
    map
  }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ExtensibleMap<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw.into_iter().collect())
  }
}

/// HTTP methods the generator emits bindings for, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Delete,
  Patch,
}

impl HttpMethod {
  pub fn as_upper(self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Post => "POST",
      Self::Put => "PUT",
      Self::Delete => "DELETE",
      Self::Patch => "PATCH",
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
  pub get: Option<Operation>,
  pub put: Option<Operation>,
  pub post: Option<Operation>,
  pub delete: Option<Operation>,
  pub patch: Option<Operation>,
  #[serde(default)]
  pub parameters: Vec<ParameterOrRef>,
}

impl PathItem {
  pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
    match method {
      HttpMethod::Get => self.get.as_ref(),
      HttpMethod::Post => self.post.as_ref(),
      HttpMethod::Put => self.put.as_ref(),
      HttpMethod::Delete => self.delete.as_ref(),
      HttpMethod::Patch => self.patch.as_ref(),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
  pub operation_id: Option<String>,
  pub summary: Option<String>,
  pub description: Option<String>,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub parameters: Vec<ParameterOrRef>,
  pub request_body: Option<Referenceable<RequestBody>>,
  #[serde(default)]
  pub responses: ExtensibleMap<Referenceable<Response>>,
  #[serde(default)]
  pub deprecated: bool,
}

/// Either an inline object or a `$ref` pointer to a component.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Referenceable<T> {
  Ref {
    #[serde(rename = "$ref")]
    ref_path: String,
  },
  Object(T),
}

pub type ParameterOrRef = Referenceable<Parameter>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
  Query,
  Path,
  Header,
  Cookie,
  #[serde(other)]
  Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
  pub name: String,
  #[serde(rename = "in")]
  pub location: ParameterLocation,
  #[serde(default)]
  pub required: bool,
  pub description: Option<String>,
  pub schema: Option<SchemaNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
  pub description: Option<String>,
  #[serde(default)]
  pub required: bool,
  #[serde(default)]
  pub content: IndexMap<String, MediaTypeObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
  pub description: Option<String>,
  #[serde(default)]
  pub content: IndexMap<String, MediaTypeObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaTypeObject {
  pub schema: Option<SchemaNode>,
}

use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use serde_json::Value;

use crate::document::OpenApiDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }
}

pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let format = path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(SpecFormat::default(), SpecFormat::from_extension);

    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self { file, format })
  }

  /// Parses the file into raw documents. A top-level array is a batch, one document per element.
  pub fn documents(&self) -> anyhow::Result<Vec<Value>> {
    let value = parse_value(self.file.as_slice(), self.format)?;
    Ok(match value {
      Value::Array(documents) => documents,
      document => vec![document],
    })
  }
}

pub(crate) fn parse_value(bytes: &[u8], format: SpecFormat) -> anyhow::Result<Value> {
  match format {
    SpecFormat::Json => Ok(serde_json::from_slice(bytes)?),
    SpecFormat::Yaml => Ok(serde_yaml::from_slice(bytes)?),
  }
}

/// Shape check applied before a raw value is treated as an OpenAPI document: a truthy
/// `openapi` field, an `info` object with string `title` and `version`, and a `paths` object.
pub(crate) fn is_openapi_document(value: &Value) -> bool {
  let Some(root) = value.as_object() else {
    return false;
  };

  let has_version = root.get("openapi").is_some_and(is_truthy);
  let has_info = root
    .get("info")
    .and_then(Value::as_object)
    .is_some_and(|info| info.get("title").is_some_and(Value::is_string) && info.get("version").is_some_and(Value::is_string));
  let has_paths = root.get("paths").is_some_and(Value::is_object);

  has_version && has_info && has_paths
}

fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(flag) => *flag,
    Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
    Value::String(text) => !text.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

/// Human readable label for a raw document, used in diagnostics.
pub(crate) fn describe_document(value: &Value, index: usize) -> String {
  value
    .pointer("/info/title")
    .and_then(Value::as_str)
    .map_or_else(|| format!("document #{}", index + 1), |title| format!("'{title}'"))
}

/// Runs the shape check and typed deserialization, returning why the document was rejected.
pub(crate) fn load_document(value: Value) -> Result<OpenApiDocument, String> {
  if !is_openapi_document(&value) {
    return Err("not an OpenAPI 3.x document (requires openapi, info.title, info.version and paths)".to_string());
  }
  serde_json::from_value(value).map_err(|err| format!("invalid document structure: {err}"))
}

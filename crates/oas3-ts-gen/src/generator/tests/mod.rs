
use serde_json::Value;

use crate::{document::OpenApiDocument, utils::spec::load_document};

pub(super) const PETSTORE: &str = include_str!("../../../fixtures/petstore.json");

pub(super) fn petstore() -> OpenApiDocument {
  let value: Value = serde_json::from_str(PETSTORE).unwrap();
  load_document(value).unwrap()
}

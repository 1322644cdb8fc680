
use serde_json::Value;

use crate::{
  generator::orchestrator::{GeneratedDocument, Orchestrator},
  utils::spec::load_document,
};

const PETSTORE: &str = include_str!("../../../fixtures/petstore.json");

fn petstore_generated() -> GeneratedDocument {
  let value: Value = serde_json::from_str(PETSTORE).unwrap();
  Orchestrator::new(load_document(value).unwrap()).generate().unwrap()
}

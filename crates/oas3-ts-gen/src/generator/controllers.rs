use std::{collections::HashSet, path::PathBuf};

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
  document::Operation,
  generator::{ast::ApiOperation, metrics::GenerationWarning},
  naming::{identifiers::sanitize_file_stem, operations::ensure_unique},
};

pub(crate) const DEFAULT_TAG: &str = "default";

/// Controller tag of an operation: its first tag, or [`DEFAULT_TAG`].
pub(crate) fn operation_tag(operation: &Operation) -> &str {
  operation
    .tags
    .first()
    .map(|tag| tag.trim())
    .filter(|tag| !tag.is_empty())
    .unwrap_or(DEFAULT_TAG)
}

/// The operations sharing one tag, emitted together as one request-binding file.
///
/// A tag containing `/` places the file in a subdirectory: `auth/admin` becomes `auth/admin.ts`.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerGroup {
  pub tag: String,
  pub directory: Vec<String>,
  pub name: String,
  pub operations: Vec<ApiOperation>,
}

impl ControllerGroup {
  pub fn new(tag: &str) -> Self {
    let mut segments: Vec<String> = tag
      .split('/')
      .map(sanitize_file_stem)
      .filter(|segment| !segment.is_empty())
      .collect();
    let name = segments.pop().unwrap_or_else(|| DEFAULT_TAG.to_string());

    Self {
      tag: tag.to_string(),
      directory: segments,
      name,
      operations: vec![],
    }
  }

  /// Path of the binding file relative to the document's output directory.
  pub fn relative_path(&self) -> PathBuf {
    let mut path: PathBuf = self.directory.iter().collect();
    path.push(format!("{}.ts", self.name));
    path
  }

  /// Module specifier used to import the binding file from the output directory root.
  pub fn import_path(&self) -> String {
    self.directory.iter().chain([&self.name]).join("/")
  }

  fn claim_unique_path(&mut self, taken: &mut HashSet<String>, warnings: &mut Vec<GenerationWarning>) {
    let path = self.import_path();
    let key = path.to_ascii_lowercase();
    let unique = ensure_unique(&key, taken);
    if unique != key {
      self.name.push_str(&unique[key.len()..]);
      warnings.push(GenerationWarning::ControllerPathCollision {
        tag: self.tag.clone(),
        path,
        renamed: self.import_path(),
      });
    }
    taken.insert(unique);
  }

  /// Adds `operation`, renaming its function if the name is already taken in this group.
  fn push(&mut self, mut operation: ApiOperation, warnings: &mut Vec<GenerationWarning>) {
    let taken: HashSet<String> = self.operations.iter().map(|op| op.function_name.clone()).collect();
    let unique = ensure_unique(&operation.function_name, &taken);
    if unique != operation.function_name {
      warnings.push(GenerationWarning::DuplicateFunctionName {
        tag: self.tag.clone(),
        function_name: operation.function_name.clone(),
        renamed: unique.clone(),
      });
      operation.function_name = unique;
    }
    self.operations.push(operation);
  }
}

/// Groups operations by tag, keeping groups in order of first appearance and operations in
/// input order within each group.
///
/// Distinct tags that sanitize to the same file path, compared case-insensitively, get a numeric
/// suffix on the later group's file name.
pub(crate) fn group_by_tag(operations: Vec<ApiOperation>, warnings: &mut Vec<GenerationWarning>) -> Vec<ControllerGroup> {
  let mut groups: IndexMap<String, ControllerGroup> = IndexMap::new();
  let mut taken_paths = HashSet::new();

  for operation in operations {
    if !groups.contains_key(&operation.tag) {
      let mut group = ControllerGroup::new(&operation.tag);
      group.claim_unique_path(&mut taken_paths, warnings);
      groups.insert(operation.tag.clone(), group);
    }
    if let Some(group) = groups.get_mut(&operation.tag) {
      group.push(operation, warnings);
    }
  }

  groups.into_values().collect()
}

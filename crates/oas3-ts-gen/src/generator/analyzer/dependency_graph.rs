use std::{
  collections::{HashMap, HashSet},
  sync::LazyLock,
};

use indexmap::{IndexMap, IndexSet};
use regex::Regex;

use crate::generator::{ast::NamedType, error::GeneratorError};

/// Names that appear in expressions but never refer to a declaration.
static BUILTIN_NAMES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "string",
    "number",
    "boolean",
    "any",
    "unknown",
    "never",
    "void",
    "null",
    "undefined",
    "Date",
    "Record",
    "Array",
    "readonly",
    "key",
    "true",
    "false",
  ]
  .into_iter()
  .collect()
});

// Group 1 is an identifier; group 2 is set when it is an object key. String literals match
// the first alternative and carry no groups.
static TOKEN_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#""(?:[^"\\]|\\.)*"|([A-Za-z_$][A-Za-z0-9_$]*)(\??:)?"#).unwrap());

/// Identifier-shaped tokens of a rendered expression that may name another declaration.
pub(crate) fn extract_dependencies(expression: &str) -> IndexSet<String> {
  TOKEN_RE
    .captures_iter(expression)
    .filter(|captures| captures.get(2).is_none())
    .filter_map(|captures| captures.get(1))
    .map(|token| token.as_str())
    .filter(|token| !BUILTIN_NAMES.contains(token))
    .map(String::from)
    .collect()
}

/// Edges from each declaration to the declarations its expression names.
pub(crate) struct DependencyGraph {
  dependencies: IndexMap<String, IndexSet<String>>,
}

impl DependencyGraph {
  pub(crate) fn build(named_types: &[NamedType]) -> Self {
    let declared: HashSet<&str> = named_types.iter().map(|t| t.name.as_str()).collect();
    let mut dependencies: IndexMap<String, IndexSet<String>> = IndexMap::new();

    for named_type in named_types {
      let deps = extract_dependencies(&named_type.expression())
        .into_iter()
        .filter(|dep| *dep != named_type.name && declared.contains(dep.as_str()));
      dependencies.entry(named_type.name.clone()).or_default().extend(deps);
    }

    Self { dependencies }
  }

  pub(crate) fn dependencies_of(&self, name: &str) -> Option<&IndexSet<String>> {
    self.dependencies.get(name)
  }

  /// Declaration names ordered so every dependency precedes its dependents.
  ///
  /// Traversal is depth-first in declaration order, so an already ordered input comes back
  /// unchanged. Fails on the first cycle found.
  pub(crate) fn topological_order(&self) -> Result<Vec<String>, GeneratorError> {
    let mut visited = HashSet::new();
    let mut in_progress = IndexSet::new();
    let mut order = Vec::with_capacity(self.dependencies.len());

    for name in self.dependencies.keys() {
      self.visit(name, &mut visited, &mut in_progress, &mut order)?;
    }

    Ok(order)
  }

  fn visit<'g>(
    &'g self,
    name: &'g str,
    visited: &mut HashSet<&'g str>,
    in_progress: &mut IndexSet<&'g str>,
    order: &mut Vec<String>,
  ) -> Result<(), GeneratorError> {
    if visited.contains(name) {
      return Ok(());
    }

    if let Some(start) = in_progress.get_index_of(name) {
      let mut cycle: Vec<String> = in_progress.iter().skip(start).map(|n| (*n).to_string()).collect();
      cycle.push(name.to_string());
      return Err(GeneratorError::CircularDependency {
        type_name: name.to_string(),
        cycle,
      });
    }

    in_progress.insert(name);
    if let Some(deps) = self.dependencies_of(name) {
      for dep in deps {
        self.visit(dep, visited, in_progress, order)?;
      }
    }
    in_progress.pop();

    visited.insert(name);
    order.push(name.to_string());
    Ok(())
  }
}

/// Reorders declarations so that each follows everything it names.
pub(crate) fn sort_by_dependencies(named_types: Vec<NamedType>) -> Result<Vec<NamedType>, GeneratorError> {
  let order = DependencyGraph::build(&named_types).topological_order()?;
  let mut by_name: HashMap<String, NamedType> = named_types.into_iter().map(|t| (t.name.clone(), t)).collect();
  Ok(order.iter().filter_map(|name| by_name.remove(name)).collect())
}

use indexmap::{IndexMap, IndexSet};
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::{
  document::{OpenApiDocument, SchemaKind, SchemaNode},
  utils::refs::ref_name,
};

/// Names of the references currently being followed.
///
/// A name is pushed before descending into its schema and popped when that descent returns,
/// so the set only ever holds the active chain.
#[derive(Debug, Default)]
pub(crate) struct VisitStack(IndexSet<String>);

impl VisitStack {
  pub(crate) fn contains(&self, name: &str) -> bool {
    self.0.contains(name)
  }

  pub(crate) fn push(&mut self, name: &str) {
    self.0.insert(name.to_string());
  }

  pub(crate) fn pop(&mut self, name: &str) {
    self.0.shift_remove(name);
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Outcome of following a schema through its `$ref` chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Dereferenced<'a> {
  Schema(&'a SchemaNode),
  /// The chain returned to a name that was already being followed.
  Circular(&'a str),
  Unresolved,
}

/// The `components.schemas` table of one document.
pub(crate) struct SchemaRegistry<'a> {
  schemas: &'a IndexMap<String, SchemaNode>,
}

impl<'a> SchemaRegistry<'a> {
  pub(crate) fn new(document: &'a OpenApiDocument) -> Self {
    Self::from_schemas(&document.components.schemas)
  }

  pub(crate) fn from_schemas(schemas: &'a IndexMap<String, SchemaNode>) -> Self {
    Self { schemas }
  }

  pub(crate) fn iter(&self) -> impl Iterator<Item = (&'a str, &'a SchemaNode)> {
    self.schemas.iter().map(|(name, schema)| (name.as_str(), schema))
  }

  /// Looks up the component a `$ref` points to, returning its table key and schema.
  pub(crate) fn lookup(&self, ref_path: &str) -> Option<(&'a str, &'a SchemaNode)> {
    let name = ref_name(ref_path)?;
    self
      .schemas
      .get_key_value(name.as_str())
      .map(|(key, schema)| (key.as_str(), schema))
  }

  /// Follows `schema` through any chain of references to the first non-reference schema.
  pub(crate) fn dereference<'s>(&self, schema: &'s SchemaNode, visited: &mut VisitStack) -> Dereferenced<'s>
  where
    'a: 's,
  {
    let SchemaKind::Reference(ref_path) = &schema.kind else {
      return Dereferenced::Schema(schema);
    };

    let Some((name, target)) = self.lookup(ref_path) else {
      return Dereferenced::Unresolved;
    };

    if visited.contains(name) {
      return Dereferenced::Circular(name);
    }

    visited.push(name);
    let resolved = self.dereference(target, visited);
    visited.pop(name);
    resolved
  }

  /// Groups of schemas that reference each other, including self-referencing schemas.
  pub(crate) fn detect_cycles(&self) -> Vec<Vec<String>> {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for (name, schema) in self.iter() {
      graph.add_node(name);
      schema.for_each_reference(&mut |ref_path| {
        if let Some((target, _)) = self.lookup(ref_path) {
          graph.add_edge(name, target, ());
        }
      });
    }

    kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| scc.into_iter().map(String::from).collect())
      .collect()
  }
}

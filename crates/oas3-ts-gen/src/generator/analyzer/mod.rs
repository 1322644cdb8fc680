mod dependency_graph;

pub(crate) use dependency_graph::{DependencyGraph, extract_dependencies, sort_by_dependencies};

#[cfg(test)]
mod tests;

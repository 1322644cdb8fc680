pub(crate) mod analyzer;
pub(crate) mod ast;
pub(crate) mod controllers;
pub(crate) mod converter;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub(crate) mod schema_registry;

#[cfg(test)]
mod tests;

//! Conversion of schemas and operations into the generator's intermediate representation.

pub(crate) mod operations;
pub(crate) mod parameters;
pub(crate) mod requests;
pub(crate) mod responses;
pub(crate) mod schemas;
pub(crate) mod type_resolver;

pub(crate) use operations::OperationConverter;
pub(crate) use schemas::SchemaConverter;
pub(crate) use type_resolver::TypeResolver;

#[cfg(test)]
mod tests;

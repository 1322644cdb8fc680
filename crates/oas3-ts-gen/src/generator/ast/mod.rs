pub mod declarations;
pub mod operations;
pub mod parsed_path;
pub mod types;

pub use declarations::{EnumMember, EnumValueType, NamedType, NamedTypeKind};
pub use operations::{ApiBody, ApiFile, ApiOperation, ApiParam};
pub use parsed_path::{PathParseError, PathTemplate};
pub use types::{Literal, Property, TypeExpr};

#[cfg(test)]
mod tests;

use bon::Builder;

use super::types::{Property, TypeExpr};
use crate::document::HttpMethod;

#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ApiParam {
  #[builder(into)]
  pub name: String,
  /// Legal identifier bound to the parameter value; equals `name` when `name` is legal.
  #[builder(into)]
  pub alias: String,
  pub type_expr: TypeExpr,
  #[builder(default)]
  pub required: bool,
  pub description: Option<String>,
}

impl ApiParam {
  fn as_property(&self) -> Property {
    Property {
      name: self.name.clone(),
      type_expr: self.type_expr.clone(),
      required: self.required,
      read_only: false,
      description: self.description.clone(),
      example: None,
      is_index_signature: false,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiBody {
  pub type_expr: TypeExpr,
  pub required: bool,
  pub description: Option<String>,
}

/// A multipart field carrying uploaded file content.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFile {
  pub title: String,
  pub required: bool,
  pub multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ApiOperation {
  #[builder(into)]
  pub function_name: String,
  pub method: HttpMethod,
  #[builder(into)]
  pub original_path: String,
  /// Path with every `{name}` placeholder rewritten to a `${alias}` interpolation.
  #[builder(into)]
  pub path_template: String,
  #[builder(into)]
  pub tag: String,
  pub description: Option<String>,
  #[builder(default)]
  pub query_params: Vec<ApiParam>,
  #[builder(default)]
  pub path_params: Vec<ApiParam>,
  #[builder(default)]
  pub header_params: Vec<ApiParam>,
  pub body: Option<ApiBody>,
  #[builder(default)]
  pub files: Vec<ApiFile>,
  #[builder(default)]
  pub has_form_data: bool,
  #[builder(default = TypeExpr::Any)]
  pub response_type: TypeExpr,
  #[builder(default)]
  pub deprecated: bool,
}

impl ApiOperation {
  pub fn has_params(&self) -> bool {
    !(self.query_params.is_empty() && self.path_params.is_empty() && self.header_params.is_empty())
  }

  /// Type of the single `params` argument grouping the query, path and header buckets.
  pub fn params_type(&self) -> TypeExpr {
    let buckets = [
      ("query", &self.query_params),
      ("path", &self.path_params),
      ("header", &self.header_params),
    ];

    let properties = buckets
      .into_iter()
      .filter(|(_, params)| !params.is_empty())
      .map(|(name, params)| Property {
        name: name.to_string(),
        type_expr: TypeExpr::Object(params.iter().map(ApiParam::as_property).collect()),
        required: params.iter().any(|param| param.required),
        read_only: false,
        description: None,
        example: None,
        is_index_signature: false,
      })
      .collect();

    TypeExpr::Object(properties)
  }
}

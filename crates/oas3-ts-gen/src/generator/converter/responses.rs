use indexmap::IndexMap;

use super::{
  requests::{ContentCategory, find_content},
  type_resolver::TypeResolver,
};
use crate::{
  document::{Components, Referenceable, Response},
  generator::{ast::TypeExpr, metrics::GenerationWarning},
  utils::refs::{RESPONSE_REF_PREFIX, component_ref_name},
};

/// Status keys tried in order when picking the response that types the binding's result.
pub(crate) const SUCCESS_STATUS_ORDER: &[&str] = &["200", "201", "default"];

/// Type of the JSON content of the first response present in [`SUCCESS_STATUS_ORDER`], or `any`.
pub(crate) fn convert_response_type(
  resolver: &TypeResolver<'_>,
  components: &Components,
  responses: &IndexMap<String, Referenceable<Response>>,
  operation: &str,
  warnings: &mut Vec<GenerationWarning>,
) -> TypeExpr {
  let Some((status, response)) = SUCCESS_STATUS_ORDER
    .iter()
    .find_map(|status| responses.get(*status).map(|response| (*status, response)))
  else {
    return TypeExpr::Any;
  };

  let context = format!("{operation}.responses.{status}");

  let response = match response {
    Referenceable::Object(response) => response,
    Referenceable::Ref { ref_path } => {
      let resolved =
        component_ref_name(ref_path, RESPONSE_REF_PREFIX).and_then(|name| components.responses.get(name.as_str()));
      let Some(response) = resolved else {
        warnings.push(GenerationWarning::UnresolvedReference {
          context,
          reference: ref_path.clone(),
        });
        return TypeExpr::Any;
      };
      response
    }
  };

  find_content(&response.content, ContentCategory::Json)
    .and_then(|media| media.schema.as_ref())
    .map_or(TypeExpr::Any, |schema| resolver.resolve(schema, &context, warnings))
}

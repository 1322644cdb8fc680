use indexmap::IndexMap;
use mediatype::MediaType;

use super::type_resolver::TypeResolver;
use crate::{
  document::{Components, MediaTypeObject, Referenceable, RequestBody, SchemaKind, SchemaNode},
  generator::{
    ast::{ApiBody, ApiFile, Property, TypeExpr},
    metrics::GenerationWarning,
    schema_registry::{Dereferenced, VisitStack},
  },
  utils::refs::{REQUEST_BODY_REF_PREFIX, component_ref_name},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentCategory {
  Json,
  Multipart,
  Other,
}

impl ContentCategory {
  #[must_use]
  pub(crate) fn from_content_type(content_type: &str) -> Self {
    let Ok(media) = MediaType::parse(content_type) else {
      return Self::Other;
    };

    let suffix = media.suffix.as_ref().map(mediatype::Name::as_str);

    match (media.ty.as_str(), media.subty.as_str(), suffix) {
      ("multipart", "form-data", _) => Self::Multipart,
      ("application", "json", _) | (_, _, Some("json")) => Self::Json,
      _ => Self::Other,
    }
  }
}

/// First media entry of `content` in the given category.
pub(crate) fn find_content(
  content: &IndexMap<String, MediaTypeObject>,
  category: ContentCategory,
) -> Option<&MediaTypeObject> {
  content
    .iter()
    .find(|(content_type, _)| ContentCategory::from_content_type(content_type) == category)
    .map(|(_, media)| media)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RequestParts {
  pub(crate) body: Option<ApiBody>,
  pub(crate) files: Vec<ApiFile>,
  pub(crate) has_form_data: bool,
}

pub(crate) fn convert_request_body(
  resolver: &TypeResolver<'_>,
  components: &Components,
  request_body: Option<&Referenceable<RequestBody>>,
  operation: &str,
  warnings: &mut Vec<GenerationWarning>,
) -> RequestParts {
  let request_body = match request_body {
    None => return RequestParts::default(),
    Some(Referenceable::Object(body)) => body,
    Some(Referenceable::Ref { ref_path }) => {
      let resolved = component_ref_name(ref_path, REQUEST_BODY_REF_PREFIX)
        .and_then(|name| components.request_bodies.get(name.as_str()));
      let Some(body) = resolved else {
        warnings.push(GenerationWarning::UnresolvedReference {
          context: format!("{operation}.requestBody"),
          reference: ref_path.clone(),
        });
        return RequestParts::default();
      };
      body
    }
  };

  let context = format!("{operation}.requestBody");

  if let Some(media) = find_content(&request_body.content, ContentCategory::Json) {
    let type_expr = media
      .schema
      .as_ref()
      .map_or(TypeExpr::Any, |schema| resolver.resolve(schema, &context, warnings));
    return RequestParts {
      body: Some(ApiBody {
        type_expr,
        required: request_body.required,
        description: request_body.description.clone(),
      }),
      ..RequestParts::default()
    };
  }

  if let Some(media) = find_content(&request_body.content, ContentCategory::Multipart) {
    return convert_multipart(resolver, media.schema.as_ref(), request_body, &context, warnings);
  }

  RequestParts::default()
}

/// Splits a multipart schema into file fields and, when other fields exist, a body object.
fn convert_multipart(
  resolver: &TypeResolver<'_>,
  schema: Option<&SchemaNode>,
  request_body: &RequestBody,
  context: &str,
  warnings: &mut Vec<GenerationWarning>,
) -> RequestParts {
  let mut parts = RequestParts {
    has_form_data: true,
    ..RequestParts::default()
  };

  let Some(schema) = schema else {
    return parts;
  };

  let mut visited = VisitStack::default();
  let target = match resolver.registry().dereference(schema, &mut visited) {
    Dereferenced::Schema(target) => target,
    Dereferenced::Circular(_) | Dereferenced::Unresolved => {
      warnings.push(GenerationWarning::UnresolvedReference {
        context: context.to_string(),
        reference: schema.reference().unwrap_or_default().to_string(),
      });
      return parts;
    }
  };

  let SchemaKind::Object(shape) = &target.kind else {
    return parts;
  };

  let mut fields = vec![];
  for (name, property) in &shape.properties {
    let required = shape.is_required(name);
    if let Some(multiple) = file_field(property) {
      parts.files.push(ApiFile {
        title: name.clone(),
        required,
        multiple,
      });
      continue;
    }

    fields.push(Property {
      name: name.clone(),
      type_expr: resolver.resolve(property, &format!("{context}.{name}"), warnings),
      required,
      read_only: property.meta.read_only,
      description: property.meta.documentation(),
      example: property.meta.example.clone(),
      is_index_signature: false,
    });
  }

  if !fields.is_empty() {
    parts.body = Some(ApiBody {
      type_expr: TypeExpr::Object(fields),
      required: request_body.required,
      description: request_body.description.clone(),
    });
  }

  parts
}

/// `Some(false)` for a binary string field, `Some(true)` for an array of them.
fn file_field(schema: &SchemaNode) -> Option<bool> {
  match &schema.kind {
    SchemaKind::Array(Some(items)) if items.is_binary_string() => Some(true),
    _ if schema.is_binary_string() => Some(false),
    _ => None,
  }
}

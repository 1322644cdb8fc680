//! Serializable views of generated documents handed to templates.
//!
//! Expressions are rendered to strings here so templates only place text.

use std::collections::HashSet;

use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;

use super::RenderConfig;
use crate::{
  generator::{
    ast::{ApiFile, ApiOperation, NamedType, NamedTypeKind, Property, TypeExpr},
    controllers::ControllerGroup,
  },
  naming::{
    identifiers::{is_valid_identifier, to_ts_identifier},
    operations::ensure_unique,
  },
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InterfaceBindings<'a> {
  pub(crate) namespace: &'a str,
  pub(crate) disable_type_check: bool,
  pub(crate) list: Vec<DeclarationView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum DeclarationForm {
  Interface,
  Enum,
  Alias,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeclarationView {
  pub(crate) name: String,
  pub(crate) kind: NamedTypeKind,
  pub(crate) form: DeclarationForm,
  pub(crate) doc: Option<String>,
  pub(crate) properties: Vec<PropertyView>,
  pub(crate) enum_members: Vec<EnumMemberView>,
  pub(crate) body: String,
  pub(crate) format: Option<String>,
  pub(crate) nullable: bool,
  pub(crate) example: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PropertyView {
  pub(crate) doc: Option<String>,
  pub(crate) signature: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EnumMemberView {
  pub(crate) key: String,
  pub(crate) value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ControllerBindings<'a> {
  pub(crate) namespace: &'a str,
  pub(crate) request_import: &'a str,
  pub(crate) disable_type_check: bool,
  pub(crate) tag: &'a str,
  pub(crate) operations: Vec<OperationView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OperationView {
  pub(crate) function_name: String,
  pub(crate) method: String,
  pub(crate) doc: String,
  pub(crate) arguments: Vec<String>,
  pub(crate) path: String,
  pub(crate) path_destructure: Option<String>,
  pub(crate) has_query: bool,
  pub(crate) has_header: bool,
  pub(crate) has_body: bool,
  pub(crate) form_data: bool,
  pub(crate) form_data_body: bool,
  pub(crate) files: Vec<FileView>,
  pub(crate) response_type: String,
  pub(crate) deprecated: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileView {
  /// Form field name as a string literal.
  pub(crate) field: String,
  /// Expression reading the file argument.
  pub(crate) access: String,
  pub(crate) multiple: bool,
  pub(crate) required: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IndexBindings<'a> {
  pub(crate) namespace: &'a str,
  pub(crate) controllers: Vec<ControllerView<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ControllerView<'a> {
  pub(crate) ident: String,
  pub(crate) import_path: String,
  pub(crate) tag: &'a str,
  pub(crate) operations: Vec<OperationView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FinanceCenterBindings<'a> {
  pub(crate) namespace: &'a str,
  pub(crate) request_import: &'a str,
  pub(crate) disable_type_check: bool,
  pub(crate) controllers: Vec<ControllerView<'a>>,
}

/// A `/** ... */` block indented by `indent`, one line per line of `lines`.
pub(crate) fn doc_block(lines: &[String], indent: &str) -> Option<String> {
  let lines: Vec<String> = lines
    .iter()
    .flat_map(|line| line.lines())
    .map(|line| line.trim_end().replace("*/", "*\\/"))
    .collect();

  match lines.as_slice() {
    [] => None,
    [single] => Some(format!("{indent}/** {single} */")),
    many => {
      let mut block = format!("{indent}/**\n");
      for line in many {
        if line.is_empty() {
          block.push_str(&format!("{indent} *\n"));
        } else {
          block.push_str(&format!("{indent} * {line}\n"));
        }
      }
      block.push_str(&format!("{indent} */"));
      Some(block)
    }
  }
}

fn text_doc(text: Option<&str>, indent: &str) -> Option<String> {
  text.and_then(|text| doc_block(&[text.to_string()], indent))
}

pub(crate) fn declaration_view(named_type: &NamedType) -> DeclarationView {
  let form = if named_type.kind == NamedTypeKind::Interface {
    DeclarationForm::Interface
  } else if !named_type.enum_members.is_empty() {
    DeclarationForm::Enum
  } else {
    DeclarationForm::Alias
  };

  DeclarationView {
    name: named_type.name.clone(),
    kind: named_type.kind,
    form,
    doc: text_doc(named_type.description.as_deref(), "  "),
    properties: named_type.properties.iter().map(property_view).collect(),
    enum_members: named_type
      .enum_members
      .iter()
      .map(|member| EnumMemberView {
        key: member.key.clone(),
        value: member.value.to_string(),
      })
      .collect(),
    body: named_type.alias_body(),
    format: named_type.format.clone(),
    nullable: named_type.nullable,
    example: named_type.example.clone(),
  }
}

fn property_view(property: &Property) -> PropertyView {
  PropertyView {
    doc: text_doc(property.description.as_deref(), "    "),
    signature: property.to_string(),
  }
}

pub(crate) fn interface_bindings<'a>(
  namespace: &'a str,
  declarations: &[NamedType],
  config: &RenderConfig,
) -> InterfaceBindings<'a> {
  InterfaceBindings {
    namespace,
    disable_type_check: config.disable_type_check,
    list: declarations.iter().map(declaration_view).collect(),
  }
}

pub(crate) fn controller_bindings<'a>(
  namespace: &'a str,
  group: &'a ControllerGroup,
  config: &'a RenderConfig,
) -> ControllerBindings<'a> {
  ControllerBindings {
    namespace,
    request_import: &config.request_import,
    disable_type_check: config.disable_type_check,
    tag: &group.tag,
    operations: group.operations.iter().map(operation_view).collect(),
  }
}

/// Controllers with identifiers unique across the document, in group order.
pub(crate) fn controller_views(groups: &[ControllerGroup]) -> Vec<ControllerView<'_>> {
  let mut taken = HashSet::new();
  groups
    .iter()
    .map(|group| {
      let import_path = group.import_path();
      let ident = ensure_unique(&to_ts_identifier(&import_path.replace('/', "_")), &taken);
      taken.insert(ident.clone());
      ControllerView {
        ident,
        import_path,
        tag: &group.tag,
        operations: group.operations.iter().map(operation_view).collect(),
      }
    })
    .collect()
}

pub(crate) fn index_bindings<'a>(namespace: &'a str, groups: &'a [ControllerGroup]) -> IndexBindings<'a> {
  IndexBindings {
    namespace,
    controllers: controller_views(groups),
  }
}

pub(crate) fn finance_center_bindings<'a>(
  namespace: &'a str,
  groups: &'a [ControllerGroup],
  config: &'a RenderConfig,
) -> FinanceCenterBindings<'a> {
  FinanceCenterBindings {
    namespace,
    request_import: &config.request_import,
    disable_type_check: config.disable_type_check,
    controllers: controller_views(groups),
  }
}

pub(crate) fn operation_view(operation: &ApiOperation) -> OperationView {
  let mut doc_lines: Vec<String> = operation.description.iter().cloned().collect();
  doc_lines.push(format!("{} {}", operation.method.as_upper(), operation.original_path));
  if operation.deprecated {
    doc_lines.push("@deprecated".to_string());
  }

  let json_body = operation.body.is_some() && !operation.has_form_data;

  OperationView {
    function_name: operation.function_name.clone(),
    method: operation.method.as_upper().to_string(),
    doc: doc_block(&doc_lines, "").unwrap_or_default(),
    arguments: operation_arguments(operation),
    path: operation.path_template.replace('`', "\\`"),
    path_destructure: path_destructure(operation),
    has_query: !operation.query_params.is_empty(),
    has_header: !operation.header_params.is_empty(),
    has_body: json_body,
    form_data: operation.has_form_data,
    form_data_body: operation.has_form_data && operation.body.is_some(),
    files: operation.files.iter().map(file_view).collect(),
    response_type: operation.response_type.to_string(),
    deprecated: operation.deprecated,
  }
}

/// Parameter list of the binding function.
///
/// An optional argument followed by a required one is written as `name: T | undefined`.
pub(crate) fn operation_arguments(operation: &ApiOperation) -> Vec<String> {
  let mut arguments: Vec<(&str, String, bool)> = vec![];

  if operation.has_params() {
    let any_required = operation
      .query_params
      .iter()
      .chain(&operation.path_params)
      .chain(&operation.header_params)
      .any(|param| param.required);
    let optional = !any_required;
    arguments.push(("params", operation.params_type().to_string(), optional));
  }

  if let Some(body) = &operation.body {
    arguments.push(("body", body.type_expr.render_top_level(), !body.required));
  }

  if !operation.files.is_empty() {
    let optional = operation.files.iter().all(|file| !file.required);
    arguments.push(("files", files_type(&operation.files).to_string(), optional));
  }

  arguments.push(("options", "{ [key: string]: any }".to_string(), true));

  let mut rendered = Vec::with_capacity(arguments.len());
  let mut required_follows = false;
  for (name, type_text, optional) in arguments.into_iter().rev() {
    rendered.push(match (optional, required_follows) {
      (true, false) => format!("{name}?: {type_text}"),
      (true, true) => format!("{name}: {type_text} | undefined"),
      (false, _) => format!("{name}: {type_text}"),
    });
    required_follows |= !optional;
  }
  rendered.reverse();
  rendered
}

fn files_type(files: &[ApiFile]) -> TypeExpr {
  TypeExpr::Object(
    files
      .iter()
      .map(|file| {
        let file_type = TypeExpr::Named("File".to_string());
        Property {
          name: file.title.clone(),
          type_expr: if file.multiple {
            TypeExpr::Array(Box::new(file_type))
          } else {
            file_type
          },
          required: file.required,
          read_only: false,
          description: None,
          example: None,
          is_index_signature: false,
        }
      })
      .collect(),
  )
}

fn file_view(file: &ApiFile) -> FileView {
  let field = Value::String(file.title.clone()).to_string();
  let access = if is_valid_identifier(&file.title) {
    format!("files?.{}", file.title)
  } else {
    format!("files?.[{field}]")
  };

  FileView {
    field,
    access,
    multiple: file.multiple,
    required: file.required,
  }
}

/// `{ id, "pet-id": petId }` pattern binding every path parameter to its alias.
fn path_destructure(operation: &ApiOperation) -> Option<String> {
  if operation.path_params.is_empty() {
    return None;
  }

  let bindings = operation
    .path_params
    .iter()
    .map(|param| {
      if param.alias == param.name {
        param.alias.clone()
      } else {
        format!("{}: {}", Value::String(param.name.clone()), param.alias)
      }
    })
    .join(", ");

  Some(format!("{{ {bindings} }}"))
}

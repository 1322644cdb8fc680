use std::{collections::HashSet, sync::LazyLock};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

/// Words that cannot name a declaration or a binding in the emitted TypeScript.
pub(crate) static RESERVED_WORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do", "else", "enum",
    "export", "extends", "false", "finally", "for", "function", "if", "import", "in", "instanceof", "new", "null",
    "return", "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
    "let", "static", "implements", "interface", "package", "private", "protected", "public", "await", "arguments",
    "eval",
    // Built-in type names a declaration may not shadow.
    "any", "boolean", "number", "string", "symbol", "object", "never", "unknown", "bigint", "undefined",
  ]
  .into_iter()
  .collect()
});

/// Prefix for declaration names that collide with a reserved word.
pub(crate) const RESERVED_TYPE_PREFIX: &str = "__openAPI__";
/// Prefix for names that are purely numeric or underscore-only.
pub(crate) const FALLBACK_TYPE_PREFIX: &str = "T";

static INVALID_TYPE_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_$]").unwrap());
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());
static FALLBACK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:_+|[0-9]+)$").unwrap());

/// Returns true when `name` is a legal identifier in the emitted language.
pub(crate) fn is_valid_identifier(name: &str) -> bool {
  IDENTIFIER_RE.is_match(name)
}

/// Returns true when `raw` must go through the fallback naming scheme.
pub(crate) fn needs_fallback(raw: &str) -> bool {
  FALLBACK_RE.is_match(raw)
}

/// Converts an arbitrary schema, tag or title string into a legal declaration identifier.
///
/// # Rules:
/// 1. Reserved words get the `__openAPI__` prefix.
/// 2. Purely numeric or underscore-only names get the `T` prefix.
/// 3. ASCII names keep their spelling with every character outside `[A-Za-z0-9_$]` replaced by `_`.
/// 4. Names with non-ASCII letters are transliterated and joined into one capitalized word run.
/// 5. A leading digit gets the `T` prefix; an empty result becomes `Unnamed`.
pub(crate) fn sanitize_type_name(raw: &str) -> String {
  if RESERVED_WORDS.contains(raw) {
    return format!("{RESERVED_TYPE_PREFIX}{raw}");
  }

  if needs_fallback(raw) {
    return format!("{FALLBACK_TYPE_PREFIX}{raw}");
  }

  let mut ident = if raw.is_ascii() {
    INVALID_TYPE_CHARS_RE.replace_all(raw, "_").into_owned()
  } else {
    transliterate(raw)
  };

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert_str(0, FALLBACK_TYPE_PREFIX);
  }

  ident
}

fn transliterate(raw: &str) -> String {
  any_ascii(raw)
    .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
    .filter(|word| !word.is_empty())
    .map(capitalize_first)
    .collect()
}

fn capitalize_first(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
    None => String::new(),
  }
}

/// Converts a parameter, field or operation name into a `camelCase` value identifier.
///
/// Reserved words and names starting with a digit are prefixed with `_`; an empty result becomes `_`.
pub(crate) fn to_ts_identifier(raw: &str) -> String {
  let ascii = any_ascii(raw);
  let cleaned = INVALID_TYPE_CHARS_RE.replace_all(&ascii, "_");
  let mut ident = cleaned.to_snake_case().to_camel_case();

  if ident.is_empty() {
    return "_".to_string();
  }

  if RESERVED_WORDS.contains(ident.as_str()) || ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  ident
}

/// Renders an object key, quoting it when it is not a legal identifier.
pub(crate) fn property_key(name: &str) -> String {
  if is_valid_identifier(name) {
    name.to_string()
  } else {
    serde_json::Value::String(name.to_string()).to_string()
  }
}

static INVALID_FILE_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap());

/// Converts a tag segment into a file or directory name made of `[A-Za-z0-9_-]`.
pub(crate) fn sanitize_file_stem(raw: &str) -> String {
  let ascii = any_ascii(raw.trim());
  INVALID_FILE_CHARS_RE
    .replace_all(&ascii, "_")
    .trim_matches('_')
    .to_string()
}

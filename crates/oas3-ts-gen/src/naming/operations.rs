use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use super::identifiers::{RESERVED_WORDS, is_valid_identifier, to_ts_identifier};
use crate::document::HttpMethod;

static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Function name for an operation binding.
///
/// Uses `operationId` when present, verbatim if it is already a legal non-reserved identifier and
/// camel-cased otherwise. Without one, joins method, tag and path, strips every non-word
/// character and camel-cases the result, so `GET /pets/{id}` tagged `pets` becomes `getPetsPetsId`.
pub(crate) fn operation_function_name(operation_id: Option<&str>, method: HttpMethod, tag: &str, path: &str) -> String {
  match operation_id.map(str::trim).filter(|id| !id.is_empty()) {
    Some(id) if is_valid_identifier(id) && !RESERVED_WORDS.contains(id) => id.to_string(),
    Some(id) => to_ts_identifier(id),
    None => {
      let raw = format!("{method}_{tag}_{path}");
      to_ts_identifier(&NON_WORD_RE.replace_all(&raw, "_"))
    }
  }
}

/// Returns `base` if free, otherwise the first of `base2`, `base3`, ... not in `taken`.
pub(crate) fn ensure_unique(base: &str, taken: &HashSet<String>) -> String {
  if !taken.contains(base) {
    return base.to_string();
  }

  let mut suffix = 2usize;
  loop {
    let candidate = format!("{base}{suffix}");
    if !taken.contains(&candidate) {
      return candidate;
    }
    suffix += 1;
  }
}

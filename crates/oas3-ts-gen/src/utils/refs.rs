pub(crate) const REQUEST_BODY_REF_PREFIX: &str = "#/components/requestBodies/";
pub(crate) const RESPONSE_REF_PREFIX: &str = "#/components/responses/";

/// Extracts the referenced component name from a `$ref` pointer.
///
/// The name is the last segment of the pointer with JSON pointer escapes (`~1`, `~0`) decoded.
/// Pointers without a fragment (`Pet.json`) yield their last path segment as well. Returns
/// `None` for an empty trailing segment.
pub(crate) fn ref_name(ref_path: &str) -> Option<String> {
  let segment = ref_path.rsplit('/').next().filter(|s| !s.is_empty())?;
  let segment = segment.strip_prefix('#').unwrap_or(segment);
  if segment.is_empty() {
    return None;
  }
  Some(segment.replace("~1", "/").replace("~0", "~"))
}

/// Returns the component name when `ref_path` points into the component table under `prefix`.
pub(crate) fn component_ref_name(ref_path: &str, prefix: &str) -> Option<String> {
  ref_path
    .strip_prefix(prefix)
    .filter(|rest| !rest.is_empty() && !rest.contains('/'))
    .and_then(ref_name)
}

use crate::naming::identifiers::{
  is_valid_identifier, needs_fallback, property_key, sanitize_file_stem, sanitize_type_name, to_ts_identifier,
};

#[test]
fn test_type_names() {
  let cases = [
    // Legal names keep their spelling
    ("Pet", "Pet"),
    ("pet_store", "pet_store"),
    ("$Meta", "$Meta"),
    // Illegal characters become underscores
    ("Pet-Store", "Pet_Store"),
    ("api.v1.Pet", "api_v1_Pet"),
    ("Pet Store", "Pet_Store"),
    // Reserved words get the fixed prefix
    ("string", "__openAPI__string"),
    ("default", "__openAPI__default"),
    ("interface", "__openAPI__interface"),
    // Numeric and underscore-only names go through the fallback scheme
    ("200", "T200"),
    ("__", "T__"),
    ("123Response", "T123Response"),
    ("", "Unnamed"),
  ];
  for (input, expected) in cases {
    assert_eq!(sanitize_type_name(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_type_names_transliterate_non_ascii() {
  let name = sanitize_type_name("宠物");
  assert!(name.is_ascii(), "expected ascii identifier, got {name}");
  assert!(is_valid_identifier(&name), "expected legal identifier, got {name}");
  assert!(name.starts_with(|c: char| c.is_ascii_uppercase()), "expected capitalized identifier, got {name}");

  assert_eq!(sanitize_type_name("Café"), "Cafe");
}

#[test]
fn test_sanitize_is_deterministic() {
  for input in ["宠物 列表", "Pet-Store", "1", "class"] {
    assert_eq!(sanitize_type_name(input), sanitize_type_name(input));
  }
}

#[test]
fn test_needs_fallback() {
  assert!(needs_fallback("123"));
  assert!(needs_fallback("_"));
  assert!(needs_fallback("___"));
  assert!(!needs_fallback("_1"));
  assert!(!needs_fallback("Pet"));
  assert!(!needs_fallback(""));
}

#[test]
fn test_value_identifiers() {
  let cases = [
    ("petId", "petId"),
    ("pet_id", "petId"),
    ("pet-id", "petId"),
    ("delete", "_delete"),
    ("", "_"),
  ];
  for (input, expected) in cases {
    assert_eq!(to_ts_identifier(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_value_identifier_leading_digit() {
  let ident = to_ts_identifier("1st");
  assert!(ident.starts_with('_'), "expected underscore prefix, got {ident}");
  assert!(is_valid_identifier(&ident));
}

#[test]
fn test_property_keys() {
  assert_eq!(property_key("name"), "name");
  assert_eq!(property_key("$ref"), "$ref");
  assert_eq!(property_key("content-type"), r#""content-type""#);
  assert_eq!(property_key("1abc"), r#""1abc""#);
  assert_eq!(property_key("a\"b"), r#""a\"b""#);
}

#[test]
fn test_file_stems() {
  assert_eq!(sanitize_file_stem("pet"), "pet");
  assert_eq!(sanitize_file_stem("pet store"), "pet_store");
  assert_eq!(sanitize_file_stem("user-admin"), "user-admin");
  assert_eq!(sanitize_file_stem("  "), "");
  assert!(sanitize_file_stem("宠物").is_ascii());
}

//! Component name derivation

/// Upper-case the first character, leaving the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `prefix + capitalize(base_name)`, passing every other character through
pub fn derive_component_name(prefix: &str, base_name: &str) -> String {
    format!("{}{}", prefix, capitalize(base_name))
}

/// `prefix + PascalCase(base_name)`, splitting the base name on any
/// non-alphanumeric character
///
/// A leading underscore is added when the result would otherwise start with
/// a digit.
pub fn sanitized_component_name(prefix: &str, base_name: &str) -> String {
    let words: String = base_name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();

    let name = format!("{}{}", prefix, words);
    match name.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{}", name),
        None => "_".to_string(),
        _ => name,
    }
}

/// Pick the naming scheme from the configuration
pub fn component_name(prefix: &str, base_name: &str, sanitize: bool) -> String {
    if sanitize {
        sanitized_component_name(prefix, base_name)
    } else {
        derive_component_name(prefix, base_name)
    }
}

/// Whether `name` can be used as a JavaScript binding
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

//! Association of selected member properties with their dimensions.
//!
//! Properties arrive tagged as `<dimension unique name>.<property name>`,
//! e.g. `[Store].[Store Name].[Store Sqft]`. A property belongs to the
//! dimension it starts with.

/// Pick the property that belongs to `dimension`.
///
/// Candidates are scanned in order and the last one starting with the
/// dimension wins. If that winner is empty there is no match.
pub fn match_property<'a, S: AsRef<str>>(dimension: &str, properties: &'a [S]) -> Option<&'a str> {
    properties
        .iter()
        .map(|p| p.as_ref())
        .filter(|p: &&str| p.starts_with(dimension))
        .last()
        .filter(|p| !p.is_empty())
}

/// Strip the dimension prefix from a tagged property.
///
/// The longest common prefix of `dimension + "."` and `property` is removed.
pub fn property_name<'a>(dimension: &str, property: &'a str) -> &'a str {
    let prefix = format!("{}.", dimension);
    let common = prefix
        .char_indices()
        .zip(property.chars())
        .take_while(|((_, a), b)| a == b)
        .last()
        .map_or(0, |((i, c), _)| i + c.len_utf8());
    &property[common..]
}

/// Resolve the bare property name to embed for `dimension`, if any.
pub fn resolve_property<S: AsRef<str>>(dimension: &str, properties: &[S]) -> Option<String> {
    match_property(dimension, properties).map(|p| property_name(dimension, p).to_string())
}

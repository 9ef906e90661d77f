/// Convert a hyphen/underscore-delimited file stem into a Pascal-cased
/// component name: `arrow-up-circle` becomes `ArrowUpCircle`.
///
/// Each token's first character is uppercased and the remainder kept as-is,
/// so re-applying the function to delimiter-free output is a no-op. Icon
/// stems are kebab-case ASCII words; anything else passes through unescaped.
pub fn to_component_name(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|token| !token.is_empty())
        .map(capitalize)
        .collect()
}

/// Identifier for a generated name constant.
///
/// Shares the Pascal casing of [`to_component_name`]: C# constant members
/// are Pascal-cased, so the component and constant rules coincide.
pub fn to_constant_name(stem: &str) -> String {
    to_component_name(stem)
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

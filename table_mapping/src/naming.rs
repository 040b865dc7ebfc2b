//! Naming convention translation
//!
//! Columns use `snake_case`, record fields use `PascalCase`. The two
//! functions here are approximate inverses: a round trip is exact for names
//! made of capitalized words without digits at case boundaries.

/// `user_name` -> `UserName`
pub fn to_field_convention(column_name: &str) -> String {
    let mut camel = String::with_capacity(column_name.len());
    let mut chars = column_name.chars();

    while let Some(c) = chars.next() {
        if c != '_' {
            camel.push(c);
            continue;
        }
        // An underscore swallows the following character, upper-casing it
        match chars.next() {
            Some(next) => camel.extend(next.to_uppercase()),
            None => camel.push('_'),
        }
    }

    let mut rest = camel.chars();
    match rest.next() {
        Some(first) => first.to_uppercase().chain(rest).collect(),
        None => camel,
    }
}

/// `UserName` -> `user_name`
pub fn to_column_convention(field_name: &str) -> String {
    let mut dash = String::with_capacity(field_name.len() + 4);
    for c in field_name.chars() {
        if c.is_ascii_uppercase() {
            dash.push('_');
            dash.push(c.to_ascii_lowercase());
        } else {
            dash.push(c);
        }
    }
    dash.trim_start_matches('_').to_string()
}

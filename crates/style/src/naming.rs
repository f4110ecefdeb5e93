//! Backend parameter naming.
//!
//! Style fields are declared in snake case and handed to the backend in camel
//! case. Fields of a nested group get the group name attached: as a prefix for
//! most groups (`bullet.font_name` → `bulletFontName`) but as a suffix for the
//! `indent` group (`indent.first_line` → `firstLineIndent`).

/// The one group whose name trails its fields.
const SUFFIXED_GROUP: &str = "indent";

/// Converts `field` to camel case, optionally attaching a `parent` namespace.
///
/// With `swap`, the parent moves to the end:
///
/// * `("camel_case", None, false)` → `camelCase`
/// * `("color", Some("bullet"), false)` → `bulletColor`
/// * `("left", Some("indent"), true)` → `leftIndent`
pub fn to_camel_case(field: &str, parent: Option<&str>, swap: bool) -> String {
    let mut parts: Vec<&str> = field.split('_').collect();
    let mut head = match parent {
        Some(parent) => parent,
        None => parts.remove(0),
    };

    if swap && parent.is_some() {
        let first = parts.remove(0);
        parts.push(head);
        head = first;
    }

    let mut name = head.to_string();
    for part in parts {
        name.push_str(&title_case(part));
    }
    name
}

/// The backend-visible name of `field`, declared in `group` (if nested).
pub fn parameter_name(group: Option<&str>, field: &str) -> String {
    to_camel_case(field, group, group == Some(SUFFIXED_GROUP))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

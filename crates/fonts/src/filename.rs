//! Conversion of font family names into cache directory names.

/// Converts `name` into a string usable as a single path component.
///
/// Surrounding whitespace is removed, inner whitespace becomes `_`, and every
/// character that is not alphanumeric, `-`, `_` or `.` is dropped. Returns
/// `None` when the result is empty, `.`, `..`, ends in `.`, or is a reserved
/// device name on Windows.
pub fn safe_filename(name: &str) -> Option<String> {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." || cleaned.ends_with('.') {
        return None;
    }
    if cfg!(windows) && is_reserved_on_windows(&cleaned) {
        return None;
    }
    Some(cleaned)
}

fn is_reserved_on_windows(name: &str) -> bool {
    match name {
        "CON" | "PRN" | "AUX" | "NUL" => true,
        _ => ["COM", "LPT"].iter().any(|prefix| {
            name.strip_prefix(prefix)
                .is_some_and(|n| n.len() == 1 && matches!(n.as_bytes()[0], b'1'..=b'9'))
        }),
    }
}

//! The set of resolved styles declared by one configuration.

use crate::config::StyleConfig;
use crate::error::StyleError;
use crate::resolved::ResolvedStyle;
use std::collections::HashMap;
use std::sync::Arc;
use styled_prose_config::ConfigTable;

/// The style used when a caller does not name one.
pub const DEFAULT_STYLE_NAME: &str = "default";

/// A mapping from style name to resolved style.
///
/// Always contains a [`DEFAULT_STYLE_NAME`] entry: either the declared one, or
/// one synthesized from built-in defaults.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    styles: HashMap<String, Arc<ResolvedStyle>>,
    /// Style names in declaration order; a synthesized default comes last.
    order: Vec<String>,
}

impl StyleSheet {
    /// Validates and resolves the declared style tables in order.
    ///
    /// Fails on the first style that is unnamed, duplicated, or invalid; no
    /// stylesheet is produced in that case.
    pub fn from_tables(tables: &[ConfigTable]) -> Result<Self, StyleError> {
        let mut styles: HashMap<String, Arc<ResolvedStyle>> = HashMap::new();
        let mut order = Vec::with_capacity(tables.len() + 1);

        for (index, table) in tables.iter().enumerate() {
            let name = table
                .get("name")
                .and_then(|v| v.as_str())
                .ok_or(StyleError::MissingName { index })?;

            if styles.contains_key(name) {
                return Err(StyleError::Duplicate(name.to_string()));
            }

            let config = StyleConfig::from_table(name, table)?;
            styles.insert(name.to_string(), Arc::new(ResolvedStyle::from(&config)));
            order.push(name.to_string());
        }

        if !styles.contains_key(DEFAULT_STYLE_NAME) {
            log::debug!("No '{}' style declared, using built-in defaults", DEFAULT_STYLE_NAME);
            styles.insert(
                DEFAULT_STYLE_NAME.to_string(),
                Arc::new(ResolvedStyle::with_defaults(DEFAULT_STYLE_NAME)),
            );
            order.push(DEFAULT_STYLE_NAME.to_string());
        }

        Ok(Self { styles, order })
    }

    /// A stylesheet holding only the built-in default style.
    pub fn builtin() -> Self {
        let default = Arc::new(ResolvedStyle::with_defaults(DEFAULT_STYLE_NAME));
        Self {
            styles: HashMap::from([(DEFAULT_STYLE_NAME.to_string(), default)]),
            order: vec![DEFAULT_STYLE_NAME.to_string()],
        }
    }

    /// Looks up a style by name.
    pub fn get(&self, name: &str) -> Option<&Arc<ResolvedStyle>> {
        self.styles.get(name)
    }

    /// Looks up a style by name, failing with [`StyleError::UnknownStyle`].
    pub fn require(&self, name: &str) -> Result<&Arc<ResolvedStyle>, StyleError> {
        self.get(name)
            .ok_or_else(|| StyleError::UnknownStyle(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Style names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn tables(value: Value) -> Vec<ConfigTable> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => panic!("test fixture must be an array"),
        }
    }

    #[test]
    fn test_empty_list_synthesizes_default() {
        let sheet = StyleSheet::from_tables(&[]).unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(
            **sheet.get(DEFAULT_STYLE_NAME).unwrap(),
            ResolvedStyle::with_defaults(DEFAULT_STYLE_NAME)
        );
    }

    #[test]
    fn test_declared_default_is_kept() {
        let sheet = StyleSheet::from_tables(&tables(json!([
            { "name": "default", "font_size": 14, "font_name": "Arial" }
        ])))
        .unwrap();

        let default = sheet.require("default").unwrap();
        assert_eq!(default.font_size, 14);
        assert_eq!(default.font_name, "Arial");
        assert_eq!(default.leading, 16);
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_names_follow_declaration_order() {
        let sheet = StyleSheet::from_tables(&tables(json!([
            { "name": "title" },
            { "name": "body" }
        ])))
        .unwrap();
        assert_eq!(sheet.names().collect::<Vec<_>>(), ["title", "body", "default"]);
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = StyleSheet::from_tables(&tables(json!([
            { "name": "body" },
            { "name": "title" },
            { "name": "body", "font_size": 9 }
        ])))
        .unwrap_err();
        assert_eq!(err, StyleError::Duplicate("body".to_string()));
        assert!(err.to_string().contains("'body' was listed at least twice"));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = StyleSheet::from_tables(&tables(json!([{ "name": "a" }, { "font_size": 9 }]))).unwrap_err();
        assert_eq!(err, StyleError::MissingName { index: 1 });

        let err = StyleSheet::from_tables(&tables(json!([{ "name": 4 }]))).unwrap_err();
        assert_eq!(err, StyleError::MissingName { index: 0 });
    }

    #[test]
    fn test_invalid_style_fails_whole_sheet() {
        let err = StyleSheet::from_tables(&tables(json!([
            { "name": "ok" },
            { "name": "bad", "alignment": "sideways" }
        ])))
        .unwrap_err();
        assert_eq!(err.style_name(), Some("bad"));
    }

    #[test]
    fn test_unknown_style_lookup() {
        let sheet = StyleSheet::builtin();
        assert!(sheet.contains("default"));
        assert_eq!(
            sheet.require("fancy").unwrap_err(),
            StyleError::UnknownStyle("fancy".to_string())
        );
    }
}

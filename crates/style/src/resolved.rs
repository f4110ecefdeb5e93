//! Fully-defaulted, backend-ready paragraph styles.

use crate::config::StyleConfig;
use crate::naming::parameter_name;
use crate::text::{BulletAnchor, TextAlign, TextDirection};
use serde::Serialize;
use std::collections::BTreeMap;
use styled_prose_types::Color;

/// Single spacing, as a multiple of the font size.
pub const SINGLE_SPACING: f64 = 1.15;

/// A flat, fully-defaulted paragraph style.
///
/// Everything a rendering backend needs is present; nothing is inherited or
/// looked up later.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub name: String,
    pub font_name: String,
    pub font_size: u32,
    pub font_color: Color,
    pub leading: u32,
    pub space_before: i32,
    pub space_after: i32,
    pub left_indent: i32,
    pub right_indent: i32,
    pub first_line_indent: i32,
    pub alignment: TextAlign,
    pub word_wrap: Option<TextDirection>,
    pub split_long_words: bool,
    pub allow_widows: bool,
    pub allow_orphans: bool,
    pub bullet_font_name: String,
    pub bullet_font_size: u32,
    pub bullet_indent: i32,
    pub bullet_anchor: BulletAnchor,
}

/// A single backend parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Bool(bool),
    Color(Color),
}

/// Leading for a font size when no line height is declared: 115% of the
/// size, rounded half-to-even.
pub fn default_leading(font_size: u32) -> u32 {
    (f64::from(font_size) * SINGLE_SPACING).round_ties_even() as u32
}

impl From<&StyleConfig> for ResolvedStyle {
    fn from(config: &StyleConfig) -> Self {
        Self {
            name: config.name.clone(),
            font_name: config.font_name.clone(),
            font_size: config.font_size,
            font_color: config.font_color,
            leading: config
                .line_height
                .unwrap_or_else(|| default_leading(config.font_size)),
            space_before: config.space_before,
            space_after: config.space_after,
            left_indent: config.indent.left,
            right_indent: config.indent.right,
            first_line_indent: config.indent.first_line,
            alignment: config.alignment,
            word_wrap: config.text_direction,
            split_long_words: config.split_long_words,
            allow_widows: config.allow_widows,
            allow_orphans: config.allow_orphans,
            bullet_font_name: config
                .bullet
                .font_name
                .clone()
                .unwrap_or_else(|| config.font_name.clone()),
            bullet_font_size: config.bullet.font_size.unwrap_or(config.font_size),
            bullet_indent: config.bullet.indent,
            bullet_anchor: config.bullet.anchor,
        }
    }
}

impl ResolvedStyle {
    /// The built-in default style under `name`.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self::from(&StyleConfig::named(name))
    }

    /// The flat parameter map handed to the rendering backend, keyed by the
    /// backend's camel-case names.
    pub fn parameters(&self) -> BTreeMap<String, ParamValue> {
        let mut params = BTreeMap::new();
        let mut put = |group: Option<&str>, field: &str, value: ParamValue| {
            params.insert(parameter_name(group, field), value);
        };

        put(None, "name", ParamValue::Text(self.name.clone()));
        put(None, "font_name", ParamValue::Text(self.font_name.clone()));
        put(None, "font_size", ParamValue::Int(self.font_size.into()));
        put(None, "font_color", ParamValue::Color(self.font_color));
        put(None, "leading", ParamValue::Int(self.leading.into()));
        put(None, "space_before", ParamValue::Int(self.space_before.into()));
        put(None, "space_after", ParamValue::Int(self.space_after.into()));
        put(None, "alignment", ParamValue::Int(self.alignment.code()));
        if let Some(direction) = self.word_wrap {
            put(None, "word_wrap", ParamValue::Text(direction.word_wrap_code().to_string()));
        }
        put(None, "split_long_words", ParamValue::Bool(self.split_long_words));
        put(None, "allow_widows", ParamValue::Bool(self.allow_widows));
        put(None, "allow_orphans", ParamValue::Bool(self.allow_orphans));

        put(Some("indent"), "left", ParamValue::Int(self.left_indent.into()));
        put(Some("indent"), "right", ParamValue::Int(self.right_indent.into()));
        put(Some("indent"), "first_line", ParamValue::Int(self.first_line_indent.into()));

        put(Some("bullet"), "font_name", ParamValue::Text(self.bullet_font_name.clone()));
        put(Some("bullet"), "font_size", ParamValue::Int(self.bullet_font_size.into()));
        put(Some("bullet"), "indent", ParamValue::Int(self.bullet_indent.into()));
        put(Some("bullet"), "anchor", ParamValue::Text(self.bullet_anchor.as_str().to_string()));

        params
    }
}

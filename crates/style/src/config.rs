//! User-declared style options, validated but not yet defaulted against each
//! other.

use crate::error::StyleError;
use crate::text::{BulletAnchor, TextAlign, TextDirection};
use styled_prose_config::{ConfigTable, FieldReader};
use styled_prose_types::Color;

pub const DEFAULT_FONT_NAME: &str = "Times";
pub const DEFAULT_FONT_SIZE: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indent {
    pub left: i32,
    pub right: i32,
    pub first_line: i32,
}

/// List-bullet options. Unset font name/size follow the parent style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bullet {
    pub font_name: Option<String>,
    pub font_size: Option<u32>,
    pub indent: i32,
    pub anchor: BulletAnchor,
}

/// One `[[styles]]` entry after validation.
///
/// ```toml
/// [[styles]]
/// name = "default"
/// font_size = 14
/// font_name = "EB Garamond"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub name: String,
    pub font_name: String,
    pub font_size: u32,
    pub font_color: Color,
    /// Absolute line height in points; `None` means single spacing.
    pub line_height: Option<u32>,
    pub space_before: i32,
    pub space_after: i32,
    pub indent: Indent,
    pub alignment: TextAlign,
    pub text_direction: Option<TextDirection>,
    pub split_long_words: bool,
    /// A widow is a paragraph's last line carried over alone to a new page.
    pub allow_widows: bool,
    /// An orphan is a paragraph's first line left alone at the bottom of a page.
    pub allow_orphans: bool,
    pub bullet: Bullet,
}

impl StyleConfig {
    /// A style with every option at its built-in default.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            font_name: DEFAULT_FONT_NAME.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_color: Color::BLACK,
            line_height: None,
            space_before: 0,
            space_after: 0,
            indent: Indent::default(),
            alignment: TextAlign::Left,
            text_direction: Some(TextDirection::Ltr),
            split_long_words: false,
            allow_widows: true,
            allow_orphans: true,
            bullet: Bullet::default(),
        }
    }

    /// Validates a declared style table.
    ///
    /// Every field is checked before anything is returned, so the error lists
    /// all misconfigurations of the style at once.
    pub fn from_table(name: &str, table: &ConfigTable) -> Result<Self, StyleError> {
        let mut style = Self::named(name);
        let mut reader = FieldReader::new(table);

        // identity is taken by the caller; read it only to mark it as known
        let _ = reader.string("name");

        if let Some(v) = reader.string("font_name") {
            style.font_name = v;
        }
        if let Some(v) = reader.positive("font_size") {
            style.font_size = v;
        }
        if let Some(v) = reader.parsed("font_color", str::parse::<Color>) {
            style.font_color = v;
        }
        style.line_height = reader.positive("line_height");
        if let Some(v) = reader.integer("space_before") {
            style.space_before = v;
        }
        if let Some(v) = reader.integer("space_after") {
            style.space_after = v;
        }
        if let Some(v) = reader.parsed("alignment", str::parse::<TextAlign>) {
            style.alignment = v;
        }

        // an explicit null switches word wrapping off
        let direction = reader.parsed("text_direction", str::parse::<TextDirection>);
        if table.get("text_direction").is_some_and(|v| v.is_null()) {
            style.text_direction = None;
        } else if direction.is_some() {
            style.text_direction = direction;
        }

        if let Some(v) = reader.boolean("split_long_words") {
            style.split_long_words = v;
        }
        if let Some(v) = reader.boolean("allow_widows") {
            style.allow_widows = v;
        }
        if let Some(v) = reader.boolean("allow_orphans") {
            style.allow_orphans = v;
        }

        if let Some(indent) = reader.group("indent", read_indent) {
            style.indent = indent;
        }
        if let Some(bullet) = reader.group("bullet", read_bullet) {
            style.bullet = bullet;
        }

        reader.finish().map_err(|failures| StyleError::Invalid {
            name: name.to_string(),
            failures,
        })?;

        Ok(style)
    }
}

fn read_indent(reader: &mut FieldReader<'_>) -> Indent {
    let mut indent = Indent::default();
    if let Some(v) = reader.integer("left") {
        indent.left = v;
    }
    if let Some(v) = reader.integer("right") {
        indent.right = v;
    }
    if let Some(v) = reader.integer("first_line") {
        indent.first_line = v;
    }
    indent
}

fn read_bullet(reader: &mut FieldReader<'_>) -> Bullet {
    Bullet {
        font_name: reader.string("font_name"),
        font_size: reader.positive("font_size"),
        indent: reader.integer("indent").unwrap_or(0),
        anchor: reader
            .parsed("anchor", str::parse::<BulletAnchor>)
            .unwrap_or_default(),
    }
}

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a `#RRGGBB` color string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Colors must begin with '#', got: '{0}'")]
    MissingHash(String),

    #[error("Colors must be a '#' followed by exactly 6 hex digits, got: '{0}'")]
    InvalidHex(String),
}

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a strict `#RRGGBB` hex string.
    fn parse_hex(s: &str) -> Result<Color, ColorParseError> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(s.to_string()));
        }

        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError::InvalidHex(s.to_string()))
        };

        Ok(Color {
            r: component(0..2)?,
            g: component(2..4)?,
            b: component(4..6)?,
        })
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        let color: Color = "#ff00Ff".parse().unwrap();
        assert_eq!(color, Color::new(255, 0, 255));
    }

    #[test]
    fn test_parse_black_default() {
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::default());
    }

    #[test]
    fn test_rejects_missing_hash() {
        assert_eq!(
            "ff00ff".parse::<Color>(),
            Err(ColorParseError::MissingHash("ff00ff".to_string()))
        );
    }

    #[test]
    fn test_rejects_short_and_long_forms() {
        assert!(matches!("#fff".parse::<Color>(), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!("#ff00ff00".parse::<Color>(), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!("#".parse::<Color>(), Err(ColorParseError::InvalidHex(_))));
    }

    #[test]
    fn test_rejects_non_hex_digits() {
        assert!(matches!("#gg0000".parse::<Color>(), Err(ColorParseError::InvalidHex(_))));
        // multi-byte characters must not panic on slicing
        assert!(matches!("#ééé".parse::<Color>(), Err(ColorParseError::InvalidHex(_))));
    }

    #[test]
    fn test_display_round_trips_lowercase() {
        assert_eq!(Color::new(1, 171, 255).to_string(), "#01abff");
    }
}

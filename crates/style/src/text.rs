use std::fmt;
use std::str::FromStr;

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    /// The integer alignment code the rendering backend expects.
    pub fn code(self) -> i64 {
        match self {
            TextAlign::Left => 0,
            TextAlign::Center => 1,
            TextAlign::Right => 2,
            TextAlign::Justify => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

impl FromStr for TextAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            "justify" => Ok(TextAlign::Justify),
            _ => Err(format!(
                "Invalid alignment '{}': expected one of 'left', 'center', 'right', 'justify'",
                s
            )),
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reading direction, which drives how the backend wraps words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
    /// Chinese, Japanese, or Korean.
    Cjk,
}

impl TextDirection {
    /// The word-wrap code handed to the backend.
    pub fn word_wrap_code(self) -> &'static str {
        match self {
            TextDirection::Ltr => "LTR",
            TextDirection::Rtl => "RTL",
            TextDirection::Cjk => "CJK",
        }
    }
}

impl FromStr for TextDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ltr" => Ok(TextDirection::Ltr),
            "rtl" => Ok(TextDirection::Rtl),
            "cjk" => Ok(TextDirection::Cjk),
            _ => Err(format!(
                "Invalid text direction '{}': expected one of 'ltr', 'rtl', 'cjk'",
                s
            )),
        }
    }
}

/// Where a bullet sits relative to its indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BulletAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl BulletAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            BulletAnchor::Start => "start",
            BulletAnchor::Middle => "middle",
            BulletAnchor::End => "end",
        }
    }
}

impl FromStr for BulletAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(BulletAnchor::Start),
            "middle" => Ok(BulletAnchor::Middle),
            "end" => Ok(BulletAnchor::End),
            _ => Err(format!(
                "Invalid bullet anchor '{}': expected one of 'start', 'middle', 'end'",
                s
            )),
        }
    }
}

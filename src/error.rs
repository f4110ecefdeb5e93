// src/error.rs
use styled_prose_config::ConfigError;
use styled_prose_fonts::FontError;
use styled_prose_style::StyleError;
use styled_prose_thumbnail::ThumbnailError;
use styled_prose_traits::RenderError;
use thiserror::Error;

/// Every failure a generator can report.
#[derive(Error, Debug)]
pub enum ProseError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Style(StyleError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Thumbnail failed: {0}")]
    Thumbnail(#[from] ThumbnailError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown paragraph style '{0}'")]
    UnknownStyle(String),
}

impl From<StyleError> for ProseError {
    fn from(e: StyleError) -> Self {
        match e {
            StyleError::UnknownStyle(name) => ProseError::UnknownStyle(name),
            other => ProseError::Style(other),
        }
    }
}

impl ProseError {
    /// `true` for mistakes in how the generator was called rather than in
    /// the configuration or the environment.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ProseError::UnknownStyle(_) | ProseError::Font(FontError::UnsafeFamilyName(_))
        )
    }
}

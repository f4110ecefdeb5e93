use styled_prose_config::FieldErrors;
use thiserror::Error;

/// Errors raised while validating or resolving paragraph styles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Invalid paragraph style '{name}'! Misconfigurations are listed below:\n{failures}")]
    Invalid { name: String, failures: FieldErrors },

    #[error("All styles must be unique, but '{0}' was listed at least twice!")]
    Duplicate(String),

    #[error("The style at position {index} has no string `name`; every style must be named")]
    MissingName { index: usize },

    #[error("Unknown style '{0}'")]
    UnknownStyle(String),
}

impl StyleError {
    /// The name of the style the error concerns, if it has one.
    pub fn style_name(&self) -> Option<&str> {
        match self {
            StyleError::Invalid { name, .. } => Some(name),
            StyleError::Duplicate(name) | StyleError::UnknownStyle(name) => Some(name),
            StyleError::MissingName { .. } => None,
        }
    }
}

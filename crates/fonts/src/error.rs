use crate::catalog::CatalogError;
use styled_prose_config::FieldErrors;
use styled_prose_traits::BackendError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Invalid font family '{family}'! Misconfigurations are listed below:\n{failures}")]
    Invalid { family: String, failures: FieldErrors },

    #[error("Unable to convert the font family name '{0}' into a filename")]
    UnsafeFamilyName(String),

    #[error(
        "Failed to download font family '{family}' from Google Fonts. Are you sure it is available? ({source})"
    )]
    Fetch {
        family: String,
        #[source]
        source: CatalogError,
    },

    #[error("Malformed font catalog response for '{family}': {message}")]
    Manifest { family: String, message: String },

    #[error("Font cache I/O error for '{family}' at {path}: {source}")]
    Io {
        family: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to register font family '{family}': {source}")]
    Backend {
        family: String,
        #[source]
        source: BackendError,
    },

    #[error("No home directory available for the default font cache")]
    NoCacheDir,
}

impl FontError {
    /// The font family the failure concerns, when known.
    pub fn family(&self) -> Option<&str> {
        match self {
            FontError::Invalid { family, .. }
            | FontError::Fetch { family, .. }
            | FontError::Manifest { family, .. }
            | FontError::Io { family, .. }
            | FontError::Backend { family, .. } => Some(family),
            FontError::UnsafeFamilyName(family) => Some(family),
            FontError::NoCacheDir => None,
        }
    }

    pub(crate) fn io(family: &str, path: &std::path::Path, source: std::io::Error) -> Self {
        FontError::Io {
            family: family.to_string(),
            path: path.display().to_string(),
            source,
        }
    }
}

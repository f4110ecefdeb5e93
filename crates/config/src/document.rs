use crate::ConfigTable;
use crate::error::ConfigError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A decoded configuration document.
///
/// Holds the raw `fonts` and `styles` tables in file order; validation of the
/// individual entries belongs to the font and style crates. The file path is
/// kept as the document's identity for resolution caches and as the base
/// directory for relative font paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    path: PathBuf,
    fonts: Vec<ConfigTable>,
    styles: Vec<ConfigTable>,
}

impl ConfigDocument {
    /// Reads and decodes the TOML document at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        log::debug!("Loaded config '{}' ({} bytes)", path.display(), source.len());
        Self::from_toml_str(&source, path)
    }

    /// Decodes a TOML document; `path` is used for identity and relative paths.
    pub fn from_toml_str(source: &str, path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let value: Value = toml::from_str(source).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_value(value, path)
    }

    /// Builds a document from an already-decoded mapping.
    pub fn from_value(value: Value, path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let shape_error = |message: String| ConfigError::Shape {
            path: path.display().to_string(),
            message,
        };

        let Value::Object(mut root) = value else {
            return Err(shape_error("the document root must be a table".to_string()));
        };

        let fonts = take_tables(&mut root, "fonts").map_err(&shape_error)?;
        let styles = take_tables(&mut root, "styles").map_err(&shape_error)?;

        for key in root.keys() {
            log::warn!("Ignoring unknown top-level key '{}' in '{}'", key, path.display());
        }

        Ok(Self { path, fonts, styles })
    }

    /// An empty document (no fonts, no styles) identified by `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fonts: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory relative font paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn fonts(&self) -> &[ConfigTable] {
        &self.fonts
    }

    pub fn styles(&self) -> &[ConfigTable] {
        &self.styles
    }
}

fn take_tables(root: &mut ConfigTable, key: &str) -> Result<Vec<ConfigTable>, String> {
    let Some(value) = root.remove(key) else {
        return Ok(Vec::new());
    };

    let Value::Array(items) = value else {
        return Err(format!("`{}` must be an array of tables", key));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(table) => Ok(table),
            _ => Err(format!("`{}[{}]` must be a table", key, index)),
        })
        .collect()
}

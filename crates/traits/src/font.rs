//! FontBackend trait for handing resolved font files to a rendering backend.
//!
//! The registry decides *which* files make up a family; the backend owns
//! whatever font objects it builds from them.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for backend font registration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Font file for '{name}' not found: {path}")]
    NotFound { name: String, path: String },

    #[error("Failed to load font '{name}' from {path}: {message}")]
    InvalidFont {
        name: String,
        path: String,
        message: String,
    },

    #[error("Family '{family}' refers to unregistered font '{font}'")]
    UnknownFont { family: String, font: String },
}

/// The registered font ids that make up one family.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FamilyMembers {
    pub normal: String,
    pub bold: Option<String>,
    pub italic: Option<String>,
    pub bold_italic: Option<String>,
}

impl FamilyMembers {
    pub fn new(normal: impl Into<String>) -> Self {
        Self {
            normal: normal.into(),
            ..Default::default()
        }
    }

    /// Every member id, regular first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.normal.as_str()).chain(
            [&self.bold, &self.italic, &self.bold_italic]
                .into_iter()
                .filter_map(|id| id.as_deref()),
        )
    }

    /// The member for a weight/slant combination, if registered.
    pub fn member(&self, bold: bool, italic: bool) -> Option<&str> {
        match (bold, italic) {
            (false, false) => Some(&self.normal),
            (true, false) => self.bold.as_deref(),
            (false, true) => self.italic.as_deref(),
            (true, true) => self.bold_italic.as_deref(),
        }
    }
}

/// A rendering backend that font files can be registered with.
pub trait FontBackend: Debug {
    /// Loads the font file at `path` under the id `name`.
    fn register_font(&mut self, name: &str, path: &Path) -> Result<(), BackendError>;

    /// Groups previously registered fonts into a family.
    fn register_family(&mut self, family: &str, members: &FamilyMembers)
    -> Result<(), BackendError>;

    /// Forgets a font registered under `name`. Unknown names are ignored.
    fn unregister_font(&mut self, name: &str);

    /// Forgets the family `family` together with every font it groups.
    /// Unknown families are ignored.
    fn unregister_family(&mut self, family: &str);

    /// Returns a human-readable name for this backend (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A backend that records registrations without loading any font data.
///
/// Font files must exist on disk; their contents are not inspected.
#[derive(Debug, Default)]
pub struct InMemoryFontBackend {
    fonts: HashMap<String, PathBuf>,
    families: HashMap<String, FamilyMembers>,
    rejected: HashSet<String>,
    registrations: usize,
}

impl InMemoryFontBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later registration under `name` fail as an invalid font.
    pub fn reject(mut self, name: impl Into<String>) -> Self {
        self.rejected.insert(name.into());
        self
    }

    pub fn font_path(&self, name: &str) -> Option<&Path> {
        self.fonts.get(name).map(PathBuf::as_path)
    }

    pub fn family(&self, family: &str) -> Option<&FamilyMembers> {
        self.families.get(family)
    }

    pub fn has_font(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    /// Number of currently registered fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Total successful `register_font` calls, including ones later undone.
    pub fn registrations(&self) -> usize {
        self.registrations
    }
}

impl FontBackend for InMemoryFontBackend {
    fn register_font(&mut self, name: &str, path: &Path) -> Result<(), BackendError> {
        if !path.is_file() {
            return Err(BackendError::NotFound {
                name: name.to_string(),
                path: path.display().to_string(),
            });
        }
        if self.rejected.contains(name) {
            return Err(BackendError::InvalidFont {
                name: name.to_string(),
                path: path.display().to_string(),
                message: "rejected".to_string(),
            });
        }
        self.fonts.insert(name.to_string(), path.to_path_buf());
        self.registrations += 1;
        Ok(())
    }

    fn register_family(
        &mut self,
        family: &str,
        members: &FamilyMembers,
    ) -> Result<(), BackendError> {
        if let Some(missing) = members.ids().find(|id| !self.fonts.contains_key(*id)) {
            return Err(BackendError::UnknownFont {
                family: family.to_string(),
                font: missing.to_string(),
            });
        }
        self.families.insert(family.to_string(), members.clone());
        Ok(())
    }

    fn unregister_font(&mut self, name: &str) {
        self.fonts.remove(name);
    }

    fn unregister_family(&mut self, family: &str) {
        if let Some(members) = self.families.remove(family) {
            for id in members.ids() {
                self.fonts.remove(id);
            }
        }
    }

    fn name(&self) -> &'static str {
        "InMemoryFontBackend"
    }
}

//! A [`FontBackend`] that loads registered files into a `fontdb::Database`.

use std::collections::HashMap;
use std::path::Path;
use styled_prose_traits::{BackendError, FamilyMembers, FontBackend};

#[derive(Debug, Default)]
pub struct FontdbBackend {
    db: fontdb::Database,
    /// Registered font id → faces loaded from its file.
    fonts: HashMap<String, Vec<fontdb::ID>>,
    families: HashMap<String, FamilyMembers>,
}

impl FontdbBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database(&self) -> &fontdb::Database {
        &self.db
    }

    pub fn family(&self, family: &str) -> Option<&FamilyMembers> {
        self.families.get(family)
    }

    /// The face to use for `family` at the given weight/slant, falling back
    /// to the regular face when that combination was not registered.
    pub fn face_for(&self, family: &str, bold: bool, italic: bool) -> Option<fontdb::ID> {
        let members = self.families.get(family)?;
        let id = members
            .member(bold, italic)
            .unwrap_or(members.normal.as_str());
        self.fonts.get(id)?.first().copied()
    }

    /// The face registered directly under `name`.
    pub fn font(&self, name: &str) -> Option<fontdb::ID> {
        self.fonts.get(name)?.first().copied()
    }
}

impl FontBackend for FontdbBackend {
    fn register_font(&mut self, name: &str, path: &Path) -> Result<(), BackendError> {
        if !path.is_file() {
            return Err(BackendError::NotFound {
                name: name.to_string(),
                path: path.display().to_string(),
            });
        }

        let ids: Vec<fontdb::ID> = self
            .db
            .load_font_source(fontdb::Source::File(path.to_path_buf()))
            .into_iter()
            .collect();
        if ids.is_empty() {
            return Err(BackendError::InvalidFont {
                name: name.to_string(),
                path: path.display().to_string(),
                message: "no usable font faces".to_string(),
            });
        }

        log::debug!("Loaded {} face(s) for '{}' from {}", ids.len(), name, path.display());
        if let Some(previous) = self.fonts.insert(name.to_string(), ids) {
            for id in previous {
                self.db.remove_face(id);
            }
        }
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
        if let Some(ids) = self.fonts.remove(name) {
            for id in ids {
                self.db.remove_face(id);
            }
        }
    }

    fn unregister_family(&mut self, family: &str) {
        if let Some(members) = self.families.remove(family) {
            for id in members.ids() {
                self.unregister_font(id);
            }
        }
    }

    fn name(&self) -> &'static str {
        "FontdbBackend"
    }
}

//! The on-disk cache of remotely fetched font families.
//!
//! Layout: `<root>/<safe family name>/manifest.json`, one file per inline
//! manifest entry, plus `regular.ttf`, `bold.ttf`, `italic.ttf` and
//! `bolditalic.ttf`. Nothing is ever invalidated; every write is guarded by
//! an existence check so concurrent processes converge.

use crate::catalog::{LazyClient, Manifest, catalog_url, parse_catalog_response};
use crate::declaration::{FontFiles, FontRole};
use crate::error::FontError;
use crate::filename::safe_filename;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";

/// Inline manifest files that are never written to the cache.
const SKIPPED_FILES: &[&str] = &["README.txt"];

/// `root` is `None` when no cache directory could be determined; that only
/// becomes an error once a remote family has to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontCache {
    root: Option<PathBuf>,
}

impl FontCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// A cache under [`FontCache::default_root`], if there is one.
    pub fn at_default_root() -> Self {
        Self {
            root: Self::default_root(),
        }
    }

    #[cfg(test)]
    pub(crate) fn without_root() -> Self {
        Self { root: None }
    }

    /// `~/.cache/styled_prose_fonts`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".cache").join("styled_prose_fonts"))
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Cache directory for `family`.
    pub fn family_dir(&self, family: &str) -> Result<PathBuf, FontError> {
        let name =
            safe_filename(family).ok_or_else(|| FontError::UnsafeFamilyName(family.to_string()))?;
        let root = self.root.as_ref().ok_or(FontError::NoCacheDir)?;
        Ok(root.join(name))
    }

    /// Makes sure every cached file of `family` is present, fetching the
    /// missing ones through `client`, and returns the four role paths.
    ///
    /// Role files the catalog does not offer are returned but do not exist.
    pub(crate) fn fetch_family(
        &self,
        family: &str,
        client: &mut LazyClient<'_>,
    ) -> Result<FontFiles, FontError> {
        let dir = self.family_dir(family)?;
        fs::create_dir_all(&dir).map_err(|e| FontError::io(family, &dir, e))?;

        let manifest = self.load_manifest(family, &dir, client)?;

        for file in &manifest.files {
            let Some(name) = Path::new(&file.filename).file_name() else {
                log::warn!("Skipping manifest entry '{}' for '{}'", file.filename, family);
                continue;
            };
            if SKIPPED_FILES.iter().any(|skip| name == *skip) {
                continue;
            }
            let path = dir.join(name);
            if path.exists() {
                continue;
            }
            fs::write(&path, file.contents.replace('\r', ""))
                .map_err(|e| FontError::io(family, &path, e))?;
            log::debug!("Wrote '{}'", path.display());
        }

        for file_ref in &manifest.file_refs {
            let Some(role) = FontRole::from_remote_file_name(&file_ref.filename) else {
                continue;
            };
            let path = dir.join(role.file_name());
            if path.exists() {
                log::debug!("Font cache hit: '{}'", path.display());
                continue;
            }
            log::info!("Downloading {} face of '{}' from {}", role.as_str(), family, file_ref.url);
            let bytes = client
                .get(&file_ref.url)
                .map_err(|source| FontError::Fetch {
                    family: family.to_string(),
                    source,
                })?;
            fs::write(&path, bytes).map_err(|e| FontError::io(family, &path, e))?;
        }

        Ok(FontFiles::in_dir(&dir))
    }

    /// Reads the cached manifest, or fetches and caches it.
    fn load_manifest(
        &self,
        family: &str,
        dir: &Path,
        client: &mut LazyClient<'_>,
    ) -> Result<Manifest, FontError> {
        let path = dir.join(MANIFEST_FILE);
        let malformed = |message: String| FontError::Manifest {
            family: family.to_string(),
            message,
        };

        let raw: Value = if path.exists() {
            log::debug!("Font manifest cache hit: '{}'", path.display());
            let data = fs::read(&path).map_err(|e| FontError::io(family, &path, e))?;
            serde_json::from_slice(&data).map_err(|e| malformed(e.to_string()))?
        } else {
            let url = catalog_url(family);
            log::info!("Fetching font catalog entry for '{}'", family);
            let body = client.get(&url).map_err(|source| FontError::Fetch {
                family: family.to_string(),
                source,
            })?;
            let manifest = parse_catalog_response(&body).map_err(malformed)?;
            let data = serde_json::to_vec(&manifest).map_err(|e| malformed(e.to_string()))?;
            fs::write(&path, data).map_err(|e| FontError::io(family, &path, e))?;
            manifest
        };

        serde_json::from_value(raw).map_err(|e| malformed(e.to_string()))
    }
}

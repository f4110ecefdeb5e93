//! Registration of configured font families with a rendering backend.

use crate::cache::FontCache;
use crate::catalog::{CatalogConnector, HttpConnector, LazyClient};
use crate::declaration::{FontDeclaration, FontFiles, FontRole, FontSource};
use crate::error::FontError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use styled_prose_config::ConfigDocument;
use styled_prose_traits::{BackendError, FamilyMembers, FontBackend};

/// Resolves `[[fonts]]` declarations to font files and registers them.
///
/// Remembers which configuration paths were registered successfully;
/// registering the same path again is a no-op until [`FontRegistry::clear_cache`].
/// That only matters when one registry is reused across calls: a generator
/// owns a fresh registry and clears it before registering again.
#[derive(Debug)]
pub struct FontRegistry {
    cache: FontCache,
    connector: Box<dyn CatalogConnector>,
    registered: HashSet<PathBuf>,
}

impl FontRegistry {
    pub fn new(cache: FontCache, connector: Box<dyn CatalogConnector>) -> Self {
        Self {
            cache,
            connector,
            registered: HashSet::new(),
        }
    }

    /// A registry using the default cache root and the HTTPS catalog.
    pub fn with_defaults() -> Self {
        Self::new(FontCache::at_default_root(), Box::new(HttpConnector::new()))
    }

    pub fn cache(&self) -> &FontCache {
        &self.cache
    }

    pub fn is_registered(&self, config_path: &Path) -> bool {
        self.registered.contains(config_path)
    }

    /// Forgets every registered configuration path.
    pub fn clear_cache(&mut self) {
        self.registered.clear();
    }

    /// Registers every font family declared in `config` with `backend`.
    ///
    /// Families are processed in file order. A failing family leaves nothing
    /// registered in the backend; families registered before it stay. At most
    /// one catalog client is opened for the batch, and it is closed before
    /// this returns.
    pub fn register_fonts<B>(
        &mut self,
        config: &ConfigDocument,
        backend: &mut B,
    ) -> Result<(), FontError>
    where
        B: FontBackend + ?Sized,
    {
        if self.registered.contains(config.path()) {
            log::debug!("Fonts for '{}' already registered", config.path().display());
            return Ok(());
        }

        let mut client = LazyClient::new(self.connector.as_ref());

        for (index, table) in config.fonts().iter().enumerate() {
            let declaration = FontDeclaration::from_table(index, table)?;
            let family = declaration.name.as_str();

            let files = match &declaration.source {
                FontSource::Local(files) => files.relative_to(config.base_dir()),
                FontSource::Remote => self.cache.fetch_family(family, &mut client)?,
            };

            let members = register_family(backend, family, &files).map_err(|source| {
                FontError::Backend {
                    family: family.to_string(),
                    source,
                }
            })?;
            log::info!(
                "Registered font family '{}' ({} face(s)) with {}",
                family,
                members.ids().count(),
                backend.name()
            );
        }

        drop(client);
        self.registered.insert(config.path().to_path_buf());
        Ok(())
    }
}

/// Registers the faces of one family. If any step fails, the family is
/// removed from the backend entirely, including faces left over from an
/// earlier registration under the same name.
fn register_family<B>(
    backend: &mut B,
    family: &str,
    files: &FontFiles,
) -> Result<FamilyMembers, BackendError>
where
    B: FontBackend + ?Sized,
{
    let mut done: Vec<String> = Vec::new();
    let result = try_register_family(backend, family, files, &mut done);
    if result.is_err() {
        for id in &done {
            backend.unregister_font(id);
        }
        backend.unregister_family(family);
    }
    result
}

fn try_register_family<B>(
    backend: &mut B,
    family: &str,
    files: &FontFiles,
    done: &mut Vec<String>,
) -> Result<FamilyMembers, BackendError>
where
    B: FontBackend + ?Sized,
{
    let mut members = FamilyMembers::new(family);

    for role in FontRole::ALL {
        let Some(path) = files.get(role) else {
            continue;
        };
        if role != FontRole::Regular && !path.exists() {
            log::warn!(
                "Skipping {} face of '{}': {} does not exist",
                role.as_str(),
                family,
                path.display()
            );
            continue;
        }

        let id = role.font_id(family);
        backend.register_font(&id, path)?;
        done.push(id.clone());

        match role {
            FontRole::Regular => {}
            FontRole::Bold => members.bold = Some(id),
            FontRole::Italic => members.italic = Some(id),
            FontRole::BoldItalic => members.bold_italic = Some(id),
        }
    }

    backend.register_family(family, &members)?;
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::{FakeConnector, family_connector};
    use std::fs;
    use styled_prose_traits::InMemoryFontBackend;
    use tempfile::{TempDir, tempdir};

    fn registry(root: &Path, connector: &FakeConnector) -> FontRegistry {
        FontRegistry::new(FontCache::new(root), Box::new(connector.clone()))
    }

    fn config(dir: &TempDir, toml: &str) -> ConfigDocument {
        ConfigDocument::from_toml_str(toml, dir.path().join("styles.toml")).unwrap()
    }

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), b"font").unwrap();
    }

    #[test]
    fn test_local_family_registers_existing_roles() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempdir().unwrap();
        touch(&dir, "mock.ttf");
        touch(&dir, "mock_bold.ttf");
        let config = config(
            &dir,
            r#"
[[fonts]]
font_name = "mock"
regular = "mock.ttf"
bold = "mock_bold.ttf"
italicized = "missing_italic.ttf"
"#,
        );

        let connector = FakeConnector::default();
        let mut backend = InMemoryFontBackend::new();
        registry(dir.path(), &connector)
            .register_fonts(&config, &mut backend)
            .unwrap();

        assert_eq!(backend.font_path("mock"), Some(dir.path().join("mock.ttf").as_path()));
        assert!(backend.has_font("mock_bold"));
        assert!(!backend.has_font("mock_italic"));
        let family = backend.family("mock").unwrap();
        assert_eq!(family.bold.as_deref(), Some("mock_bold"));
        assert_eq!(family.italic, None);
        assert_eq!(connector.connects(), 0);
    }

    #[test]
    fn test_remote_family_registers_all_roles() {
        let dir = tempdir().unwrap();
        let config = config(&dir, "[[fonts]]\nfont_name = \"mock\"\nfrom_google_fonts = true\n");
        let connector = family_connector("mock");
        let mut backend = InMemoryFontBackend::new();

        registry(&dir.path().join("cache"), &connector)
            .register_fonts(&config, &mut backend)
            .unwrap();

        let family = backend.family("mock").unwrap();
        assert_eq!(family.bold_italic.as_deref(), Some("mock_bold_italic"));
        assert_eq!(
            backend.font_path("mock_bold_italic"),
            Some(dir.path().join("cache/mock/bolditalic.ttf").as_path())
        );
        assert_eq!(connector.connects(), 1);
        assert_eq!(connector.closes(), 1);
    }

    #[test]
    fn test_same_config_registers_once() {
        let dir = tempdir().unwrap();
        let config = config(&dir, "[[fonts]]\nfont_name = \"mock\"\nfrom_google_fonts = true\n");
        let connector = family_connector("mock");
        let mut backend = InMemoryFontBackend::new();
        let mut registry = registry(&dir.path().join("cache"), &connector);

        registry.register_fonts(&config, &mut backend).unwrap();
        registry.register_fonts(&config, &mut backend).unwrap();
        assert!(registry.is_registered(config.path()));
        assert_eq!(backend.registrations(), 4);

        // after clearing, the backend is fed again but files come from disk
        registry.clear_cache();
        registry.register_fonts(&config, &mut backend).unwrap();
        assert_eq!(backend.registrations(), 8);
        assert_eq!(connector.fetches().len(), 5);
    }

    #[test]
    fn test_failing_family_is_rolled_back() {
        let dir = tempdir().unwrap();
        touch(&dir, "a.ttf");
        touch(&dir, "b.ttf");
        touch(&dir, "b_bold.ttf");
        let config = config(
            &dir,
            r#"
[[fonts]]
font_name = "A"
regular = "a.ttf"

[[fonts]]
font_name = "B"
regular = "b.ttf"
bold = "b_bold.ttf"
italicized = "b.ttf"
"#,
        );

        let mut backend = InMemoryFontBackend::new().reject("B_italic");
        let mut registry = registry(dir.path(), &FakeConnector::default());
        let err = registry.register_fonts(&config, &mut backend).unwrap_err();

        assert_eq!(err.family(), Some("B"));
        assert!(backend.family("A").is_some());
        assert!(backend.has_font("A"));
        assert!(!backend.has_font("B"));
        assert!(!backend.has_font("B_bold"));
        assert!(backend.family("B").is_none());
        assert!(!registry.is_registered(config.path()));
    }

    #[test]
    fn test_failed_reregistration_drops_earlier_family() {
        let dir = tempdir().unwrap();
        touch(&dir, "b.ttf");
        touch(&dir, "b_bold.ttf");
        touch(&dir, "b_italic.ttf");
        let config = config(
            &dir,
            "[[fonts]]\nfont_name = \"B\"\nregular = \"b.ttf\"\nbold = \"b_bold.ttf\"\nitalicized = \"b_italic.ttf\"\n",
        );
        let mut registry = registry(dir.path(), &FakeConnector::default());

        let mut backend = InMemoryFontBackend::new();
        registry.register_fonts(&config, &mut backend).unwrap();
        assert!(backend.family("B").is_some());

        // the italic face now fails; the regular and bold ones load again
        let mut backend = backend.reject("B_italic");
        registry.clear_cache();
        assert!(registry.register_fonts(&config, &mut backend).is_err());

        assert!(backend.family("B").is_none());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_missing_regular_file_fails() {
        let dir = tempdir().unwrap();
        let config = config(&dir, "[[fonts]]\nfont_name = \"A\"\nregular = \"nope.ttf\"\n");
        let mut backend = InMemoryFontBackend::new();

        let err = registry(dir.path(), &FakeConnector::default())
            .register_fonts(&config, &mut backend)
            .unwrap_err();
        assert!(matches!(
            err,
            FontError::Backend {
                source: BackendError::NotFound { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_declaration_stops_batch() {
        let dir = tempdir().unwrap();
        let config = config(
            &dir,
            "[[fonts]]\nfont_name = \"mock\"\nfrom_google_fonts = true\nregular = \"test\"\n",
        );
        let connector = family_connector("mock");

        let err = registry(dir.path(), &connector)
            .register_fonts(&config, &mut InMemoryFontBackend::new())
            .unwrap_err();
        assert!(err.to_string().contains("You cannot use Google Fonts"));
        assert_eq!(connector.connects(), 0);
    }

    #[test]
    fn test_network_failure_closes_client() {
        let dir = tempdir().unwrap();
        let config = config(
            &dir,
            "[[fonts]]\nfont_name = \"mock\"\nfrom_google_fonts = true\n\n[[fonts]]\nfont_name = \"other\"\nfrom_google_fonts = true\n",
        );
        let connector = family_connector("mock");
        let mut backend = InMemoryFontBackend::new();

        let err = registry(&dir.path().join("cache"), &connector)
            .register_fonts(&config, &mut backend)
            .unwrap_err();

        assert!(matches!(err, FontError::Fetch { .. }));
        assert_eq!(err.family(), Some("other"));
        assert!(backend.family("mock").is_some());
        assert_eq!(connector.connects(), 1);
        assert_eq!(connector.closes(), 1);
    }

    #[test]
    fn test_cache_root_is_only_needed_for_remote_families() {
        let dir = tempdir().unwrap();
        touch(&dir, "a.ttf");
        let local = config(&dir, "[[fonts]]\nfont_name = \"A\"\nregular = \"a.ttf\"\n");
        let mut registry = FontRegistry::new(FontCache::without_root(), Box::new(FakeConnector::default()));
        let mut backend = InMemoryFontBackend::new();
        registry.register_fonts(&local, &mut backend).unwrap();
        assert!(backend.family("A").is_some());

        let remote = ConfigDocument::from_toml_str(
            "[[fonts]]\nfont_name = \"mock\"\nfrom_google_fonts = true\n",
            dir.path().join("remote.toml"),
        )
        .unwrap();
        let err = registry.register_fonts(&remote, &mut backend).unwrap_err();
        assert!(matches!(err, FontError::NoCacheDir));
    }

    #[test]
    fn test_unsafe_remote_family_name() {
        let dir = tempdir().unwrap();
        let config = config(&dir, "[[fonts]]\nfont_name = \"..\"\nfrom_google_fonts = true\n");

        let err = registry(dir.path(), &FakeConnector::default())
            .register_fonts(&config, &mut InMemoryFontBackend::new())
            .unwrap_err();
        assert!(matches!(err, FontError::UnsafeFamilyName(name) if name == ".."));
    }
}

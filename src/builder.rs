// src/builder.rs
use crate::error::ProseError;
use crate::generator::StyledProseGenerator;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use styled_prose_config::ConfigDocument;
use styled_prose_fonts::{CatalogConnector, FontCache, FontRegistry, HttpConnector};
use styled_prose_style::StyleResolver;
use styled_prose_traits::{DocumentRenderer, FontBackend};
use styled_prose_types::PageSize;

/// A builder for creating a `StyledProseGenerator`.
pub struct GeneratorBuilder {
    font_cache_dir: Option<PathBuf>,
    connector: Option<Box<dyn CatalogConnector>>,
    resolver: Option<Arc<StyleResolver>>,
    rng: Option<Box<dyn RngCore + Send>>,
    page: PageSize,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            font_cache_dir: None,
            connector: None,
            resolver: None,
            rng: None,
            page: PageSize::LETTER,
        }
    }
}

impl GeneratorBuilder {
    /// Creates a builder using the default font cache, the HTTPS font
    /// catalog, the process-wide style resolver and an OS-seeded RNG.
    pub fn new() -> Self { Default::default() }

    /// Stores remotely fetched font families under `dir` instead of `~/.cache/styled_prose_fonts`.
    pub fn with_font_cache_dir<P: AsRef<Path>>(mut self, dir: P) -> Self { self.font_cache_dir = Some(dir.as_ref().to_path_buf()); self }

    /// Fetches remote font families through `connector`.
    pub fn with_catalog(mut self, connector: impl CatalogConnector + 'static) -> Self { self.connector = Some(Box::new(connector)); self }

    /// Resolves styles through `resolver` instead of the process-wide one.
    pub fn with_style_resolver(mut self, resolver: Arc<StyleResolver>) -> Self { self.resolver = Some(resolver); self }

    /// Draws crop positions from `rng`.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self { self.rng = Some(Box::new(rng)); self }

    /// Lays text out on `page` instead of US Letter.
    pub fn with_page_size(mut self, page: PageSize) -> Self { self.page = page; self }

    /// Loads the configuration at `config_path` and builds a generator for it.
    pub fn build<B, P>(self, config_path: P, backend: B) -> Result<StyledProseGenerator<B>, ProseError>
    where
        B: FontBackend + DocumentRenderer,
        P: AsRef<Path>,
    {
        let config = ConfigDocument::load(config_path)?;
        self.finish(config, backend, true)
    }

    /// Builds a generator for an already loaded configuration.
    ///
    /// Fonts are registered with `backend` and styles resolved before this
    /// returns. The document is kept as given; clearing the generator's
    /// caches does not re-read it from disk.
    pub fn build_with_config<B>(self, config: ConfigDocument, backend: B) -> Result<StyledProseGenerator<B>, ProseError>
    where
        B: FontBackend + DocumentRenderer,
    {
        self.finish(config, backend, false)
    }

    fn finish<B>(self, config: ConfigDocument, mut backend: B, from_disk: bool) -> Result<StyledProseGenerator<B>, ProseError>
    where
        B: FontBackend + DocumentRenderer,
    {
        let cache = match self.font_cache_dir {
            Some(dir) => FontCache::new(dir),
            None => FontCache::at_default_root(),
        };
        let connector = self.connector.unwrap_or_else(|| Box::new(HttpConnector::new()));
        let mut registry = FontRegistry::new(cache, connector);
        let resolver = self.resolver.unwrap_or_else(StyleResolver::global);
        let rng = match self.rng {
            Some(rng) => rng,
            None => Box::new(StdRng::from_os_rng()),
        };

        registry.register_fonts(&config, &mut backend)?;
        let stylesheet = resolver.stylesheet(&config)?;
        log::info!(
            "Generator ready for '{}': {} style(s)",
            config.path().display(),
            stylesheet.len()
        );

        Ok(StyledProseGenerator::from_parts(
            config, from_disk, backend, registry, resolver, stylesheet, rng, self.page,
        ))
    }
}

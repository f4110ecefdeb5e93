// src/generator.rs
use crate::builder::GeneratorBuilder;
use crate::error::ProseError;
use crate::options::ThumbnailOptions;
use image::RgbImage;
use rand::RngCore;
use std::path::Path;
use std::sync::Arc;
use styled_prose_config::ConfigDocument;
use styled_prose_fonts::FontRegistry;
use styled_prose_style::{ResolvedStyle, StyleResolver, StyleSheet};
use styled_prose_thumbnail::{ThumbnailSettings, make_thumbnail};
use styled_prose_traits::{DocumentRenderer, FontBackend, RenderRequest};
use styled_prose_types::PageSize;

/// Line-break marker understood by the paragraph layout engine.
const LINE_BREAK: &str = "<br />";

/// Converts plain text into the layout engine's markup: carriage returns
/// are dropped and newlines become explicit line breaks.
pub fn prepare_text(text: &str) -> String {
    text.replace('\r', "").replace('\n', LINE_BREAK)
}

/// Renders text in the styles of one configuration.
pub struct StyledProseGenerator<B> {
    config: ConfigDocument,
    /// Re-read `config` from its path when caches are cleared.
    from_disk: bool,
    backend: B,
    registry: FontRegistry,
    resolver: Arc<StyleResolver>,
    stylesheet: Arc<StyleSheet>,
    rng: Box<dyn RngCore + Send>,
    page: PageSize,
}

impl<B> StyledProseGenerator<B>
where
    B: FontBackend + DocumentRenderer,
{
    /// Builds a generator for the configuration at `config_path` with
    /// default settings. See [`GeneratorBuilder`] for the knobs.
    pub fn new<P: AsRef<Path>>(config_path: P, backend: B) -> Result<Self, ProseError> {
        GeneratorBuilder::new().build(config_path, backend)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        config: ConfigDocument,
        from_disk: bool,
        backend: B,
        registry: FontRegistry,
        resolver: Arc<StyleResolver>,
        stylesheet: Arc<StyleSheet>,
        rng: Box<dyn RngCore + Send>,
        page: PageSize,
    ) -> Self {
        Self {
            config,
            from_disk,
            backend,
            registry,
            resolver,
            stylesheet,
            rng,
            page,
        }
    }

    pub fn config(&self) -> &ConfigDocument {
        &self.config
    }

    pub fn stylesheet(&self) -> &StyleSheet {
        &self.stylesheet
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The resolved style `name`.
    pub fn style(&self, name: &str) -> Result<Arc<ResolvedStyle>, ProseError> {
        Ok(self.stylesheet.require(name)?.clone())
    }

    /// Renders `text` in the requested style and turns the pages into one
    /// image. Nothing is written outside a temporary directory that is
    /// removed before this returns.
    pub fn create_image(&mut self, text: &str, options: &ThumbnailOptions) -> Result<RgbImage, ProseError> {
        let style = self.style(&options.style)?;
        let text = prepare_text(text);

        let workdir = tempfile::Builder::new().prefix("styled-prose").tempdir()?;
        let pages = self.backend.render(&RenderRequest {
            style: &style,
            text: &text,
            page: self.page,
            workdir: workdir.path(),
        })?;
        workdir.close()?;
        log::debug!("Rendered {} page(s) in style '{}'", pages.len(), style.name);

        let settings = ThumbnailSettings {
            angle: options.angle,
            size: options.thumbnail,
            prescale: options.prescale,
            comparative_font_size: options.comparative_font_size,
            style_font_size: f64::from(style.font_size),
        };
        Ok(make_thumbnail(&pages, &settings, self.rng.as_mut())?)
    }

    /// Re-reads the configuration file, then registers its fonts and
    /// resolves its styles again.
    ///
    /// Only this configuration's stylesheet is evicted from the style
    /// resolver; other generators sharing it keep their entries. Every font
    /// family is handed to the backend again, so a changed font file takes
    /// effect. Generators built from an in-memory document re-use it as is.
    pub fn clear_caches(&mut self) -> Result<(), ProseError> {
        if self.from_disk {
            self.config = ConfigDocument::load(self.config.path())?;
        }
        self.registry.clear_cache();
        self.resolver.invalidate(self.config.path());
        self.registry.register_fonts(&self.config, &mut self.backend)?;
        self.stylesheet = self.resolver.stylesheet(&self.config)?;
        log::debug!("Reloaded '{}'", self.config.path().display());
        Ok(())
    }
}

//! Process-wide cache of resolved stylesheets, keyed by configuration path.

use crate::error::StyleError;
use crate::resolved::ResolvedStyle;
use crate::stylesheet::StyleSheet;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use styled_prose_config::ConfigDocument;

static GLOBAL: Lazy<Arc<StyleResolver>> = Lazy::new(|| Arc::new(StyleResolver::new()));

/// Resolves configuration documents into [`StyleSheet`]s, caching the result
/// per configuration path until it is invalidated or the cache is cleared.
///
/// Only complete stylesheets are ever inserted, so concurrent readers never
/// observe a partially-resolved entry.
#[derive(Debug, Default)]
pub struct StyleResolver {
    cache: RwLock<HashMap<PathBuf, Arc<StyleSheet>>>,
}

impl StyleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolver shared by every generator in this process.
    pub fn global() -> Arc<StyleResolver> {
        GLOBAL.clone()
    }

    /// Returns the stylesheet for `config`, resolving it on first use.
    pub fn stylesheet(&self, config: &ConfigDocument) -> Result<Arc<StyleSheet>, StyleError> {
        let key = config.path().to_path_buf();

        if let Some(sheet) = self.cache.read().ok().and_then(|c| c.get(&key).cloned()) {
            log::debug!("Stylesheet cache hit for '{}'", key.display());
            return Ok(sheet);
        }

        let sheet = Arc::new(StyleSheet::from_tables(config.styles())?);
        log::debug!(
            "Resolved {} style(s) from '{}'",
            sheet.len(),
            key.display()
        );

        match self.cache.write() {
            Ok(mut cache) => Ok(cache.entry(key).or_insert(sheet).clone()),
            Err(_) => {
                log::warn!("Stylesheet cache lock poisoned; result not cached");
                Ok(sheet)
            }
        }
    }

    /// Resolves the style `name` declared in `config`.
    pub fn resolve(
        &self,
        config: &ConfigDocument,
        name: &str,
    ) -> Result<Arc<ResolvedStyle>, StyleError> {
        self.stylesheet(config)?.require(name).cloned()
    }

    /// Drops the cached stylesheet of the configuration at `path`, leaving
    /// every other entry in place.
    pub fn invalidate(&self, path: &Path) {
        if let Ok(mut cache) = self.cache.write() {
            cache.remove(path);
        }
    }

    /// Drops every cached stylesheet.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Number of cached configurations.
    pub fn cached_len(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }
}

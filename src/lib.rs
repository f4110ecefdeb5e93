//! Renders prose into styled, thumbnail-sized images.
//!
//! A [`StyledProseGenerator`] is built once per configuration file: it
//! registers the configured font families with its backend and resolves the
//! configured paragraph styles. Each [`StyledProseGenerator::create_image`]
//! call then lays out a piece of text in one style and post-processes the
//! rendered pages into a single image.

pub mod builder;
pub mod error;
pub mod generator;
pub mod options;

pub use builder::GeneratorBuilder;
pub use error::ProseError;
pub use generator::{StyledProseGenerator, prepare_text};
pub use options::ThumbnailOptions;

pub use styled_prose_config::{ConfigDocument, ConfigError, FieldError, FieldErrors};
pub use styled_prose_fonts::{
    CatalogClient, CatalogConnector, CatalogError, FontCache, FontError, FontRegistry,
    FontdbBackend, HttpConnector,
};
pub use styled_prose_style::{
    DEFAULT_STYLE_NAME, ParamValue, ResolvedStyle, StyleError, StyleResolver, StyleSheet,
};
pub use styled_prose_thumbnail::ThumbnailError;
pub use styled_prose_traits::{
    BackendError, DocumentRenderer, FamilyMembers, FontBackend, InMemoryFontBackend, RenderError,
    RenderRequest,
};
pub use styled_prose_types::{Color, PageSize, Size};

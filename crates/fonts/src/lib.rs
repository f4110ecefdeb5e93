//! Font family resolution.
//!
//! A [`FontRegistry`] turns the `[[fonts]]` declarations of a configuration
//! document into concrete font files, fetching remote families through a
//! [`CatalogConnector`] into an on-disk [`FontCache`], and registers every
//! family with a [`FontBackend`](styled_prose_traits::FontBackend).

pub mod cache;
pub mod catalog;
pub mod declaration;
pub mod error;
pub mod filename;
pub mod fontdb_backend;
pub mod registry;

pub use cache::FontCache;
pub use catalog::{CatalogClient, CatalogConnector, CatalogError, HttpConnector};
pub use declaration::{FontDeclaration, FontFiles, FontRole, FontSource};
pub use error::FontError;
pub use filename::safe_filename;
pub use fontdb_backend::FontdbBackend;
pub use registry::FontRegistry;

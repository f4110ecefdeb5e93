//! Configuration plumbing shared by the style and font crates.
//!
//! A configuration document is a TOML file with two top-level arrays of
//! tables, `fonts` and `styles`. The document is decoded into plain JSON-style
//! mappings; each entry is then validated by its owning crate through a
//! [`FieldReader`], which collects every field-level failure instead of
//! stopping at the first one.

mod document;
mod error;
mod reader;

pub use document::ConfigDocument;
pub use error::{ConfigError, FieldError, FieldErrors};
pub use reader::FieldReader;

/// A single decoded configuration entry (one `[[fonts]]` or `[[styles]]` table).
pub type ConfigTable = serde_json::Map<String, serde_json::Value>;

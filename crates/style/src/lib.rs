//! Paragraph style resolution.
//!
//! Declared `[[styles]]` tables are validated into [`StyleConfig`]s, then
//! defaulted and flattened into [`ResolvedStyle`]s: the backend-ready form
//! whose [`ResolvedStyle::parameters`] carry the rendering backend's own
//! parameter names.

pub mod config;
pub mod error;
pub mod naming;
pub mod resolved;
pub mod resolver;
pub mod stylesheet;
pub mod text;

pub use config::{Bullet, Indent, StyleConfig};
pub use error::StyleError;
pub use resolved::{ParamValue, ResolvedStyle};
pub use resolver::StyleResolver;
pub use stylesheet::{DEFAULT_STYLE_NAME, StyleSheet};
pub use text::{BulletAnchor, TextAlign, TextDirection};

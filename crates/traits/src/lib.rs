pub mod font;
pub mod render;

pub use font::{BackendError, FamilyMembers, FontBackend, InMemoryFontBackend};
pub use render::{DocumentRenderer, RenderError, RenderRequest};

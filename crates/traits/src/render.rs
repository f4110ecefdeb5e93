//! DocumentRenderer trait: the paragraph layout engine seen as a black box.

use image::RgbImage;
use std::path::Path;
use styled_prose_style::ResolvedStyle;
use styled_prose_types::PageSize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Layout failed: {0}")]
    Layout(String),

    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("I/O error during rendering: {0}")]
    Io(#[from] std::io::Error),
}

/// One paragraph to lay out and rasterize.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub style: &'a ResolvedStyle,
    /// Prepared text: no carriage returns, line breaks as `<br />`.
    pub text: &'a str,
    /// Page size in points; margins are zero.
    pub page: PageSize,
    /// Scratch directory for intermediate files, removed after the call.
    pub workdir: &'a Path,
}

/// Lays out styled text and rasterizes the resulting pages.
pub trait DocumentRenderer {
    /// Returns the rendered pages in order. All pages share one width.
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<Vec<RgbImage>, RenderError>;
}

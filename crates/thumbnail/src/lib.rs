//! Turns rendered pages into a single thumbnail image.
//!
//! [`make_thumbnail`] runs the whole pipeline: [`compose::stack_pages`],
//! [`rotate::rotate_ccw`], [`trim::trim_white`] and, when a size is
//! requested, [`crop::density_crop`].

pub mod compose;
pub mod crop;
pub mod rotate;
pub mod trim;

use image::RgbImage;
use rand::Rng;
use styled_prose_types::Size;
use thiserror::Error;

pub use crop::density_scale;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThumbnailError {
    #[error("No pages were rendered")]
    NoPages,

    #[error("Page {page} is {found}px wide, expected {expected}px like the first page")]
    WidthMismatch {
        page: usize,
        expected: u32,
        found: u32,
    },

    #[error("Thumbnail size must be non-zero, got {width}x{height}")]
    EmptySize { width: u32, height: u32 },

    #[error("Comparative font size must be positive, got {0}")]
    InvalidComparativeSize(f64),
}

/// Per-call thumbnail parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbnailSettings {
    /// Counter-clockwise rotation in degrees.
    pub angle: f64,
    /// Final size, or `None` to return the whole trimmed canvas.
    pub size: Option<Size>,
    /// Scale the crop by font density and resize it to `size`.
    pub prescale: bool,
    /// Font size the density scale is measured against.
    pub comparative_font_size: f64,
    /// Font size of the style the pages were rendered with.
    pub style_font_size: f64,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            angle: 0.0,
            size: None,
            prescale: true,
            comparative_font_size: 6.0,
            style_font_size: 12.0,
        }
    }
}

/// Stacks, rotates, trims and optionally crops `pages` into one image.
pub fn make_thumbnail<R>(
    pages: &[RgbImage],
    settings: &ThumbnailSettings,
    rng: &mut R,
) -> Result<RgbImage, ThumbnailError>
where
    R: Rng + ?Sized,
{
    if let Some(size) = settings.size
        && size.is_empty()
    {
        return Err(ThumbnailError::EmptySize {
            width: size.width,
            height: size.height,
        });
    }
    if settings.prescale && settings.comparative_font_size <= 0.0 {
        return Err(ThumbnailError::InvalidComparativeSize(
            settings.comparative_font_size,
        ));
    }

    let mut canvas = compose::stack_pages(pages)?;
    if settings.angle % 360.0 != 0.0 {
        canvas = rotate::rotate_ccw(&canvas, settings.angle);
    }
    let trimmed = trim::trim_white(&canvas);
    log::debug!(
        "Canvas {}x{} trimmed to {}x{}",
        canvas.width(),
        canvas.height(),
        trimmed.width(),
        trimmed.height()
    );

    let Some(size) = settings.size else {
        return Ok(trimmed);
    };

    let scale = if settings.prescale {
        density_scale(
            settings.style_font_size,
            settings.comparative_font_size,
            Size::new(trimmed.width(), trimmed.height()),
            size,
        )
    } else {
        1.0
    };
    Ok(crop::density_crop(&trimmed, size, scale, settings.prescale, rng))
}

//! Density-normalized cropping.
//!
//! Text rendered at a large font size is cropped proportionally larger and
//! then shrunk, so thumbnails of different styles show text at a similar
//! apparent size.

use image::imageops::{self, FilterType};
use image::RgbImage;
use rand::Rng;
use styled_prose_types::Size;

/// 3x3 sharpening kernel; weights sum to 16.
const SHARPEN: [f32; 9] = [-2.0, -2.0, -2.0, -2.0, 32.0, -2.0, -2.0, -2.0, -2.0];

/// Crop scale relative to the requested size: the font size ratio, capped so
/// the crop never exceeds the trimmed canvas.
pub fn density_scale(
    style_font_size: f64,
    comparative_font_size: f64,
    trimmed: Size,
    requested: Size,
) -> f64 {
    let density = style_font_size / comparative_font_size;
    let fit_w = f64::from(trimmed.width) / f64::from(requested.width);
    let fit_h = f64::from(trimmed.height) / f64::from(requested.height);
    density.min(fit_w).min(fit_h)
}

/// Crops a `requested × scale` region at a random origin.
///
/// With `prescale`, the crop is sharpened and resized to exactly `requested`;
/// otherwise it is returned as cropped, clamped to the image bounds.
pub fn density_crop<R>(
    image: &RgbImage,
    requested: Size,
    scale: f64,
    prescale: bool,
    rng: &mut R,
) -> RgbImage
where
    R: Rng + ?Sized,
{
    let crop_w = scaled(requested.width, scale).min(image.width());
    let crop_h = scaled(requested.height, scale).min(image.height());

    let x = rng.random_range(0..=image.width() - crop_w);
    let y = rng.random_range(0..=image.height() - crop_h);
    log::debug!("Cropping {}x{} at ({}, {}), scale {:.3}", crop_w, crop_h, x, y, scale);

    let crop = imageops::crop_imm(image, x, y, crop_w, crop_h).to_image();
    if !prescale {
        return crop;
    }

    let sharpened = imageops::filter3x3(&crop, &SHARPEN);
    imageops::resize(
        &sharpened,
        requested.width,
        requested.height,
        FilterType::Lanczos3,
    )
}

fn scaled(length: u32, scale: f64) -> u32 {
    ((f64::from(length) * scale).floor() as u32).max(1)
}

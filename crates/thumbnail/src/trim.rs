use image::{RgbImage, imageops};

/// Smallest rectangle `(x, y, width, height)` holding every non-white pixel.
pub fn content_bounds(image: &RgbImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0 == [255, 255, 255] {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crops away the white border around the content. An all-white image is
/// returned unchanged.
pub fn trim_white(image: &RgbImage) -> RgbImage {
    match content_bounds(image) {
        Some((x, y, w, h)) => imageops::crop_imm(image, x, y, w, h).to_image(),
        None => image.clone(),
    }
}

use image::{Rgb, RgbImage};

const FILL: Rgb<u8> = Rgb([255, 255, 255]);

/// Tolerance for bounds that land a hair above a whole pixel.
const EPSILON: f64 = 1e-6;

/// Rotates `image` counter-clockwise by `degrees` about its centre.
///
/// The output grows to contain the whole rotated image; uncovered pixels are
/// white. Sampling is nearest-neighbour, so no new colours are introduced.
pub fn rotate_ccw(image: &RgbImage, degrees: f64) -> RgbImage {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (w, h) = (f64::from(image.width()), f64::from(image.height()));

    let out_w = (w * cos.abs() + h * sin.abs() - EPSILON).ceil().max(1.0) as u32;
    let out_h = (w * sin.abs() + h * cos.abs() - EPSILON).ceil().max(1.0) as u32;

    let (cx, cy) = (w / 2.0, h / 2.0);
    let (ox, oy) = (f64::from(out_w) / 2.0, f64::from(out_h) / 2.0);

    RgbImage::from_fn(out_w, out_h, |px, py| {
        let dx = f64::from(px) + 0.5 - ox;
        let dy = f64::from(py) + 0.5 - oy;
        let sx = (cx + dx * cos - dy * sin).floor();
        let sy = (cy + dx * sin + dy * cos).floor();

        if sx >= 0.0 && sy >= 0.0 && sx < w && sy < h {
            *image.get_pixel(sx as u32, sy as u32)
        } else {
            FILL
        }
    })
}

use crate::ThumbnailError;
use image::{RgbImage, imageops};

/// Stacks `pages` top to bottom on one canvas.
///
/// All pages must share the first page's width.
pub fn stack_pages(pages: &[RgbImage]) -> Result<RgbImage, ThumbnailError> {
    let first = pages.first().ok_or(ThumbnailError::NoPages)?;
    let width = first.width();

    if let Some((page, found)) = pages
        .iter()
        .map(RgbImage::width)
        .enumerate()
        .find(|&(_, w)| w != width)
    {
        return Err(ThumbnailError::WidthMismatch {
            page,
            expected: width,
            found,
        });
    }

    if pages.len() == 1 {
        return Ok(first.clone());
    }

    let height = pages.iter().map(RgbImage::height).sum();
    let mut canvas = RgbImage::new(width, height);
    let mut y: i64 = 0;
    for page in pages {
        imageops::replace(&mut canvas, page, 0, y);
        y += i64::from(page.height());
    }
    Ok(canvas)
}

use styled_prose_style::DEFAULT_STYLE_NAME;
use styled_prose_types::Size;

/// Per-call parameters of [`StyledProseGenerator::create_image`](crate::StyledProseGenerator::create_image).
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailOptions {
    /// Name of the paragraph style to render with.
    pub style: String,
    /// Counter-clockwise rotation in degrees.
    pub angle: f64,
    /// Final image size; `None` returns the whole trimmed canvas.
    pub thumbnail: Option<Size>,
    /// Normalize text density to `comparative_font_size` before resizing.
    pub prescale: bool,
    pub comparative_font_size: f64,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            style: DEFAULT_STYLE_NAME.to_string(),
            angle: 0.0,
            thumbnail: None,
            prescale: true,
            comparative_font_size: 6.0,
        }
    }
}

impl ThumbnailOptions {
    pub fn new() -> Self { Default::default() }

    pub fn with_style(mut self, style: impl Into<String>) -> Self { self.style = style.into(); self }

    pub fn with_angle(mut self, degrees: f64) -> Self { self.angle = degrees; self }

    pub fn with_thumbnail(mut self, size: impl Into<Size>) -> Self { self.thumbnail = Some(size.into()); self }

    pub fn with_prescale(mut self, prescale: bool) -> Self { self.prescale = prescale; self }

    pub fn with_comparative_font_size(mut self, size: f64) -> Self { self.comparative_font_size = size; self }
}

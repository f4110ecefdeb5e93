/// A pixel size, used for requested thumbnail dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// A physical page size in points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US Letter, the page every prose document is laid out on.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// Pixel dimensions of the page when rasterized at `dpi`.
    pub fn pixels_at(self, dpi: f32) -> Size {
        Size {
            width: (self.width / 72.0 * dpi).round() as u32,
            height: (self.height / 72.0 * dpi).round() as u32,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

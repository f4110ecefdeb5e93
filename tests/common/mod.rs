pub mod fixtures;

use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use styled_prose::{
    BackendError, DocumentRenderer, FamilyMembers, FontBackend, InMemoryFontBackend, PageSize,
    RenderError, RenderRequest,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Resolution the fake renderer rasterizes at.
pub const TEST_DPI: f32 = 18.0;

/// What the renderer was asked to do.
#[derive(Debug, Clone)]
pub struct RecordedRender {
    pub style: String,
    pub font_size: u32,
    pub text: String,
    pub page: PageSize,
    pub workdir: PathBuf,
    pub workdir_existed: bool,
}

/// A font backend plus a renderer that draws one black bar per line.
#[derive(Debug)]
pub struct FakeBackend {
    pub fonts: InMemoryFontBackend,
    pub renders: Vec<RecordedRender>,
    pub pages: usize,
    pub fail_render: bool,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            fonts: InMemoryFontBackend::new(),
            renders: Vec::new(),
            pages: 1,
            fail_render: false,
        }
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(mut self, pages: usize) -> Self {
        self.pages = pages;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_render = true;
        self
    }
}

impl FontBackend for FakeBackend {
    fn register_font(&mut self, name: &str, path: &Path) -> Result<(), BackendError> {
        self.fonts.register_font(name, path)
    }

    fn register_family(&mut self, family: &str, members: &FamilyMembers) -> Result<(), BackendError> {
        self.fonts.register_family(family, members)
    }

    fn unregister_font(&mut self, name: &str) {
        self.fonts.unregister_font(name)
    }

    fn unregister_family(&mut self, family: &str) {
        self.fonts.unregister_family(family)
    }

    fn name(&self) -> &'static str {
        "FakeBackend"
    }
}

impl DocumentRenderer for FakeBackend {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<Vec<RgbImage>, RenderError> {
        self.renders.push(RecordedRender {
            style: request.style.name.clone(),
            font_size: request.style.font_size,
            text: request.text.to_string(),
            page: request.page,
            workdir: request.workdir.to_path_buf(),
            workdir_existed: request.workdir.is_dir(),
        });
        if self.fail_render {
            return Err(RenderError::Layout("paragraph does not fit".to_string()));
        }

        let size = request.page.pixels_at(TEST_DPI);
        let px = |pt: f32| ((pt * TEST_DPI / 72.0).round() as u32).max(1);
        let bar_height = px(request.style.font_size as f32);
        let line_step = px(request.style.leading as f32);
        let char_width = request.style.font_size as f32 / 2.0;

        let page = RgbImage::from_fn(size.width, size.height, |x, y| {
            let line = (y / line_step) as usize;
            let in_bar = y % line_step < bar_height;
            let width = request
                .text
                .split("<br />")
                .nth(line)
                .map_or(0, |l| px(l.chars().count() as f32 * char_width).min(size.width));
            if in_bar && x < width {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        Ok(vec![page; self.pages])
    }
}

use crate::error::GaugeResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless dashboards.
///
/// It still validates every frame so invalid geometry fails fast, and keeps
/// counts from the last frame for assertions.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_panel_count: usize,
    pub last_item_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GaugeResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_panel_count = frame.panels.len();
        self.last_item_count = frame.item_count();
        self.last_text_count = frame.texts().count();
        Ok(())
    }
}

mod frame;
mod null_renderer;
mod primitives;
mod scene_surface;
mod surface;

pub use frame::{
    AXIS_LABEL_BAND_PX, FrameItem, PANEL_GUTTER_PX, PanelFrame, PanelProjector, PixelRect,
    RenderFrame, TITLE_BAND_PX,
};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, Paint, RectPrimitive, Shape, TextHAlign, TextPrimitive, TextVAlign,
};
pub use scene_surface::{SceneSurface, SurfaceEvent};
pub use surface::{AspectRatio, AxesId, AxesLayout, ShapeHandle, Spine, Surface};

use crate::error::GaugeResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully resolved `RenderFrame` (clip regions already
/// looked up) so drawing code stays isolated from gauge and controller logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GaugeResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};

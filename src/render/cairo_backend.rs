use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::core::Point;
use crate::error::{GaugeError, GaugeResult};
use crate::render::{
    AXIS_LABEL_BAND_PX, Color, PanelFrame, PanelProjector, PixelRect, RenderFrame, Renderer,
    Shape, Spine, TITLE_BAND_PX, TextHAlign, TextPrimitive, TextVAlign,
};

const TICK_LENGTH_PX: f64 = 4.0;
const SPINE_WIDTH_PX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub panels_drawn: usize,
    pub shapes_drawn: usize,
    pub clipped_shapes: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a host toolkit's draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GaugeResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Renders offscreen into an image surface through `Renderer::render`, or
/// in place on an external context through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> GaugeResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GaugeError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> GaugeResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the offscreen surface as PNG.
    pub fn write_png(&self, writer: &mut impl std::io::Write) -> GaugeResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| GaugeError::Backend(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> GaugeResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        if let Some(title) = &frame.title {
            let anchor = (f64::from(frame.viewport.width) / 2.0, TITLE_BAND_PX / 2.0);
            show_text(
                context,
                title,
                anchor,
                14.0,
                Color::BLACK,
                TextHAlign::Center,
                TextVAlign::Center,
            );
            stats.texts_drawn += 1;
        }

        for (index, panel) in frame.panels.iter().enumerate() {
            let Some(region) = frame.panel_region(index) else {
                continue;
            };
            let Some(projector) = panel.projector(region)? else {
                continue;
            };
            draw_axes_decorations(context, panel, &projector, &mut stats)?;

            for item in &panel.items {
                context
                    .save()
                    .map_err(|err| map_backend_error("failed to save context", err))?;
                if let Some(clip) = &item.clip {
                    append_shape_path(context, clip, &projector)?;
                    context.clip();
                    stats.clipped_shapes += 1;
                }
                draw_shape(context, &item.shape, &projector, &mut stats)?;
                context
                    .restore()
                    .map_err(|err| map_backend_error("failed to restore context", err))?;
            }

            if let Some(label) = &panel.x_label {
                let plot = projector.plot_area();
                let anchor = (
                    plot.x + plot.width / 2.0,
                    region.y + region.height + AXIS_LABEL_BAND_PX / 2.0,
                );
                show_text(
                    context,
                    label,
                    anchor,
                    12.0,
                    Color::BLACK,
                    TextHAlign::Center,
                    TextVAlign::Center,
                );
                stats.texts_drawn += 1;
            }
            stats.panels_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GaugeResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GaugeResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_axes_decorations(
    context: &Context,
    panel: &PanelFrame,
    projector: &PanelProjector,
    stats: &mut CairoRenderStats,
) -> GaugeResult<()> {
    let Some(layout) = &panel.layout else {
        return Ok(());
    };
    let PixelRect {
        x,
        y,
        width,
        height,
    } = projector.plot_area();

    apply_color(context, Color::BLACK);
    context.set_line_width(SPINE_WIDTH_PX);
    for (spine, from, to) in [
        (Spine::Left, (x, y), (x, y + height)),
        (Spine::Right, (x + width, y), (x + width, y + height)),
        (Spine::Top, (x, y), (x + width, y)),
        (Spine::Bottom, (x, y + height), (x + width, y + height)),
    ] {
        if layout.spine_visible(spine) {
            context.move_to(from.0, from.1);
            context.line_to(to.0, to.1);
        }
    }
    for tick in &layout.y_ticks {
        let (_, tick_y) = projector.to_pixel(Point::new(layout.limits.x_min, tick.value))?;
        context.move_to(x - TICK_LENGTH_PX, tick_y);
        context.line_to(x, tick_y);
    }
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke axes", err))?;

    for tick in &layout.y_ticks {
        let (_, tick_y) = projector.to_pixel(Point::new(layout.limits.x_min, tick.value))?;
        show_text(
            context,
            &tick.label,
            (x - TICK_LENGTH_PX - 2.0, tick_y),
            10.0,
            Color::BLACK,
            TextHAlign::Right,
            TextVAlign::Center,
        );
        stats.texts_drawn += 1;
    }
    Ok(())
}

fn draw_shape(
    context: &Context,
    shape: &Shape,
    projector: &PanelProjector,
    stats: &mut CairoRenderStats,
) -> GaugeResult<()> {
    let paint = match shape {
        Shape::Circle(circle) => circle.paint,
        Shape::Rect(rect) => rect.paint,
        Shape::Text(text) => {
            draw_text(context, text, projector)?;
            stats.texts_drawn += 1;
            return Ok(());
        }
    };
    // Clip-only shapes carry no paint.
    let Some(color) = paint.color() else {
        return Ok(());
    };
    append_shape_path(context, shape, projector)?;
    apply_color(context, color);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill shape", err))?;
    stats.shapes_drawn += 1;
    Ok(())
}

fn append_shape_path(
    context: &Context,
    shape: &Shape,
    projector: &PanelProjector,
) -> GaugeResult<()> {
    match shape {
        Shape::Circle(circle) => {
            let (cx, cy) = projector.to_pixel(circle.center)?;
            let radius = projector.x_length(circle.radius)?;
            context.new_sub_path();
            context.arc(cx, cy, radius, 0.0, TAU);
            context.close_path();
        }
        Shape::Rect(rect) => {
            let (left, top) = projector.to_pixel(Point::new(rect.x, rect.top()))?;
            context.rectangle(
                left,
                top,
                projector.x_length(rect.width)?,
                projector.y_length(rect.height)?,
            );
        }
        Shape::Text(_) => {
            return Err(GaugeError::InvalidData(
                "text has no fill path".to_owned(),
            ));
        }
    }
    Ok(())
}

fn draw_text(
    context: &Context,
    text: &TextPrimitive,
    projector: &PanelProjector,
) -> GaugeResult<()> {
    let anchor = projector.to_pixel(text.anchor)?;
    show_text(
        context,
        &text.text,
        anchor,
        text.font_size_px,
        text.color,
        text.h_align,
        text.v_align,
    );
    Ok(())
}

fn show_text(
    context: &Context,
    text: &str,
    (x, y): (f64, f64),
    font_size_px: f64,
    color: Color,
    h_align: TextHAlign,
    v_align: TextVAlign,
) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {font_size_px}"));
    layout.set_font_description(Some(&font_description));
    layout.set_text(text);

    let (text_width, text_height) = layout.pixel_size();
    let x = match h_align {
        TextHAlign::Left => x,
        TextHAlign::Center => x - f64::from(text_width) / 2.0,
        TextHAlign::Right => x - f64::from(text_width),
    };
    let y = match v_align {
        TextVAlign::Top => y,
        TextVAlign::Center => y - f64::from(text_height) / 2.0,
        TextVAlign::Bottom => y - f64::from(text_height),
    };

    apply_color(context, color);
    context.move_to(x, y);
    pangocairo::functions::show_layout(context, &layout);
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> GaugeError {
    GaugeError::Backend(format!("{prefix}: {err}"))
}

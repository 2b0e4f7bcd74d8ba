use std::rc::Rc;

use tracing::trace;

use crate::api::{Localizer, PassThrough};
use crate::core::{
    GaugeConfig, GaugeFrame, Point, fill_shapes, format_value_label, frame, outline_shapes,
    value_axis_ticks,
};
use crate::error::{GaugeError, GaugeResult};
use crate::render::{
    AspectRatio, AxesId, AxesLayout, Color, Paint, ShapeHandle, Spine, Surface, TextHAlign,
    TextPrimitive, TextVAlign,
};

/// Per-call options for [`GaugeRenderer::draw`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOptions {
    /// Axes to draw on. Wins over the axes captured by the first outline.
    pub axes: Option<AxesId>,
    pub display_value: bool,
    /// Bottom axis label, localized before display.
    pub description: Option<String>,
    /// Figure title, localized before display.
    pub title: Option<String>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            axes: None,
            display_value: true,
            description: None,
            title: None,
        }
    }
}

impl DrawOptions {
    #[must_use]
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn on_axes(mut self, axes: AxesId) -> Self {
        self.axes = Some(axes);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn without_value(mut self) -> Self {
        self.display_value = false;
        self
    }
}

/// Handles of one live fill: the two fill rectangles and their clip shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FillHandles {
    bulb: ShapeHandle,
    bar: ShapeHandle,
    bulb_clip: ShapeHandle,
    bar_clip: ShapeHandle,
}

impl FillHandles {
    fn all(self) -> [ShapeHandle; 4] {
        [self.bulb, self.bar, self.bulb_clip, self.bar_clip]
    }
}

/// Mutable drawing state. At most one fill pair and one label are live.
#[derive(Debug, Clone, Default, PartialEq)]
struct GaugeRenderState {
    outline: Option<[ShapeHandle; 4]>,
    fill: Option<FillHandles>,
    label: Option<(ShapeHandle, String)>,
}

/// Owns one thermometer's drawing lifecycle on a surface.
///
/// The outline is drawn once; every [`draw`](Self::draw) detaches the previous
/// fill pair (with its clip shapes) and value label before attaching new ones.
pub struct GaugeRenderer {
    config: GaugeConfig,
    axes: Option<AxesId>,
    state: GaugeRenderState,
    localizer: Rc<dyn Localizer>,
}

impl std::fmt::Debug for GaugeRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaugeRenderer")
            .field("config", &self.config)
            .field("axes", &self.axes)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl GaugeRenderer {
    /// Validates `config` up front so geometry errors surface at setup.
    pub fn new(config: GaugeConfig) -> GaugeResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            axes: None,
            state: GaugeRenderState::default(),
            localizer: Rc::new(PassThrough),
        })
    }

    #[must_use]
    pub fn with_localizer(mut self, localizer: Rc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    #[must_use]
    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn frame(&self) -> GaugeResult<GaugeFrame> {
        frame(&self.config)
    }

    /// Axes captured by the outline, if drawn.
    #[must_use]
    pub fn axes(&self) -> Option<AxesId> {
        self.axes
    }

    #[must_use]
    pub fn has_outline(&self) -> bool {
        self.state.outline.is_some()
    }

    /// Number of live fill shapes: 0 before the first draw, 2 afterwards.
    #[must_use]
    pub fn live_fill_count(&self) -> usize {
        if self.state.fill.is_some() { 2 } else { 0 }
    }

    /// Live `(bulb, bar)` fill handles.
    #[must_use]
    pub fn fill_handles(&self) -> Option<(ShapeHandle, ShapeHandle)> {
        self.state.fill.map(|fill| (fill.bulb, fill.bar))
    }

    /// Live `(bulb, bar)` clip handles.
    #[must_use]
    pub fn clip_handles(&self) -> Option<(ShapeHandle, ShapeHandle)> {
        self.state.fill.map(|fill| (fill.bulb_clip, fill.bar_clip))
    }

    #[must_use]
    pub fn outline_handles(&self) -> Option<[ShapeHandle; 4]> {
        self.state.outline
    }

    #[must_use]
    pub fn label_handle(&self) -> Option<ShapeHandle> {
        self.state.label.as_ref().map(|(handle, _)| *handle)
    }

    #[must_use]
    pub fn label_text(&self) -> Option<&str> {
        self.state.label.as_ref().map(|(_, text)| text.as_str())
    }

    /// Draws the static outline and configures the axes.
    ///
    /// `axes` selects an existing axes; `None` creates a new one on the
    /// surface. Returns the axes the gauge is bound to.
    pub fn draw_outline<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        axes: Option<AxesId>,
    ) -> GaugeResult<AxesId> {
        if self.state.outline.is_some() {
            return Err(GaugeError::InvalidData(
                "gauge outline is already drawn".to_owned(),
            ));
        }

        let frame = frame(&self.config)?;
        let outline = outline_shapes(&self.config, Paint::Solid(Color::WHITE))?;
        let y_ticks = value_axis_ticks(&self.config)?;
        let axes = match axes {
            Some(axes) => axes,
            None => surface.create_axes()?,
        };

        let [outer_bulb, outer_bar, inner_bulb, inner_bar] = outline.draw_order();
        let handles = [
            surface.attach(axes, outer_bulb)?,
            surface.attach(axes, outer_bar)?,
            surface.attach(axes, inner_bulb)?,
            surface.attach(axes, inner_bar)?,
        ];
        surface.configure_axes(
            axes,
            AxesLayout {
                aspect: AspectRatio::Equal,
                limits: frame.bounds(),
                show_x_ticks: false,
                hidden_spines: vec![Spine::Right, Spine::Top, Spine::Bottom],
                y_ticks,
            },
        )?;

        trace!(%axes, "drew gauge outline");
        self.state.outline = Some(handles);
        self.axes = Some(axes);
        Ok(axes)
    }

    /// Shows `value` on the gauge.
    ///
    /// Values outside `[min_value, max_value]` are drawn as-is: the fill is
    /// clipped by the outline and the label reports the true value.
    pub fn draw<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        value: f64,
        options: DrawOptions,
    ) -> GaugeResult<()> {
        if self.state.outline.is_none() {
            self.draw_outline(surface, options.axes)?;
        }
        let axes = options
            .axes
            .or(self.axes)
            .ok_or_else(|| GaugeError::InvalidData("gauge has no axes".to_owned()))?;

        // Everything that can fail on bad input is computed before any
        // handle is touched.
        let fill = fill_shapes(&self.config, value)?;
        let clips = outline_shapes(&self.config, Paint::None)?;
        let frame = frame(&self.config)?;

        if let Some(previous) = self.state.fill.take() {
            for handle in previous.all() {
                surface.detach(handle)?;
            }
        }

        let bulb = surface.attach(axes, fill.fill_bulb.into())?;
        let bar = surface.attach(axes, fill.fill_bar.into())?;
        let bulb_clip = surface.attach(axes, clips.inner_bulb.into())?;
        let bar_clip = surface.attach(axes, clips.inner_bar.into())?;
        surface.set_clip(bulb, bulb_clip)?;
        surface.set_clip(bar, bar_clip)?;
        self.state.fill = Some(FillHandles {
            bulb,
            bar,
            bulb_clip,
            bar_clip,
        });

        if let Some((previous, _)) = self.state.label.take() {
            surface.detach(previous)?;
        }
        if options.display_value {
            let text = format_value_label(value, &self.config.units);
            let label = TextPrimitive::new(
                text.clone(),
                Point::new(frame.x_max, value),
                self.config.fill_color,
            )
            .with_alignment(TextHAlign::Left, TextVAlign::Center);
            let handle = surface.attach(axes, label.into())?;
            self.state.label = Some((handle, text));
        }

        if let Some(description) = &options.description {
            surface.set_axis_label(axes, self.localizer.localize(description))?;
        }
        if let Some(title) = &options.title {
            surface.set_title(self.localizer.localize(title));
        }

        trace!(%axes, value, "drew gauge value");
        Ok(())
    }

    /// Detaches every shape this gauge owns and forgets its axes.
    pub fn dispose<S: Surface + ?Sized>(&mut self, surface: &mut S) -> GaugeResult<()> {
        let state = std::mem::take(&mut self.state);
        let handles = state
            .fill
            .map(FillHandles::all)
            .into_iter()
            .flatten()
            .chain(state.label.map(|(handle, _)| handle))
            .chain(state.outline.into_iter().flatten());
        for handle in handles {
            surface.detach(handle)?;
        }
        self.axes = None;
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, Point, Viewport};
use crate::error::{GaugeError, GaugeResult};
use crate::render::{AspectRatio, AxesId, AxesLayout, Shape};

/// Vertical band reserved for the figure title when one is set.
pub const TITLE_BAND_PX: f64 = 28.0;
/// Horizontal inset on each side of a panel for tick labels and value text.
pub const PANEL_GUTTER_PX: f64 = 56.0;
/// Band below each panel for the axis label.
pub const AXIS_LABEL_BAND_PX: f64 = 24.0;

/// Rectangle in pixel space, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One visible shape with its resolved clip region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameItem {
    pub shape: Shape,
    pub clip: Option<Shape>,
}

/// Everything drawn inside one axes region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelFrame {
    pub axes: AxesId,
    pub layout: Option<AxesLayout>,
    pub x_label: Option<String>,
    pub items: Vec<FrameItem>,
}

impl PanelFrame {
    /// Builds the data-to-pixel projection for this panel inside `region`.
    ///
    /// Returns `None` while the panel has no configured limits.
    pub fn projector(&self, region: PixelRect) -> GaugeResult<Option<PanelProjector>> {
        let Some(layout) = &self.layout else {
            return Ok(None);
        };
        if region.width <= 0.0 || region.height <= 0.0 {
            return Err(GaugeError::InvalidData(
                "panel region must have a positive size".to_owned(),
            ));
        }

        let limits = layout.limits;
        let (width, height) = match layout.aspect {
            AspectRatio::Auto => (region.width, region.height),
            AspectRatio::Equal => {
                let px_per_unit = (region.width / limits.width()).min(region.height / limits.height());
                (limits.width() * px_per_unit, limits.height() * px_per_unit)
            }
        };

        Ok(Some(PanelProjector {
            x_scale: LinearScale::new(limits.x_min, limits.x_max)?,
            y_scale: LinearScale::new(limits.y_min, limits.y_max)?.flipped(),
            plot: PixelRect {
                x: region.x + (region.width - width) / 2.0,
                y: region.y + (region.height - height) / 2.0,
                width,
                height,
            },
        }))
    }
}

/// Maps panel data coordinates onto the pixel plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelProjector {
    x_scale: LinearScale,
    y_scale: LinearScale,
    plot: PixelRect,
}

impl PanelProjector {
    #[must_use]
    pub fn plot_area(&self) -> PixelRect {
        self.plot
    }

    pub fn to_pixel(&self, point: Point) -> GaugeResult<(f64, f64)> {
        Ok((
            self.plot.x + self.x_scale.domain_to_pixel(point.x, self.plot.width)?,
            self.plot.y + self.y_scale.domain_to_pixel(point.y, self.plot.height)?,
        ))
    }

    pub fn x_length(&self, length: f64) -> GaugeResult<f64> {
        self.x_scale.length_to_pixels(length, self.plot.width)
    }

    pub fn y_length(&self, length: f64) -> GaugeResult<f64> {
        self.y_scale.length_to_pixels(length, self.plot.height)
    }
}

/// Backend-agnostic snapshot of a surface taken at flush time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub title: Option<String>,
    pub panels: Vec<PanelFrame>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            title: None,
            panels: Vec::new(),
        }
    }

    pub fn validate(&self) -> GaugeResult<()> {
        if !self.viewport.is_valid() {
            return Err(GaugeError::InvalidData(format!(
                "invalid viewport size: width={}, height={}",
                self.viewport.width, self.viewport.height
            )));
        }

        for item in self.panels.iter().flat_map(|panel| &panel.items) {
            item.shape.validate()?;
            if let Some(clip) = &item.clip {
                if !clip.is_closed() {
                    return Err(GaugeError::InvalidData(
                        "clip region must be a closed shape".to_owned(),
                    ));
                }
                clip.validate()?;
            }
        }
        Ok(())
    }

    /// Side-by-side region of panel `index`, below the title band.
    #[must_use]
    pub fn panel_region(&self, index: usize) -> Option<PixelRect> {
        if index >= self.panels.len() {
            return None;
        }
        let top = if self.title.is_some() { TITLE_BAND_PX } else { 0.0 };
        let slot_width = f64::from(self.viewport.width) / self.panels.len() as f64;
        Some(PixelRect {
            x: slot_width * index as f64 + PANEL_GUTTER_PX,
            y: top,
            width: (slot_width - 2.0 * PANEL_GUTTER_PX).max(1.0),
            height: (f64::from(self.viewport.height) - top - AXIS_LABEL_BAND_PX).max(1.0),
        })
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.panels.iter().map(|panel| panel.items.len()).sum()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.panels
            .iter()
            .flat_map(|panel| &panel.items)
            .filter_map(|item| match &item.shape {
                Shape::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

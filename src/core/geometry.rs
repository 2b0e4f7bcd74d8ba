//! Pure shape computation for the bar-and-bulb thermometer.
//!
//! The gauge lives in data coordinates: `x = 0` is the gauge's vertical axis
//! and `y` is measured in the same units as the displayed value. Nothing here
//! touches a surface.

use serde::{Deserialize, Serialize};

use crate::core::gauge_config::GaugeConfig;
use crate::core::ticks::{AxisTick, VALUE_AXIS_MAX_INTERVALS, nice_tick_positions};
use crate::core::types::{Bounds, Point};
use crate::error::{GaugeError, GaugeResult};
use crate::render::{CirclePrimitive, Paint, RectPrimitive, Shape};

/// Coordinate frame derived from a [`GaugeConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeFrame {
    /// Bottom of the bar and center of the bulb.
    pub origin_y: f64,
    pub bar_height: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl GaugeFrame {
    #[must_use]
    pub fn bounds(self) -> Bounds {
        Bounds {
            x_min: self.x_min,
            x_max: self.x_max,
            y_min: self.y_min,
            y_max: self.y_max,
        }
    }

    /// Height of the fill visible inside the bar section (above the bulb).
    #[must_use]
    pub fn bar_fill_height(self, value: f64) -> f64 {
        (value - self.origin_y).max(0.0)
    }
}

/// Computes the gauge frame, validating the config first.
pub fn frame(config: &GaugeConfig) -> GaugeResult<GaugeFrame> {
    config.validate()?;

    let bulb_width = config.resolved_bulb_width();
    let origin_y = config.min_value + bulb_width / 2.0;
    Ok(GaugeFrame {
        origin_y,
        bar_height: config.max_value - origin_y,
        x_min: -config.bar_width / 2.0 - config.padding_x,
        x_max: config.bar_width / 2.0 + config.padding_x,
        y_min: config.min_value - config.padding_y,
        y_max: config.max_value + config.padding_y,
    })
}

/// Static outline of the gauge.
///
/// Drawing `outer_*` and then `inner_*` on top leaves a ring of
/// `border_width` in `border_color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineShapes {
    pub outer_bulb: CirclePrimitive,
    pub outer_bar: RectPrimitive,
    pub inner_bulb: CirclePrimitive,
    pub inner_bar: RectPrimitive,
}

impl OutlineShapes {
    /// Shapes in attach order: outer pair first, inner pair on top.
    #[must_use]
    pub fn draw_order(&self) -> [Shape; 4] {
        [
            self.outer_bulb.into(),
            self.outer_bar.into(),
            self.inner_bulb.into(),
            self.inner_bar.into(),
        ]
    }
}

/// Outline shapes; the inner pair is painted with `inner_paint` (white for
/// the visible outline, [`Paint::None`] when only used as clip regions).
pub fn outline_shapes(config: &GaugeConfig, inner_paint: Paint) -> GaugeResult<OutlineShapes> {
    let frame = frame(config)?;
    let border = Paint::Solid(config.border_color);
    let half_bar = config.bar_width / 2.0;
    let bulb_radius = config.resolved_bulb_width() / 2.0;
    let bulb_center = Point::new(0.0, frame.origin_y);

    // The inner bar keeps its bottom edge at the origin; the bulb covers it.
    Ok(OutlineShapes {
        outer_bulb: CirclePrimitive::new(bulb_center, bulb_radius, border),
        outer_bar: RectPrimitive::from_corners(
            Point::new(-half_bar, frame.origin_y),
            Point::new(half_bar, config.max_value),
            border,
        ),
        inner_bulb: CirclePrimitive::new(
            bulb_center,
            bulb_radius - config.border_width,
            inner_paint,
        ),
        inner_bar: RectPrimitive::from_corners(
            Point::new(-half_bar + config.border_width, frame.origin_y),
            Point::new(half_bar - config.border_width, config.max_value - config.border_width),
            inner_paint,
        ),
    })
}

/// The two oversized fill rectangles for `value`.
///
/// Both span the whole bounding box horizontally and `min_value..value`
/// vertically; the renderer clips one to the inner bulb and the other to the
/// inner bar. Values outside the range are not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillShapes {
    pub fill_bulb: RectPrimitive,
    pub fill_bar: RectPrimitive,
}

pub fn fill_shapes(config: &GaugeConfig, value: f64) -> GaugeResult<FillShapes> {
    if !value.is_finite() {
        return Err(GaugeError::InvalidData(format!(
            "gauge value must be finite, got {value}"
        )));
    }
    let frame = frame(config)?;
    let fill = RectPrimitive::from_corners(
        Point::new(frame.x_min, config.min_value),
        Point::new(frame.x_max, value),
        Paint::Solid(config.fill_color),
    );
    Ok(FillShapes {
        fill_bulb: fill,
        fill_bar: fill,
    })
}

/// Value-axis ticks inside `[min_value, max_value]`, labelled as integer
/// value plus units.
pub fn value_axis_ticks(config: &GaugeConfig) -> GaugeResult<Vec<AxisTick>> {
    let frame = frame(config)?;
    Ok(
        nice_tick_positions(frame.y_min, frame.y_max, VALUE_AXIS_MAX_INTERVALS)
            .into_iter()
            .filter(|tick| (config.min_value..=config.max_value).contains(tick))
            .map(|value| AxisTick {
                value,
                label: format!("{value:.0}{}", config.units),
            })
            .collect(),
    )
}

/// Text shown next to the fill, e.g. `"20.0 °C"`.
#[must_use]
pub fn format_value_label(value: f64, units: &str) -> String {
    format!("{value:.1}{units}")
}

#[cfg(test)]
mod tests {
    use super::{fill_shapes, frame, outline_shapes, value_axis_ticks};
    use crate::core::GaugeConfig;
    use crate::core::Point;
    use crate::render::{Color, Paint};

    #[test]
    fn bounding_box_uses_half_bar_plus_padding() {
        let frame = frame(&GaugeConfig::default()).expect("frame");
        assert_eq!(frame.x_min, -25.0);
        assert_eq!(frame.x_max, 25.0);
        assert_eq!(frame.y_min, -281.15);
        assert_eq!(frame.y_max, 108.0);
    }

    #[test]
    fn inner_shapes_are_inset_by_border() {
        let outline =
            outline_shapes(&GaugeConfig::default(), Paint::Solid(Color::WHITE)).expect("outline");
        assert_eq!(outline.outer_bulb.radius, 40.0);
        assert_eq!(outline.inner_bulb.radius, 37.0);
        assert_eq!(outline.inner_bar.x, -17.0);
        assert_eq!(outline.inner_bar.width, 34.0);
        assert_eq!(outline.inner_bar.y, outline.outer_bar.y);
        approx::assert_relative_eq!(outline.inner_bar.top(), 97.0, epsilon = 1e-9);
        assert_eq!(outline.outer_bar.paint, Paint::Solid(Color::BLACK));
    }

    #[test]
    fn fill_below_range_is_normalized_not_rejected() {
        let fill = fill_shapes(&GaugeConfig::default(), -300.0).expect("fill");
        assert_eq!(fill.fill_bar.y, -300.0);
        assert!(fill.fill_bar.height > 0.0);
        assert!(fill.fill_bar.contains(Point::new(0.0, -280.0)));
        assert!(fill_shapes(&GaugeConfig::default(), f64::NAN).is_err());
    }

    #[test]
    fn tick_labels_stay_inside_range() {
        let ticks = value_axis_ticks(&GaugeConfig::default()).expect("ticks");
        assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("-250 °C"));
        assert_eq!(ticks.last().map(|t| t.label.as_str()), Some("100 °C"));
        assert!(ticks.iter().all(|t| (-273.15..=100.0).contains(&t.value)));
    }
}

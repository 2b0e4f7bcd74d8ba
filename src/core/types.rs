use serde::{Deserialize, Serialize};

use crate::error::{GaugeError, GaugeResult};

/// Pixel size of an output target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Point in gauge data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> GaugeResult<Self> {
        if ![x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite()) {
            return Err(GaugeError::InvalidData(
                "bounds must be finite".to_owned(),
            ));
        }
        if x_min >= x_max || y_min >= y_max {
            return Err(GaugeError::InvalidData(format!(
                "bounds must be non-empty: x=[{x_min}, {x_max}] y=[{y_min}, {y_max}]"
            )));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y_max - self.y_min
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }
}

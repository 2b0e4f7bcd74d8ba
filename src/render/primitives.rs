use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::error::{GaugeError, GaugeResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> GaugeResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GaugeError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Fill of a closed shape. `None` shapes are invisible and only serve as
/// clip boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    None,
}

impl Paint {
    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Solid(color) => Some(color),
            Self::None => None,
        }
    }

    fn validate(self) -> GaugeResult<()> {
        match self {
            Self::Solid(color) => color.validate(),
            Self::None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub center: Point,
    pub radius: f64,
    pub paint: Paint,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(center: Point, radius: f64, paint: Paint) -> Self {
        Self {
            center,
            radius,
            paint,
        }
    }

    pub fn validate(self) -> GaugeResult<()> {
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(GaugeError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GaugeError::InvalidData(
                "circle radius must be finite and > 0".to_owned(),
            ));
        }
        self.paint.validate()
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Rectangle anchored at its lower-left corner `(x, y)`, data coordinates
/// grow upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub paint: Paint,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, paint: Paint) -> Self {
        Self {
            x,
            y,
            width,
            height,
            paint,
        }
    }

    /// Builds the rectangle spanning two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point, paint: Paint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
            paint,
        }
    }

    pub fn validate(self) -> GaugeResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(GaugeError::InvalidData(
                "rect origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(GaugeError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        self.paint.validate()
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        (self.x..=self.right()).contains(&point.x) && (self.y..=self.top()).contains(&point.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextVAlign {
    Top,
    Center,
    Bottom,
}

/// Label anchored at `anchor` in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub anchor: Point,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl TextPrimitive {
    pub const DEFAULT_FONT_SIZE_PX: f64 = 12.0;

    #[must_use]
    pub fn new(text: impl Into<String>, anchor: Point, color: Color) -> Self {
        Self {
            text: text.into(),
            anchor,
            font_size_px: Self::DEFAULT_FONT_SIZE_PX,
            color,
            h_align: TextHAlign::Left,
            v_align: TextVAlign::Center,
        }
    }

    #[must_use]
    pub fn with_alignment(mut self, h_align: TextHAlign, v_align: TextVAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn validate(&self) -> GaugeResult<()> {
        if self.text.is_empty() {
            return Err(GaugeError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.anchor.x.is_finite() || !self.anchor.y.is_finite() {
            return Err(GaugeError::InvalidData(
                "text anchor must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(GaugeError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Any primitive a surface can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(CirclePrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
}

impl Shape {
    pub fn validate(&self) -> GaugeResult<()> {
        match self {
            Self::Circle(circle) => circle.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Text(text) => text.validate(),
        }
    }

    /// Closed shapes can act as clip regions; text cannot.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !matches!(self, Self::Text(_))
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Self::Circle(circle) => circle.contains(point),
            Self::Rect(rect) => rect.contains(point),
            Self::Text(_) => false,
        }
    }
}

impl From<CirclePrimitive> for Shape {
    fn from(value: CirclePrimitive) -> Self {
        Self::Circle(value)
    }
}

impl From<RectPrimitive> for Shape {
    fn from(value: RectPrimitive) -> Self {
        Self::Rect(value)
    }
}

impl From<TextPrimitive> for Shape {
    fn from(value: TextPrimitive) -> Self {
        Self::Text(value)
    }
}

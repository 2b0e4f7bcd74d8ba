use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{AxisTick, Bounds};
use crate::error::GaugeResult;
use crate::render::Shape;

/// Identifies one axes region (one gauge slot) on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxesId(u32);

impl AxesId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AxesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "axes#{}", self.0)
    }
}

/// Handle to a shape attached to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeHandle(u64);

impl ShapeHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// One data unit is the same pixel length on both axes.
    Equal,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spine {
    Left,
    Right,
    Top,
    Bottom,
}

/// Axis configuration applied once when a gauge outline is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesLayout {
    pub aspect: AspectRatio,
    pub limits: Bounds,
    pub show_x_ticks: bool,
    pub hidden_spines: Vec<Spine>,
    pub y_ticks: Vec<AxisTick>,
}

impl AxesLayout {
    #[must_use]
    pub fn spine_visible(&self, spine: Spine) -> bool {
        !self.hidden_spines.contains(&spine)
    }
}

/// Drawing target shared by every gauge of a dashboard.
///
/// Implementations keep attached shapes until they are detached and only
/// repaint on `flush`, so a batch of mutations becomes visible at once.
pub trait Surface {
    fn create_axes(&mut self) -> GaugeResult<AxesId>;

    fn attach(&mut self, axes: AxesId, shape: Shape) -> GaugeResult<ShapeHandle>;

    fn detach(&mut self, handle: ShapeHandle) -> GaugeResult<()>;

    /// Restricts the visible region of `handle` to the interior of `clip`.
    fn set_clip(&mut self, handle: ShapeHandle, clip: ShapeHandle) -> GaugeResult<()>;

    fn configure_axes(&mut self, axes: AxesId, layout: AxesLayout) -> GaugeResult<()>;

    fn set_axis_label(&mut self, axes: AxesId, label: String) -> GaugeResult<()>;

    fn set_title(&mut self, title: String);

    fn flush(&mut self) -> GaugeResult<()>;
}

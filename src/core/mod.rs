pub mod gauge_config;
pub mod geometry;
pub mod scale;
pub mod ticks;
pub mod types;

pub use gauge_config::GaugeConfig;
pub use geometry::{
    FillShapes, GaugeFrame, OutlineShapes, fill_shapes, format_value_label, frame,
    outline_shapes, value_axis_ticks,
};
pub use scale::LinearScale;
pub use ticks::AxisTick;
pub use types::{Bounds, Point, Viewport};

//! thermo-gauge: thermometer gauges driven by reactive model bindings.
//!
//! `core` holds the pure gauge geometry, `render` the retained-mode drawing
//! surface and its backends, `api` the gauge renderer and the controller that
//! turns control changes into one model evaluation and one flush.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ControllerBuilder, GaugeRenderer, ReactiveController};
pub use crate::core::GaugeConfig;
pub use error::{GaugeError, GaugeResult, ModelError};

//! Slider-side collaborators: value bindings and the slider spec table.

mod catalog;
mod controls;

pub use catalog::{ControlCatalog, ControlSpec};
pub use controls::{ControlBinding, ControlChange};

mod controller;
mod gauge_renderer;
mod localization;
mod model;

pub use controller::{ControllerBuilder, ControllerState, ReactiveController, UpdateReport};
pub use gauge_renderer::{DrawOptions, GaugeRenderer};
pub use localization::{CatalogLocalizer, Localizer, PassThrough};
pub use model::{BindingScheme, Model, ModelInputs, ModelResult};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::api::Localizer;
use crate::error::{GaugeError, GaugeResult};

/// Range, step and labels of one slider-backed model parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Decimal places shown in the slider readout.
    pub readout_precision: usize,
    pub description: String,
    pub unit: String,
}

impl ControlSpec {
    pub fn new(
        min: f64,
        max: f64,
        step: f64,
        readout_precision: usize,
        description: impl Into<String>,
        unit: impl Into<String>,
    ) -> GaugeResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(GaugeError::InvalidData(format!(
                "control range must be finite with min < max, got [{min}, {max}]"
            )));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(GaugeError::InvalidData(
                "control step must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            min,
            max,
            step,
            readout_precision,
            description: description.into(),
            unit: unit.into(),
        })
    }

    /// Clamps `value` into range and snaps it to the nearest step from `min`.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    #[must_use]
    pub fn format_readout(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.readout_precision)
    }

    #[must_use]
    pub fn localized_description(&self, localizer: &dyn Localizer) -> String {
        localizer.localize(&self.description)
    }

    #[must_use]
    pub fn localized_unit(&self, localizer: &dyn Localizer) -> String {
        localizer.localize(&self.unit)
    }
}

/// Lookup table from model parameter name to its slider spec.
///
/// Owned by the host application; the controller only consults it to clamp
/// values written through `set_control`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlCatalog {
    specs: IndexMap<String, ControlSpec>,
}

impl ControlCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters of the energy-balance models in `extensions::energy_balance`.
    #[must_use]
    pub fn energy_balance() -> Self {
        let mut catalog = Self::new();
        for (name, min, max, step, precision, description, unit) in [
            ("temperature", -273.0, 100.0, 1.0, 0, "Temperature", "°C"),
            (
                "solar_intensity_percent",
                50.0,
                150.0,
                1.0,
                0,
                "Solar intensity",
                "% of present value",
            ),
            ("planet_albedo", 0.0, 1.0, 0.01, 2, "Planet albedo", "(fraction)"),
            (
                "infrared_emissivity",
                0.0,
                1.0,
                0.005,
                3,
                "Infrared emissivity",
                "(fraction)",
            ),
            (
                "optical_absorptivity",
                0.0,
                1.0,
                0.005,
                3,
                "Optical absorptivity",
                "(fraction)",
            ),
        ] {
            catalog.specs.insert(
                name.to_owned(),
                ControlSpec {
                    min,
                    max,
                    step,
                    readout_precision: precision,
                    description: description.to_owned(),
                    unit: unit.to_owned(),
                },
            );
        }
        catalog
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: ControlSpec) -> Option<ControlSpec> {
        self.specs.insert(name.into(), spec)
    }

    pub fn get(&self, name: &str) -> GaugeResult<&ControlSpec> {
        self.specs
            .get(name)
            .ok_or_else(|| GaugeError::UnknownVariable(name.to_owned()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }
}

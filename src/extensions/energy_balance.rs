//! Zero-dimensional radiative energy-balance models of a planet.
//!
//! These are the toy models the gauges were built to explore: each maps
//! slider parameters to equilibrium temperatures in degrees Celsius.

use crate::api::{BindingScheme, Model, ModelInputs, ModelResult};
use crate::error::ModelError;

/// Present-day solar irradiance at the top of the atmosphere (W/m²).
pub const SOLAR_INTENSITY: f64 = 1361.0;
/// Stefan-Boltzmann constant (W/m²/K⁴).
pub const STEFAN_BOLTZMANN_CONSTANT: f64 = 5.670_374_419e-8;
/// 0 K expressed in degrees Celsius.
pub const ABSOLUTE_ZERO_DEG_C: f64 = -273.15;

pub const SURFACE_TEMPERATURE: &str = "Surface temperature";
pub const ATMOSPHERE_TEMPERATURE: &str = "Atmosphere temperature";

/// Bare planet: absorbed sunlight balances surface emission.
pub fn radiation_model_simplest(
    solar_intensity_percent: f64,
    planet_albedo: f64,
) -> Result<ModelResult, ModelError> {
    let absorbed = absorbed_flux(solar_intensity_percent, planet_albedo)?;
    let surface_k = (absorbed / STEFAN_BOLTZMANN_CONSTANT).powf(0.25);
    Ok(ModelResult::from([(
        SURFACE_TEMPERATURE.to_owned(),
        surface_k + ABSOLUTE_ZERO_DEG_C,
    )]))
}

/// One-layer atmosphere transparent to sunlight that absorbs and re-emits
/// the fraction `infrared_emissivity` of surface infrared.
pub fn radiation_model_greenhouse(
    solar_intensity_percent: f64,
    planet_albedo: f64,
    infrared_emissivity: f64,
) -> Result<ModelResult, ModelError> {
    let absorbed = absorbed_flux(solar_intensity_percent, planet_albedo)?;
    check_fraction("infrared_emissivity", infrared_emissivity)?;
    let surface_k4 = absorbed * 2.0 / (STEFAN_BOLTZMANN_CONSTANT * (2.0 - infrared_emissivity));
    Ok(ModelResult::from([(
        SURFACE_TEMPERATURE.to_owned(),
        surface_k4.powf(0.25) + ABSOLUTE_ZERO_DEG_C,
    )]))
}

/// One-layer atmosphere that also absorbs the fraction
/// `optical_absorptivity` of incoming sunlight. Reports both the surface and
/// the atmosphere temperature.
pub fn radiation_model_absorbing_atmosphere(
    solar_intensity_percent: f64,
    planet_albedo: f64,
    infrared_emissivity: f64,
    optical_absorptivity: f64,
) -> Result<ModelResult, ModelError> {
    let absorbed = absorbed_flux(solar_intensity_percent, planet_albedo)?;
    check_fraction("infrared_emissivity", infrared_emissivity)?;
    check_fraction("optical_absorptivity", optical_absorptivity)?;
    if infrared_emissivity == 0.0 {
        return Err(ModelError::Domain {
            name: "infrared_emissivity".to_owned(),
            value: infrared_emissivity,
            reason: "a non-emitting atmosphere has no equilibrium temperature".to_owned(),
        });
    }

    let sigma = STEFAN_BOLTZMANN_CONSTANT;
    let surface_k4 =
        absorbed * (2.0 - optical_absorptivity) / (sigma * (2.0 - infrared_emissivity));
    let atmosphere_k4 =
        (optical_absorptivity * absorbed / infrared_emissivity + sigma * surface_k4) / (2.0 * sigma);
    Ok(ModelResult::from([
        (
            SURFACE_TEMPERATURE.to_owned(),
            surface_k4.powf(0.25) + ABSOLUTE_ZERO_DEG_C,
        ),
        (
            ATMOSPHERE_TEMPERATURE.to_owned(),
            atmosphere_k4.powf(0.25) + ABSOLUTE_ZERO_DEG_C,
        ),
    ]))
}

/// The models above as [`Model`] implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyBalanceModel {
    Simplest,
    Greenhouse,
    AbsorbingAtmosphere,
}

impl EnergyBalanceModel {
    /// Parameter names with their present-day defaults, in positional order.
    #[must_use]
    pub fn parameters(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Simplest => &[("solar_intensity_percent", 100.0), ("planet_albedo", 0.3)],
            Self::Greenhouse => &[
                ("solar_intensity_percent", 100.0),
                ("planet_albedo", 0.3),
                ("infrared_emissivity", 0.78),
            ],
            Self::AbsorbingAtmosphere => &[
                ("solar_intensity_percent", 100.0),
                ("planet_albedo", 0.3),
                ("infrared_emissivity", 0.78),
                ("optical_absorptivity", 0.0),
            ],
        }
    }

    fn arguments(self, inputs: &ModelInputs<'_>) -> Result<Vec<f64>, ModelError> {
        let parameters = self.parameters();
        match inputs.scheme() {
            BindingScheme::Named => parameters
                .iter()
                .map(|(name, _)| inputs.value(name))
                .collect(),
            BindingScheme::Positional if inputs.len() == parameters.len() => {
                Ok(inputs.positional().to_vec())
            }
            BindingScheme::Positional => Err(ModelError::Arity {
                expected: parameters.len(),
                actual: inputs.len(),
            }),
        }
    }
}

impl Model for EnergyBalanceModel {
    fn evaluate(&self, inputs: &ModelInputs<'_>) -> Result<ModelResult, ModelError> {
        let args = self.arguments(inputs)?;
        match (self, args.as_slice()) {
            (Self::Simplest, &[solar, albedo]) => radiation_model_simplest(solar, albedo),
            (Self::Greenhouse, &[solar, albedo, emissivity]) => {
                radiation_model_greenhouse(solar, albedo, emissivity)
            }
            (Self::AbsorbingAtmosphere, &[solar, albedo, emissivity, absorptivity]) => {
                radiation_model_absorbing_atmosphere(solar, albedo, emissivity, absorptivity)
            }
            _ => Err(ModelError::Arity {
                expected: self.parameters().len(),
                actual: args.len(),
            }),
        }
    }
}

fn absorbed_flux(solar_intensity_percent: f64, planet_albedo: f64) -> Result<f64, ModelError> {
    if !solar_intensity_percent.is_finite() || solar_intensity_percent < 0.0 {
        return Err(ModelError::Domain {
            name: "solar_intensity_percent".to_owned(),
            value: solar_intensity_percent,
            reason: "must be finite and >= 0".to_owned(),
        });
    }
    check_fraction("planet_albedo", planet_albedo)?;
    let solar_intensity = solar_intensity_percent / 100.0 * SOLAR_INTENSITY;
    // Sphere surface is four times its cross-section.
    Ok(solar_intensity * (1.0 - planet_albedo) / 4.0)
}

fn check_fraction(name: &str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::Domain {
            name: name.to_owned(),
            value,
            reason: "must be a fraction in [0, 1]".to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ATMOSPHERE_TEMPERATURE, SURFACE_TEMPERATURE, radiation_model_absorbing_atmosphere,
        radiation_model_greenhouse, radiation_model_simplest,
    };
    use crate::error::ModelError;

    #[test]
    fn bare_planet_is_well_below_freezing() {
        let result = radiation_model_simplest(100.0, 0.3).expect("model");
        let surface = result[SURFACE_TEMPERATURE];
        assert!((-19.5..-17.5).contains(&surface), "got {surface}");
    }

    #[test]
    fn greenhouse_layer_brings_present_day_climate() {
        let result = radiation_model_greenhouse(100.0, 0.3, 0.78).expect("model");
        let surface = result[SURFACE_TEMPERATURE];
        assert!((14.0..16.0).contains(&surface), "got {surface}");
    }

    #[test]
    fn transparent_atmosphere_matches_greenhouse_model() {
        let absorbing = radiation_model_absorbing_atmosphere(100.0, 0.3, 0.78, 0.0).expect("model");
        let greenhouse = radiation_model_greenhouse(100.0, 0.3, 0.78).expect("model");
        assert!(
            (absorbing[SURFACE_TEMPERATURE] - greenhouse[SURFACE_TEMPERATURE]).abs() < 1e-9
        );
        assert!(absorbing[ATMOSPHERE_TEMPERATURE] < absorbing[SURFACE_TEMPERATURE]);
        assert_eq!(
            absorbing.keys().map(String::as_str).collect::<Vec<_>>(),
            vec![SURFACE_TEMPERATURE, ATMOSPHERE_TEMPERATURE]
        );
    }

    #[test]
    fn albedo_outside_unit_interval_is_a_domain_error() {
        let err = radiation_model_simplest(100.0, 1.5).expect_err("albedo > 1");
        assert!(matches!(err, ModelError::Domain { ref name, .. } if name == "planet_albedo"));
    }
}

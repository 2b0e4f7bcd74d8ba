use serde::{Deserialize, Serialize};

use crate::error::{GaugeError, GaugeResult};
use crate::render::Color;

/// Static description of one thermometer gauge.
///
/// All sizes (`bar_width`, `border_width`, paddings) are in data units, the
/// same units as the displayed value. The struct is serializable so host
/// applications can embed gauge styling in their own setup files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeConfig {
    #[serde(default = "default_min_value")]
    pub min_value: f64,
    #[serde(default = "default_max_value")]
    pub max_value: f64,
    /// Appended verbatim to the value label and tick labels.
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_bar_width")]
    pub bar_width: f64,
    /// Width and height of the bulb. `None` means twice `bar_width`.
    #[serde(default)]
    pub bulb_width: Option<f64>,
    #[serde(default = "default_border_width")]
    pub border_width: f64,
    #[serde(default = "default_fill_color")]
    pub fill_color: Color,
    #[serde(default = "default_border_color")]
    pub border_color: Color,
    #[serde(default = "default_padding_x")]
    pub padding_x: f64,
    #[serde(default = "default_padding_y")]
    pub padding_y: f64,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            min_value: default_min_value(),
            max_value: default_max_value(),
            units: default_units(),
            bar_width: default_bar_width(),
            bulb_width: None,
            border_width: default_border_width(),
            fill_color: default_fill_color(),
            border_color: default_border_color(),
            padding_x: default_padding_x(),
            padding_y: default_padding_y(),
        }
    }
}

impl GaugeConfig {
    #[must_use]
    pub fn with_range(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    #[must_use]
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    #[must_use]
    pub fn with_bulb_width(mut self, bulb_width: f64) -> Self {
        self.bulb_width = Some(bulb_width);
        self
    }

    #[must_use]
    pub fn with_border_width(mut self, border_width: f64) -> Self {
        self.border_width = border_width;
        self
    }

    #[must_use]
    pub fn with_fill_color(mut self, fill_color: Color) -> Self {
        self.fill_color = fill_color;
        self
    }

    #[must_use]
    pub fn with_border_color(mut self, border_color: Color) -> Self {
        self.border_color = border_color;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding_x: f64, padding_y: f64) -> Self {
        self.padding_x = padding_x;
        self.padding_y = padding_y;
        self
    }

    /// Bulb width after applying the `2 * bar_width` default.
    #[must_use]
    pub fn resolved_bulb_width(&self) -> f64 {
        self.bulb_width.unwrap_or(2.0 * self.bar_width)
    }

    pub fn validate(&self) -> GaugeResult<()> {
        let bulb_width = self.resolved_bulb_width();
        for (field, value) in [
            ("min_value", self.min_value),
            ("max_value", self.max_value),
            ("bar_width", self.bar_width),
            ("bulb_width", bulb_width),
            ("border_width", self.border_width),
            ("padding_x", self.padding_x),
            ("padding_y", self.padding_y),
        ] {
            if !value.is_finite() {
                return Err(GaugeError::InvalidConfig(format!("`{field}` must be finite")));
            }
        }

        if self.min_value >= self.max_value {
            return Err(GaugeError::InvalidConfig(format!(
                "min_value ({}) must be < max_value ({})",
                self.min_value, self.max_value
            )));
        }
        if self.border_width < 0.0 {
            return Err(GaugeError::InvalidConfig(
                "border_width must be >= 0".to_owned(),
            ));
        }
        if self.bar_width <= 0.0 || self.bar_width <= 2.0 * self.border_width {
            return Err(GaugeError::InvalidConfig(format!(
                "bar_width ({}) must be > 0 and > 2 * border_width ({})",
                self.bar_width, self.border_width
            )));
        }
        if bulb_width <= 2.0 * self.border_width {
            return Err(GaugeError::InvalidConfig(format!(
                "bulb_width ({bulb_width}) must be > 2 * border_width ({})",
                self.border_width
            )));
        }
        if self.padding_x < 0.0 || self.padding_y < 0.0 {
            return Err(GaugeError::InvalidConfig(
                "padding must be >= 0".to_owned(),
            ));
        }

        self.fill_color
            .validate()
            .and_then(|()| self.border_color.validate())
            .map_err(|err| GaugeError::InvalidConfig(err.to_string()))
    }
}

fn default_min_value() -> f64 {
    -273.15
}

fn default_max_value() -> f64 {
    100.0
}

fn default_units() -> String {
    " °C".to_owned()
}

fn default_bar_width() -> f64 {
    40.0
}

fn default_border_width() -> f64 {
    3.0
}

fn default_fill_color() -> Color {
    Color::RED
}

fn default_border_color() -> Color {
    Color::BLACK
}

fn default_padding_x() -> f64 {
    5.0
}

fn default_padding_y() -> f64 {
    8.0
}

#[cfg(test)]
mod tests {
    use super::GaugeConfig;
    use crate::error::GaugeError;

    #[test]
    fn bulb_defaults_to_twice_the_bar() {
        let config = GaugeConfig::default().with_bar_width(30.0);
        assert_eq!(config.resolved_bulb_width(), 60.0);
        assert_eq!(config.with_bulb_width(45.0).resolved_bulb_width(), 45.0);
    }

    #[test]
    fn inverted_inset_is_rejected() {
        let err = GaugeConfig::default()
            .with_bulb_width(6.0)
            .validate()
            .expect_err("bulb equal to 2 * border");
        assert!(matches!(err, GaugeError::InvalidConfig(_)));

        let err = GaugeConfig::default()
            .with_bar_width(5.0)
            .validate()
            .expect_err("bar thinner than both borders");
        assert!(matches!(err, GaugeError::InvalidConfig(_)));
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: GaugeConfig =
            serde_json::from_str(r#"{"min_value": 0.0, "units": "%"}"#).expect("parse");
        assert_eq!(config.min_value, 0.0);
        assert_eq!(config.max_value, 100.0);
        assert_eq!(config.units, "%");
        assert_eq!(config.bulb_width, None);
        config.validate().expect("valid");
    }
}

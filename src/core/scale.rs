use crate::error::{GaugeError, GaugeResult};

/// Affine map from a data interval onto a pixel span.
///
/// `flipped` scales map the domain start to the far end of the span, which is
/// what a value axis needs (larger values are drawn higher, i.e. at smaller
/// pixel rows).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    flipped: bool,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> GaugeResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(GaugeError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            flipped: false,
        })
    }

    #[must_use]
    pub fn flipped(mut self) -> Self {
        self.flipped = !self.flipped;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, span_px: f64) -> GaugeResult<f64> {
        if !span_px.is_finite() || span_px <= 0.0 {
            return Err(GaugeError::InvalidData(
                "pixel span must be finite and > 0".to_owned(),
            ));
        }
        if !value.is_finite() {
            return Err(GaugeError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        let normalized = if self.flipped {
            1.0 - normalized
        } else {
            normalized
        };
        Ok(normalized * span_px)
    }

    /// Converts a data-space length into pixels, ignoring orientation.
    pub fn length_to_pixels(self, length: f64, span_px: f64) -> GaugeResult<f64> {
        if !length.is_finite() || !span_px.is_finite() || span_px <= 0.0 {
            return Err(GaugeError::InvalidData(
                "length and span must be finite".to_owned(),
            ));
        }
        Ok(length.abs() / (self.domain_end - self.domain_start).abs() * span_px)
    }

    pub fn pixel_to_domain(self, pixel: f64, span_px: f64) -> GaugeResult<f64> {
        if !span_px.is_finite() || span_px <= 0.0 {
            return Err(GaugeError::InvalidData(
                "pixel span must be finite and > 0".to_owned(),
            ));
        }
        if !pixel.is_finite() {
            return Err(GaugeError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = pixel / span_px;
        let normalized = if self.flipped {
            1.0 - normalized
        } else {
            normalized
        };
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Ordered output-name -> value mapping produced by one model evaluation.
///
/// Key order decides which gauge shows which output.
pub type ModelResult = IndexMap<String, f64>;

/// How control values are handed to the model, fixed when the controller is
/// built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BindingScheme {
    /// Values in control registration order.
    #[default]
    Positional,
    /// Values additionally addressable by control name.
    Named,
}

/// Snapshot of every control value for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ModelInputs<'a> {
    scheme: BindingScheme,
    names: &'a [String],
    values: &'a [f64],
}

impl<'a> ModelInputs<'a> {
    /// `names` and `values` are parallel slices in registration order.
    pub fn new(
        scheme: BindingScheme,
        names: &'a [String],
        values: &'a [f64],
    ) -> Result<Self, ModelError> {
        if names.len() != values.len() {
            return Err(ModelError::Arity {
                expected: names.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            scheme,
            names,
            values,
        })
    }

    #[must_use]
    pub fn scheme(&self) -> BindingScheme {
        self.scheme
    }

    #[must_use]
    pub fn positional(&self) -> &'a [f64] {
        self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Positional values as a fixed-size array, failing on arity mismatch.
    pub fn exactly<const N: usize>(&self) -> Result<[f64; N], ModelError> {
        <[f64; N]>::try_from(self.values).map_err(|_| ModelError::Arity {
            expected: N,
            actual: self.values.len(),
        })
    }

    /// Value of the control named `name`; only available under
    /// [`BindingScheme::Named`].
    pub fn value(&self, name: &str) -> Result<f64, ModelError> {
        if self.scheme != BindingScheme::Named {
            return Err(ModelError::NotNamed(name.to_owned()));
        }
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| self.values[index])
            .ok_or_else(|| ModelError::UnknownParameter(name.to_owned()))
    }
}

/// Pure numeric model visualized by the gauges.
///
/// Evaluations must be deterministic and cheap: they run synchronously inside
/// the control-change handler.
pub trait Model {
    fn evaluate(&self, inputs: &ModelInputs<'_>) -> Result<ModelResult, ModelError>;
}

impl<F> Model for F
where
    F: Fn(&ModelInputs<'_>) -> Result<ModelResult, ModelError>,
{
    fn evaluate(&self, inputs: &ModelInputs<'_>) -> Result<ModelResult, ModelError> {
        self(inputs)
    }
}

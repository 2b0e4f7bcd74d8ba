use thiserror::Error;

pub type GaugeResult<T> = Result<T, GaugeError>;

#[derive(Debug, Error)]
pub enum GaugeError {
    #[error("invalid gauge config: {0}")]
    InvalidConfig(String),

    #[error("model produced {actual} outputs but {expected} gauges are registered")]
    OutputCountMismatch { expected: usize, actual: usize },

    #[error("model evaluation failed: {0}")]
    ModelEvaluation(#[from] ModelError),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown control: {0}")]
    UnknownControl(String),

    #[error("unknown control variable: {0}")]
    UnknownVariable(String),

    #[error("unknown axes id {0}")]
    UnknownAxes(u32),

    #[error("unknown shape handle {0}")]
    UnknownShape(u64),

    #[error("render backend failure: {0}")]
    Backend(String),

    #[error("scene snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Failure raised by a model function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("parameter `{name}` = {value} is outside the model domain: {reason}")]
    Domain {
        name: String,
        value: f64,
        reason: String,
    },

    #[error("expected {expected} parameters, got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error("parameters are bound positionally, named lookup of `{0}` is unavailable")]
    NotNamed(String),

    #[error("output `{name}` is not finite: {value}")]
    NonFiniteOutput { name: String, value: f64 },

    #[error("{0}")]
    Other(String),
}

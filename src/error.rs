use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForecastError>;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("value {value} at index {index} is outside the log domain (must be > 0)")]
    Domain { index: usize, value: f64 },

    #[error("degenerate {0} fit: normal equations are singular")]
    DegenerateFit(&'static str),

    #[error("R² is not computable: variance of the actual series is zero or not finite")]
    NonComputable,

    #[error("length mismatch: actual={actual}, fitted={fitted}")]
    LengthMismatch { actual: usize, fitted: usize },

    #[error("{0} fit produced non-finite values")]
    NonFinite(&'static str),

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("market chart has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ForecastError {
    pub fn insufficient(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridFitError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type GfResult<T> = Result<T, GridFitError>;

/// Shorthand for building a `Validation` error from a format string.
macro_rules! invalid {
    ($($arg:tt)*) => {
        $crate::error::GridFitError::Validation(format!($($arg)*))
    };
}

pub(crate) use invalid;

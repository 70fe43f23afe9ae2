use thiserror::Error;

/// Main error type for generation strategy dispatch
#[derive(Error, Debug)]
pub enum GsError {
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Configuration conflicts detected before any generation phase is built
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error(
        "To apply winsorization, specify `winsorize = true` and provide the winsorization \
         limits (winsorize: {winsorize}, limits provided: {limits_provided})"
    )]
    InconsistentWinsorization { winsorize: bool, limits_provided: bool },

    #[error(
        "Cannot apply max parallelism cap {cap} together with \
         max parallelism override {override_value}"
    )]
    ConflictingParallelism { override_value: i64, cap: i64 },
}

/// Result type alias for dispatch operations
pub type GsResult<T> = Result<T, GsError>;

/// Macro for creating validation errors
#[macro_export]
macro_rules! validation_error {
    ($($arg:tt)*) => {
        $crate::GsError::Validation(format!($($arg)*))
    };
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegretError {
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("Invalid iteration count: {0} (must be non-negative)")]
    InvalidIterationCount(i64),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type RegretResult<T> = Result<T, RegretError>;

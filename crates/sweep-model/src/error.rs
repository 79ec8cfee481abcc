use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid run config: {0}")]
    InvalidConfig(String),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

use thiserror::Error;

use sweep_model::ModelError;

use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ModelError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}

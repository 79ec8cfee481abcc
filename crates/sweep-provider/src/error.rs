use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fixture parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid fixture: {0}")]
    Invalid(String),
}

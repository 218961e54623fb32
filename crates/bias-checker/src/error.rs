use thiserror::Error;

#[derive(Error, Debug)]
pub enum BiasError {
    #[error("Classifier request failed: {0}")]
    Classifier(String),

    #[error("Invalid classifier response: {0}")]
    InvalidResponse(String),

    #[error("Classifier unavailable: {0}")]
    Unavailable(String),
}

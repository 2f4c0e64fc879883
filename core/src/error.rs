use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LandscapeError {
    // Invalid resolution, bounds, ranges or descent parameters.
    // Raised before any sampling happens.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl LandscapeError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        LandscapeError::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, LandscapeError>;

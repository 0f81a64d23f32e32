use thiserror::Error;

/// Failure in the link-to-track stage. `name` is the friendly name of the
/// source that produced it, `details` a human-readable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name} encountered a problem during extraction: {details}")]
pub struct ExtractError {
    pub name: String,
    pub details: String,
}

impl ExtractError {
    pub fn new(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
        }
    }
}

/// Failure in the track-to-result stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name} encountered a problem during searching: {details}")]
pub struct SearchError {
    pub name: String,
    pub details: String,
}

impl SearchError {
    pub fn new(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
        }
    }
}

use thiserror::Error;

/// Failures callers branch on. Transport and decoding errors travel as
/// `anyhow::Error` and may wrap one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlogError {
    #[error("Title, Author Name, and Content are required.")]
    MissingRequiredFields,
    #[error("Failed to {action}: server responded with status {status}")]
    Status { action: &'static str, status: u16 },
    #[error("post {0} not found")]
    NotFound(String),
}

impl BlogError {
    pub fn status(action: &'static str, status: u16) -> Self {
        Self::Status { action, status }
    }
}

//! Error Types for the Generative Clients

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenAiError>;

#[derive(Error, Debug)]
pub enum GenAiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Video job still pending after {polls} status checks")]
    JobTimeout { polls: u32 },

    #[error("Video job aborted")]
    Aborted,

    #[error("Video task failed: {0}")]
    Task(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GenAiError {
    /// Message safe to surface to the user
    ///
    /// Access failures carry the billing hint: the dominant real-world
    /// failure for video generation is an account-tier restriction, not a
    /// transient fault.
    pub fn user_message(&self) -> String {
        match self {
            Self::AccessDenied(_) => "The generative service refused the request. Check that \
                your API key is valid and that your billing tier allows this model."
                .into(),
            Self::JobTimeout { .. } => {
                "The video job did not finish in time. Try again later.".into()
            }
            Self::Aborted => "The video job was cancelled.".into(),
            Self::Config(msg) => format!("Generative AI is not configured: {msg}"),
            _ => "The generative service could not be reached. Try again.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_mentions_billing() {
        let err = GenAiError::AccessDenied("quota exceeded".into());
        assert!(err.user_message().contains("billing"));
    }
}

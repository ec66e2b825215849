use reqwest::StatusCode;
use shared::error::EnvelopeError;
use thiserror::Error;

/// Failure of a single request to the remote analysis service.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("{endpoint} returned a malformed body: {reason}")]
    MalformedBody {
        endpoint: &'static str,
        reason: String,
    },
}

impl BackendError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::MalformedBody { endpoint, .. } => endpoint,
        }
    }

    pub(crate) fn malformed(endpoint: &'static str, reason: impl ToString) -> Self {
        Self::MalformedBody {
            endpoint,
            reason: reason.to_string(),
        }
    }
}

impl From<(&'static str, EnvelopeError)> for BackendError {
    fn from((endpoint, err): (&'static str, EnvelopeError)) -> Self {
        Self::malformed(endpoint, err)
    }
}

use thiserror::Error;

/// Ways a `{ "data": ... }` response body can fail to fit its endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("response data is not an object")]
    NotAnObject,
    #[error("response data does not match the expected shape: {0}")]
    Invalid(String),
}

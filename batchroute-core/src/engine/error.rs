use thiserror::Error;

/// Faults raised while talking to a [`crate::engine::RouteEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineFailure {
    /// The engine could not be reached.
    #[error("routing engine unavailable at {endpoint}: {message}")]
    Unavailable {
        /// Address the request was sent to.
        endpoint: String,
        /// Underlying transport error.
        message: String,
    },
    /// The engine answered with a payload that could not be decoded.
    #[error("routing engine returned a malformed response: {message}")]
    MalformedResponse {
        /// Decoder error.
        message: String,
    },
}

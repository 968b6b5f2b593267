//! Client error types.

use crate::transport::TransportError;

/// Failures surfaced by client calls.
///
/// Unknown status codes are deliberately not represented here: decoding a
/// code the tables do not know yields a sentinel name, never an error.
#[derive(Debug, thiserror::Error)]
pub enum MacNetError {
    /// Socket write/read failure or peer disconnect.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Received bytes are not a well-formed MacNet response, or a result
    /// payload does not match the operation's schema.
    #[error("malformed response: {0}")]
    Parse(String),

    /// Every retry attempt produced a mismatched or unusable response.
    #[error("no matching response from instrument after {attempts} attempts")]
    ValidationExhausted {
        /// Number of inner attempts performed.
        attempts: u32,
    },

    /// The instrument answered with an error payload.
    #[error("instrument error {code}: {message}")]
    Remote {
        /// Instrument error code.
        code: i64,
        /// Instrument error message.
        message: String,
    },
}

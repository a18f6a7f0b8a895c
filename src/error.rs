//! Error types for `telepoll`.
//!
//! Every operation returns [`Result<T>`] with [`BotError`] as the error
//! type. Variants map onto the three failure classes callers care about:
//! transport problems, failures declared by the API itself, and result
//! payloads that do not match the expected shape.

use thiserror::Error;

/// Errors that can occur when talking to the Telegram Bot API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BotError {
    /// The HTTP round trip failed: network error, timeout, request body
    /// serialization, or an unparseable response envelope.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with `ok: false`. Carries the HTTP status of the
    /// response and the description the API supplied (or `"undefined
    /// error"` when it supplied none).
    #[error("api error ({status}): {description}")]
    Api {
        /// HTTP status code of the failing response.
        status: reqwest::StatusCode,
        /// Human-readable error description from the API.
        description: String,
    },

    /// The envelope reported success but the result payload was missing
    /// or did not decode into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

/// A convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_api_error() {
        let err = BotError::Api {
            status: reqwest::StatusCode::UNAUTHORIZED,
            description: "Unauthorized".into(),
        };
        assert_eq!(err.to_string(), "api error (401 Unauthorized): Unauthorized");
    }

    #[test]
    fn display_decode_error() {
        let err = BotError::Decode("missing result in response".into());
        assert_eq!(err.to_string(), "decode error: missing result in response");
    }
}

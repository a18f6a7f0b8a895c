//! Low-level RPC transport for the Telegram Bot API.
//!
//! [`Caller`] turns a method name plus an optional JSON payload into one
//! HTTP round trip and decodes the standard response envelope. It holds
//! two HTTP clients with different timeout budgets: a short one for
//! ordinary calls and a long one sized for `getUpdates` long polling.
//! Retry policy belongs to the caller; `Caller` never retries.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use tracing::trace;

use crate::error::{BotError, Result};

/// Timeout budget for ordinary one-shot calls.
const CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout budget for long-polling calls. Must exceed the largest
/// server-side `timeout` value a poll request can carry.
const POLL_TIMEOUT: Duration = Duration::from_secs(300);

/// Wrapper for all Telegram Bot API responses.
///
/// Every method returns `{ ok: bool, result?: <raw>, description?: String }`.
/// The result is kept as raw JSON and only decoded into the caller's
/// expected shape once `ok` has been checked.
#[derive(Debug, serde::Deserialize)]
struct Envelope {
    ok: bool,
    result: Option<Box<RawValue>>,
    description: Option<String>,
}

/// Low-level RPC transport. One invocation is exactly one HTTP round
/// trip; success/failure is determined by the response envelope, not the
/// HTTP status alone.
///
/// Applications normally use [`Bot`](crate::Bot) instead of calling this
/// directly.
#[derive(Clone)]
pub struct Caller {
    /// URL prefix `{endpoint}{token}/`; method names are appended.
    prefix: String,
    /// Client for ordinary calls (short timeout).
    client: Client,
    /// Client for long-polling calls (long timeout).
    poll_client: Client,
}

impl Caller {
    /// Create a transport for the given API endpoint and bot token.
    pub fn new(endpoint: &str, token: &str) -> Result<Self> {
        Ok(Self {
            prefix: format!("{endpoint}{token}/"),
            client: Client::builder().timeout(CALL_TIMEOUT).build()?,
            poll_client: Client::builder().timeout(POLL_TIMEOUT).build()?,
        })
    }

    /// Invoke `method` on the ordinary (short) timeout budget.
    ///
    /// `request` becomes a JSON POST body when present; `None` issues a
    /// bare GET. The decoded result payload is returned on success.
    pub async fn call<R, T>(&self, method: &str, request: Option<&R>) -> Result<T>
    where
        R: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(&self.client, method, request).await
    }

    /// Invoke `method` on the long-poll timeout budget.
    ///
    /// Identical to [`call`](Self::call) except the HTTP client allows
    /// the server to hold the request open for a long-poll wait.
    pub async fn poll<R, T>(&self, method: &str, request: Option<&R>) -> Result<T>
    where
        R: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(&self.poll_client, method, request).await
    }

    async fn execute<R, T>(&self, client: &Client, method: &str, request: Option<&R>) -> Result<T>
    where
        R: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{method}", self.prefix);
        trace!(method, has_body = request.is_some(), "issuing api call");

        // POST with a JSON body when a payload is supplied, GET otherwise.
        let builder = match request {
            Some(body) => client.post(&url).json(body),
            None => client.get(&url),
        };

        let response = builder.send().await?;
        let status = response.status();
        let envelope: Envelope = response.json().await?;

        if !envelope.ok {
            let description = envelope
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "undefined error".into());
            return Err(BotError::Api {
                status,
                description,
            });
        }

        match envelope.result {
            Some(raw) => {
                serde_json::from_str(raw.get()).map_err(|e| BotError::Decode(e.to_string()))
            }
            None => Err(BotError::Decode("missing result in response".into())),
        }
    }
}

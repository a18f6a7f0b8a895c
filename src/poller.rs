//! The long-polling update loop.
//!
//! [`Bot::poll_updates`] spawns one background task per session. The
//! task owns the [`GetUpdates`] request exclusively, advances its offset
//! cursor as updates are delivered, and feeds two bounded channels: one
//! for decoded updates, one for errors. Both close exactly once, when
//! the loop observes cancellation (or every receiver is gone). Failures
//! are never fatal to the loop; each one is followed by a fixed backoff
//! and a retry.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::bot::Bot;
use crate::caller::Caller;
use crate::error::{BotError, Result};
use crate::types::{Update, UpdateKind};

/// Poll timeout applied when a request leaves it unset or zero, to
/// prevent accidental short polling.
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 60;

/// Capacity of each output channel. A consumer that stops draining
/// stalls the loop after this many buffered items, throttling polling.
const CHANNEL_CAPACITY: usize = 32;

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// Parameters for `getUpdates`, one-shot or streaming.
///
/// A streaming session takes this value by ownership and mutates
/// `offset` in place as updates are delivered, so a request value
/// describes exactly one session's cursor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetUpdates {
    /// Identifier of the first update to return; the session's cursor.
    /// Omitted from the wire when 0.
    #[serde(skip_serializing_if = "is_zero")]
    pub offset: i64,
    /// Maximum number of updates per batch (1-100, API default 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Long-poll timeout in seconds the server may hold the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Update kinds to receive. Empty means all kinds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_updates: Vec<UpdateKind>,
}

impl GetUpdates {
    /// Force a sane long-poll timeout: unset or zero becomes
    /// [`DEFAULT_POLL_TIMEOUT_SECS`], anything else is kept.
    fn normalize_timeout(&mut self) {
        if self.timeout.unwrap_or(0) == 0 {
            self.timeout = Some(DEFAULT_POLL_TIMEOUT_SECS);
        }
    }

    /// Advance the cursor past a delivered update. The cursor never
    /// moves backwards; ids below it leave it untouched.
    fn advance(&mut self, update_id: i64) {
        if update_id >= self.offset {
            self.offset = update_id + 1;
        }
    }
}

impl Bot {
    /// Fetch one batch of updates with a single long-poll call.
    ///
    /// For a continuous stream, use [`poll_updates`](Self::poll_updates)
    /// instead.
    pub async fn get_updates(&self, req: &GetUpdates) -> Result<Vec<Update>> {
        let updates: Vec<Update> = self.caller.poll("getUpdates", Some(req)).await?;
        debug!(count = updates.len(), "received updates");
        Ok(updates)
    }

    /// Start a background long-polling session.
    ///
    /// Takes `req` by value: the session owns the offset cursor and
    /// advances it in place, so the value cannot back two sessions at
    /// once. A zero or unset `timeout` is raised to
    /// [`DEFAULT_POLL_TIMEOUT_SECS`].
    ///
    /// Returns the update and error receivers. The two streams are
    /// independent; both end when `cancel` is triggered, observed at the
    /// top of each iteration (a call already in flight completes first).
    /// Failed calls emit on the error channel and are retried after the
    /// bot's backoff period, indefinitely.
    pub fn poll_updates(
        &self,
        mut req: GetUpdates,
        cancel: CancellationToken,
    ) -> (mpsc::Receiver<Update>, mpsc::Receiver<BotError>) {
        req.normalize_timeout();

        let (update_tx, update_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (error_tx, error_rx) = mpsc::channel(CHANNEL_CAPACITY);

        let caller = self.caller.clone();
        let backoff = self.backoff_period;
        tokio::spawn(poll_loop(caller, req, backoff, cancel, update_tx, error_tx));

        (update_rx, error_rx)
    }
}

/// One polling session. Runs until cancellation; dropping both senders
/// on return is what closes the output channels.
async fn poll_loop(
    caller: Caller,
    mut req: GetUpdates,
    backoff: Duration,
    cancel: CancellationToken,
    updates: mpsc::Sender<Update>,
    errors: mpsc::Sender<BotError>,
) {
    loop {
        // Cancellation is only observed here, never mid-batch.
        if cancel.is_cancelled() {
            debug!("polling session cancelled");
            return;
        }

        match caller.poll::<GetUpdates, Vec<Update>>("getUpdates", Some(&req)).await {
            Err(err) => {
                warn!(error = %err, "getUpdates failed, backing off");
                if errors.send(err).await.is_err() {
                    // Error receiver gone; the session has no consumer
                    // for failures and polling blind is pointless.
                    return;
                }
                tokio::time::sleep(backoff).await;
            }
            Ok(batch) => {
                for update in batch {
                    let id = update.id;
                    if updates.send(update).await.is_err() {
                        // Update receiver gone; stop the session.
                        return;
                    }
                    // Per-update, immediately after emission, so a
                    // cancellation between updates keeps the progress
                    // already made.
                    req.advance(id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_unset_becomes_default() {
        let mut req = GetUpdates::default();
        req.normalize_timeout();
        assert_eq!(req.timeout, Some(DEFAULT_POLL_TIMEOUT_SECS));
    }

    #[test]
    fn timeout_zero_becomes_default() {
        let mut req = GetUpdates {
            timeout: Some(0),
            ..Default::default()
        };
        req.normalize_timeout();
        assert_eq!(req.timeout, Some(DEFAULT_POLL_TIMEOUT_SECS));
    }

    #[test]
    fn timeout_set_is_kept() {
        let mut req = GetUpdates {
            timeout: Some(25),
            ..Default::default()
        };
        req.normalize_timeout();
        assert_eq!(req.timeout, Some(25));
    }

    #[test]
    fn cursor_advances_past_highest_id() {
        let mut req = GetUpdates::default();
        req.advance(5);
        assert_eq!(req.offset, 6);
        req.advance(7);
        assert_eq!(req.offset, 8);
    }

    #[test]
    fn cursor_never_decreases() {
        let mut req = GetUpdates {
            offset: 100,
            ..Default::default()
        };
        req.advance(3);
        assert_eq!(req.offset, 100);
    }

    #[test]
    fn cursor_readvances_on_duplicate_id() {
        // An id equal to the cursor still advances (>= comparison).
        let mut req = GetUpdates {
            offset: 5,
            ..Default::default()
        };
        req.advance(5);
        assert_eq!(req.offset, 6);
    }

    #[test]
    fn serialize_omits_zero_offset_and_empty_subscription() {
        let req = GetUpdates {
            timeout: Some(60),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("offset").is_none());
        assert!(json.get("limit").is_none());
        assert!(json.get("allowed_updates").is_none());
        assert_eq!(json["timeout"], 60);
    }

    #[test]
    fn serialize_carries_cursor_and_subscription() {
        let req = GetUpdates {
            offset: 8,
            limit: Some(50),
            timeout: Some(60),
            allowed_updates: vec![UpdateKind::Message, UpdateKind::CallbackQuery],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["offset"], 8);
        assert_eq!(json["limit"], 50);
        assert_eq!(json["allowed_updates"][1], "callback_query");
    }
}

//! Telegram Bot API client with a long-polling update stream.
//!
//! `telepoll` wraps the Bot API's RPC surface and turns its `getUpdates`
//! method into a live, cancellable stream of [`Update`] values delivered
//! over channels. Construction verifies the bot token up front:
//!
//! ```no_run
//! use telepoll::{Bot, GetUpdates};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> telepoll::Result<()> {
//! let bot = Bot::new("123456:ABC-DEF").await?;
//! let cancel = CancellationToken::new();
//! let (mut updates, mut errors) = bot.poll_updates(GetUpdates::default(), cancel.clone());
//!
//! while let Some(update) = updates.recv().await {
//!     println!("update {}", update.id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`caller`] -- low-level RPC transport (one call, one round trip)
//! - [`bot`] -- the [`Bot`] client object and one-shot API methods
//! - [`poller`] -- the background long-polling loop
//! - [`types`] -- Bot API request/response types
//! - [`inline`] -- inline-mode types (queries and the result family)
//!
//! # Error handling
//!
//! All operations return [`Result`] with [`BotError`] distinguishing
//! transport failures, API-declared failures, and payload decode failures.
//! One-shot calls return the first error; the poller retries every failure
//! after a fixed backoff and only stops on cancellation.

pub mod bot;
pub mod caller;
pub mod error;
pub mod inline;
pub mod poller;
pub mod types;

pub use bot::{Bot, ENDPOINT_URL, SendRequest};
pub use caller::Caller;
pub use error::{BotError, Result};
pub use poller::{DEFAULT_POLL_TIMEOUT_SECS, GetUpdates};
pub use types::{Update, UpdateKind};

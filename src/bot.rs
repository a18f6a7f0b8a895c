//! The [`Bot`] client object and its one-shot API methods.
//!
//! Constructing a [`Bot`] verifies the token with one `getMe` call, so
//! bad credentials fail fast instead of surfacing later inside a polling
//! loop. The streaming side lives in [`poller`](crate::poller).

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::caller::Caller;
use crate::error::Result;
use crate::inline::InlineQueryResult;
use crate::types::{
    InlineKeyboardMarkup, Message, ParseMode, ReplyMarkup, UpdateKind, User, WebhookInfo, is_false,
};

/// The Telegram Bot API endpoint URL.
pub const ENDPOINT_URL: &str = "https://api.telegram.org/bot";

/// Default delay before retrying after a failed poll call.
pub const DEFAULT_BACKOFF_PERIOD: Duration = Duration::from_secs(5);

/// A Telegram Bot API client.
///
/// Cheap to share by reference; one-shot calls and an active polling
/// session share no mutable state and may run concurrently.
pub struct Bot {
    /// The bot's own identity, verified at construction.
    me: User,
    /// Delay inserted after a failed poll call before retrying.
    pub(crate) backoff_period: Duration,
    pub(crate) caller: Caller,
}

impl Bot {
    /// Create a bot from an access token, verifying it against the
    /// production endpoint with one `getMe` call.
    pub async fn new(token: &str) -> Result<Self> {
        Self::with_endpoint(ENDPOINT_URL, token).await
    }

    /// Like [`new`](Self::new) but against a custom endpoint. Useful for
    /// local Bot API servers and tests.
    pub async fn with_endpoint(endpoint: &str, token: &str) -> Result<Self> {
        let caller = Caller::new(endpoint, token)?;
        let me: User = caller.call::<(), User>("getMe", None).await?;
        info!(bot_id = me.id, bot_name = %me.first_name, "bot authenticated");
        Ok(Self {
            me,
            backoff_period: DEFAULT_BACKOFF_PERIOD,
            caller,
        })
    }

    /// Override the failure backoff period for subsequent polling
    /// sessions.
    pub fn backoff_period(mut self, period: Duration) -> Self {
        self.backoff_period = period;
        self
    }

    /// The bot's own identity, as verified at construction.
    pub fn me(&self) -> &User {
        &self.me
    }

    /// Fetch basic information about the bot.
    pub async fn get_me(&self) -> Result<User> {
        self.caller.call::<(), User>("getMe", None).await
    }

    /// Send an outgoing request from the [`SendRequest`] family and
    /// return the resulting message.
    pub async fn send(&self, req: &SendRequest) -> Result<Message> {
        debug!(method = req.method(), "sending");
        self.caller.call(req.method(), Some(req)).await
    }

    /// Answer a callback query sent from an inline keyboard.
    pub async fn answer_callback_query(&self, req: &AnswerCallbackQuery) -> Result<bool> {
        self.caller.call("answerCallbackQuery", Some(req)).await
    }

    /// Delete a message.
    pub async fn delete_message(&self, req: &DeleteMessage) -> Result<bool> {
        self.caller.call("deleteMessage", Some(req)).await
    }

    /// Answer an inline query with a set of results.
    pub async fn answer_inline_query(&self, req: &AnswerInlineQuery) -> Result<bool> {
        self.caller.call("answerInlineQuery", Some(req)).await
    }

    /// Tell the API to deliver updates to an outgoing webhook instead of
    /// `getUpdates`. This crate only manages the webhook registration;
    /// it does not receive webhook traffic.
    pub async fn set_webhook(&self, req: &SetWebhook) -> Result<bool> {
        self.caller.call("setWebhook", Some(req)).await
    }

    /// Remove a webhook registration, switching back to `getUpdates`.
    pub async fn delete_webhook(&self) -> Result<bool> {
        self.caller.call::<(), bool>("deleteWebhook", None).await
    }

    /// Fetch the current webhook status.
    pub async fn get_webhook_info(&self) -> Result<WebhookInfo> {
        self.caller
            .call::<(), WebhookInfo>("getWebhookInfo", None)
            .await
    }
}

/// An outgoing request that produces a [`Message`].
///
/// A closed set: each variant maps to one API method (see
/// [`method`](SendRequest::method)) and serializes to that method's
/// payload shape.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SendRequest {
    Message(SendMessage),
    Forward(ForwardMessage),
    Location(SendLocation),
    EditLiveLocation(EditMessageLiveLocation),
    StopLiveLocation(StopMessageLiveLocation),
    Venue(SendVenue),
    Contact(SendContact),
    EditText(EditMessageText),
    EditCaption(EditMessageCaption),
    EditReplyMarkup(EditMessageReplyMarkup),
}

impl SendRequest {
    /// The wire name of the API method this request targets.
    pub fn method(&self) -> &'static str {
        match self {
            SendRequest::Message(_) => "sendMessage",
            SendRequest::Forward(_) => "forwardMessage",
            SendRequest::Location(_) => "sendLocation",
            SendRequest::EditLiveLocation(_) => "editMessageLiveLocation",
            SendRequest::StopLiveLocation(_) => "stopMessageLiveLocation",
            SendRequest::Venue(_) => "sendVenue",
            SendRequest::Contact(_) => "sendContact",
            SendRequest::EditText(_) => "editMessageText",
            SendRequest::EditCaption(_) => "editMessageCaption",
            SendRequest::EditReplyMarkup(_) => "editMessageReplyMarkup",
        }
    }
}

/// Send a text message.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_web_page_preview: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendMessage {
    /// A plain text message with no options set.
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: false,
            disable_notification: false,
            reply_to_message_id: None,
            reply_markup: None,
        }
    }
}

/// Forward a message of any kind.
#[derive(Debug, Clone, Serialize)]
pub struct ForwardMessage {
    pub chat_id: i64,
    pub from_chat_id: i64,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_notification: bool,
    pub message_id: i64,
}

/// Send a point on the map.
#[derive(Debug, Clone, Serialize)]
pub struct SendLocation {
    pub chat_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_period: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// Edit a live location message before its `live_period` expires.
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageLiveLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Stop updating a live location message.
#[derive(Debug, Clone, Serialize)]
pub struct StopMessageLiveLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Send information about a venue.
#[derive(Debug, Clone, Serialize)]
pub struct SendVenue {
    pub chat_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// Send a phone contact.
#[derive(Debug, Clone, Serialize)]
pub struct SendContact {
    pub chat_id: i64,
    pub phone_number: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// Edit the text of a message sent by the bot.
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_web_page_preview: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// Edit the caption of a message sent by the bot.
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageCaption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// Edit only the reply markup of a message sent by the bot.
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageReplyMarkup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// Parameters for `answerCallbackQuery`.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerCallbackQuery {
    pub callback_query_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub show_alert: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<u32>,
}

/// Parameters for `deleteMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteMessage {
    pub chat_id: i64,
    pub message_id: i64,
}

/// Parameters for `answerInlineQuery`.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerInlineQuery {
    pub inline_query_id: String,
    pub results: Vec<InlineQueryResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_personal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_pm_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_pm_parameter: Option<String>,
}

/// Parameters for `setWebhook`.
#[derive(Debug, Clone, Serialize)]
pub struct SetWebhook {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_updates: Vec<UpdateKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_request_method_names() {
        let msg = SendRequest::Message(SendMessage::new(1, "hi"));
        assert_eq!(msg.method(), "sendMessage");

        let fwd = SendRequest::Forward(ForwardMessage {
            chat_id: 1,
            from_chat_id: 2,
            disable_notification: false,
            message_id: 3,
        });
        assert_eq!(fwd.method(), "forwardMessage");

        let edit = SendRequest::EditText(EditMessageText {
            chat_id: Some(1),
            message_id: Some(3),
            inline_message_id: None,
            text: "new".into(),
            parse_mode: None,
            disable_web_page_preview: false,
            reply_markup: None,
        });
        assert_eq!(edit.method(), "editMessageText");

        let stop = SendRequest::StopLiveLocation(StopMessageLiveLocation {
            chat_id: None,
            message_id: None,
            inline_message_id: Some("im1".into()),
            reply_markup: None,
        });
        assert_eq!(stop.method(), "stopMessageLiveLocation");
    }

    #[test]
    fn send_request_serializes_to_payload_shape() {
        let req = SendRequest::Message(SendMessage::new(42, "Hello!"));
        let json = serde_json::to_value(&req).unwrap();
        // Untagged: only the payload fields appear, no variant wrapper.
        assert_eq!(json["chat_id"], 42);
        assert_eq!(json["text"], "Hello!");
        assert!(json.get("parse_mode").is_none());
        assert!(json.get("disable_notification").is_none());
    }

    #[test]
    fn send_message_full_options() {
        let req = SendMessage {
            chat_id: 7,
            text: "<b>hi</b>".into(),
            parse_mode: Some(ParseMode::Html),
            disable_web_page_preview: true,
            disable_notification: false,
            reply_to_message_id: Some(10),
            reply_markup: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["parse_mode"], "HTML");
        assert_eq!(json["disable_web_page_preview"], true);
        assert!(json.get("disable_notification").is_none());
        assert_eq!(json["reply_to_message_id"], 10);
    }

    #[test]
    fn answer_callback_query_minimal() {
        let req = AnswerCallbackQuery {
            callback_query_id: "cbq-1".into(),
            text: None,
            show_alert: false,
            url: None,
            cache_time: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["callback_query_id"], "cbq-1");
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[test]
    fn set_webhook_omits_empty_subscription() {
        let req = SetWebhook {
            url: "https://example.org/hook".into(),
            max_connections: None,
            allowed_updates: vec![],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("allowed_updates").is_none());

        let req = SetWebhook {
            allowed_updates: vec![UpdateKind::Message],
            ..req
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["allowed_updates"][0], "message");
    }
}

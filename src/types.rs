//! Telegram Bot API types.
//!
//! Response-side types derive `Deserialize`, request-side types derive
//! `Serialize`; optional wire fields are `Option` (or defaulted
//! collections) so absent fields round-trip as absent, not `null`.

use serde::{Deserialize, Serialize};

pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}

/// Parse mode for message text or captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// Markdown-style formatting.
    Markdown,
    /// HTML-style formatting.
    #[serde(rename = "HTML")]
    Html,
}

/// The kind of payload an [`Update`] carries.
///
/// Also used in [`GetUpdates::allowed_updates`](crate::GetUpdates) to
/// subscribe to a subset of kinds; serializes to the wire names
/// (`"message"`, `"edited_message"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    InlineQuery,
    ChosenInlineResult,
    CallbackQuery,
}

/// An incoming update from `getUpdates`.
///
/// At most one of the optional payload fields is present in any given
/// update; [`kind`](Update::kind) reports which.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Strictly increasing update identifier.
    #[serde(rename = "update_id")]
    pub id: i64,
    pub message: Option<Message>,
    pub edited_message: Option<Message>,
    pub channel_post: Option<Message>,
    pub edited_channel_post: Option<Message>,
    pub inline_query: Option<crate::inline::InlineQuery>,
    pub chosen_inline_result: Option<crate::inline::ChosenInlineResult>,
    pub callback_query: Option<CallbackQuery>,
}

impl Update {
    /// Which payload slot is populated, or `None` for an update this
    /// crate does not recognize.
    pub fn kind(&self) -> Option<UpdateKind> {
        if self.message.is_some() {
            Some(UpdateKind::Message)
        } else if self.edited_message.is_some() {
            Some(UpdateKind::EditedMessage)
        } else if self.channel_post.is_some() {
            Some(UpdateKind::ChannelPost)
        } else if self.edited_channel_post.is_some() {
            Some(UpdateKind::EditedChannelPost)
        } else if self.inline_query.is_some() {
            Some(UpdateKind::InlineQuery)
        } else if self.chosen_inline_result.is_some() {
            Some(UpdateKind::ChosenInlineResult)
        } else if self.callback_query.is_some() {
            Some(UpdateKind::CallbackQuery)
        } else {
            None
        }
    }
}

/// A Telegram user or bot.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Whether this user is a bot.
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    /// Username without the leading `@`, if set.
    pub username: Option<String>,
    /// IETF language tag of the user's client, if known.
    pub language_code: Option<String>,
}

/// Chat type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// A chat: private conversation, group, supergroup, or channel.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Unique chat identifier.
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatType,
    /// Title, for groups, supergroups, and channels.
    pub title: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub all_members_are_administrators: bool,
    pub description: Option<String>,
    pub invite_link: Option<String>,
    pub pinned_message: Option<Box<Message>>,
}

/// A message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Unique message identifier within the chat.
    #[serde(rename = "message_id")]
    pub id: i64,
    /// Sender. Absent for messages posted in channels.
    pub from: Option<User>,
    /// Unix timestamp of when the message was sent.
    pub date: i64,
    pub chat: Chat,
    pub forward_from: Option<User>,
    pub forward_from_chat: Option<Chat>,
    pub forward_from_message_id: Option<i64>,
    pub forward_signature: Option<String>,
    pub forward_date: Option<i64>,
    pub reply_to_message: Option<Box<Message>>,
    pub edit_date: Option<i64>,
    pub media_group_id: Option<String>,
    pub author_signature: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub entities: Vec<MessageEntity>,
    #[serde(default)]
    pub caption_entities: Vec<MessageEntity>,
    pub caption: Option<String>,
    pub contact: Option<Contact>,
    pub location: Option<Location>,
    pub venue: Option<Venue>,
    #[serde(default)]
    pub new_chat_members: Vec<User>,
    pub left_chat_member: Option<User>,
    pub new_chat_title: Option<String>,
    pub pinned_message: Option<Box<Message>>,
    pub connected_website: Option<String>,
}

/// Message entity discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEntityType {
    Mention,
    Hashtag,
    BotCommand,
    Url,
    Email,
    Bold,
    Italic,
    Code,
    Pre,
    TextLink,
    TextMention,
}

/// One special entity in a text message: hashtag, username, URL, etc.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: MessageEntityType,
    /// Offset in UTF-16 code units to the start of the entity.
    pub offset: i64,
    /// Length of the entity in UTF-16 code units.
    pub length: i64,
    /// Target URL, for `text_link` entities.
    pub url: Option<String>,
    /// Mentioned user, for `text_mention` entities.
    pub user: Option<User>,
}

/// A phone contact.
#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub phone_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub user_id: Option<i64>,
}

/// A point on the map.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// A venue.
#[derive(Debug, Clone, Deserialize)]
pub struct Venue {
    pub location: Location,
    pub title: String,
    pub address: String,
    pub foursquare_id: Option<String>,
}

/// Keyboard attached to an outgoing message.
///
/// Serializes to the bare object shape of whichever variant is chosen;
/// the API distinguishes them by their required fields.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    InlineKeyboard(InlineKeyboardMarkup),
    Keyboard(ReplyKeyboardMarkup),
    KeyboardRemove(ReplyKeyboardRemove),
    ForceReply(ForceReply),
}

/// A custom reply keyboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplyKeyboardMarkup {
    /// Button rows, each a row of [`KeyboardButton`]s.
    pub keyboard: Vec<Vec<KeyboardButton>>,
    #[serde(skip_serializing_if = "is_false")]
    pub resize_keyboard: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub one_time_keyboard: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub selective: bool,
}

/// One button of a reply keyboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "is_false")]
    pub request_contact: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub request_location: bool,
}

/// Removes the current custom keyboard. `remove_keyboard` must be `true`.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyKeyboardRemove {
    pub remove_keyboard: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub selective: bool,
}

/// Forces a reply interface on the recipient. `force_reply` must be `true`.
#[derive(Debug, Clone, Serialize)]
pub struct ForceReply {
    pub force_reply: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub selective: bool,
}

/// An inline keyboard attached to a message.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// One button of an inline keyboard. Exactly one optional field must be
/// set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_inline_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_inline_query_current_chat: Option<String>,
}

/// An incoming callback query from an inline keyboard button.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// Message the button was attached to, when the message was sent by
    /// the bot itself.
    pub message: Option<Box<Message>>,
    /// Identifier of the inline message, when the button was attached to
    /// a message sent via the bot in inline mode.
    pub inline_message_id: Option<String>,
    pub chat_instance: String,
    pub data: Option<String>,
}

/// Chat member status discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
}

/// Information about one member of a chat.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMember {
    pub user: User,
    pub status: ChatMemberStatus,
    pub until_date: Option<i64>,
    #[serde(default)]
    pub can_be_edited: bool,
    #[serde(default)]
    pub can_change_info: bool,
    #[serde(default)]
    pub can_post_messages: bool,
    #[serde(default)]
    pub can_edit_messages: bool,
    #[serde(default)]
    pub can_delete_messages: bool,
    #[serde(default)]
    pub can_invite_users: bool,
    #[serde(default)]
    pub can_restrict_members: bool,
    #[serde(default)]
    pub can_pin_messages: bool,
    #[serde(default)]
    pub can_promote_members: bool,
    #[serde(default)]
    pub can_send_messages: bool,
    #[serde(default)]
    pub can_send_media_messages: bool,
    #[serde(default)]
    pub can_send_other_messages: bool,
    #[serde(default)]
    pub can_add_web_page_previews: bool,
}

/// Current webhook status, from `getWebhookInfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookInfo {
    pub url: String,
    pub has_custom_certificate: bool,
    pub pending_update_count: i64,
    pub last_error_date: Option<i64>,
    pub last_error_message: Option<String>,
    pub max_connections: Option<i64>,
    #[serde(default)]
    pub allowed_updates: Vec<String>,
}

/// Extra information attached to some API failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseParameters {
    pub migrate_to_chat_id: Option<i64>,
    pub retry_after: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_update_with_message() {
        let json = r#"{
            "update_id": 100,
            "message": {
                "message_id": 42,
                "from": {"id": 999, "is_bot": false, "first_name": "Alice", "username": "alice"},
                "chat": {"id": -1001234, "type": "group", "title": "Test Group"},
                "text": "Hello, bot!",
                "date": 1700000000
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.id, 100);
        assert_eq!(update.kind(), Some(UpdateKind::Message));
        let msg = update.message.unwrap();
        assert_eq!(msg.id, 42);
        assert_eq!(msg.text.as_deref(), Some("Hello, bot!"));
        assert_eq!(msg.chat.kind, ChatType::Group);
        assert_eq!(msg.from.unwrap().username.as_deref(), Some("alice"));
    }

    #[test]
    fn deserialize_update_with_edited_channel_post() {
        let json = r#"{
            "update_id": 101,
            "edited_channel_post": {
                "message_id": 7,
                "chat": {"id": -100, "type": "channel", "title": "News"},
                "date": 1700000001,
                "edit_date": 1700000050,
                "text": "corrected"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.kind(), Some(UpdateKind::EditedChannelPost));
        let post = update.edited_channel_post.unwrap();
        assert!(post.from.is_none());
        assert_eq!(post.edit_date, Some(1700000050));
    }

    #[test]
    fn deserialize_update_with_callback_query() {
        let json = r#"{
            "update_id": 102,
            "callback_query": {
                "id": "cbq-1",
                "from": {"id": 5, "is_bot": false, "first_name": "Eve"},
                "chat_instance": "inst",
                "data": "choice:2"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.kind(), Some(UpdateKind::CallbackQuery));
        let cbq = update.callback_query.unwrap();
        assert_eq!(cbq.data.as_deref(), Some("choice:2"));
        assert!(cbq.message.is_none());
    }

    #[test]
    fn unrecognized_update_has_no_kind() {
        let json = r#"{"update_id": 103}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.kind(), None);
    }

    #[test]
    fn update_kind_wire_names() {
        let kinds = vec![UpdateKind::Message, UpdateKind::ChosenInlineResult];
        let json = serde_json::to_value(&kinds).unwrap();
        assert_eq!(json[0], "message");
        assert_eq!(json[1], "chosen_inline_result");
    }

    #[test]
    fn deserialize_message_entities() {
        let json = r#"{
            "message_id": 1,
            "chat": {"id": 1, "type": "private"},
            "date": 0,
            "text": "/start now",
            "entities": [{"type": "bot_command", "offset": 0, "length": 6}]
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.entities.len(), 1);
        assert_eq!(msg.entities[0].kind, MessageEntityType::BotCommand);
        assert!(msg.caption_entities.is_empty());
    }

    #[test]
    fn deserialize_nested_reply() {
        let json = r#"{
            "message_id": 2,
            "chat": {"id": 1, "type": "private"},
            "date": 10,
            "text": "pong",
            "reply_to_message": {
                "message_id": 1,
                "chat": {"id": 1, "type": "private"},
                "date": 5,
                "text": "ping"
            }
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.reply_to_message.unwrap().text.as_deref(), Some("ping"));
    }

    #[test]
    fn serialize_inline_keyboard_markup() {
        let markup = ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: "Pick me".into(),
                callback_data: Some("pick".into()),
                ..Default::default()
            }]],
        });
        let json = serde_json::to_value(&markup).unwrap();
        // Untagged: the variant serializes to its bare object shape.
        assert_eq!(json["inline_keyboard"][0][0]["text"], "Pick me");
        assert_eq!(json["inline_keyboard"][0][0]["callback_data"], "pick");
        assert!(json["inline_keyboard"][0][0].get("url").is_none());
    }

    #[test]
    fn serialize_keyboard_remove() {
        let markup = ReplyMarkup::KeyboardRemove(ReplyKeyboardRemove {
            remove_keyboard: true,
            selective: false,
        });
        let json = serde_json::to_value(&markup).unwrap();
        assert_eq!(json["remove_keyboard"], true);
        assert!(json.get("selective").is_none());
    }

    #[test]
    fn deserialize_chat_member() {
        let json = r#"{
            "user": {"id": 9, "is_bot": false, "first_name": "Mod"},
            "status": "administrator",
            "can_delete_messages": true
        }"#;
        let member: ChatMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.status, ChatMemberStatus::Administrator);
        assert!(member.can_delete_messages);
        assert!(!member.can_pin_messages);
    }

    #[test]
    fn deserialize_webhook_info() {
        let json = r#"{
            "url": "",
            "has_custom_certificate": false,
            "pending_update_count": 0
        }"#;
        let info: WebhookInfo = serde_json::from_str(json).unwrap();
        assert!(info.url.is_empty());
        assert!(info.allowed_updates.is_empty());
    }

    #[test]
    fn parse_mode_wire_names() {
        assert_eq!(
            serde_json::to_value(ParseMode::Markdown).unwrap(),
            "Markdown"
        );
        assert_eq!(serde_json::to_value(ParseMode::Html).unwrap(), "HTML");
    }
}

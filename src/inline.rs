//! Inline-mode types: incoming inline queries and the outgoing result
//! family.
//!
//! [`InlineQueryResult`] is a closed, internally tagged set -- serde
//! injects the `"type"` field the API uses to discriminate results, so
//! each variant only declares its own payload fields.

use serde::{Deserialize, Serialize};

use crate::types::{InlineKeyboardMarkup, Location, ParseMode, User};

/// An incoming inline query. An empty `query` string means the user has
/// just opened the inline panel.
#[derive(Debug, Clone, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    pub location: Option<Location>,
    /// Text of the query, up to 512 characters.
    pub query: String,
    /// Offset of the results to return, controlled by the bot via
    /// `AnswerInlineQuery::next_offset`.
    pub offset: String,
}

/// A result of an inline query that was chosen by the user.
#[derive(Debug, Clone, Deserialize)]
pub struct ChosenInlineResult {
    #[serde(rename = "result_id")]
    pub id: String,
    pub from: User,
    pub location: Option<Location>,
    pub inline_message_id: Option<String>,
    pub query: String,
}

/// One result offered in answer to an inline query.
///
/// Serializes with the wire `"type"` tag (`"article"`, `"photo"`, ...)
/// alongside the variant's fields.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineQueryResult {
    Article(InlineQueryResultArticle),
    Photo(InlineQueryResultPhoto),
    Gif(InlineQueryResultGif),
    Mpeg4Gif(InlineQueryResultMpeg4Gif),
    Video(InlineQueryResultVideo),
    Audio(InlineQueryResultAudio),
    Voice(InlineQueryResultVoice),
    Document(InlineQueryResultDocument),
    Location(InlineQueryResultLocation),
    Venue(InlineQueryResultVenue),
    Contact(InlineQueryResultContact),
}

/// A link to an article or web page.
#[derive(Debug, Clone, Serialize)]
pub struct InlineQueryResultArticle {
    pub id: String,
    pub title: String,
    pub input_message_content: InputMessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "crate::types::is_false")]
    pub hide_url: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_height: Option<u32>,
}

/// A link to a photo.
#[derive(Debug, Clone, Serialize)]
pub struct InlineQueryResultPhoto {
    pub id: String,
    #[serde(rename = "photo_url")]
    pub url: String,
    pub thumb_url: String,
    #[serde(rename = "photo_width", skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(rename = "photo_height", skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// A link to an animated GIF file.
#[derive(Debug, Clone, Serialize)]
pub struct InlineQueryResultGif {
    pub id: String,
    #[serde(rename = "gif_url")]
    pub url: String,
    #[serde(rename = "gif_width", skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(rename = "gif_height", skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(rename = "gif_duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// A link to a video animation (H.264/MPEG-4 AVC without sound).
#[derive(Debug, Clone, Serialize)]
pub struct InlineQueryResultMpeg4Gif {
    pub id: String,
    #[serde(rename = "mpeg4_url")]
    pub url: String,
    #[serde(rename = "mpeg4_width", skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(rename = "mpeg4_height", skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(rename = "mpeg4_duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// MIME type of an inline video result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VideoMimeType {
    #[serde(rename = "text/html")]
    Html,
    #[serde(rename = "video/mp4")]
    Mp4,
}

/// A link to an embedded video player or a video file.
#[derive(Debug, Clone, Serialize)]
pub struct InlineQueryResultVideo {
    pub id: String,
    #[serde(rename = "video_url")]
    pub url: String,
    pub mime_type: VideoMimeType,
    pub thumb_url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(rename = "video_width", skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(rename = "video_height", skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(rename = "video_duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// A link to an MP3 audio file.
#[derive(Debug, Clone, Serialize)]
pub struct InlineQueryResultAudio {
    pub id: String,
    #[serde(rename = "audio_url")]
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(rename = "audio_duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// A link to an OPUS-encoded voice recording in an .ogg container.
#[derive(Debug, Clone, Serialize)]
pub struct InlineQueryResultVoice {
    pub id: String,
    #[serde(rename = "voice_url")]
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(rename = "voice_duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

/// MIME type of an inline document result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentMimeType {
    #[serde(rename = "application/pdf")]
    Pdf,
    #[serde(rename = "application/zip")]
    Zip,
}

/// A link to a file. Only PDF and ZIP files can be sent this way.
#[derive(Debug, Clone, Serialize)]
pub struct InlineQueryResultDocument {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(rename = "document_url")]
    pub url: String,
    pub mime_type: DocumentMimeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_height: Option<u32>,
}

/// A location on the map.
#[derive(Debug, Clone, Serialize)]
pub struct InlineQueryResultLocation {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_height: Option<u32>,
}

/// A venue.
#[derive(Debug, Clone, Serialize)]
pub struct InlineQueryResultVenue {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_height: Option<u32>,
}

/// A contact with a phone number.
#[derive(Debug, Clone, Serialize)]
pub struct InlineQueryResultContact {
    pub id: String,
    pub phone_number: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_height: Option<u32>,
}

/// Content of the message sent when an inline result is chosen.
///
/// Untagged: the API distinguishes the variants by their required
/// fields, no discriminator is sent.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum InputMessageContent {
    Text(InputTextMessageContent),
    Location(InputLocationMessageContent),
    Venue(InputVenueMessageContent),
    Contact(InputContactMessageContent),
}

/// Text message content.
#[derive(Debug, Clone, Serialize)]
pub struct InputTextMessageContent {
    #[serde(rename = "message_text")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "crate::types::is_false")]
    pub disable_web_page_preview: bool,
}

/// Location message content.
#[derive(Debug, Clone, Serialize)]
pub struct InputLocationMessageContent {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_period: Option<u32>,
}

/// Venue message content.
#[derive(Debug, Clone, Serialize)]
pub struct InputVenueMessageContent {
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
}

/// Contact message content.
#[derive(Debug, Clone, Serialize)]
pub struct InputContactMessageContent {
    pub phone_number: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

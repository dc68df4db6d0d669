// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use chrono::{DateTime, Utc};

use super::{Chat, RegexMatch, User};

/// Media attached to a message.
///
/// A message carries at most one of these.
#[derive(Clone, Debug, PartialEq)]
pub enum Media {
    Audio,
    Document,
    Photo,
    Sticker,
    Video,
    Animation,
    Voice,
    VideoNote,
    Contact { phone_number: String },
    Location { latitude: f64, longitude: f64 },
    Venue { title: String },
    Poll { question: String },
    Game { title: String },
    Dice { emoji: String, value: i32 },
    WebPage { url: String },
}

impl Media {
    /// Whether this is one of the kinds considered "media" by [`crate::filters::media`]:
    /// audio, document, photo, sticker, video, animation, voice, video note, contact,
    /// location, venue or poll.
    ///
    /// Games, dice and web page previews are not.
    pub fn is_media_kind(&self) -> bool {
        !matches!(self, Self::Game { .. } | Self::Dice { .. } | Self::WebPage { .. })
    }
}

/// The event a service message describes.
#[derive(Clone, Debug, PartialEq)]
pub enum ServiceAction {
    NewChatMembers(Vec<User>),
    LeftChatMember(User),
    NewChatTitle(String),
    NewChatPhoto,
    DeleteChatPhoto,
    GroupChatCreated,
    SupergroupChatCreated,
    ChannelChatCreated,
    MigrateToChatId(i64),
    MigrateFromChatId(i64),
    PinnedMessage(i32),
    GameHighScore(i32),
    VideoChatStarted,
    VideoChatEnded,
    VideoChatMembersInvited(Vec<User>),
}

/// Additional interface options attached to a message.
#[derive(Clone, Debug, PartialEq)]
pub enum ReplyMarkup {
    /// Rows of buttons shown below the message itself, by their text.
    InlineKeyboard(Vec<Vec<String>>),
    /// Rows of buttons replacing the user's keyboard, by their text.
    ReplyKeyboard(Vec<Vec<String>>),
    ReplyKeyboardRemove,
    ForceReply,
}

/// A message, either sent, received or edited.
#[derive(Clone, Debug, Default)]
pub struct Message {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub text: Option<String>,
    pub caption: Option<String>,
    /// The sender, or `None` for messages sent on behalf of a channel.
    pub from_user: Option<User>,
    pub chat: Option<Chat>,
    /// Whether the logged-in account sent this message.
    ///
    /// Messages sent to Saved Messages are not considered outgoing.
    pub outgoing: bool,
    pub reply_to_message_id: Option<i32>,
    pub forward_date: Option<DateTime<Utc>>,
    pub forward_from_chat: Option<Chat>,
    pub media: Option<Media>,
    pub action: Option<ServiceAction>,
    pub media_group_id: Option<String>,
    pub has_media_spoiler: bool,
    pub reply_markup: Option<ReplyMarkup>,
    pub mentioned: bool,
    pub via_bot: Option<User>,
    pub scheduled: bool,
    pub from_scheduled: bool,

    /// The command and its arguments, set by [`crate::filters::command`] when it matches.
    ///
    /// The first item is the matched command without prefix, the rest are its arguments.
    pub command: Option<Vec<String>>,
    /// The matches found by [`crate::filters::regex`], if any.
    pub matches: Option<Vec<RegexMatch>>,
}

impl Message {
    /// Creates a text message with the given identifier.
    pub fn with_text(id: i32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// The text of the message, or its caption if the text is empty.
    ///
    /// Empty strings are treated the same as missing ones.
    pub fn text_or_caption(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|text| !text.is_empty())
            .or_else(|| self.caption.as_deref().filter(|caption| !caption.is_empty()))
    }

    /// Whether this is a service message (members joining, title changes, pins, etc.).
    pub fn is_service(&self) -> bool {
        self.action.is_some()
    }
}

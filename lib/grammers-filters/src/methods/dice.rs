// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use log::debug;

use super::Invoker;
use crate::InvocationError;
use crate::filters::Identifier;
use crate::update::Message;

/// The emoji a dice throw animation can be based on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum DiceEmoji {
    #[default]
    Die,
    Dart,
    Basketball,
    Football,
    Bowling,
    SlotMachine,
}

impl DiceEmoji {
    pub const ALL: [DiceEmoji; 6] = [
        Self::Die,
        Self::Dart,
        Self::Basketball,
        Self::Football,
        Self::Bowling,
        Self::SlotMachine,
    ];

    pub fn emoticon(self) -> &'static str {
        match self {
            Self::Die => "🎲",
            Self::Dart => "🎯",
            Self::Basketball => "🏀",
            Self::Football => "⚽",
            Self::Bowling => "🎳",
            Self::SlotMachine => "🎰",
        }
    }

    pub fn from_emoticon(emoticon: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|emoji| emoji.emoticon() == emoticon)
    }

    /// The values a throw with this emoji can land on.
    pub fn values(self) -> RangeInclusive<i32> {
        match self {
            Self::Die | Self::Dart | Self::Bowling => 1..=6,
            Self::Basketball | Self::Football => 1..=5,
            Self::SlotMachine => 1..=64,
        }
    }
}

/// A request to send a dice with a random value.
#[derive(Clone, Debug, PartialEq)]
pub struct SendDice {
    pub chat: Identifier,
    pub emoji: DiceEmoji,
    /// The forum topic to send the dice to.
    pub message_thread_id: Option<i32>,
    pub silent: bool,
    pub reply_to_message_id: Option<i32>,
    pub schedule_date: Option<DateTime<Utc>>,
    /// Prevent the message from being forwarded or saved.
    pub protect_content: bool,
}

impl SendDice {
    /// Throw a die (🎲) in the given chat. Use `"me"` to send it to your Saved Messages.
    pub fn new(chat: impl Into<Identifier>) -> Self {
        Self {
            chat: chat.into(),
            emoji: DiceEmoji::default(),
            message_thread_id: None,
            silent: false,
            reply_to_message_id: None,
            schedule_date: None,
            protect_content: false,
        }
    }

    pub fn emoji(mut self, emoji: DiceEmoji) -> Self {
        self.emoji = emoji;
        self
    }

    pub fn message_thread_id(mut self, id: i32) -> Self {
        self.message_thread_id = Some(id);
        self
    }

    /// Whether the dice should be sent silently, with no notification sound for the users.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn reply_to(mut self, message_id: i32) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    /// Schedule the dice to be sent at the given date, instead of right away.
    pub fn schedule_date(mut self, date: DateTime<Utc>) -> Self {
        self.schedule_date = Some(date);
        self
    }

    pub fn protect_content(mut self, protect: bool) -> Self {
        self.protect_content = protect;
        self
    }

    /// The message being replied to and the topic it belongs to, if any.
    ///
    /// Sending to a topic without replying to a specific message replies to the topic itself.
    pub fn reply_head(&self) -> Option<(i32, Option<i32>)> {
        match (self.reply_to_message_id, self.message_thread_id) {
            (Some(reply_to), top) => Some((reply_to, top)),
            (None, Some(top)) => Some((top, None)),
            (None, None) => None,
        }
    }

    /// The schedule date as a Unix timestamp.
    pub fn schedule_timestamp(&self) -> Option<i32> {
        self.schedule_date
            .and_then(|date| i32::try_from(date.timestamp()).ok())
    }
}

/// Send a dice through the given invoker.
///
/// Returns the sent message, which carries the [`DiceEmoji::values`] it landed on.
pub async fn send_dice<I: Invoker + ?Sized>(
    invoker: &I,
    request: &SendDice,
) -> Result<Option<Message>, InvocationError> {
    debug!(
        "sending {} to {}{}",
        request.emoji.emoticon(),
        request.chat,
        if request.schedule_date.is_some() {
            " (scheduled)"
        } else {
            ""
        }
    );
    invoker.send_dice(request).await
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn emoji_values() {
        assert_eq!(DiceEmoji::default().emoticon(), "🎲");
        assert_eq!(DiceEmoji::from_emoticon("🎰"), Some(DiceEmoji::SlotMachine));
        assert_eq!(DiceEmoji::from_emoticon("🃏"), None);
        assert_eq!(DiceEmoji::SlotMachine.values(), 1..=64);
        assert_eq!(DiceEmoji::Football.values(), 1..=5);
        assert_eq!(DiceEmoji::Bowling.values(), 1..=6);
    }

    #[test]
    fn builder() {
        let date = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let request = SendDice::new("@Chat")
            .emoji(DiceEmoji::Dart)
            .silent(true)
            .schedule_date(date);

        assert_eq!(request.chat, Identifier::Username("chat".into()));
        assert_eq!(request.emoji, DiceEmoji::Dart);
        assert!(request.silent);
        assert_eq!(request.schedule_timestamp(), Some(1893456000));
        assert_eq!(request.reply_head(), None);
    }

    #[test]
    fn reply_heads() {
        let request = SendDice::new("me").message_thread_id(10);
        assert_eq!(request.reply_head(), Some((10, None)));

        let request = request.reply_to(12);
        assert_eq!(request.reply_head(), Some((12, Some(10))));

        assert_eq!(SendDice::new(1).reply_to(5).reply_head(), Some((5, None)));
    }
}

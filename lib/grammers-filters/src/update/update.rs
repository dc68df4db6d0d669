// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::{CallbackQuery, InlineQuery, Message, MessageDeletion, RegexMatch};

/// An update that indicates some event, which may be of interest to the logged-in account, has occured.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum Update {
    /// Occurs whenever a new text message or a message with media is produced.
    NewMessage(Message),
    /// Occurs when a message is updated.
    MessageEdited(Message),
    /// Occurs when a message is deleted.
    MessageDeleted(MessageDeletion),
    /// Occurs when Telegram calls back into your bot because an inline callback
    /// button was pressed.
    CallbackQuery(CallbackQuery),
    /// Occurs whenever you sign in as a bot and a user sends an inline query
    /// such as `@bot query`.
    InlineQuery(InlineQuery),
}

impl Update {
    /// Name of the variant, used when reporting that a filter cannot handle this update.
    pub fn kind(&self) -> &'static str {
        match self {
            Update::NewMessage(_) => "NewMessage",
            Update::MessageEdited(_) => "MessageEdited",
            Update::MessageDeleted(_) => "MessageDeleted",
            Update::CallbackQuery(_) => "CallbackQuery",
            Update::InlineQuery(_) => "InlineQuery",
        }
    }

    /// The message of the update, if it is message-shaped (new or edited messages).
    pub fn message(&self) -> Option<&Message> {
        match self {
            Update::NewMessage(message) | Update::MessageEdited(message) => Some(message),
            _ => None,
        }
    }

    pub fn message_mut(&mut self) -> Option<&mut Message> {
        match self {
            Update::NewMessage(message) | Update::MessageEdited(message) => Some(message),
            _ => None,
        }
    }

    /// The command annotation written by [`crate::filters::command`], if any.
    pub fn command(&self) -> Option<&[String]> {
        self.message().and_then(|message| message.command.as_deref())
    }

    /// The matches annotation written by [`crate::filters::regex`], if any.
    pub fn matches(&self) -> Option<&[RegexMatch]> {
        match self {
            Update::NewMessage(message) | Update::MessageEdited(message) => {
                message.matches.as_deref()
            }
            Update::CallbackQuery(query) => query.matches.as_deref(),
            Update::InlineQuery(query) => query.matches.as_deref(),
            Update::MessageDeleted(_) => None,
        }
    }
}

impl From<Message> for Update {
    fn from(message: Message) -> Self {
        Self::NewMessage(message)
    }
}

impl From<CallbackQuery> for Update {
    fn from(query: CallbackQuery) -> Self {
        Self::CallbackQuery(query)
    }
}

impl From<InlineQuery> for Update {
    fn from(query: InlineQuery) -> Self {
        Self::InlineQuery(query)
    }
}

impl From<MessageDeletion> for Update {
    fn from(deletion: MessageDeletion) -> Self {
        Self::MessageDeleted(deletion)
    }
}

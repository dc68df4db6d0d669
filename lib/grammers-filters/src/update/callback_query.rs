// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use super::{Message, RegexMatch, User};

/// Update that bots receive when a user presses one of the bot's inline callback buttons.
#[derive(Clone, Debug, Default)]
pub struct CallbackQuery {
    pub id: i64,
    pub from_user: User,
    /// The message containing the pressed button.
    ///
    /// Missing for buttons of messages sent via inline mode.
    pub message: Option<Message>,
    /// The data associated with the pressed button, decoded as UTF-8.
    pub data: Option<String>,
    /// The matches found by [`crate::filters::regex`] in the [`CallbackQuery::data`], if any.
    pub matches: Option<Vec<RegexMatch>>,
}

impl CallbackQuery {
    pub fn new(id: i64, from_user: User) -> Self {
        Self {
            id,
            from_user,
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }
}

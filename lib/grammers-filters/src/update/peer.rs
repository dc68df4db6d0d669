// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// A user account, be it a person or a bot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    /// The public @username of this user, without the "@" prefix.
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub is_bot: bool,
    /// Whether this user is the account currently logged in.
    pub is_self: bool,
}

impl User {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn bot(mut self) -> Self {
        self.is_bot = true;
        self
    }

    pub fn myself(mut self) -> Self {
        self.is_self = true;
        self
    }
}

/// The kind of conversation a [`Chat`] represents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChatType {
    /// A private conversation with a person.
    #[default]
    Private,
    /// A private conversation with a bot.
    Bot,
    /// A small group chat.
    Group,
    /// A megagroup.
    Supergroup,
    /// A broadcast channel.
    Channel,
}

/// The place where a message was sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chat {
    pub id: i64,
    pub kind: ChatType,
    /// The public @username of this chat, without the "@" prefix.
    pub username: Option<String>,
    pub title: Option<String>,
}

impl Chat {
    pub fn new(id: i64, kind: ChatType) -> Self {
        Self {
            id,
            kind,
            username: None,
            title: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::update::User;
use crate::{Context, Filter, Result, Update, create_with};

/// A normalized reference to a user or chat.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Identifier {
    Id(i64),
    /// A username, lowercase and without the leading `@`.
    Username(String),
    /// The account currently logged in.
    Me,
}

impl Identifier {
    /// Bring a username into the form used for lookups: lowercase, without the leading `@`.
    ///
    /// `"me"` and `"self"` become [`Identifier::Me`].
    pub fn normalized(self) -> Self {
        match self {
            Self::Username(username) => Self::from(username.as_str()),
            other => other,
        }
    }
}

impl From<i64> for Identifier {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<i32> for Identifier {
    fn from(id: i32) -> Self {
        Self::Id(id.into())
    }
}

impl From<&str> for Identifier {
    /// `"me"` and `"self"` refer to the logged-in account. Anything else is a username.
    fn from(username: &str) -> Self {
        let username = username.trim_start_matches('@').to_lowercase();
        match username.as_str() {
            "me" | "self" => Self::Me,
            _ => Self::Username(username),
        }
    }
}

impl From<String> for Identifier {
    fn from(username: String) -> Self {
        Self::from(username.as_str())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(username) => write!(f, "@{username}"),
            Self::Me => write!(f, "me"),
        }
    }
}

fn normalize(identifier: impl Into<Identifier>) -> Identifier {
    let identifier: Identifier = identifier.into();
    identifier.normalized()
}

type Identifiers = RwLock<HashSet<Identifier>>;

/// A filter matching a set of users or chats, which can be modified after the filter is built.
///
/// Changes made through any clone are seen by every filter tree it's part of.
#[derive(Clone)]
pub struct MembershipFilter {
    identifiers: Arc<Identifiers>,
    filter: Filter,
}

impl MembershipFilter {
    fn new<I, T>(
        name: &str,
        identifiers: I,
        func: fn(&Identifiers, &Update, &dyn Context) -> bool,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Identifier>,
    {
        let identifiers = Arc::new(RwLock::new(
            identifiers.into_iter().map(normalize).collect::<HashSet<_>>(),
        ));
        let filter = create_with(
            Some(name),
            Arc::clone(&identifiers),
            move |identifiers: &Arc<Identifiers>,
                  ctx: &dyn Context,
                  update: &mut Update|
                  -> Result<bool> { Ok(func(identifiers, update, ctx)) },
        );
        Self {
            identifiers,
            filter,
        }
    }

    /// The filter itself, sharing this set.
    pub fn filter(&self) -> Filter {
        self.filter.clone()
    }

    /// Add an identifier, returning whether it was not present yet.
    pub fn insert(&self, identifier: impl Into<Identifier>) -> bool {
        self.identifiers.write().unwrap().insert(normalize(identifier))
    }

    /// Remove an identifier, returning whether it was present.
    pub fn remove(&self, identifier: impl Into<Identifier>) -> bool {
        self.identifiers.write().unwrap().remove(&normalize(identifier))
    }

    pub fn contains(&self, identifier: impl Into<Identifier>) -> bool {
        self.identifiers.read().unwrap().contains(&normalize(identifier))
    }

    pub fn extend<I, T>(&self, identifiers: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Identifier>,
    {
        self.identifiers
            .write()
            .unwrap()
            .extend(identifiers.into_iter().map(normalize));
    }

    pub fn clear(&self) {
        self.identifiers.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.identifiers.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.read().unwrap().is_empty()
    }

    /// A snapshot of the identifiers currently in the set.
    pub fn identifiers(&self) -> Vec<Identifier> {
        self.identifiers.read().unwrap().iter().cloned().collect()
    }
}

impl From<MembershipFilter> for Filter {
    fn from(membership: MembershipFilter) -> Self {
        membership.filter
    }
}

impl From<&MembershipFilter> for Filter {
    fn from(membership: &MembershipFilter) -> Self {
        membership.filter()
    }
}

impl fmt::Debug for MembershipFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembershipFilter")
            .field("name", &self.filter.name())
            .field("identifiers", &self.identifiers())
            .finish()
    }
}

fn has_username(identifiers: &HashSet<Identifier>, username: Option<&str>) -> bool {
    username.is_some_and(|username| {
        identifiers.contains(&Identifier::Username(username.to_lowercase()))
    })
}

/// The user who sent the message, pressed the button or typed the inline query.
fn sender(update: &Update) -> Option<&User> {
    match update {
        Update::NewMessage(message) | Update::MessageEdited(message) => message.from_user.as_ref(),
        Update::CallbackQuery(query) => Some(&query.from_user),
        Update::InlineQuery(query) => Some(&query.from_user),
        Update::MessageDeleted(_) => None,
    }
}

fn from_user(identifiers: &Identifiers, update: &Update, ctx: &dyn Context) -> bool {
    let Some(user) = sender(update) else {
        return false;
    };
    let identifiers = identifiers.read().unwrap();

    identifiers.contains(&Identifier::Id(user.id))
        || has_username(&identifiers, user.username.as_deref())
        || (identifiers.contains(&Identifier::Me) && ctx.is_self(user))
}

fn in_chat(identifiers: &Identifiers, update: &Update, ctx: &dyn Context) -> bool {
    let Some(message) = update.message() else {
        return false;
    };
    let Some(chat) = message.chat.as_ref() else {
        return false;
    };
    let identifiers = identifiers.read().unwrap();

    identifiers.contains(&Identifier::Id(chat.id))
        || has_username(&identifiers, chat.username.as_deref())
        || (identifiers.contains(&Identifier::Me)
            && !message.outgoing
            && message.from_user.as_ref().is_some_and(|user| ctx.is_self(user)))
}

/// Filter messages, callback queries and inline queries coming from one or more users.
///
/// Users are given by id or username (with or without `@`, in any case). Use `"me"` or `"self"`
/// for the account currently logged in.
///
/// The returned value can be used to change the set of users while the filter is in use.
///
/// ```
/// use grammers_filters::filters::{self, Identifier};
///
/// let admins = filters::user(["@Alice", "me"]);
/// admins.insert(123);
/// assert!(admins.contains("alice"));
/// assert!(admins.contains(Identifier::Me));
///
/// let filter = filters::text() & &admins;
/// ```
pub fn user<I, T>(users: I) -> MembershipFilter
where
    I: IntoIterator<Item = T>,
    T: Into<Identifier>,
{
    MembershipFilter::new("UserFilter", users, from_user)
}

/// Filter messages coming from one or more chats.
///
/// Chats are given by id or username (with or without `@`, in any case). Use `"me"` or `"self"`
/// for your own chat (Saved Messages), which only matches the messages you sent there from
/// another session.
///
/// The returned value can be used to change the set of chats while the filter is in use.
pub fn chat<I, T>(chats: I) -> MembershipFilter
where
    I: IntoIterator<Item = T>,
    T: Into<Identifier>,
{
    MembershipFilter::new("ChatFilter", chats, in_chat)
}

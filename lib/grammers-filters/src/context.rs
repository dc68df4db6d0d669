// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::update::User;

/// The handle filters are evaluated with.
///
/// It describes the account that received the update, which some filters need in order to
/// resolve `"me"` or to recognise commands addressed to the bot's own `@username`.
pub trait Context: Send + Sync {
    /// The account currently logged in.
    fn me(&self) -> &User;

    /// Whether the given user is the account currently logged in.
    fn is_self(&self, user: &User) -> bool {
        user.is_self || user.id == self.me().id
    }
}

/// A [`Context`] for a known account, without any connection behind it.
#[derive(Clone, Debug)]
pub struct Account {
    me: User,
}

impl Account {
    pub fn new(me: User) -> Self {
        Self { me }
    }
}

impl Context for Account {
    fn me(&self) -> &User {
        &self.me
    }
}

impl<C: Context + ?Sized> Context for std::sync::Arc<C> {
    fn me(&self) -> &User {
        (**self).me()
    }

    fn is_self(&self, user: &User) -> bool {
        (**self).is_self(user)
    }
}

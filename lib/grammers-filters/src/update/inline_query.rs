// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use super::{RegexMatch, User};

/// Update that bots receive whenever a user types `@bot query`.
#[derive(Clone, Debug, Default)]
pub struct InlineQuery {
    pub id: i64,
    pub from_user: User,
    /// The text typed after the bot's username.
    pub query: String,
    /// Offset of the results to return, as controlled by the bot.
    pub offset: String,
    /// The matches found by [`crate::filters::regex`] in the [`InlineQuery::query`], if any.
    pub matches: Option<Vec<RegexMatch>>,
}

impl InlineQuery {
    pub fn new(id: i64, from_user: User, query: impl Into<String>) -> Self {
        Self {
            id,
            from_user,
            query: query.into(),
            ..Self::default()
        }
    }
}

// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Request builders for the few methods that bots commonly combine with filters.
//!
//! This crate does not talk to Telegram. The requests are handed to an [`Invoker`], which is
//! expected to serialize them, send them, and parse the response back into [`Message`]s.
mod dice;
mod search;

use futures_util::future::BoxFuture;

use crate::InvocationError;
use crate::update::Message;

pub use dice::{DiceEmoji, SendDice, send_dice};
pub use search::{MAX_LIMIT, MessagesFilter, SearchIter, SearchMessages};

/// The connection through which requests are sent.
pub trait Invoker: Send + Sync {
    /// Send a dice message, returning the message that was sent, if the response contained it.
    fn send_dice<'a>(
        &'a self,
        request: &'a SendDice,
    ) -> BoxFuture<'a, Result<Option<Message>, InvocationError>>;

    /// Fetch up to `limit` messages matching the search, skipping the first `offset` results.
    fn search_chunk<'a>(
        &'a self,
        request: &'a SearchMessages,
        offset: usize,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<Message>, InvocationError>>;
}

// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parsed updates, as far as filters are concerned.
//!
//! Only the fields read by the [`crate::filters`] are modelled here. They are produced by
//! whichever layer parses the raw updates Telegram sends, and every one of them is optional
//! unless the update genuinely carries that payload.

mod callback_query;
mod inline_query;
mod matches;
mod message;
mod message_deletion;
mod peer;
mod update;

pub use callback_query::CallbackQuery;
pub use inline_query::InlineQuery;
pub use matches::RegexMatch;
pub use message::{Media, Message, ReplyMarkup, ServiceAction};
pub use message_deletion::MessageDeletion;
pub use peer::{Chat, ChatType, User};
pub use update::Update;

// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Update that occurs when messages are deleted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageDeletion {
    /// The channel the messages were deleted from, or `None` for private chats and small groups.
    pub channel_id: Option<i64>,
    pub message_ids: Vec<i32>,
}

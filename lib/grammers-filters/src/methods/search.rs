// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::collections::VecDeque;

use log::trace;

use super::Invoker;
use crate::InvocationError;
use crate::filters::Identifier;
use crate::update::Message;

/// The most messages a single search request can return.
pub const MAX_LIMIT: usize = 100;

/// How many messages are returned when no limit is set.
const NO_LIMIT: usize = (1 << 31) - 1;

/// The kind of messages a search is restricted to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum MessagesFilter {
    /// Any message.
    #[default]
    Empty,
    Photo,
    Video,
    PhotoVideo,
    Document,
    /// Messages containing links.
    Url,
    Animation,
    VoiceNote,
    VideoNote,
    AudioVideoNote,
    Audio,
    ChatPhoto,
    PhoneCall,
    Location,
    Contact,
    Pinned,
    /// Messages mentioning you.
    Mention,
}

/// A search for text and media messages inside a specific chat.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchMessages {
    pub chat: Identifier,
    /// Required for text messages. When searching for media, it's applied to their captions.
    pub query: String,
    /// Amount of results to skip.
    pub offset: usize,
    pub filter: MessagesFilter,
    /// How many messages to return at most, with `0` meaning all of them.
    pub limit: i32,
    pub from_user: Option<Identifier>,
}

impl SearchMessages {
    pub fn new(chat: impl Into<Identifier>) -> Self {
        Self {
            chat: chat.into(),
            query: String::new(),
            offset: 0,
            filter: MessagesFilter::default(),
            limit: 0,
            from_user: None,
        }
    }

    pub fn query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Changes the media filter. Only messages with this type of media will be fetched.
    pub fn filter(mut self, filter: MessagesFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Change how many messages will be returned from the iterator.
    ///
    /// The sign is ignored, and `0` removes the limit.
    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = limit;
        self
    }

    /// Restricts results to messages sent by the given user. Use `"me"` for your own messages.
    pub fn from_user(mut self, user: impl Into<Identifier>) -> Self {
        self.from_user = Some(user.into());
        self
    }

    /// The amount of messages the search yields at most.
    pub fn total(&self) -> usize {
        match self.limit.unsigned_abs() as usize {
            0 => NO_LIMIT,
            n => n,
        }
    }

    /// Run the search through the given invoker.
    pub fn iter<I: Invoker + ?Sized>(self, invoker: &I) -> SearchIter<'_, I> {
        let total = self.total();
        SearchIter {
            invoker,
            offset: self.offset,
            request: self,
            total,
            chunk_size: total.min(MAX_LIMIT),
            fetched: 0,
            buffer: VecDeque::with_capacity(MAX_LIMIT),
            last_chunk: false,
        }
    }
}

/// Iterator over the results of a [`SearchMessages`], fetching them in chunks as needed.
pub struct SearchIter<'a, I: ?Sized> {
    invoker: &'a I,
    request: SearchMessages,
    offset: usize,
    total: usize,
    chunk_size: usize,
    fetched: usize,
    buffer: VecDeque<Message>,
    last_chunk: bool,
}

impl<I: Invoker + ?Sized> SearchIter<'_, I> {
    /// Return the next `Message` from the internal buffer, filling the buffer previously if it's
    /// empty.
    ///
    /// Returns `None` if the limit is reached or there are no messages left.
    pub async fn next(&mut self) -> Result<Option<Message>, InvocationError> {
        if self.fetched >= self.total {
            return Ok(None);
        }

        if self.buffer.is_empty() && !self.last_chunk {
            let chunk = self
                .invoker
                .search_chunk(&self.request, self.offset, self.chunk_size)
                .await?;

            trace!(
                "search in {} at offset {} returned {} messages",
                self.request.chat,
                self.offset,
                chunk.len()
            );
            self.last_chunk = chunk.is_empty();
            self.offset += chunk.len();
            self.buffer.extend(chunk);
        }

        Ok(self.pop_item())
    }

    /// Amount of messages returned so far.
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    fn pop_item(&mut self) -> Option<Message> {
        let item = self.buffer.pop_front()?;
        self.fetched += 1;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use futures_util::future::{self, BoxFuture, FutureExt};

    use super::*;
    use crate::methods::SendDice;

    struct History {
        messages: Vec<Message>,
        requests: Mutex<Vec<(usize, usize)>>,
        fail: bool,
    }

    impl History {
        fn new(count: i32) -> Self {
            Self {
                messages: (0..count).map(|id| Message::with_text(id, "hi")).collect(),
                requests: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn requests(&self) -> Vec<(usize, usize)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Invoker for History {
        fn send_dice<'a>(
            &'a self,
            _: &'a SendDice,
        ) -> BoxFuture<'a, Result<Option<Message>, InvocationError>> {
            future::ready(Ok(None)).boxed()
        }

        fn search_chunk<'a>(
            &'a self,
            _: &'a SearchMessages,
            offset: usize,
            limit: usize,
        ) -> BoxFuture<'a, Result<Vec<Message>, InvocationError>> {
            self.requests.lock().unwrap().push((offset, limit));
            let result = if self.fail {
                Err(InvocationError {
                    code: 420,
                    name: "FLOOD_WAIT".into(),
                    value: Some(31),
                })
            } else {
                Ok(self.messages.iter().skip(offset).take(limit).cloned().collect())
            };
            future::ready(result).boxed()
        }
    }

    async fn drain(iter: &mut SearchIter<'_, History>) -> Vec<i32> {
        let mut ids = Vec::new();
        while let Some(message) = iter.next().await.unwrap() {
            ids.push(message.id);
        }
        ids
    }

    #[tokio::test]
    async fn no_limit_fetches_everything() {
        let history = History::new(250);
        let mut iter = SearchMessages::new("me").iter(&history);

        let ids = drain(&mut iter).await;
        assert_eq!(ids, (0..250).collect::<Vec<_>>());
        assert_eq!(iter.fetched(), 250);
        assert_eq!(
            history.requests(),
            vec![(0, 100), (100, 100), (200, 100), (250, 100)]
        );
        assert!(iter.next().await.unwrap().is_none());
        assert_eq!(history.requests().len(), 4);
    }

    #[tokio::test]
    async fn limit_stops_early() {
        let history = History::new(250);
        let mut iter = SearchMessages::new("me").limit(-120).iter(&history);

        assert_eq!(drain(&mut iter).await.len(), 120);
        assert_eq!(history.requests(), vec![(0, 100), (100, 100)]);

        let history = History::new(250);
        let mut iter = SearchMessages::new("me").offset(10).limit(5).iter(&history);
        assert_eq!(drain(&mut iter).await, vec![10, 11, 12, 13, 14]);
        assert_eq!(history.requests(), vec![(10, 5)]);
    }

    #[tokio::test]
    async fn errors_are_propagated() {
        let mut history = History::new(10);
        history.fail = true;
        let mut iter = SearchMessages::new("me").iter(&history);

        let err = iter.next().await.unwrap_err();
        assert!(err.is("FLOOD_*"));
    }

    #[test]
    fn builder() {
        let search = SearchMessages::new(-100)
            .query("hello")
            .filter(MessagesFilter::Pinned)
            .from_user("@Someone");

        assert_eq!(search.chat, Identifier::Id(-100));
        assert_eq!(search.query, "hello");
        assert_eq!(search.filter, MessagesFilter::Pinned);
        assert_eq!(search.from_user, Some(Identifier::Username("someone".into())));
        assert_eq!(search.total(), NO_LIMIT);
        assert_eq!(search.limit(7).total(), 7);
    }
}

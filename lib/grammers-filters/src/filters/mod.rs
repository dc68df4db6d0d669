// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The prebuilt filters.
//!
//! Most of them test a single property of message updates, and simply don't match any other
//! kind of update. The exceptions are [`private`], [`group`] and [`channel`], which also
//! work with callback queries, and [`regex`], which also works with callback and inline queries.

mod command;
mod membership;
mod regex;

use crate::update::{ChatType, Media, Message, ReplyMarkup, ServiceAction, Update};
use crate::{Context, Filter, FilterError, Result, create_with};

pub use command::{
    CommandConfig, CommandParams, DEFAULT_PREFIX, command, command_with, split_arguments,
};
pub use membership::{Identifier, MembershipFilter, chat, user};
pub use self::regex::{RegexOptions, regex, regex_compiled, regex_with};

/// Defines stateless filters over message updates.
///
/// Updates which are not messages never match.
macro_rules! message_filters {
    ($( $(#[$doc:meta])* $name:ident => |$m:ident| $body:expr; )+) => {
        $(
            $(#[$doc])*
            pub fn $name() -> Filter {
                fn $name(_: &(), _: &dyn Context, update: &mut Update) -> Result<bool> {
                    Ok(update.message().is_some_and(|$m: &Message| $body))
                }
                create_with(Some(stringify!($name)), (), $name)
            }
        )+
    };
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

fn has_media(m: &Message, kind: fn(&Media) -> bool) -> bool {
    m.media.as_ref().is_some_and(kind)
}

fn has_action(m: &Message, kind: fn(&ServiceAction) -> bool) -> bool {
    m.action.as_ref().is_some_and(kind)
}

/// Filter all updates.
pub fn all() -> Filter {
    create_with(Some("all"), (), |_, _, _| Ok(true))
}

message_filters! {
    /// Filter messages generated by you yourself.
    me => |m| match &m.from_user {
        Some(user) => user.is_self,
        None => m.outgoing,
    };

    /// Filter messages coming from bots.
    bot => |m| m.from_user.as_ref().is_some_and(|user| user.is_bot);

    /// Filter incoming messages.
    ///
    /// Messages sent to your own chat (Saved Messages) are also recognised as incoming.
    incoming => |m| !m.outgoing;

    /// Filter outgoing messages.
    ///
    /// Messages sent to your own chat (Saved Messages) are not recognized as outgoing.
    outgoing => |m| m.outgoing;

    /// Filter text messages.
    text => |m| non_empty(&m.text);

    /// Filter messages that are replies to other messages.
    reply => |m| m.reply_to_message_id.is_some_and(|id| id != 0);

    /// Filter messages that are forwarded.
    forwarded => |m| m.forward_date.is_some();

    /// Filter media messages that contain captions.
    caption => |m| non_empty(&m.caption);

    /// Filter messages that contain audio files.
    audio => |m| has_media(m, |x| matches!(x, Media::Audio));

    /// Filter messages that contain documents.
    document => |m| has_media(m, |x| matches!(x, Media::Document));

    /// Filter messages that contain photos.
    photo => |m| has_media(m, |x| matches!(x, Media::Photo));

    /// Filter messages that contain stickers.
    sticker => |m| has_media(m, |x| matches!(x, Media::Sticker));

    /// Filter messages that contain animations (GIFs).
    animation => |m| has_media(m, |x| matches!(x, Media::Animation));

    /// Filter messages that contain games.
    game => |m| has_media(m, |x| matches!(x, Media::Game { .. }));

    /// Filter messages that contain videos.
    video => |m| has_media(m, |x| matches!(x, Media::Video));

    /// Filter messages containing photos or videos being part of an album.
    media_group => |m| non_empty(&m.media_group_id);

    /// Filter messages that contain voice notes.
    voice => |m| has_media(m, |x| matches!(x, Media::Voice));

    /// Filter messages that contain round video notes.
    video_note => |m| has_media(m, |x| matches!(x, Media::VideoNote));

    /// Filter messages that contain contacts.
    contact => |m| has_media(m, |x| matches!(x, Media::Contact { .. }));

    /// Filter messages that contain locations.
    location => |m| has_media(m, |x| matches!(x, Media::Location { .. }));

    /// Filter messages that contain venues.
    venue => |m| has_media(m, |x| matches!(x, Media::Venue { .. }));

    /// Filter messages sent with a webpage preview.
    web_page => |m| has_media(m, |x| matches!(x, Media::WebPage { .. }));

    /// Filter messages that contain polls.
    poll => |m| has_media(m, |x| matches!(x, Media::Poll { .. }));

    /// Filter messages that contain dice.
    dice => |m| has_media(m, |x| matches!(x, Media::Dice { .. }));

    /// Filter media messages that contain a spoiler.
    media_spoiler => |m| m.has_media_spoiler;

    /// Filter service messages for new chat members.
    new_chat_members => |m| has_action(m, |x| {
        matches!(x, ServiceAction::NewChatMembers(users) if !users.is_empty())
    });

    /// Filter service messages for members that left the chat.
    left_chat_member => |m| has_action(m, |x| matches!(x, ServiceAction::LeftChatMember(_)));

    /// Filter service messages for new chat titles.
    new_chat_title => |m| has_action(m, |x| matches!(x, ServiceAction::NewChatTitle(_)));

    /// Filter service messages for new chat photos.
    new_chat_photo => |m| has_action(m, |x| matches!(x, ServiceAction::NewChatPhoto));

    /// Filter service messages for deleted photos.
    delete_chat_photo => |m| has_action(m, |x| matches!(x, ServiceAction::DeleteChatPhoto));

    /// Filter service messages for group chat creations.
    group_chat_created => |m| has_action(m, |x| matches!(x, ServiceAction::GroupChatCreated));

    /// Filter service messages for supergroup chat creations.
    supergroup_chat_created => |m| {
        has_action(m, |x| matches!(x, ServiceAction::SupergroupChatCreated))
    };

    /// Filter service messages for channel chat creations.
    channel_chat_created => |m| {
        has_action(m, |x| matches!(x, ServiceAction::ChannelChatCreated))
    };

    /// Filter service messages of groups migrated to a supergroup.
    migrate_to_chat_id => |m| {
        has_action(m, |x| matches!(x, ServiceAction::MigrateToChatId(id) if *id != 0))
    };

    /// Filter service messages of supergroups migrated from a group.
    migrate_from_chat_id => |m| {
        has_action(m, |x| matches!(x, ServiceAction::MigrateFromChatId(id) if *id != 0))
    };

    /// Filter service messages for pinned messages.
    pinned_message => |m| has_action(m, |x| matches!(x, ServiceAction::PinnedMessage(_)));

    /// Filter service messages for game high scores.
    game_high_score => |m| has_action(m, |x| matches!(x, ServiceAction::GameHighScore(_)));

    /// Filter messages containing reply keyboard markups.
    reply_keyboard => |m| matches!(m.reply_markup, Some(ReplyMarkup::ReplyKeyboard(_)));

    /// Filter messages containing inline keyboard markups.
    inline_keyboard => |m| matches!(m.reply_markup, Some(ReplyMarkup::InlineKeyboard(_)));

    /// Filter messages containing mentions.
    mentioned => |m| m.mentioned;

    /// Filter messages sent via inline bots.
    via_bot => |m| m.via_bot.is_some();

    /// Filter messages for started video chats.
    video_chat_started => |m| has_action(m, |x| matches!(x, ServiceAction::VideoChatStarted));

    /// Filter messages for ended video chats.
    video_chat_ended => |m| has_action(m, |x| matches!(x, ServiceAction::VideoChatEnded));

    /// Filter messages for video chat invited members.
    video_chat_members_invited => |m| {
        has_action(m, |x| matches!(x, ServiceAction::VideoChatMembersInvited(_)))
    };

    /// Filter service messages.
    ///
    /// A service message carries any [`ServiceAction`]: members joining or leaving, new chat
    /// titles, new or deleted chat photos, group, supergroup or channel creations, migrations,
    /// pinned messages, game scores and video chats starting, ending or inviting members.
    service => |m| m.is_service();

    /// Filter media messages.
    ///
    /// A media message contains any of the following: audio, document, photo, sticker, video,
    /// animation, voice, video note, contact, location, venue or poll.
    media => |m| has_media(m, Media::is_media_kind);

    /// Filter messages that have been scheduled (not yet sent).
    scheduled => |m| m.scheduled;

    /// Filter new automatically sent messages that were previously scheduled.
    from_scheduled => |m| m.from_scheduled;

    /// Filter messages that are automatically forwarded from the linked channel to the group chat.
    linked_channel => |m| m.forward_from_chat.is_some() && m.from_user.is_none();
}

/// Resolve the chat type of message-shaped or callback-query-shaped updates.
fn chat_type(filter: &'static str, update: &Update) -> Result<Option<ChatType>> {
    let message = match update {
        Update::NewMessage(message) | Update::MessageEdited(message) => Some(message),
        Update::CallbackQuery(query) => query.message.as_ref(),
        _ => {
            return Err(FilterError::UnsupportedUpdate {
                filter,
                update: update.kind(),
            });
        }
    };
    Ok(message.and_then(|m| m.chat.as_ref()).map(|chat| chat.kind))
}

/// Filter messages sent in private chats, including conversations with bots.
///
/// Works with both messages and callback queries. Other updates produce an error.
pub fn private() -> Filter {
    create_with(Some("private"), (), |_, _, update| {
        Ok(matches!(
            chat_type("Private", update)?,
            Some(ChatType::Private | ChatType::Bot)
        ))
    })
}

/// Filter messages sent in group or supergroup chats.
///
/// Works with both messages and callback queries. Other updates produce an error.
pub fn group() -> Filter {
    create_with(Some("group"), (), |_, _, update| {
        Ok(matches!(
            chat_type("Group", update)?,
            Some(ChatType::Group | ChatType::Supergroup)
        ))
    })
}

/// Filter messages sent in broadcast channels.
///
/// Works with both messages and callback queries. Other updates produce an error.
pub fn channel() -> Filter {
    create_with(Some("channel"), (), |_, _, update| {
        Ok(chat_type("Channel", update)? == Some(ChatType::Channel))
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::Account;
    use crate::update::{CallbackQuery, Chat, InlineQuery, MessageDeletion, User};

    fn account() -> Account {
        Account::new(User::new(1).myself())
    }

    async fn check(filter: &Filter, update: impl Into<Update>) -> Result<bool> {
        let ctx = account();
        let mut update = update.into();
        filter.check(&ctx, &mut update).await
    }

    fn with_media(media: Media) -> Message {
        Message {
            media: Some(media),
            ..Message::default()
        }
    }

    fn all_media() -> Vec<Media> {
        vec![
            Media::Audio,
            Media::Document,
            Media::Photo,
            Media::Sticker,
            Media::Video,
            Media::Animation,
            Media::Voice,
            Media::VideoNote,
            Media::Contact {
                phone_number: "+1".into(),
            },
            Media::Location {
                latitude: 1.0,
                longitude: 2.0,
            },
            Media::Venue {
                title: "bar".into(),
            },
            Media::Poll {
                question: "?".into(),
            },
        ]
    }

    #[tokio::test]
    async fn media_matches_every_documented_kind() {
        let filter = media();
        assert!(!check(&filter, Message::default()).await.unwrap());

        for kind in all_media() {
            assert!(check(&filter, with_media(kind.clone())).await.unwrap(), "{kind:?}");
        }

        for kind in [
            Media::Game { title: "g".into() },
            Media::Dice {
                emoji: "🎲".into(),
                value: 3,
            },
            Media::WebPage {
                url: "https://example.com".into(),
            },
        ] {
            assert!(!check(&filter, with_media(kind.clone())).await.unwrap(), "{kind:?}");
        }
    }

    #[tokio::test]
    async fn single_media_filters() {
        let message = with_media(Media::Photo);
        assert!(check(&photo(), message.clone()).await.unwrap());
        assert!(!check(&video(), message.clone()).await.unwrap());
        assert!(!check(&dice(), message).await.unwrap());

        let message = with_media(Media::Dice {
            emoji: "🎯".into(),
            value: 6,
        });
        assert!(check(&dice(), message).await.unwrap());
    }

    #[tokio::test]
    async fn service_and_actions() {
        let message = Message {
            action: Some(ServiceAction::PinnedMessage(7)),
            ..Message::default()
        };
        assert!(check(&service(), message.clone()).await.unwrap());
        assert!(check(&pinned_message(), message.clone()).await.unwrap());
        assert!(!check(&new_chat_title(), message).await.unwrap());
        assert!(!check(&service(), Message::with_text(1, "hi")).await.unwrap());

        let message = Message {
            action: Some(ServiceAction::NewChatMembers(Vec::new())),
            ..Message::default()
        };
        assert!(!check(&new_chat_members(), message).await.unwrap());
    }

    #[tokio::test]
    async fn text_and_caption() {
        assert!(check(&text(), Message::with_text(1, "hi")).await.unwrap());
        assert!(!check(&text(), Message::with_text(1, "")).await.unwrap());
        assert!(!check(&caption(), Message::with_text(1, "hi")).await.unwrap());

        let message = Message {
            caption: Some("nice".into()),
            ..with_media(Media::Photo)
        };
        assert!(check(&caption(), message).await.unwrap());
    }

    #[tokio::test]
    async fn senders() {
        let own = Message {
            from_user: Some(User::new(1).myself()),
            ..Message::default()
        };
        let anonymous_outgoing = Message {
            outgoing: true,
            ..Message::default()
        };
        let from_bot = Message {
            from_user: Some(User::new(2).bot()),
            ..Message::default()
        };

        assert!(check(&me(), own).await.unwrap());
        assert!(check(&me(), anonymous_outgoing.clone()).await.unwrap());
        assert!(!check(&me(), from_bot.clone()).await.unwrap());
        assert!(check(&bot(), from_bot.clone()).await.unwrap());
        assert!(check(&outgoing(), anonymous_outgoing.clone()).await.unwrap());
        assert!(!check(&incoming(), anonymous_outgoing).await.unwrap());
        assert!(check(&incoming(), from_bot).await.unwrap());
    }

    #[tokio::test]
    async fn forwards() {
        let message = Message {
            forward_date: Some(Utc::now()),
            forward_from_chat: Some(Chat::new(-100, ChatType::Channel)),
            ..Message::default()
        };
        assert!(check(&forwarded(), message.clone()).await.unwrap());
        assert!(check(&linked_channel(), message.clone()).await.unwrap());

        let message = Message {
            from_user: Some(User::new(5)),
            ..message
        };
        assert!(!check(&linked_channel(), message).await.unwrap());
    }

    #[tokio::test]
    async fn keyboards() {
        let message = Message {
            reply_markup: Some(ReplyMarkup::InlineKeyboard(vec![vec!["ok".into()]])),
            ..Message::default()
        };
        assert!(check(&inline_keyboard(), message.clone()).await.unwrap());
        assert!(!check(&reply_keyboard(), message).await.unwrap());
    }

    #[tokio::test]
    async fn chat_scopes() {
        let in_chat = |kind| Message {
            chat: Some(Chat::new(10, kind)),
            ..Message::default()
        };

        assert!(check(&private(), in_chat(ChatType::Private)).await.unwrap());
        assert!(check(&private(), in_chat(ChatType::Bot)).await.unwrap());
        assert!(!check(&private(), in_chat(ChatType::Group)).await.unwrap());
        assert!(check(&group(), in_chat(ChatType::Supergroup)).await.unwrap());
        assert!(check(&channel(), in_chat(ChatType::Channel)).await.unwrap());
        assert!(!check(&channel(), Message::default()).await.unwrap());

        let query = CallbackQuery::new(1, User::new(2)).with_message(in_chat(ChatType::Group));
        assert!(check(&group(), query).await.unwrap());
        assert!(!check(&group(), CallbackQuery::new(1, User::new(2))).await.unwrap());

        let error = check(&private(), InlineQuery::new(1, User::new(2), "q"))
            .await
            .unwrap_err();
        assert_eq!(
            error,
            FilterError::UnsupportedUpdate {
                filter: "Private",
                update: "InlineQuery",
            }
        );
    }

    #[tokio::test]
    async fn non_messages_never_match() {
        assert!(!check(&text(), CallbackQuery::new(1, User::new(2))).await.unwrap());
        assert!(!check(&media(), MessageDeletion::default()).await.unwrap());
        assert!(check(&all(), MessageDeletion::default()).await.unwrap());
    }

    #[test]
    fn names() {
        assert_eq!(text().name(), "text");
        assert_eq!(video_chat_members_invited().name(), "video_chat_members_invited");
        assert_eq!(private().name(), "private");
    }
}

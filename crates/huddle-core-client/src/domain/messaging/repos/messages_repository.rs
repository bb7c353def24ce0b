// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;

use crate::domain::shared::models::{ChannelId, MessageId};

use super::super::models::Message;

pub type MessageMutation = Box<dyn FnOnce(&mut Message) + Send>;

/// The result of prepending a history page.
#[derive(Debug, Clone, PartialEq)]
pub struct PrependOutcome {
    /// Ids actually inserted, in display order. Duplicates of already known
    /// messages are left out.
    pub inserted_ids: Vec<MessageId>,
    /// The message that was at the top before the page was inserted. The view
    /// keeps this anchored in place so the scroll position doesn't jump.
    pub anchor: Option<MessageId>,
}

#[async_trait]
pub trait MessagesRepository: Send + Sync {
    /// Appends a message to a channel's timeline. Returns `false` without
    /// modifying anything if the id is already known.
    async fn append(&self, channel: &ChannelId, message: Message) -> bool;

    /// Inserts an older history page, in display order, before the current
    /// head of the timeline.
    async fn prepend_page(&self, channel: &ChannelId, messages: Vec<Message>) -> PrependOutcome;

    async fn get(&self, channel: &ChannelId, id: &MessageId) -> Option<Message>;

    /// Applies `mutation` to the message with the given id. Returns `false`
    /// if the id is unknown.
    async fn update(&self, channel: &ChannelId, id: &MessageId, mutation: MessageMutation)
        -> bool;

    /// Renames a message in place, keeping its position in the timeline.
    /// Should `to` already exist the entry under `from` is dropped in favor of
    /// the existing one.
    async fn rename(&self, channel: &ChannelId, from: &MessageId, to: MessageId) -> bool;

    /// Marks every message up to and including `id` as read and returns the
    /// ids whose flag actually changed.
    async fn mark_read_until(&self, channel: &ChannelId, id: &MessageId) -> Vec<MessageId>;

    async fn ordered(&self, channel: &ChannelId) -> Vec<Message>;

    /// The id of the earliest message in the timeline.
    async fn first_id(&self, channel: &ChannelId) -> Option<MessageId>;

    async fn clear(&self);
}

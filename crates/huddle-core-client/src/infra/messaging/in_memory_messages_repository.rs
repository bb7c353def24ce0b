// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::messaging::models::Message;
use crate::domain::messaging::repos::{MessageMutation, MessagesRepository, PrependOutcome};
use crate::domain::shared::models::{ChannelId, MessageId};

/// Message storage for one channel. Messages live in an arena of slots, with
/// the id lookup and the display order both pointing into it. Renaming a
/// message on ack only rewrites the lookup entry, so ordering and identity
/// survive the id swap untouched.
#[derive(Default)]
struct ChannelStore {
    slots: Vec<Message>,
    index: HashMap<MessageId, usize>,
    order: Vec<usize>,
}

impl ChannelStore {
    fn push(&mut self, message: Message) -> usize {
        let slot = self.slots.len();
        self.index.insert(message.id.clone(), slot);
        self.slots.push(message);
        slot
    }

    fn ordered(&self) -> Vec<Message> {
        self.order
            .iter()
            .map(|&slot| self.slots[slot].clone())
            .collect()
    }
}

#[derive(Default)]
pub struct InMemoryMessagesRepository {
    channels: RwLock<HashMap<ChannelId, ChannelStore>>,
}

impl InMemoryMessagesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagesRepository for InMemoryMessagesRepository {
    async fn append(&self, channel: &ChannelId, message: Message) -> bool {
        let mut channels = self.channels.write();
        let store = channels.entry(channel.clone()).or_default();

        if store.index.contains_key(&message.id) {
            return false;
        }

        let slot = store.push(message);
        store.order.push(slot);
        true
    }

    async fn prepend_page(&self, channel: &ChannelId, messages: Vec<Message>) -> PrependOutcome {
        let mut channels = self.channels.write();
        let store = channels.entry(channel.clone()).or_default();

        let anchor = store
            .order
            .first()
            .map(|&slot| store.slots[slot].id.clone());

        let mut inserted_ids = vec![];
        let mut inserted_slots = vec![];
        for message in messages {
            if store.index.contains_key(&message.id) {
                continue;
            }
            inserted_ids.push(message.id.clone());
            inserted_slots.push(store.push(message));
        }

        inserted_slots.extend(store.order.iter().copied());
        store.order = inserted_slots;

        PrependOutcome {
            inserted_ids,
            anchor,
        }
    }

    async fn get(&self, channel: &ChannelId, id: &MessageId) -> Option<Message> {
        let channels = self.channels.read();
        let store = channels.get(channel)?;
        store.index.get(id).map(|&slot| store.slots[slot].clone())
    }

    async fn update(
        &self,
        channel: &ChannelId,
        id: &MessageId,
        mutation: MessageMutation,
    ) -> bool {
        let mut channels = self.channels.write();
        let Some(store) = channels.get_mut(channel) else {
            return false;
        };
        let Some(&slot) = store.index.get(id) else {
            return false;
        };
        mutation(&mut store.slots[slot]);
        true
    }

    async fn rename(&self, channel: &ChannelId, from: &MessageId, to: MessageId) -> bool {
        let mut channels = self.channels.write();
        let Some(store) = channels.get_mut(channel) else {
            return false;
        };
        let Some(slot) = store.index.remove(from) else {
            return false;
        };

        if store.index.contains_key(&to) {
            // The server's copy arrived before the ack. Drop the placeholder
            // and keep the canonical entry.
            store.order.retain(|&candidate| candidate != slot);
            return true;
        }

        store.slots[slot].id = to.clone();
        store.index.insert(to, slot);
        true
    }

    async fn mark_read_until(&self, channel: &ChannelId, id: &MessageId) -> Vec<MessageId> {
        let mut channels = self.channels.write();
        let Some(store) = channels.get_mut(channel) else {
            return vec![];
        };
        if !store.index.contains_key(id) {
            return vec![];
        }

        let mut changed = vec![];
        for &slot in &store.order {
            let message = &mut store.slots[slot];
            if !message.flags.is_read {
                message.flags.is_read = true;
                changed.push(message.id.clone());
            }
            if &message.id == id {
                break;
            }
        }
        changed
    }

    async fn ordered(&self, channel: &ChannelId) -> Vec<Message> {
        self.channels
            .read()
            .get(channel)
            .map(|store| store.ordered())
            .unwrap_or_default()
    }

    async fn first_id(&self, channel: &ChannelId) -> Option<MessageId> {
        let channels = self.channels.read();
        let store = channels.get(channel)?;
        store
            .order
            .first()
            .map(|&slot| store.slots[slot].id.clone())
    }

    async fn clear(&self) {
        self.channels.write().clear()
    }
}

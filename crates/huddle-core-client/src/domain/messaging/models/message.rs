// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use huddle_wire::payloads::{MessagePayload, ReactionEntry};

use crate::domain::shared::models::{Emoji, MessageId, Participant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub emoji: Emoji,
    pub from: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplySummary {
    pub id: MessageId,
    pub author: Option<String>,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub url: String,
    pub name: String,
}

/// Local delivery state carried next to a message. Pending and failed are only
/// ever set on messages this client submitted itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageFlags {
    pub is_read: bool,
    pub is_edited: bool,
    pub is_pending: bool,
    pub is_failed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub from: Participant,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub reply_to: Option<ReplySummary>,
    pub file: Option<FileInfo>,
    pub reactions: Vec<Reaction>,
    pub flags: MessageFlags,
}

impl Message {
    pub fn from_payload(payload: MessagePayload) -> Self {
        Message {
            id: MessageId::from(payload.id),
            from: Participant {
                id: payload.user.id,
                name: payload.user.username,
            },
            body: payload.content,
            timestamp: payload.timestamp,
            edited_at: payload.edited_at,
            is_deleted: payload.is_deleted,
            reply_to: payload.reply_to.map(|reply| ReplySummary {
                id: MessageId::from(reply.id),
                author: reply.user.map(|user| user.username),
                excerpt: reply.content,
            }),
            file: payload.file.map(|file| FileInfo {
                url: file.url,
                name: file.name,
            }),
            reactions: reactions_from_wire(payload.reactions),
            flags: MessageFlags {
                is_edited: payload.edited_at.is_some(),
                ..Default::default()
            },
        }
    }

    /// Toggles `emoji` for `username`. Adds the reaction if the user hasn't
    /// reacted with it yet, otherwise removes it again.
    pub fn toggle_reaction(&mut self, username: &str, emoji: Emoji) {
        let Some(reaction) = self
            .reactions
            .iter_mut()
            .find(|reaction| reaction.emoji == emoji)
        else {
            self.reactions.push(Reaction {
                emoji,
                from: vec![username.to_string()],
            });
            return;
        };

        if let Some(idx) = reaction.from.iter().position(|from| from == username) {
            reaction.from.remove(idx);
            if reaction.from.is_empty() {
                self.reactions.retain(|reaction| reaction.emoji != emoji);
            }
        } else {
            reaction.from.push(username.to_string());
        }
    }

    pub fn reactions_from<'a, 'b: 'a>(
        &'a self,
        username: &'b str,
    ) -> impl Iterator<Item = &'a Emoji> {
        self.reactions
            .iter()
            .filter(move |reaction| reaction.from.iter().any(|from| from == username))
            .map(|reaction| &reaction.emoji)
    }

    /// Replaces the reaction set with the server's authoritative one.
    pub fn set_reactions(&mut self, reactions: IndexMap<String, ReactionEntry>) {
        self.reactions = reactions_from_wire(reactions);
    }

    pub fn apply_edit(&mut self, content: String, edited_at: Option<DateTime<Utc>>) {
        self.body = content;
        self.edited_at = edited_at;
        self.flags.is_edited = true;
    }

    /// Marks the message as deleted in place. Content and reactions are
    /// cleared but the entry keeps its position so the view can render a
    /// tombstone.
    pub fn tombstone(&mut self) {
        self.is_deleted = true;
        self.body.clear();
        self.file = None;
        self.reactions.clear();
    }
}

fn reactions_from_wire(reactions: IndexMap<String, ReactionEntry>) -> Vec<Reaction> {
    reactions
        .into_iter()
        .map(|(emoji, entry)| Reaction {
            emoji: Emoji::from(emoji),
            from: entry.users,
        })
        .collect()
}

// huddle/huddle-wire
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A user as referenced by the server in message and presence payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub id: Option<u64>,
    pub username: String,
}

/// Per-emoji reaction summary, keyed by emoji in the enclosing map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionEntry {
    pub count: u32,
    #[serde(default)]
    pub users: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyRef {
    pub id: String,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    pub url: String,
    pub name: String,
}

/// The serialized message the server broadcasts for chat, reply, file, edit
/// and delete events alike. Deletes arrive as the full message with
/// `is_deleted` set and the content cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub id: String,
    pub user: UserRef,
    #[serde(default)]
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub reactions: IndexMap<String, ReactionEntry>,
    #[serde(default)]
    pub reply_to: Option<ReplyRef>,
    #[serde(default)]
    pub file: Option<FileRef>,
    /// Echoed back for messages this client originated, so the local
    /// placeholder can be correlated without waiting for a separate ack.
    #[serde(default)]
    pub client_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionUpdatePayload {
    pub message_id: String,
    #[serde(default)]
    pub reactions: IndexMap<String, ReactionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadStatusPayload {
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub last_visible_message_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnlineUsersPayload {
    #[serde(default)]
    pub users: Vec<UserRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerErrorPayload {
    pub message: String,
    #[serde(default)]
    pub client_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OlderMessagesPayload {
    #[serde(default)]
    pub messages: Vec<MessagePayload>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAckPayload {
    pub client_id: String,
    pub server_id: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Status change broadcast on the task feed, and the direct confirmation the
/// server sends back to the initiating client (`success` is only present on
/// the confirmation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdatePayload {
    pub task_id: u64,
    pub status: String,
    #[serde(default)]
    pub status_display: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Which lifecycle event a `task_*` envelope describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerTaskChange {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskChangedPayload {
    pub task_id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPayload {
    pub id: u64,
    pub author: CommentAuthor,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use huddle_wire::payloads::{CommentPayload, ServerTaskChange};
use huddle_wire::ConnectionError;

use crate::domain::shared::models::{ChannelId, MessageId, Severity, StatusKey, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Connect,
    Disconnect {
        error: Option<ConnectionError>,
        /// Whether the socket closed through a deliberate teardown. Abnormal
        /// closures are followed by automatic reconnects.
        clean: bool,
    },
}

/// Events the client emits towards the embedding application. Message events
/// carry ids rather than full entities so the view layer fetches exactly what
/// it re-renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// The socket state of a channel changed.
    ConnectionStatusChanged {
        channel: ChannelId,
        event: ConnectionEvent,
    },

    /// New messages appeared at the bottom of a channel's timeline.
    MessagesAppended {
        channel: ChannelId,
        message_ids: Vec<MessageId>,
    },

    /// Already rendered messages changed, e.g. edits, deletions, reactions or
    /// delivery state.
    MessagesUpdated {
        channel: ChannelId,
        message_ids: Vec<MessageId>,
    },

    /// A history page was inserted at the top of the timeline. `anchor` is
    /// the message that must keep its on-screen position.
    MessagesPrepended {
        channel: ChannelId,
        message_ids: Vec<MessageId>,
        anchor: Option<MessageId>,
    },

    /// A channel's online roster was replaced.
    PresenceChanged { channel: ChannelId },

    /// Board columns changed. Carries the affected columns so views can
    /// re-render selectively.
    BoardChanged { statuses: Vec<StatusKey> },

    /// A task was created, updated or deleted elsewhere. The local task list
    /// should be refreshed.
    TaskListChanged {
        change: ServerTaskChange,
        task_id: TaskId,
    },

    /// A comment arrived on a task's comment feed.
    CommentPosted {
        channel: ChannelId,
        comment: CommentPayload,
    },

    /// A user-facing notice, e.g. a server rejection or a lost connection.
    Notice {
        severity: Severity,
        message: String,
    },
}

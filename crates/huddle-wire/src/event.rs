// huddle/huddle-wire
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::envelope::{CodecError, Envelope};
use crate::payloads::{
    MessageAckPayload, MessagePayload, OlderMessagesPayload, OnlineUsersPayload,
    ReactionUpdatePayload, ReadStatusPayload, ServerErrorPayload, ServerTaskChange,
    StatusUpdatePayload, TaskChangedPayload,
};

/// A decoded inbound envelope. `Unknown` carries the raw type string so the
/// dispatcher can log and drop it without treating it as fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    Message(MessagePayload),
    Reply(MessagePayload),
    FileMessage(MessagePayload),
    Edited(MessagePayload),
    Deleted(MessagePayload),
    ReactionUpdate(ReactionUpdatePayload),
    ReadStatus(ReadStatusPayload),
    OnlineUsers(OnlineUsersPayload),
    ServerError(ServerErrorPayload),
    OlderMessages(OlderMessagesPayload),
    MessageAck(MessageAckPayload),
    StatusUpdate(StatusUpdatePayload),
    TaskChanged {
        change: ServerTaskChange,
        payload: TaskChangedPayload,
    },
    CommentPosted(crate::payloads::CommentPayload),
    Unknown {
        event_type: String,
    },
}

impl ServerEvent {
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, CodecError> {
        let event = match envelope.event_type.as_str() {
            "chat_message" => Self::Message(envelope.decode_payload()?),
            "reply_message" => Self::Reply(envelope.decode_payload()?),
            "file_message" => Self::FileMessage(envelope.decode_payload()?),
            "edit_message" => Self::Edited(envelope.decode_payload()?),
            "delete_message" => Self::Deleted(envelope.decode_payload()?),
            "reaction_update" => Self::ReactionUpdate(envelope.decode_payload()?),
            "read_status_update" => Self::ReadStatus(envelope.decode_payload()?),
            "online_users" => Self::OnlineUsers(envelope.decode_payload()?),
            "error_message" => Self::ServerError(envelope.decode_payload()?),
            "older_messages" => Self::OlderMessages(envelope.decode_payload()?),
            "message_ack" => Self::MessageAck(envelope.decode_payload()?),
            "status_update" | "status_update_confirmation" => {
                Self::StatusUpdate(envelope.decode_payload()?)
            }
            "task_created" => Self::TaskChanged {
                change: ServerTaskChange::Created,
                payload: envelope.decode_payload()?,
            },
            "task_updated" => Self::TaskChanged {
                change: ServerTaskChange::Updated,
                payload: envelope.decode_payload()?,
            },
            "task_deleted" => Self::TaskChanged {
                change: ServerTaskChange::Deleted,
                payload: envelope.decode_payload()?,
            },
            "new_comment" => Self::CommentPosted(envelope.decode_payload()?),
            _ => Self::Unknown {
                event_type: envelope.event_type.clone(),
            },
        };
        Ok(event)
    }
}

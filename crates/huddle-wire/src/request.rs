// huddle/huddle-wire
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde_json::json;

use crate::envelope::Envelope;

/// An outbound mutation or query. Mutating variants carry the correlation id
/// the tracker generated for them; the server echoes it in acks and error
/// envelopes.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientRequest {
    ChatMessage {
        message: String,
        client_id: String,
    },
    ReplyMessage {
        message: String,
        reply_to_id: String,
        client_id: String,
    },
    SendFile {
        filename: String,
        /// Base64-encoded file contents.
        file_data: String,
        content: String,
        reply_to_id: Option<String>,
        client_id: String,
    },
    EditMessage {
        message_id: String,
        content: String,
        client_id: String,
    },
    DeleteMessage {
        message_id: String,
        client_id: String,
    },
    AddReaction {
        message_id: String,
        emoji: String,
        client_id: String,
    },
    MarkRead {
        last_visible_message_id: Option<String>,
    },
    LoadOlderMessages {
        before_message_id: Option<String>,
    },
    UpdateStatus {
        task_id: u64,
        status: String,
        client_id: String,
    },
}

impl ClientRequest {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ChatMessage { .. } => "chat_message",
            Self::ReplyMessage { .. } => "reply_message",
            Self::SendFile { .. } => "send_file",
            Self::EditMessage { .. } => "edit_message",
            Self::DeleteMessage { .. } => "delete_message",
            Self::AddReaction { .. } => "add_reaction",
            Self::MarkRead { .. } => "mark_read",
            Self::LoadOlderMessages { .. } => "load_older_messages",
            Self::UpdateStatus { .. } => "update_status",
        }
    }

    pub fn client_id(&self) -> Option<&str> {
        match self {
            Self::ChatMessage { client_id, .. }
            | Self::ReplyMessage { client_id, .. }
            | Self::SendFile { client_id, .. }
            | Self::EditMessage { client_id, .. }
            | Self::DeleteMessage { client_id, .. }
            | Self::AddReaction { client_id, .. }
            | Self::UpdateStatus { client_id, .. } => Some(client_id),
            Self::MarkRead { .. } | Self::LoadOlderMessages { .. } => None,
        }
    }

    pub fn into_envelope(self) -> Envelope {
        let event_type = self.event_type();
        let payload = match self {
            Self::ChatMessage { message, client_id } => json!({
                "message": message,
                "client_id": client_id,
            }),
            Self::ReplyMessage {
                message,
                reply_to_id,
                client_id,
            } => json!({
                "message": message,
                "reply_to_id": reply_to_id,
                "client_id": client_id,
            }),
            Self::SendFile {
                filename,
                file_data,
                content,
                reply_to_id,
                client_id,
            } => json!({
                "filename": filename,
                "file_data": file_data,
                "content": content,
                "reply_to_id": reply_to_id,
                "client_id": client_id,
            }),
            Self::EditMessage {
                message_id,
                content,
                client_id,
            } => json!({
                "message_id": message_id,
                "content": content,
                "client_id": client_id,
            }),
            Self::DeleteMessage {
                message_id,
                client_id,
            } => json!({
                "message_id": message_id,
                "client_id": client_id,
            }),
            Self::AddReaction {
                message_id,
                emoji,
                client_id,
            } => json!({
                "message_id": message_id,
                "emoji": emoji,
                "client_id": client_id,
            }),
            Self::MarkRead {
                last_visible_message_id,
            } => json!({
                "last_visible_message_id": last_visible_message_id,
            }),
            Self::LoadOlderMessages { before_message_id } => json!({
                "before_message_id": before_message_id,
            }),
            Self::UpdateStatus {
                task_id,
                status,
                client_id,
            } => json!({
                "task_id": task_id,
                "status": status,
                "client_id": client_id,
            }),
        };
        Envelope::new(event_type, payload)
    }
}

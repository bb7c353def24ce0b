// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as Base64;
use base64::Engine;
use tracing::info;

use huddle_wire::{ClientRequest, TimeProvider};

use crate::app::deps::{
    DynAppContext, DynClientEventDispatcher, DynMessagesRepository, DynTimeProvider,
};
use crate::app::services::{ConnectionService, SubmitError};
use crate::domain::messaging::models::{Message, MessageFlags, MutationKind};
use crate::domain::messaging::{HistoryPaginator, MutationTracker, PaginationCursor};
use crate::domain::shared::models::{ChannelId, Emoji, MessageId, Severity};
use crate::ClientEvent;

/// The message surface of the client: optimistic sends, edits, deletions,
/// reactions, read receipts and backwards pagination.
pub struct ChatService {
    ctx: DynAppContext,
    connection: Arc<ConnectionService>,
    messages_repo: DynMessagesRepository,
    mutation_tracker: Arc<MutationTracker>,
    history_paginator: Arc<HistoryPaginator>,
    time_provider: DynTimeProvider,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl ChatService {
    pub fn new(
        ctx: DynAppContext,
        connection: Arc<ConnectionService>,
        messages_repo: DynMessagesRepository,
        mutation_tracker: Arc<MutationTracker>,
        history_paginator: Arc<HistoryPaginator>,
        time_provider: DynTimeProvider,
        client_event_dispatcher: DynClientEventDispatcher,
    ) -> Self {
        Self {
            ctx,
            connection,
            messages_repo,
            mutation_tracker,
            history_paginator,
            time_provider,
            client_event_dispatcher,
        }
    }

    /// Sends a message, inserting a pending placeholder into the timeline
    /// right away. Returns the placeholder's id, which the ack later replaces
    /// with the canonical server id.
    pub async fn send_message(
        &self,
        channel: &ChannelId,
        body: impl Into<String>,
    ) -> Result<MessageId, SubmitError> {
        self.submit_message(channel, body.into(), None, None).await
    }

    pub async fn send_reply(
        &self,
        channel: &ChannelId,
        body: impl Into<String>,
        reply_to: &MessageId,
    ) -> Result<MessageId, SubmitError> {
        self.submit_message(channel, body.into(), Some(reply_to.clone()), None)
            .await
    }

    pub async fn send_file(
        &self,
        channel: &ChannelId,
        filename: &str,
        data: &[u8],
        caption: impl Into<String>,
        reply_to: Option<&MessageId>,
    ) -> Result<MessageId, SubmitError> {
        self.submit_message(
            channel,
            caption.into(),
            reply_to.cloned(),
            Some((filename.to_string(), Base64.encode(data))),
        )
        .await
    }

    pub async fn edit_message(
        &self,
        channel: &ChannelId,
        id: &MessageId,
        content: impl Into<String>,
    ) -> Result<(), SubmitError> {
        let content = content.into().trim().to_string();
        if content.is_empty() {
            return Err(SubmitError::EmptyContent);
        }

        let client_id = self.mutation_tracker.begin(
            MutationKind::Edit,
            id.as_ref(),
            format!("edit:{channel}:{id}:{content}"),
        )?;

        self.submit_request(
            channel,
            &client_id,
            ClientRequest::EditMessage {
                message_id: id.to_string(),
                content,
                client_id: client_id.clone(),
            },
        )
    }

    pub async fn delete_message(
        &self,
        channel: &ChannelId,
        id: &MessageId,
    ) -> Result<(), SubmitError> {
        let client_id = self.mutation_tracker.begin(
            MutationKind::Delete,
            id.as_ref(),
            format!("delete:{channel}:{id}"),
        )?;

        self.submit_request(
            channel,
            &client_id,
            ClientRequest::DeleteMessage {
                message_id: id.to_string(),
                client_id: client_id.clone(),
            },
        )
    }

    /// Requests a reaction toggle. The server's `reaction_update` broadcast
    /// is authoritative, so nothing is applied locally here.
    pub async fn toggle_reaction(
        &self,
        channel: &ChannelId,
        id: &MessageId,
        emoji: Emoji,
    ) -> Result<(), SubmitError> {
        let client_id = self.mutation_tracker.begin(
            MutationKind::Reaction,
            id.as_ref(),
            format!("reaction:{channel}:{id}:{emoji}"),
        )?;

        self.submit_request(
            channel,
            &client_id,
            ClientRequest::AddReaction {
                message_id: id.to_string(),
                emoji: emoji.to_string(),
                client_id: client_id.clone(),
            },
        )
    }

    /// Reports the last message visible on screen. Fire and forget, the
    /// server's `read_status_update` broadcast applies the result.
    pub fn mark_read(
        &self,
        channel: &ChannelId,
        last_visible: Option<&MessageId>,
    ) -> Result<(), SubmitError> {
        self.connection.send(
            channel,
            ClientRequest::MarkRead {
                last_visible_message_id: last_visible.map(|id| id.to_string()),
            },
        )?;
        Ok(())
    }

    /// Requests the next older history page. Returns `false` without sending
    /// anything while a page is in flight or the history is exhausted.
    pub async fn load_older_messages(&self, channel: &ChannelId) -> Result<bool, SubmitError> {
        let fallback = self.messages_repo.first_id(channel).await;
        let Some(before_id) = self.history_paginator.begin_load(channel, fallback) else {
            return Ok(false);
        };

        info!(%channel, ?before_id, "Loading older messages…");

        if let Err(error) = self.connection.send(
            channel,
            ClientRequest::LoadOlderMessages {
                before_message_id: before_id.map(|id| id.to_string()),
            },
        ) {
            self.history_paginator.abort_load(channel);
            return Err(error.into());
        }
        Ok(true)
    }

    /// The channel's timeline in display order.
    pub async fn messages(&self, channel: &ChannelId) -> Vec<Message> {
        self.messages_repo.ordered(channel).await
    }

    pub async fn message(&self, channel: &ChannelId, id: &MessageId) -> Option<Message> {
        self.messages_repo.get(channel, id).await
    }

    pub fn pagination(&self, channel: &ChannelId) -> PaginationCursor {
        self.history_paginator.cursor(channel)
    }

    async fn submit_message(
        &self,
        channel: &ChannelId,
        body: String,
        reply_to: Option<MessageId>,
        file: Option<(String, String)>,
    ) -> Result<MessageId, SubmitError> {
        let body = body.trim().to_string();
        if body.is_empty() && file.is_none() {
            return Err(SubmitError::EmptyContent);
        }

        let fingerprint = match &file {
            Some((filename, _)) => format!("file:{channel}:{filename}:{body}"),
            None => format!("send:{channel}:{body}"),
        };
        let client_id = self
            .mutation_tracker
            .begin(MutationKind::Send, channel.as_ref(), fingerprint)?;
        let message_id = MessageId::from(client_id.clone());

        // The placeholder is attributed to the current user and rendered
        // immediately. The ack later renames it to the server id.
        let placeholder = Message {
            id: message_id.clone(),
            from: self.ctx.current_user(),
            body: body.clone(),
            timestamp: self.time_provider.now(),
            edited_at: None,
            is_deleted: false,
            reply_to: None,
            file: None,
            reactions: vec![],
            flags: MessageFlags {
                is_pending: true,
                ..Default::default()
            },
        };
        self.messages_repo.append(channel, placeholder).await;
        self.client_event_dispatcher
            .dispatch_event(ClientEvent::MessagesAppended {
                channel: channel.clone(),
                message_ids: vec![message_id.clone()],
            });

        let request = match (file, reply_to) {
            (Some((filename, file_data)), reply_to) => ClientRequest::SendFile {
                filename,
                file_data,
                content: body,
                reply_to_id: reply_to.map(|id| id.to_string()),
                client_id: client_id.clone(),
            },
            (None, Some(reply_to)) => ClientRequest::ReplyMessage {
                message: body,
                reply_to_id: reply_to.to_string(),
                client_id: client_id.clone(),
            },
            (None, None) => ClientRequest::ChatMessage {
                message: body,
                client_id: client_id.clone(),
            },
        };

        if let Err(error) = self.connection.send(channel, request) {
            _ = self.mutation_tracker.fail(&client_id);
            self.messages_repo
                .update(
                    channel,
                    &message_id,
                    Box::new(|message| {
                        message.flags.is_pending = false;
                        message.flags.is_failed = true;
                    }),
                )
                .await;
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::MessagesUpdated {
                    channel: channel.clone(),
                    message_ids: vec![message_id],
                });
            self.client_event_dispatcher.dispatch_event(ClientEvent::Notice {
                severity: Severity::Warning,
                message: "Not connected. Your message was not sent.".to_string(),
            });
            return Err(error.into());
        }

        Ok(message_id)
    }

    /// Sends a request that has no optimistic placeholder. On a dead socket
    /// the tracked mutation is discarded again so a retry isn't mistaken for
    /// a duplicate.
    fn submit_request(
        &self,
        channel: &ChannelId,
        client_id: &str,
        request: ClientRequest,
    ) -> Result<(), SubmitError> {
        if let Err(error) = self.connection.send(channel, request) {
            self.mutation_tracker.abort(client_id);
            return Err(error.into());
        }
        Ok(())
    }
}

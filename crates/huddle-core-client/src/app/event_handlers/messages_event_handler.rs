// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use huddle_wire::payloads::{
    MessageAckPayload, MessagePayload, OlderMessagesPayload, ReactionUpdatePayload,
    ReadStatusPayload, ServerErrorPayload,
};
use huddle_wire::{ServerEvent, TimeProvider};

use crate::app::deps::{DynClientEventDispatcher, DynMessagesRepository, DynTimeProvider};
use crate::app::event_handlers::{ChannelEvent, ChannelEventKind, ServerEventHandler};
use crate::domain::messaging::models::{Message, MutationKind, MutationState};
use crate::domain::messaging::{HistoryPaginator, MutationTracker};
use crate::domain::shared::models::{ChannelId, MessageId, Severity};
use crate::ClientEvent;

/// Applies message events to the local timeline: inserts broadcasts,
/// correlates acks with pending sends, pages history in and expires mutations
/// the server never answered.
pub struct MessagesEventHandler {
    messages_repo: DynMessagesRepository,
    mutation_tracker: Arc<MutationTracker>,
    history_paginator: Arc<HistoryPaginator>,
    time_provider: DynTimeProvider,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl MessagesEventHandler {
    pub fn new(
        messages_repo: DynMessagesRepository,
        mutation_tracker: Arc<MutationTracker>,
        history_paginator: Arc<HistoryPaginator>,
        time_provider: DynTimeProvider,
        client_event_dispatcher: DynClientEventDispatcher,
    ) -> Self {
        Self {
            messages_repo,
            mutation_tracker,
            history_paginator,
            time_provider,
            client_event_dispatcher,
        }
    }
}

#[async_trait]
impl ServerEventHandler for MessagesEventHandler {
    fn name(&self) -> &'static str {
        "messages"
    }

    async fn handle_event(&self, event: ChannelEvent) -> Result<Option<ChannelEvent>> {
        let channel = event.channel;

        match event.kind {
            ChannelEventKind::Event(ServerEvent::Message(payload))
            | ChannelEventKind::Event(ServerEvent::Reply(payload))
            | ChannelEventKind::Event(ServerEvent::FileMessage(payload)) => {
                self.handle_incoming_message(&channel, payload).await;
            }
            ChannelEventKind::Event(ServerEvent::Edited(payload)) => {
                self.handle_edit(&channel, payload).await;
            }
            ChannelEventKind::Event(ServerEvent::Deleted(payload)) => {
                self.handle_delete(&channel, payload).await;
            }
            ChannelEventKind::Event(ServerEvent::ReactionUpdate(payload)) => {
                self.handle_reaction_update(&channel, payload).await;
            }
            ChannelEventKind::Event(ServerEvent::ReadStatus(payload)) => {
                self.handle_read_status(&channel, payload).await;
            }
            ChannelEventKind::Event(ServerEvent::MessageAck(payload)) => {
                self.handle_ack(&channel, payload).await;
            }
            ChannelEventKind::Event(ServerEvent::ServerError(payload)) => {
                self.handle_server_error(&channel, payload).await;
            }
            ChannelEventKind::Event(ServerEvent::OlderMessages(payload)) => {
                self.handle_older_messages(&channel, payload).await;
            }
            ChannelEventKind::Tick => {
                self.expire_pending_mutations().await;
                // Other handlers may want the clock tick too.
                return Ok(Some(ChannelEvent {
                    channel,
                    kind: ChannelEventKind::Tick,
                }));
            }
            kind => return Ok(Some(ChannelEvent { channel, kind })),
        }
        Ok(None)
    }
}

impl MessagesEventHandler {
    async fn handle_incoming_message(&self, channel: &ChannelId, payload: MessagePayload) {
        // Messages this client sent come back with their correlation id, so
        // the placeholder can adopt the canonical copy without waiting for a
        // separate ack.
        if let Some(client_id) = payload.client_id.clone() {
            if self.mutation_tracker.resolve_ack(&client_id).is_some() {
                let server_id = MessageId::from(payload.id.clone());
                self.messages_repo
                    .rename(channel, &MessageId::from(client_id), server_id.clone())
                    .await;
                self.adopt_canonical_copy(channel, &server_id, payload).await;
                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::MessagesUpdated {
                        channel: channel.clone(),
                        message_ids: vec![server_id],
                    });
                return;
            }
        }

        let message = Message::from_payload(payload);
        let message_id = message.id.clone();

        if !self.messages_repo.append(channel, message).await {
            debug!(%message_id, "Ignoring duplicate message");
            return;
        }

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::MessagesAppended {
                channel: channel.clone(),
                message_ids: vec![message_id],
            });
    }

    async fn handle_edit(&self, channel: &ChannelId, payload: MessagePayload) {
        _ = self
            .mutation_tracker
            .resolve_matching(MutationKind::Edit, &payload.id);

        let message_id = MessageId::from(payload.id.clone());
        let content = payload.content;
        let edited_at = payload.edited_at;

        let updated = self
            .messages_repo
            .update(
                channel,
                &message_id,
                Box::new(move |message| message.apply_edit(content, edited_at)),
            )
            .await;

        if !updated {
            debug!(%message_id, "Ignoring edit for unknown message");
            return;
        }

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::MessagesUpdated {
                channel: channel.clone(),
                message_ids: vec![message_id],
            });
    }

    async fn handle_delete(&self, channel: &ChannelId, payload: MessagePayload) {
        _ = self
            .mutation_tracker
            .resolve_matching(MutationKind::Delete, &payload.id);

        let message_id = MessageId::from(payload.id);
        let updated = self
            .messages_repo
            .update(channel, &message_id, Box::new(|message| message.tombstone()))
            .await;

        if !updated {
            debug!(%message_id, "Ignoring delete for unknown message");
            return;
        }

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::MessagesUpdated {
                channel: channel.clone(),
                message_ids: vec![message_id],
            });
    }

    async fn handle_reaction_update(&self, channel: &ChannelId, payload: ReactionUpdatePayload) {
        _ = self
            .mutation_tracker
            .resolve_matching(MutationKind::Reaction, &payload.message_id);

        let message_id = MessageId::from(payload.message_id);
        let reactions = payload.reactions;

        let updated = self
            .messages_repo
            .update(
                channel,
                &message_id,
                Box::new(move |message| message.set_reactions(reactions)),
            )
            .await;

        if !updated {
            debug!(%message_id, "Ignoring reaction update for unknown message");
            return;
        }

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::MessagesUpdated {
                channel: channel.clone(),
                message_ids: vec![message_id],
            });
    }

    async fn handle_read_status(&self, channel: &ChannelId, payload: ReadStatusPayload) {
        let Some(last_visible) = payload.last_visible_message_id else {
            return;
        };

        let changed = self
            .messages_repo
            .mark_read_until(channel, &MessageId::from(last_visible))
            .await;

        if changed.is_empty() {
            return;
        }

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::MessagesUpdated {
                channel: channel.clone(),
                message_ids: changed,
            });
    }

    async fn handle_ack(&self, channel: &ChannelId, payload: MessageAckPayload) {
        // Acks resolve at most once. A duplicate or late ack finds no pending
        // mutation and falls through here.
        if self.mutation_tracker.resolve_ack(&payload.client_id).is_none() {
            debug!(client_id = %payload.client_id, "Ignoring ack for unknown mutation");
            return;
        }

        let client_id = MessageId::from(payload.client_id);
        let server_id = MessageId::from(payload.server_id);

        if !self
            .messages_repo
            .rename(channel, &client_id, server_id.clone())
            .await
        {
            // The echoed broadcast already replaced the placeholder.
            return;
        }

        let timestamp = payload.timestamp;
        self.messages_repo
            .update(
                channel,
                &server_id,
                Box::new(move |message| {
                    message.flags.is_pending = false;
                    if let Some(timestamp) = timestamp {
                        message.timestamp = timestamp;
                    }
                }),
            )
            .await;

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::MessagesUpdated {
                channel: channel.clone(),
                message_ids: vec![server_id],
            });
    }

    async fn handle_server_error(&self, channel: &ChannelId, payload: ServerErrorPayload) {
        if let Some(client_id) = &payload.client_id {
            if self.mutation_tracker.fail(client_id).is_some() {
                let message_id = MessageId::from(client_id.clone());
                let updated = self
                    .messages_repo
                    .update(
                        channel,
                        &message_id,
                        Box::new(|message| {
                            message.flags.is_pending = false;
                            message.flags.is_failed = true;
                        }),
                    )
                    .await;

                if updated {
                    self.client_event_dispatcher
                        .dispatch_event(ClientEvent::MessagesUpdated {
                            channel: channel.clone(),
                            message_ids: vec![message_id],
                        });
                }
            }
        }

        self.client_event_dispatcher.dispatch_event(ClientEvent::Notice {
            severity: Severity::Error,
            message: payload.message,
        });
    }

    async fn handle_older_messages(&self, channel: &ChannelId, payload: OlderMessagesPayload) {
        if payload.messages.is_empty() {
            self.history_paginator
                .apply_page(channel, None, payload.has_more);
            return;
        }

        // The server pages backwards, so messages arrive newest first. The
        // page's earliest id is the last entry and the timeline prepend wants
        // chronological order.
        let earliest_id = payload
            .messages
            .last()
            .map(|message| MessageId::from(message.id.clone()));

        let messages = payload
            .messages
            .into_iter()
            .rev()
            .map(Message::from_payload)
            .collect::<Vec<_>>();

        let outcome = self.messages_repo.prepend_page(channel, messages).await;
        self.history_paginator
            .apply_page(channel, earliest_id, payload.has_more);

        if outcome.inserted_ids.is_empty() {
            return;
        }

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::MessagesPrepended {
                channel: channel.clone(),
                message_ids: outcome.inserted_ids,
                anchor: outcome.anchor,
            });
    }

    async fn expire_pending_mutations(&self) {
        let expired = self.mutation_tracker.fail_expired(
            self.time_provider.now(),
            &[
                MutationKind::Send,
                MutationKind::Edit,
                MutationKind::Delete,
                MutationKind::Reaction,
            ],
        );
        if expired.is_empty() {
            return;
        }

        let mut failed = HashMap::<ChannelId, Vec<MessageId>>::new();
        for mutation in expired {
            warn!(
                client_id = %mutation.client_id,
                "No response from server, marking mutation as failed"
            );
            debug_assert_eq!(mutation.state, MutationState::Failed);

            if mutation.kind != MutationKind::Send {
                continue;
            }
            // A send targets its channel, which need not be the channel whose
            // session produced the tick.
            let channel = ChannelId::from(mutation.target);
            let message_id = MessageId::from(mutation.client_id);
            let updated = self
                .messages_repo
                .update(
                    &channel,
                    &message_id,
                    Box::new(|message| {
                        message.flags.is_pending = false;
                        message.flags.is_failed = true;
                    }),
                )
                .await;
            if updated {
                failed.entry(channel).or_default().push(message_id);
            }
        }

        for (channel, message_ids) in failed {
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::MessagesUpdated {
                    channel,
                    message_ids,
                });
        }
        self.client_event_dispatcher.dispatch_event(ClientEvent::Notice {
            severity: Severity::Warning,
            message: "The server did not confirm your last change.".to_string(),
        });
    }

    /// Overwrites a renamed placeholder with the server's canonical fields.
    async fn adopt_canonical_copy(
        &self,
        channel: &ChannelId,
        id: &MessageId,
        payload: MessagePayload,
    ) {
        let canonical = Message::from_payload(payload);
        self.messages_repo
            .update(
                channel,
                id,
                Box::new(move |message| {
                    let id = message.id.clone();
                    let flags = message.flags;
                    *message = canonical;
                    message.id = id;
                    message.flags = flags;
                    message.flags.is_pending = false;
                    message.flags.is_failed = false;
                }),
            )
            .await;
    }
}

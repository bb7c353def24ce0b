// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use huddle_wire::payloads::StatusUpdatePayload;
use huddle_wire::{ServerEvent, TimeProvider};

use crate::app::deps::{DynClientEventDispatcher, DynTimeProvider};
use crate::app::event_handlers::{ChannelEvent, ChannelEventKind, ServerEventHandler};
use crate::app::services::BoardService;
use crate::domain::messaging::models::MutationKind;
use crate::domain::messaging::MutationTracker;
use crate::domain::shared::models::{StatusKey, TaskId};
use crate::ClientEvent;

/// Applies task feed events to the board: status confirmations and rejections
/// for this client's own moves, broadcasts from other clients, task lifecycle
/// changes, new comments and moves the server never answered.
pub struct TasksEventHandler {
    board_service: Arc<BoardService>,
    mutation_tracker: Arc<MutationTracker>,
    time_provider: DynTimeProvider,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl TasksEventHandler {
    pub fn new(
        board_service: Arc<BoardService>,
        mutation_tracker: Arc<MutationTracker>,
        time_provider: DynTimeProvider,
        client_event_dispatcher: DynClientEventDispatcher,
    ) -> Self {
        Self {
            board_service,
            mutation_tracker,
            time_provider,
            client_event_dispatcher,
        }
    }

    fn handle_status_update(&self, payload: StatusUpdatePayload) {
        let task = TaskId::from(payload.task_id);
        let status = StatusKey::from(payload.status);

        match payload.success {
            // Direct confirmation for a move this client initiated. The
            // carried status is canonical and may differ from the requested
            // one.
            Some(true) => self.board_service.confirm_move(task, &status),
            Some(false) => {
                let message = payload
                    .message
                    .unwrap_or_else(|| "The status change was rejected.".to_string());
                self.board_service.fail_move(task, message);
            }
            // Broadcast about a change some other client made.
            None => self.board_service.apply_remote_status(task, &status),
        }
    }

    /// Rolls back moves the server never answered. The tracker entry is gone
    /// at this point, `fail_move` undoes the board and frees the task for
    /// later broadcasts.
    fn expire_pending_moves(&self) {
        for mutation in self
            .mutation_tracker
            .fail_expired(self.time_provider.now(), &[MutationKind::StatusChange])
        {
            let Ok(task_id) = mutation.target.parse::<u64>() else {
                continue;
            };
            self.board_service.fail_move(
                TaskId::from(task_id),
                "The server did not confirm the move.".to_string(),
            );
        }
    }
}

#[async_trait]
impl ServerEventHandler for TasksEventHandler {
    fn name(&self) -> &'static str {
        "tasks"
    }

    async fn handle_event(&self, event: ChannelEvent) -> Result<Option<ChannelEvent>> {
        match event.kind {
            ChannelEventKind::Event(ServerEvent::StatusUpdate(payload)) => {
                self.handle_status_update(payload);
                Ok(None)
            }
            ChannelEventKind::Event(ServerEvent::TaskChanged { change, payload }) => {
                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::TaskListChanged {
                        change,
                        task_id: TaskId::from(payload.task_id),
                    });
                Ok(None)
            }
            ChannelEventKind::Event(ServerEvent::CommentPosted(payload)) => {
                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::CommentPosted {
                        channel: event.channel,
                        comment: payload,
                    });
                Ok(None)
            }
            ChannelEventKind::Tick => {
                self.expire_pending_moves();
                Ok(Some(event))
            }
            _ => Ok(Some(event)),
        }
    }
}

// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::{info, warn};

use huddle_wire::payloads::CommentPayload;
use huddle_wire::ClientRequest;

use crate::app::deps::{DynClientEventDispatcher, DynRequestSender};
use crate::app::services::{ConnectionService, SubmitError};
use crate::domain::board::{Board, MoveContext};
use crate::domain::messaging::models::MutationKind;
use crate::domain::messaging::MutationTracker;
use crate::domain::shared::models::{ChannelId, Severity, StatusKey, TaskId};
use crate::ClientEvent;

/// The board surface of the client. Moves are applied optimistically, pushed
/// to the server over the socket or HTTP, then confirmed or rolled back when
/// the response arrives.
pub struct BoardService {
    board: Arc<Board>,
    connection: Arc<ConnectionService>,
    request_sender: Option<DynRequestSender>,
    mutation_tracker: Arc<MutationTracker>,
    client_event_dispatcher: DynClientEventDispatcher,
    in_flight_moves: Mutex<HashMap<TaskId, MoveContext>>,
}

impl BoardService {
    pub fn new(
        board: Arc<Board>,
        connection: Arc<ConnectionService>,
        request_sender: Option<DynRequestSender>,
        mutation_tracker: Arc<MutationTracker>,
        client_event_dispatcher: DynClientEventDispatcher,
    ) -> Self {
        Self {
            board,
            connection,
            request_sender,
            mutation_tracker,
            client_event_dispatcher,
            in_flight_moves: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces the board contents, e.g. from the initially rendered page.
    pub fn load_board(&self, columns: Vec<(StatusKey, Vec<TaskId>)>) {
        self.board.load(columns);
        self.in_flight_moves.lock().clear();
    }

    pub fn column(&self, status: &StatusKey) -> Vec<TaskId> {
        self.board.column(status)
    }

    pub fn counts(&self) -> IndexMap<StatusKey, usize> {
        self.board.counts()
    }

    pub fn status_of(&self, task: TaskId) -> Option<StatusKey> {
        self.board.status_of(task)
    }

    /// Moves a task via drag and drop. The column change is applied
    /// immediately and undone if the server rejects it or never answers.
    pub async fn move_task(
        &self,
        channel: &ChannelId,
        task: TaskId,
        to: &StatusKey,
        index: usize,
    ) -> Result<(), SubmitError> {
        let client_id = self.mutation_tracker.begin(
            MutationKind::StatusChange,
            task.to_string(),
            format!("status:{task}:{to}"),
        )?;

        let context = match self.board.begin_move(task, to, index) {
            Ok(Some(context)) => context,
            Ok(None) => {
                // Dropped back into its own column, nothing to tell the server.
                self.mutation_tracker.abort(&client_id);
                return Ok(());
            }
            Err(error) => {
                self.mutation_tracker.abort(&client_id);
                return Err(error.into());
            }
        };

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::BoardChanged {
                statuses: vec![context.from.clone(), context.to.clone()],
            });
        self.in_flight_moves.lock().insert(task, context);

        let request = ClientRequest::UpdateStatus {
            task_id: task.into_inner(),
            status: to.to_string(),
            client_id,
        };
        if let Err(error) = self.connection.send(channel, request) {
            self.fail_move(task, "Not connected. The task was not moved.".to_string());
            return Err(error.into());
        }
        Ok(())
    }

    /// Changes a task's status through the HTTP endpoint, e.g. from a detail
    /// view dropdown. Runs through the same optimistic engine as a drag, with
    /// the task appended to the target column.
    pub async fn set_status(&self, task: TaskId, to: &StatusKey) -> Result<(), SubmitError> {
        let Some(request_sender) = &self.request_sender else {
            return Err(SubmitError::MissingRequestSender);
        };

        let client_id = self.mutation_tracker.begin(
            MutationKind::StatusChange,
            task.to_string(),
            format!("status:{task}:{to}"),
        )?;

        let index = self.board.column(to).len();
        let context = match self.board.begin_move(task, to, index) {
            Ok(Some(context)) => context,
            Ok(None) => {
                self.mutation_tracker.abort(&client_id);
                return Ok(());
            }
            Err(error) => {
                self.mutation_tracker.abort(&client_id);
                return Err(error.into());
            }
        };

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::BoardChanged {
                statuses: vec![context.from.clone(), context.to.clone()],
            });
        self.in_flight_moves.lock().insert(task, context);

        match request_sender.update_task_status(task, to).await {
            Ok(response) if response.success => {
                let canonical = response
                    .new_status_key
                    .map(StatusKey::from)
                    .unwrap_or_else(|| to.clone());
                self.confirm_move(task, &canonical);
                Ok(())
            }
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| "The status change was rejected.".to_string());
                self.fail_move(task, message.clone());
                Err(SubmitError::Rejected(message))
            }
            Err(error) => {
                self.fail_move(task, error.to_string());
                Err(error.into())
            }
        }
    }

    /// Posts a comment through the HTTP endpoint. The server broadcasts it on
    /// the task's comment channel afterwards.
    pub async fn post_comment(
        &self,
        task: TaskId,
        text: impl Into<String>,
    ) -> Result<Option<CommentPayload>, SubmitError> {
        let Some(request_sender) = &self.request_sender else {
            return Err(SubmitError::MissingRequestSender);
        };

        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(SubmitError::EmptyContent);
        }

        let response = request_sender.post_comment(task, &text).await?;
        if !response.success {
            return Err(SubmitError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "The comment was rejected.".to_string()),
            ));
        }
        Ok(response.comment)
    }

    /// Confirms an in-flight move, adopting the server's canonical status.
    pub(crate) fn confirm_move(&self, task: TaskId, canonical: &StatusKey) {
        _ = self
            .mutation_tracker
            .resolve_matching(MutationKind::StatusChange, &task.to_string());

        let Some(context) = self.in_flight_moves.lock().remove(&task) else {
            return;
        };

        info!(%task, %canonical, "Move confirmed");

        let changed = self.board.confirm_move(&context, canonical);
        if !changed.is_empty() {
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::BoardChanged { statuses: changed });
        }
    }

    /// Rolls an in-flight move back to its exact prior position.
    pub(crate) fn fail_move(&self, task: TaskId, message: String) {
        _ = self
            .mutation_tracker
            .fail_matching(MutationKind::StatusChange, &task.to_string());

        let Some(context) = self.in_flight_moves.lock().remove(&task) else {
            return;
        };

        warn!(%task, message, "Move rejected, rolling back");

        if self.board.roll_back(&context) {
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::BoardChanged {
                    statuses: vec![context.to, context.from],
                });
        }
        self.client_event_dispatcher.dispatch_event(ClientEvent::Notice {
            severity: Severity::Error,
            message,
        });
    }

    /// Applies a status change initiated by another client.
    pub(crate) fn apply_remote_status(&self, task: TaskId, status: &StatusKey) {
        if self.in_flight_moves.lock().contains_key(&task) {
            // Our own move is still settling, the direct confirmation wins.
            return;
        }
        if let Some(changed) = self.board.apply_remote(task, status) {
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::BoardChanged { statuses: changed });
        }
    }

    /// Rolls back everything still in flight, e.g. on teardown.
    pub(crate) fn clear(&self) {
        self.in_flight_moves.lock().clear();
        self.board.clear();
    }
}

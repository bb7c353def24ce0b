// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use url::Url;

use huddle_wire::ConnectionError;

use crate::app::deps::DynAppContext;
use crate::app::services::{BoardService, ChatService, ConnectionService};
use crate::client_builder::ClientBuilder;
use crate::domain::messaging::{HistoryPaginator, MutationTracker};
use crate::domain::presence::{PresenceAggregator, PresenceSummary};
use crate::domain::shared::models::{ChannelId, Participant, SocketState};
use crate::ClientEvent;

/// Receives the events the client emits. Implemented by the embedding
/// application, typically to drive its view layer.
pub trait ClientDelegate: Send + Sync {
    fn handle_event(&self, event: ClientEvent);
}

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub struct ClientInner {
    pub chat: Arc<ChatService>,
    pub board: Arc<BoardService>,
    pub presence: Arc<PresenceAggregator>,
    pub(crate) ctx: DynAppContext,
    pub(crate) connection: Arc<ConnectionService>,
    pub(crate) mutation_tracker: Arc<MutationTracker>,
    pub(crate) history_paginator: Arc<HistoryPaginator>,
}

impl Deref for Client {
    type Target = ClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<Arc<ClientInner>> for Client {
    fn from(inner: Arc<ClientInner>) -> Self {
        Client { inner }
    }
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Opens the socket for a channel. Reconnection after abnormal closures
    /// is handled automatically from here on.
    pub async fn connect(&self, channel: &ChannelId, url: Url) -> Result<(), ConnectionError> {
        self.connection.connect(channel, url).await
    }

    /// Closes a channel's socket deliberately. No reconnect follows.
    pub fn disconnect(&self, channel: &ChannelId) {
        self.connection.disconnect(channel);
    }

    pub fn connection_state(&self, channel: &ChannelId) -> SocketState {
        self.connection.state(channel)
    }

    pub fn set_current_user(&self, user: Option<Participant>) {
        self.ctx.set_current_user(user);
    }

    pub fn presence_summary(&self, channel: &ChannelId) -> PresenceSummary {
        self.presence
            .summary(channel, self.ctx.config.presence_summary_limit)
    }

    /// Closes all sessions and drops all local state.
    pub async fn teardown(&self) {
        self.connection.disconnect_all();
        self.mutation_tracker.clear();
        self.history_paginator.clear();
        self.presence.clear();
        self.board.clear();
    }
}

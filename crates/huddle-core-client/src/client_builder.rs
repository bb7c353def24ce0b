// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use huddle_wire::{ConnectorProvider, SystemTimeProvider, UUIDProvider};

use crate::app::deps::{AppContext, ClientConfig, DynIDProvider, DynRequestSender, DynTimeProvider};
use crate::app::event_handlers::{
    ClientEventDispatcher, ConnectionEventHandler, MessagesEventHandler, PresenceEventHandler,
    ServerEventHandlerQueue, TasksEventHandler,
};
use crate::app::services::{BoardService, ChatService, ConnectionService};
use crate::client::{Client, ClientInner};
use crate::domain::board::Board;
use crate::domain::connection::Backoff;
use crate::domain::messaging::{HistoryPaginator, MutationTracker};
use crate::domain::presence::PresenceAggregator;
use crate::domain::shared::models::Participant;
use crate::infra::messaging::InMemoryMessagesRepository;
use crate::ClientDelegate;

pub struct ClientBuilder {
    connector_provider: Option<ConnectorProvider>,
    request_sender: Option<DynRequestSender>,
    id_provider: DynIDProvider,
    time_provider: DynTimeProvider,
    config: ClientConfig,
    current_user: Option<Participant>,
    delegate: Option<Box<dyn ClientDelegate>>,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            connector_provider: None,
            request_sender: None,
            id_provider: Arc::new(UUIDProvider::new()),
            time_provider: Arc::new(SystemTimeProvider::default()),
            config: ClientConfig::default(),
            current_user: None,
            delegate: None,
        }
    }

    pub fn set_connector_provider(mut self, connector_provider: ConnectorProvider) -> Self {
        self.connector_provider = Some(connector_provider);
        self
    }

    /// The HTTP seam for board operations. Optional, the corresponding
    /// operations fail with a configuration error when unset.
    pub fn set_request_sender(mut self, request_sender: DynRequestSender) -> Self {
        self.request_sender = Some(request_sender);
        self
    }

    pub fn set_id_provider(mut self, id_provider: DynIDProvider) -> Self {
        self.id_provider = id_provider;
        self
    }

    pub fn set_time_provider(mut self, time_provider: DynTimeProvider) -> Self {
        self.time_provider = time_provider;
        self
    }

    pub fn set_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_current_user(mut self, user: Option<Participant>) -> Self {
        self.current_user = user;
        self
    }

    pub fn set_delegate(mut self, delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        self.delegate = delegate;
        self
    }

    pub fn build(self) -> Client {
        let connector_provider = self
            .connector_provider
            .expect("No connector provider was set on ClientBuilder");

        let ctx = Arc::new(AppContext::new(self.config.clone(), self.current_user));
        let client_event_dispatcher = Arc::new(ClientEventDispatcher::new(self.delegate));

        let messages_repo = Arc::new(InMemoryMessagesRepository::new());
        let mutation_tracker = Arc::new(MutationTracker::new(
            self.id_provider,
            self.time_provider.clone(),
            self.config.ack_timeout,
        ));
        let history_paginator = Arc::new(HistoryPaginator::new());
        let presence_aggregator = Arc::new(PresenceAggregator::new());
        let board = Arc::new(Board::new());

        let handler_queue = Arc::new(ServerEventHandlerQueue::new());
        let connection = Arc::new(ConnectionService::new(
            connector_provider,
            Backoff::new(
                self.config.backoff_base,
                self.config.backoff_cap,
                self.config.backoff_jitter,
            ),
            handler_queue.clone(),
        ));

        let chat = Arc::new(ChatService::new(
            ctx.clone(),
            connection.clone(),
            messages_repo.clone(),
            mutation_tracker.clone(),
            history_paginator.clone(),
            self.time_provider.clone(),
            client_event_dispatcher.clone(),
        ));
        let board_service = Arc::new(BoardService::new(
            board,
            connection.clone(),
            self.request_sender,
            mutation_tracker.clone(),
            client_event_dispatcher.clone(),
        ));

        handler_queue.set_handlers(vec![
            Box::new(ConnectionEventHandler::new(client_event_dispatcher.clone())),
            Box::new(MessagesEventHandler::new(
                messages_repo.clone(),
                mutation_tracker.clone(),
                history_paginator.clone(),
                self.time_provider.clone(),
                client_event_dispatcher.clone(),
            )),
            Box::new(PresenceEventHandler::new(
                presence_aggregator.clone(),
                client_event_dispatcher.clone(),
            )),
            Box::new(TasksEventHandler::new(
                board_service.clone(),
                mutation_tracker.clone(),
                self.time_provider,
                client_event_dispatcher,
            )),
        ]);

        Client::from(Arc::new(ClientInner {
            chat,
            board: board_service,
            presence: presence_aggregator,
            ctx,
            connection,
            mutation_tracker,
            history_paginator,
        }))
    }
}

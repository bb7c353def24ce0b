// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::Arc;

use futures::StreamExt;
use parking_lot::RwLock;
use tracing::warn;
use url::Url;

use huddle_wire::{ClientRequest, ConnectionError, ConnectorProvider, ServerEvent};

use crate::app::event_handlers::{ChannelEvent, ChannelEventKind, ServerEventHandlerQueue};
use crate::domain::connection::{Backoff, ChannelConnection, SessionEvent};
use crate::domain::shared::models::{ChannelId, SocketState};

/// Owns one session per channel and pumps each session's events through the
/// server event handler queue.
pub struct ConnectionService {
    connector_provider: Arc<ConnectorProvider>,
    backoff: Backoff,
    handler_queue: Arc<ServerEventHandlerQueue>,
    sessions: RwLock<HashMap<ChannelId, ChannelConnection>>,
}

impl ConnectionService {
    pub fn new(
        connector_provider: ConnectorProvider,
        backoff: Backoff,
        handler_queue: Arc<ServerEventHandlerQueue>,
    ) -> Self {
        Self {
            connector_provider: Arc::new(connector_provider),
            backoff,
            handler_queue,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Connects a channel's session, creating it on first use. Connecting an
    /// open channel is a no-op, there is never more than one socket per
    /// channel.
    pub async fn connect(&self, channel: &ChannelId, url: Url) -> Result<(), ConnectionError> {
        let session = {
            let mut sessions = self.sessions.write();
            if let Some(session) = sessions.get(channel) {
                session.clone()
            } else {
                let provider = self.clone_provider();
                let (session, events) = ChannelConnection::new(
                    channel.clone(),
                    url,
                    provider,
                    self.backoff.clone(),
                );
                self.spawn_dispatch_loop(channel.clone(), events);
                sessions.insert(channel.clone(), session.clone());
                session
            }
        };
        session.connect().await
    }

    pub fn send(&self, channel: &ChannelId, request: ClientRequest) -> Result<(), ConnectionError> {
        let sessions = self.sessions.read();
        let Some(session) = sessions.get(channel) else {
            return Err(ConnectionError::NotConnected);
        };
        session.send(request)
    }

    pub fn state(&self, channel: &ChannelId) -> SocketState {
        self.sessions
            .read()
            .get(channel)
            .map(|session| session.state())
            .unwrap_or_default()
    }

    /// Tears a channel's session down for good.
    pub fn disconnect(&self, channel: &ChannelId) {
        if let Some(session) = self.sessions.write().remove(channel) {
            session.disconnect();
        }
    }

    pub fn disconnect_all(&self) {
        for (_, session) in self.sessions.write().drain() {
            session.disconnect();
        }
    }

    fn spawn_dispatch_loop(
        &self,
        channel: ChannelId,
        mut events: futures::channel::mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        let queue = self.handler_queue.clone();

        tokio::spawn(async move {
            while let Some(event) = events.next().await {
                let kind = match event {
                    SessionEvent::Connected => ChannelEventKind::Connected,
                    SessionEvent::Disconnected { error, clean } => {
                        ChannelEventKind::Disconnected { error, clean }
                    }
                    SessionEvent::Tick => ChannelEventKind::Tick,
                    SessionEvent::Envelope(envelope) => {
                        match ServerEvent::from_envelope(&envelope) {
                            Ok(ServerEvent::Unknown { event_type }) => {
                                warn!(%channel, event_type, "Dropping unknown envelope");
                                continue;
                            }
                            Ok(event) => ChannelEventKind::Event(event),
                            Err(error) => {
                                warn!(%channel, %error, "Dropping undecodable envelope");
                                continue;
                            }
                        }
                    }
                };
                queue
                    .handle_event(ChannelEvent {
                        channel: channel.clone(),
                        kind,
                    })
                    .await;
            }
        });
    }

    fn clone_provider(&self) -> ConnectorProvider {
        let provider = self.connector_provider.clone();
        Box::new(move || (provider)())
    }
}

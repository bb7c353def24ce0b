// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::channel::mpsc;
use parking_lot::RwLock;
use tracing::{info, warn};
use url::Url;

use huddle_wire::{
    connector::Connection, ClientRequest, ConnectionError, ConnectionEvent, ConnectorProvider,
    Envelope,
};

use crate::domain::shared::models::{ChannelId, SocketState};

use super::Backoff;

/// An event emitted by a channel session. Consumed by the dispatch loop that
/// feeds the server event handlers.
#[derive(Debug)]
pub enum SessionEvent {
    Connected,
    Disconnected {
        error: Option<ConnectionError>,
        clean: bool,
    },
    Envelope(Envelope),
    Tick,
}

/// One channel's socket session. Owns the underlying connection and drives
/// the reconnect schedule when the socket closes abnormally.
#[derive(Clone)]
pub struct ChannelConnection {
    inner: Arc<Inner>,
}

struct Inner {
    channel: ChannelId,
    url: Url,
    connector_provider: ConnectorProvider,
    backoff: Backoff,
    state: RwLock<SocketState>,
    retry_count: RwLock<u32>,
    connection: RwLock<Option<Box<dyn Connection>>>,
    events: mpsc::UnboundedSender<SessionEvent>,
    torn_down: AtomicBool,
}

impl ChannelConnection {
    pub fn new(
        channel: ChannelId,
        url: Url,
        connector_provider: ConnectorProvider,
        backoff: Backoff,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded();
        let connection = ChannelConnection {
            inner: Arc::new(Inner {
                channel,
                url,
                connector_provider,
                backoff,
                state: RwLock::new(SocketState::Closed),
                retry_count: RwLock::new(0),
                connection: RwLock::new(None),
                events: tx,
                torn_down: AtomicBool::new(false),
            }),
        };
        (connection, rx)
    }

    pub fn channel(&self) -> &ChannelId {
        &self.inner.channel
    }

    pub fn state(&self) -> SocketState {
        *self.inner.state.read()
    }

    pub fn retry_count(&self) -> u32 {
        *self.inner.retry_count.read()
    }

    /// Opens the socket. A no-op while a session is already open or a connect
    /// attempt is in progress, so at most one socket exists per channel.
    pub async fn connect(&self) -> Result<(), ConnectionError> {
        self.inner.clone().establish().await
    }

    /// Sends a request over the open socket. Fails fast when the socket is
    /// not open and kicks off a reconnect attempt instead of queueing.
    pub fn send(&self, request: ClientRequest) -> Result<(), ConnectionError> {
        {
            let guard = self.inner.connection.read();
            if let (Some(connection), SocketState::Open) = (guard.as_ref(), self.state()) {
                return connection
                    .send(request.into_envelope())
                    .map_err(|err| ConnectionError::Generic {
                        msg: err.to_string(),
                    });
            }
        }

        let inner = self.inner.clone();
        tokio::spawn(async move {
            _ = inner.establish().await;
        });
        Err(ConnectionError::NotConnected)
    }

    /// Tears the session down. No reconnect is scheduled after this.
    pub fn disconnect(&self) {
        self.inner.torn_down.store(true, Ordering::SeqCst);
        *self.inner.retry_count.write() = 0;
        if let Some(connection) = self.inner.connection.write().take() {
            connection.disconnect();
        }
        *self.inner.state.write() = SocketState::Closed;
        self.inner.events.close_channel();
    }
}

impl Inner {
    async fn establish(self: Arc<Self>) -> Result<(), ConnectionError> {
        {
            let mut state = self.state.write();
            if *state != SocketState::Closed {
                return Ok(());
            }
            *state = SocketState::Connecting;
        }

        info!(channel = %self.channel, "Connecting…");

        let handler_inner = self.clone();
        let connector = (self.connector_provider)();
        let result = connector
            .connect(
                &self.url,
                Box::new(move |event| {
                    let inner = handler_inner.clone();
                    Box::pin(async move { inner.handle_connection_event(event).await })
                }),
            )
            .await;

        match result {
            Ok(connection) => {
                *self.connection.write() = Some(connection);
                *self.state.write() = SocketState::Open;
                *self.retry_count.write() = 0;
                self.forward(SessionEvent::Connected);
                Ok(())
            }
            Err(error) => {
                *self.state.write() = SocketState::Closed;
                if !self.torn_down.load(Ordering::SeqCst) {
                    self.clone().schedule_reconnect();
                }
                Err(error)
            }
        }
    }

    async fn handle_connection_event(self: Arc<Self>, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Envelope(envelope) => self.forward(SessionEvent::Envelope(envelope)),
            ConnectionEvent::TimeoutTimer => self.forward(SessionEvent::Tick),
            ConnectionEvent::Disconnected { error, clean } => {
                self.connection.write().take();
                *self.state.write() = SocketState::Closed;

                if clean {
                    *self.retry_count.write() = 0;
                } else if !self.torn_down.load(Ordering::SeqCst) {
                    self.clone().schedule_reconnect();
                }

                self.forward(SessionEvent::Disconnected { error, clean });
            }
        }
    }

    fn schedule_reconnect(self: Arc<Self>) {
        let retry_count = {
            let mut guard = self.retry_count.write();
            let count = *guard;
            *guard += 1;
            count
        };
        let delay = self.backoff.delay(retry_count);

        warn!(
            channel = %self.channel,
            retry_count,
            "Connection lost. Reconnecting in {:?}…", delay
        );

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if self.torn_down.load(Ordering::SeqCst) {
                return;
            }
            _ = self.establish().await;
        });
    }

    fn forward(&self, event: SessionEvent) {
        _ = self.events.unbounded_send(event);
    }
}

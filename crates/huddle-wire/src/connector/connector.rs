// huddle/huddle-wire
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use url::Url;

use crate::envelope::Envelope;
use crate::util::PinnedFuture;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ConnectionError {
    #[error("Timed out")]
    TimedOut,
    #[error("Not connected")]
    NotConnected,
    #[error("{msg}")]
    Generic { msg: String },
}

pub type ConnectionEventHandler = Box<dyn Fn(ConnectionEvent) -> PinnedFuture<()> + Send + Sync>;

pub type ConnectorProvider = Box<dyn Fn() -> Box<dyn Connector> + Send + Sync>;

/// Produces one socket per call. The connection manager owns the returned
/// `Connection` and is the only component allowed to write to it.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(
        &self,
        url: &Url,
        event_handler: ConnectionEventHandler,
    ) -> Result<Box<dyn Connection>, ConnectionError>;
}

#[derive(Debug)]
pub enum ConnectionEvent {
    /// A decoded envelope arrived. Envelopes are delivered in wire order.
    Envelope(Envelope),
    /// The socket closed. `clean` mirrors the close code: a normal
    /// termination must not trigger a reconnect.
    Disconnected {
        error: Option<ConnectionError>,
        clean: bool,
    },
    /// Periodic tick used to expire pending work (e.g. unacked mutations).
    TimeoutTimer,
}

pub trait Connection: Send + Sync {
    fn send(&self, envelope: Envelope) -> Result<()>;
    fn disconnect(&self);
}

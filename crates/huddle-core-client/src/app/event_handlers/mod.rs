// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

pub use client_event_dispatcher::ClientEventDispatcher;
pub use connection_event_handler::ConnectionEventHandler;
pub use event_handler_queue::ServerEventHandlerQueue;
pub use messages_event_handler::MessagesEventHandler;
pub use presence_event_handler::PresenceEventHandler;
pub use tasks_event_handler::TasksEventHandler;

use huddle_wire::{ConnectionError, ServerEvent};

use crate::domain::shared::models::ChannelId;

mod client_event_dispatcher;
mod connection_event_handler;
mod event_handler_queue;
mod messages_event_handler;
mod presence_event_handler;
mod tasks_event_handler;

/// An event scoped to the channel whose session produced it.
#[derive(Debug)]
pub struct ChannelEvent {
    pub channel: ChannelId,
    pub kind: ChannelEventKind,
}

#[derive(Debug)]
pub enum ChannelEventKind {
    Connected,
    Disconnected {
        error: Option<ConnectionError>,
        clean: bool,
    },
    Event(ServerEvent),
    /// Fires once per second while the session is connected.
    Tick,
}

/// `ServerEventHandler` is a trait representing a handler for decoded server
/// events.
///
/// Implementors of this trait should provide a `handle_event` method, which
/// takes a `ChannelEvent` and returns an `Option<ChannelEvent>`. If the
/// handler returns `None`, it means the event has been consumed and no further
/// processing should be done. If it returns `Some(event)`, the event is not
/// consumed and should be passed to the next handler.
#[async_trait]
pub trait ServerEventHandler: Send + Sync {
    fn name(&self) -> &'static str;
    async fn handle_event(&self, event: ChannelEvent) -> Result<Option<ChannelEvent>>;
}

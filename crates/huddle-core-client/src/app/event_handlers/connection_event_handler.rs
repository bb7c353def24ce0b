// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::app::deps::DynClientEventDispatcher;
use crate::app::event_handlers::{ChannelEvent, ChannelEventKind, ServerEventHandler};
use crate::domain::shared::models::Severity;
use crate::{ClientEvent, ConnectionEvent};

/// Translates session lifecycle events into client events and surfaces lost
/// connections to the user.
pub struct ConnectionEventHandler {
    client_event_dispatcher: DynClientEventDispatcher,
}

impl ConnectionEventHandler {
    pub fn new(client_event_dispatcher: DynClientEventDispatcher) -> Self {
        Self {
            client_event_dispatcher,
        }
    }
}

#[async_trait]
impl ServerEventHandler for ConnectionEventHandler {
    fn name(&self) -> &'static str {
        "connection"
    }

    async fn handle_event(&self, event: ChannelEvent) -> Result<Option<ChannelEvent>> {
        match event.kind {
            ChannelEventKind::Connected => {
                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::ConnectionStatusChanged {
                        channel: event.channel,
                        event: ConnectionEvent::Connect,
                    });
                Ok(None)
            }
            ChannelEventKind::Disconnected { error, clean } => {
                if !clean {
                    self.client_event_dispatcher.dispatch_event(ClientEvent::Notice {
                        severity: Severity::Warning,
                        message: "Connection lost. Reconnecting…".to_string(),
                    });
                }
                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::ConnectionStatusChanged {
                        channel: event.channel,
                        event: ConnectionEvent::Disconnect { error, clean },
                    });
                Ok(None)
            }
            _ => Ok(Some(event)),
        }
    }
}

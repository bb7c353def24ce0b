// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use huddle_wire::ServerEvent;

use crate::app::deps::DynClientEventDispatcher;
use crate::app::event_handlers::{ChannelEvent, ChannelEventKind, ServerEventHandler};
use crate::domain::presence::PresenceAggregator;
use crate::domain::shared::models::Participant;
use crate::ClientEvent;

pub struct PresenceEventHandler {
    presence_aggregator: Arc<PresenceAggregator>,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl PresenceEventHandler {
    pub fn new(
        presence_aggregator: Arc<PresenceAggregator>,
        client_event_dispatcher: DynClientEventDispatcher,
    ) -> Self {
        Self {
            presence_aggregator,
            client_event_dispatcher,
        }
    }
}

#[async_trait]
impl ServerEventHandler for PresenceEventHandler {
    fn name(&self) -> &'static str {
        "presence"
    }

    async fn handle_event(&self, event: ChannelEvent) -> Result<Option<ChannelEvent>> {
        match event.kind {
            ChannelEventKind::Event(ServerEvent::OnlineUsers(payload)) => {
                let users = payload
                    .users
                    .into_iter()
                    .map(Participant::from)
                    .collect::<Vec<_>>();

                // The payload is the full roster, not a delta. A user who
                // reappears in a later snapshot is simply online again.
                self.presence_aggregator.replace(&event.channel, users);
                self.client_event_dispatcher
                    .dispatch_event(ClientEvent::PresenceChanged {
                        channel: event.channel,
                    });
                Ok(None)
            }
            _ => Ok(Some(event)),
        }
    }
}

// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use huddle_wire::{IDProvider, TimeProvider};

use crate::app::event_handlers::ClientEventDispatcher;
use crate::domain::board::RequestSender;
use crate::domain::messaging::repos::MessagesRepository;
use crate::domain::shared::models::Participant;

pub type DynAppContext = Arc<AppContext>;
pub type DynClientEventDispatcher = Arc<ClientEventDispatcher>;
pub type DynIDProvider = Arc<dyn IDProvider>;
pub type DynMessagesRepository = Arc<dyn MessagesRepository>;
pub type DynRequestSender = Arc<dyn RequestSender>;
pub type DynTimeProvider = Arc<dyn TimeProvider>;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base of the reconnect backoff exponent.
    pub backoff_base: u32,
    pub backoff_cap: Duration,
    pub backoff_jitter: Duration,
    /// How long a pending mutation may await its ack before it fails locally.
    pub ack_timeout: Duration,
    /// How many names a presence summary spells out before collapsing the
    /// rest into a count.
    pub presence_summary_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            backoff_base: 2,
            backoff_cap: Duration::from_secs(30),
            backoff_jitter: Duration::from_secs(1),
            ack_timeout: Duration::from_secs(10),
            presence_summary_limit: 3,
        }
    }
}

pub struct AppContext {
    pub config: ClientConfig,
    current_user: RwLock<Option<Participant>>,
}

impl AppContext {
    pub fn new(config: ClientConfig, current_user: Option<Participant>) -> Self {
        AppContext {
            config,
            current_user: RwLock::new(current_user),
        }
    }

    pub fn set_current_user(&self, user: Option<Participant>) {
        *self.current_user.write() = user;
    }

    /// The user this client acts as. Placeholder messages are attributed to
    /// them until the server echoes the canonical copy.
    pub fn current_user(&self) -> Participant {
        self.current_user
            .read()
            .clone()
            .unwrap_or_else(|| Participant::new("me"))
    }
}

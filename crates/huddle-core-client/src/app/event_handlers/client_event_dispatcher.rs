// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::debug;

use crate::{ClientDelegate, ClientEvent};

/// Forwards client events to the embedding application's delegate, if one was
/// configured.
pub struct ClientEventDispatcher {
    delegate: Option<Box<dyn ClientDelegate>>,
}

impl ClientEventDispatcher {
    pub fn new(delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        Self { delegate }
    }

    pub fn dispatch_event(&self, event: ClientEvent) {
        debug!(?event, "Dispatching client event");

        let Some(delegate) = &self.delegate else {
            return;
        };
        delegate.handle_event(event);
    }
}

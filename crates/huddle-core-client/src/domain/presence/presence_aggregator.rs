// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::shared::models::{ChannelId, Participant};

/// A compact rendering of who is online, e.g. "Ana, Ben, Cleo and 2 more".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresenceSummary {
    pub names: Vec<String>,
    pub overflow: usize,
}

impl PresenceSummary {
    /// Nobody online is a valid state, not an error.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Maintains the online roster per channel. The server broadcasts the full
/// roster on every change, so each update replaces the previous state
/// wholesale rather than applying deltas.
#[derive(Default)]
pub struct PresenceAggregator {
    rosters: RwLock<HashMap<ChannelId, Vec<Participant>>>,
}

impl PresenceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the roster for a channel with the server's latest snapshot.
    pub fn replace(&self, channel: &ChannelId, users: Vec<Participant>) {
        self.rosters.write().insert(channel.clone(), users);
    }

    pub fn online_users(&self, channel: &ChannelId) -> Vec<Participant> {
        self.rosters
            .read()
            .get(channel)
            .cloned()
            .unwrap_or_default()
    }

    pub fn online_count(&self, channel: &ChannelId) -> usize {
        self.rosters
            .read()
            .get(channel)
            .map(|users| users.len())
            .unwrap_or_default()
    }

    /// Summarizes the roster down to at most `limit` names plus an overflow
    /// count, in the order the server announced them.
    pub fn summary(&self, channel: &ChannelId, limit: usize) -> PresenceSummary {
        let rosters = self.rosters.read();
        let Some(users) = rosters.get(channel) else {
            return PresenceSummary::default();
        };

        PresenceSummary {
            names: users
                .iter()
                .take(limit)
                .map(|user| user.name.clone())
                .collect(),
            overflow: users.len().saturating_sub(limit),
        }
    }

    pub fn clear(&self) {
        self.rosters.write().clear()
    }
}

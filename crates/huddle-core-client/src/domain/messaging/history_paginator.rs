// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::domain::shared::models::{ChannelId, MessageId};

/// Where backwards pagination stands for one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationCursor {
    /// The earliest message loaded so far. `None` until the first page
    /// arrived.
    pub oldest_loaded_id: Option<MessageId>,
    pub has_more: bool,
    pub is_loading: bool,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        PaginationCursor {
            oldest_loaded_id: None,
            has_more: true,
            is_loading: false,
        }
    }
}

/// Drives backwards pagination through a channel's history. At most one page
/// request is in flight per channel, and requests stop for good once the
/// server reported the history exhausted.
#[derive(Default)]
pub struct HistoryPaginator {
    cursors: Mutex<HashMap<ChannelId, PaginationCursor>>,
}

impl HistoryPaginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self, channel: &ChannelId) -> PaginationCursor {
        self.cursors
            .lock()
            .get(channel)
            .cloned()
            .unwrap_or_default()
    }

    /// Starts a page load. Returns the id to page before, or `None` when the
    /// load must not happen because a request is already in flight or the
    /// history is exhausted. `fallback` is the earliest locally known message,
    /// used before the first page established a cursor.
    pub fn begin_load(
        &self,
        channel: &ChannelId,
        fallback: Option<MessageId>,
    ) -> Option<Option<MessageId>> {
        let mut cursors = self.cursors.lock();
        let cursor = cursors.entry(channel.clone()).or_default();

        if cursor.is_loading || !cursor.has_more {
            return None;
        }

        cursor.is_loading = true;
        Some(cursor.oldest_loaded_id.clone().or(fallback))
    }

    /// Reverts `begin_load` when the page request never made it out.
    pub fn abort_load(&self, channel: &ChannelId) {
        if let Some(cursor) = self.cursors.lock().get_mut(channel) {
            cursor.is_loading = false;
        }
    }

    /// Records an arrived page. `earliest_id` is the earliest identifier the
    /// page contained, `None` for an empty page.
    pub fn apply_page(
        &self,
        channel: &ChannelId,
        earliest_id: Option<MessageId>,
        has_more: bool,
    ) {
        let mut cursors = self.cursors.lock();
        let cursor = cursors.entry(channel.clone()).or_default();

        cursor.is_loading = false;
        cursor.has_more = has_more;
        if earliest_id.is_some() {
            cursor.oldest_loaded_id = earliest_id;
        }
    }

    pub fn clear(&self) {
        self.cursors.lock().clear()
    }
}

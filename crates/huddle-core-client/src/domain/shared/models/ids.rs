// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt;

use serde::{Deserialize, Serialize};

use huddle_utils::id_string;

id_string!(
    /// A message identifier. Either a client-generated identifier while a send
    /// is pending or the canonical server identifier once acknowledged.
    MessageId
);

id_string!(
    /// A single emoji used as a message reaction.
    Emoji
);

id_string!(
    /// Identifies one realtime channel, e.g. a chat room or a task's comment
    /// feed.
    ChannelId
);

id_string!(
    /// The key of a board column, e.g. "todo" or "done".
    StatusKey
);

/// The numeric identifier of a task on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        TaskId(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

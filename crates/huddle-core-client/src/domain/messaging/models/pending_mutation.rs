// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

/// What kind of optimistic mutation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Send,
    Edit,
    Delete,
    Reaction,
    StatusChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    Pending,
    Acked,
    Failed,
}

/// One optimistic mutation awaiting a server response. `target` names the
/// entity being mutated (a message id, a task id, or for sends the channel
/// the message goes to), `fingerprint` additionally includes the submitted
/// content so identical resubmissions can be detected.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    pub client_id: String,
    pub kind: MutationKind,
    pub target: String,
    pub fingerprint: String,
    pub submitted_at: DateTime<Utc>,
    pub state: MutationState,
}

// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use message::{FileInfo, Message, MessageFlags, Reaction, ReplySummary};
pub use pending_mutation::{MutationKind, MutationState, PendingMutation};

mod message;
mod pending_mutation;

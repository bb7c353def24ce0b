// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use ids::{ChannelId, Emoji, MessageId, StatusKey, TaskId};
pub use participant::Participant;
pub use severity::Severity;
pub use socket_state::SocketState;

mod ids;
mod participant;
mod severity;
mod socket_state;

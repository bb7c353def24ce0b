// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use backoff::Backoff;
pub use channel_connection::{ChannelConnection, SessionEvent};

mod backoff;
mod channel_connection;

// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub mod board;
pub mod connection;
pub mod messaging;
pub mod presence;
pub mod shared;

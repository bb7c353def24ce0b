// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use api::{ApiResponse, RequestError, RequestSender};
pub use board::{Board, BoardError, MoveContext};

mod api;
#[allow(clippy::module_inception)]
mod board;

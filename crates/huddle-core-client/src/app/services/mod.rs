// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use board_service::BoardService;
pub use chat_service::ChatService;
pub use connection_service::ConnectionService;

use thiserror::Error;

use huddle_wire::ConnectionError;

use crate::domain::board::{BoardError, RequestError};
use crate::domain::messaging::MutationError;

mod board_service;
mod chat_service;
mod connection_service;

/// Why a user-initiated submission did not go out.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Rejected locally before anything was sent.
    #[error("Content cannot be empty")]
    EmptyContent,

    #[error("An identical request is already in flight")]
    DuplicateInFlight,

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The server processed the request and rejected it.
    #[error("{0}")]
    Rejected(String),

    #[error("No request sender was configured")]
    MissingRequestSender,
}

impl From<MutationError> for SubmitError {
    fn from(error: MutationError) -> Self {
        match error {
            MutationError::DuplicateInFlight => SubmitError::DuplicateInFlight,
        }
    }
}

impl From<RequestError> for SubmitError {
    fn from(error: RequestError) -> Self {
        SubmitError::Rejected(error.to_string())
    }
}

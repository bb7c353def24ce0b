// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

//! The types an embedding application works with.

pub use huddle_wire::payloads::{CommentAuthor, CommentPayload, ServerTaskChange};
pub use huddle_wire::ConnectionError;

pub use crate::app::deps::ClientConfig;
pub use crate::app::services::SubmitError;
pub use crate::domain::board::{ApiResponse, RequestError, RequestSender};
pub use crate::domain::messaging::models::{
    FileInfo, Message, MessageFlags, Reaction, ReplySummary,
};
pub use crate::domain::messaging::PaginationCursor;
pub use crate::domain::presence::PresenceSummary;
pub use crate::domain::shared::models::{
    ChannelId, Emoji, MessageId, Participant, Severity, SocketState, StatusKey, TaskId,
};

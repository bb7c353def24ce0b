// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use huddle_wire::payloads::CommentPayload;

use crate::domain::shared::models::{StatusKey, TaskId};

/// The body of a status or comment endpoint response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// The status the server actually applied. May differ from the requested
    /// one when a workflow rule redirects the transition.
    #[serde(default)]
    pub new_status_key: Option<String>,
    #[serde(default)]
    pub comment: Option<CommentPayload>,
}

#[derive(Debug, Error)]
pub enum RequestError {
    /// The server processed the request and said no.
    #[error("{message}")]
    Rejected { message: String },
    /// Field-level validation errors, keyed by field name.
    #[error("Validation failed")]
    Validation {
        errors: HashMap<String, Vec<String>>,
    },
    #[error("Request failed: {msg}")]
    Transport { msg: String },
}

/// The HTTP seam for board operations that don't travel over the socket.
/// Implementations live outside this crate, next to whatever HTTP client the
/// embedding application uses.
#[async_trait]
pub trait RequestSender: Send + Sync {
    async fn update_task_status(
        &self,
        task: TaskId,
        status: &StatusKey,
    ) -> Result<ApiResponse, RequestError>;

    async fn post_comment(&self, task: TaskId, text: &str) -> Result<ApiResponse, RequestError>;
}

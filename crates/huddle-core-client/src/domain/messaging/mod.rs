// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use history_paginator::{HistoryPaginator, PaginationCursor};
pub use mutation_tracker::{MutationError, MutationTracker};

pub mod models;
pub mod repos;

mod history_paginator;
mod mutation_tracker;

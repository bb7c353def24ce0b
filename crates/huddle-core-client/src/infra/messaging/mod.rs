// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use in_memory_messages_repository::InMemoryMessagesRepository;

mod in_memory_messages_repository;

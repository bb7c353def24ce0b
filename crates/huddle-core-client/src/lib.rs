// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use client::{Client, ClientDelegate};
pub use client_builder::ClientBuilder;
pub use client_event::{ClientEvent, ConnectionEvent};

pub mod app;
pub mod domain;
pub mod infra;

mod client;
mod client_builder;
mod client_event;

pub mod dtos;

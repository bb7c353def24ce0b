// huddle/huddle-wire
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use connector::{
    Connection, ConnectionError, ConnectionEvent, Connector, ConnectorProvider,
};
pub use deps::{IDProvider, SystemTimeProvider, TimeProvider, UUIDProvider};
pub use envelope::{CodecError, Envelope};
pub use event::ServerEvent;
pub use request::ClientRequest;

pub mod connector;
mod deps;
mod envelope;
mod event;
pub mod payloads;
mod request;
mod util;

pub use util::PinnedFuture;

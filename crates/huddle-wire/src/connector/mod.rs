// huddle/huddle-wire
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use connector::{
    Connection, ConnectionError, ConnectionEvent, ConnectionEventHandler, Connector,
    ConnectorProvider,
};

mod connector;
pub mod websocket;

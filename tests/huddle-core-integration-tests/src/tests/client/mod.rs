// huddle/huddle-core-integration-tests
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)


mod board;
mod messaging;
mod pagination;
mod presence;
mod reconnect;

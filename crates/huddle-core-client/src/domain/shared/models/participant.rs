// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};

use huddle_wire::payloads::UserRef;

/// A user taking part in a channel. The numeric id is absent for participants
/// the server only announced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Option<u64>,
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Participant {
            id: None,
            name: name.into(),
        }
    }
}

impl From<UserRef> for Participant {
    fn from(user: UserRef) -> Self {
        Participant {
            id: user.id,
            name: user.username,
        }
    }
}

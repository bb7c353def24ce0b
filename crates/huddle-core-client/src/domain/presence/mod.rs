// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use presence_aggregator::{PresenceAggregator, PresenceSummary};

mod presence_aggregator;

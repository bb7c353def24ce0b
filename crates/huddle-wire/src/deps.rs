// huddle/huddle-wire
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

pub trait IDProvider: Send + Sync {
    fn new_id(&self) -> String;
}

#[derive(Default)]
pub struct UUIDProvider {}

impl UUIDProvider {
    pub fn new() -> Self {
        UUIDProvider {}
    }
}

impl IDProvider for UUIDProvider {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl IDProvider for Arc<dyn IDProvider> {
    fn new_id(&self) -> String {
        self.deref().new_id()
    }
}

pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Default)]
pub struct SystemTimeProvider {}

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Local::now().into()
    }
}

impl TimeProvider for Arc<dyn TimeProvider> {
    fn now(&self) -> DateTime<Utc> {
        self.deref().now()
    }
}

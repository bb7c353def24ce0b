// huddle/huddle-wire
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::future::Future;
use std::pin::Pin;

pub type PinnedFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

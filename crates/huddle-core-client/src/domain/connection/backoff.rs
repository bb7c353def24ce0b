// huddle/huddle-core-client
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use rand::Rng;

/// Exponential backoff for reconnect attempts. The deterministic part of the
/// delay doubles with every retry and is capped, the jittered part spreads
/// simultaneous reconnects of many clients over a small window.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: u32,
    cap: Duration,
    jitter: Duration,
}

impl Backoff {
    pub fn new(base: u32, cap: Duration, jitter: Duration) -> Self {
        Backoff { base, cap, jitter }
    }

    /// The capped exponential part of the delay for the given retry count.
    pub fn fixed_delay(&self, retry_count: u32) -> Duration {
        let millis = (self.base as u64)
            .checked_pow(retry_count)
            .and_then(|factor| factor.checked_mul(1000))
            .unwrap_or(u64::MAX);
        self.cap.min(Duration::from_millis(millis))
    }

    /// The full delay for the given retry count, including jitter. The jitter
    /// sits outside the cap so reconnects stay spread out even once the
    /// exponential part has saturated.
    pub fn delay(&self, retry_count: u32) -> Duration {
        let jitter = Duration::from_millis(
            rand::thread_rng().gen_range(0..=self.jitter.as_millis() as u64),
        );
        self.fixed_delay(retry_count) + jitter
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff {
            base: 2,
            cap: Duration::from_secs(30),
            jitter: Duration::from_secs(1),
        }
    }
}

//! Wall-clock access for the progression layer.
//!
//! Streaks compare local calendar dates, so the clock owns both "now" and the
//! mapping from an epoch-millisecond timestamp to a calendar day.

use chrono::{FixedOffset, Local, NaiveDate, Offset, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// One day in milliseconds.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

pub trait Clock: Send + Sync {
    /// Current time as epoch milliseconds
    fn now_ms(&self) -> i64;

    /// Calendar day a timestamp falls on, in the clock's time zone
    fn day_of(&self, timestamp_ms: i64) -> Option<NaiveDate>;

    fn today(&self) -> Option<NaiveDate> {
        self.day_of(self.now_ms())
    }

    /// Day of `now - 24h`. On DST transition days this can differ from
    /// `today - 1`; it matches what the streak rules have always compared.
    fn yesterday(&self) -> Option<NaiveDate> {
        self.day_of(self.now_ms() - DAY_MS)
    }
}

/// Real clock using the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn day_of(&self, timestamp_ms: i64) -> Option<NaiveDate> {
        Local
            .timestamp_millis_opt(timestamp_ms)
            .single()
            .map(|dt| dt.date_naive())
    }
}

/// Settable clock for tests and replays.
#[derive(Debug)]
pub struct ManualClock {
    now_ms: AtomicI64,
    offset: FixedOffset,
}

impl ManualClock {
    /// Clock in UTC starting at `now_ms`
    pub fn new(now_ms: i64) -> Self {
        Self::with_offset(now_ms, Utc.fix())
    }

    pub fn with_offset(now_ms: i64, offset: FixedOffset) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
            offset,
        }
    }

    /// Clock set to `hour:00` UTC on the given date
    pub fn at(year: i32, month: u32, day: u32, hour: u32) -> Self {
        let ms = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0);
        Self::new(ms)
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    pub fn advance_days(&self, days: i64) {
        self.advance_ms(days * DAY_MS);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    fn day_of(&self, timestamp_ms: i64) -> Option<NaiveDate> {
        self.offset
            .timestamp_millis_opt(timestamp_ms)
            .single()
            .map(|dt| dt.date_naive())
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }

    fn day_of(&self, timestamp_ms: i64) -> Option<NaiveDate> {
        (**self).day_of(timestamp_ms)
    }
}

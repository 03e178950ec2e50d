//! Injected time source.
//!
//! Every timestamp written by the engine (generated-at lines, entry `created_at`,
//! use-case date prefixes, slug disambiguators) is read from a [`Clock`] so that
//! output is reproducible under test.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Fixed clock at the given unix timestamp in milliseconds.
    pub fn from_millis(millis: i64) -> Self {
        Self(DateTime::from_timestamp_millis(millis).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// `YYYY-MM-DD`
pub fn date_string(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// `YYYYMMDD-HHMMSS`, used as a sortable filename prefix.
pub fn compact_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d-%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_formats_dates() {
        // 2024-03-05T12:00:00Z
        let clock = FixedClock::from_millis(1_709_640_000_000);
        assert_eq!(date_string(clock.now()), "2024-03-05");
        assert_eq!(compact_timestamp(clock.now()), "20240305-120000");
        assert_eq!(clock.now().timestamp_millis(), 1_709_640_000_000);
    }
}

#![allow(dead_code)]

use jiff::Timestamp;
use tzbind_core::{FormContext, Timezone};

/// Zones with a mix of DST rules, half-hour offsets and date-line neighbors.
pub const ZONES: &[&str] = &[
    "UTC",
    "America/Los_Angeles",
    "America/New_York",
    "America/St_Johns",
    "Europe/London",
    "Asia/Kolkata",
    "Asia/Kathmandu",
    "Australia/Lord_Howe",
    "Pacific/Chatham",
    "Pacific/Kiritimati",
];

/// Helper function to parse a test instant
pub fn ts(s: &str) -> Timestamp {
    s.parse().expect("Failed to parse test instant")
}

/// Helper function to create a context with a fixed reference instant
pub fn ctx(name: &str) -> FormContext {
    let tz = Timezone::get(name).expect("Failed to look up test zone");
    FormContext::at(tz, ts("2024-01-15T12:00:00Z"))
}

/// Instants spread over several years at irregular offsets, with seconds.
pub fn sample_instants() -> Vec<Timestamp> {
    let start = ts("2019-12-31T23:59:59Z").as_second();
    (0..400)
        .map(|i| Timestamp::from_second(start + i * 397_213 + (i % 60)).expect("in range"))
        .collect()
}

/// Truncates an instant to the start of its minute.
pub fn to_minute(instant: Timestamp) -> Timestamp {
    let secs = instant.as_second();
    Timestamp::from_second(secs - secs.rem_euclid(60)).expect("in range")
}

/// True if the local rendering of `instant` in `tz` is repeated by a DST
/// fold, in which case the plain local string cannot identify it.
pub fn in_fold(instant: Timestamp, tz: &Timezone) -> bool {
    let local = instant.to_zoned(tz.as_jiff().clone()).datetime();
    matches!(
        tz.as_jiff().to_ambiguous_zoned(local).offset(),
        jiff::tz::AmbiguousOffset::Fold { .. }
    )
}

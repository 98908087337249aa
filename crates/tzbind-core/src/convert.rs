//! Conversions between instants and the civil strings native form controls
//! edit.
//!
//! Every function here is pure: the same inputs always produce the same
//! output, and nothing reads the clock or the host timezone. The pairs
//! [`utc_to_local_input`]/[`local_input_to_utc`] and
//! [`utc_to_local_date`]/[`local_date_to_utc`] are inverses up to the
//! precision of the local representation.
//!
//! # Format
//!
//! - Local datetime: `YYYY-MM-DDTHH:MM` or `YYYY-MM-DDTHH:MM:SS`, as used by
//!   `<input type="datetime-local">`
//! - Local date: `YYYY-MM-DD`
//! - Instant: RFC 3339, always written with a `Z` suffix
//!
//! # Examples
//!
//! ```rust
//! use tzbind_core::{convert, InputPrecision, Timezone};
//!
//! let la = Timezone::get("America/Los_Angeles").unwrap();
//! let instant = convert::parse_instant("2024-01-16T02:30:00Z").unwrap();
//!
//! let local = convert::utc_to_local_input(instant, &la, InputPrecision::Minute);
//! assert_eq!(local, "2024-01-15T18:30");
//! assert_eq!(convert::local_input_to_utc(&local, &la).unwrap(), instant);
//! ```

use std::fmt;
use std::str::FromStr;

use jiff::{civil, fmt::temporal::Pieces, tz::AmbiguousOffset, Timestamp};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    error::{BindError, Result},
    timezone::Timezone,
};

/// Granularity of the civil datetime string handed to a control.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputPrecision {
    /// `YYYY-MM-DDTHH:MM`
    #[default]
    Minute,

    /// `YYYY-MM-DDTHH:MM:SS`
    Second,
}

impl InputPrecision {
    fn strftime_format(self) -> &'static str {
        match self {
            InputPrecision::Minute => "%Y-%m-%dT%H:%M",
            InputPrecision::Second => "%Y-%m-%dT%H:%M:%S",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputPrecision::Minute => "minute",
            InputPrecision::Second => "second",
        }
    }
}

impl FromStr for InputPrecision {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minute" | "minutes" => Ok(InputPrecision::Minute),
            "second" | "seconds" => Ok(InputPrecision::Second),
            _ => Err(format!("Invalid input precision: {s}")),
        }
    }
}

impl fmt::Display for InputPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zones whose everyday short name does not change with DST.
const GENERIC_ABBREVIATIONS: &[(&str, &str)] = &[
    ("America/Los_Angeles", "PT"),
    ("America/Vancouver", "PT"),
    ("America/Tijuana", "PT"),
    ("America/Denver", "MT"),
    ("America/Boise", "MT"),
    ("America/Edmonton", "MT"),
    ("America/Phoenix", "MT"),
    ("America/Chicago", "CT"),
    ("America/Winnipeg", "CT"),
    ("America/New_York", "ET"),
    ("America/Detroit", "ET"),
    ("America/Toronto", "ET"),
    ("America/Indiana/Indianapolis", "ET"),
    ("America/Halifax", "AT"),
    ("America/St_Johns", "NT"),
    ("America/Anchorage", "AKT"),
    ("Pacific/Honolulu", "HT"),
    ("UTC", "UTC"),
    ("Etc/UTC", "UTC"),
];

/// Renders `instant` as the civil datetime a `datetime-local` control shows
/// in `tz`. Sub-precision components are truncated.
pub fn utc_to_local_input(instant: Timestamp, tz: &Timezone, precision: InputPrecision) -> String {
    let local = instant
        .to_zoned(tz.as_jiff().clone())
        .datetime()
        .strftime(precision.strftime_format())
        .to_string();
    trace!("{instant} -> {local} ({tz})");
    local
}

/// Interprets a civil datetime in `tz` and returns the instant it names.
///
/// Times inside a DST fold resolve to the earlier offset; times inside a gap
/// move forward by the length of the gap.
///
/// # Errors
///
/// Returns `BindError::Parse` if `input` is not a civil datetime and
/// `BindError::Resolve` if it cannot be placed on the zone's timeline.
pub fn local_input_to_utc(input: &str, tz: &Timezone) -> Result<Timestamp> {
    local_input_to_utc_near(input, tz, None)
}

/// Like [`local_input_to_utc`], but a time inside a DST fold resolves to the
/// offset `current` has in `tz` when that offset is one of the candidates.
///
/// Re-committing an unchanged value in the repeated hour therefore yields
/// the same instant it was rendered from.
///
/// # Errors
///
/// Same as [`local_input_to_utc`].
pub fn local_input_to_utc_near(
    input: &str,
    tz: &Timezone,
    current: Option<Timestamp>,
) -> Result<Timestamp> {
    let datetime = parse_local_datetime(input)?;
    let ambiguous = tz.as_jiff().to_ambiguous_zoned(datetime);

    let resolved = match (ambiguous.offset(), current) {
        (AmbiguousOffset::Fold { before, after }, Some(current)) => {
            let hint = tz.as_jiff().to_offset(current);
            if hint == after {
                ambiguous.later()
            } else if hint == before {
                ambiguous.earlier()
            } else {
                ambiguous.compatible()
            }
        }
        _ => ambiguous.compatible(),
    };

    let instant = resolved
        .map_err(|source| BindError::Resolve {
            value: input.to_string(),
            timezone: tz.name().to_string(),
            source,
        })?
        .timestamp();
    trace!("{input} ({tz}) -> {instant}");
    Ok(instant)
}

/// The civil date `instant` falls on in `tz`.
pub fn utc_to_local_date(instant: Timestamp, tz: &Timezone) -> String {
    instant.to_zoned(tz.as_jiff().clone()).date().to_string()
}

/// The instant at which the civil date `input` begins in `tz`.
///
/// # Errors
///
/// Returns `BindError::Parse` if `input` is not a `YYYY-MM-DD` date and
/// `BindError::Resolve` if the day cannot be placed on the zone's timeline.
pub fn local_date_to_utc(input: &str, tz: &Timezone) -> Result<Timestamp> {
    let date = parse_local_date(input)?;
    date.to_zoned(tz.as_jiff().clone())
        .map(|zoned| zoned.timestamp())
        .map_err(|source| BindError::Resolve {
            value: input.to_string(),
            timezone: tz.name().to_string(),
            source,
        })
}

/// Short label for `tz`: a generic name (`PT`, `ET`) for zones that have
/// one, otherwise the abbreviation in effect at `at` (`CET`, `IST`, `+04`).
pub fn timezone_abbr(tz: &Timezone, at: Timestamp) -> String {
    GENERIC_ABBREVIATIONS
        .iter()
        .find(|(name, _)| *name == tz.name())
        .map(|(_, abbr)| (*abbr).to_string())
        .unwrap_or_else(|| {
            at.to_zoned(tz.as_jiff().clone())
                .strftime("%Z")
                .to_string()
        })
}

/// Parses a civil datetime with minute or second precision.
///
/// # Errors
///
/// Returns `BindError::Parse` on malformed input, including input that
/// carries a UTC offset or a time zone annotation and input with no time.
pub fn parse_local_datetime(input: &str) -> Result<civil::DateTime> {
    const EXPECTED: &str = "a local datetime";
    let pieces = parse_civil_pieces(input, EXPECTED)?;
    match pieces.time() {
        Some(time) => Ok(pieces.date().to_datetime(time)),
        None => Err(BindError::parse(
            input,
            EXPECTED,
            jiff::Error::from_args(format_args!("missing a time of day")),
        )),
    }
}

/// Parses a `YYYY-MM-DD` civil date.
///
/// # Errors
///
/// Returns `BindError::Parse` on malformed input, including input with a
/// time of day, a UTC offset, or a time zone annotation.
pub fn parse_local_date(input: &str) -> Result<civil::Date> {
    const EXPECTED: &str = "a local date";
    let pieces = parse_civil_pieces(input, EXPECTED)?;
    if pieces.time().is_some() {
        return Err(BindError::parse(
            input,
            EXPECTED,
            jiff::Error::from_args(format_args!("unexpected time of day")),
        ));
    }
    Ok(pieces.date())
}

/// Splits `input` into its components and rejects anything that pins it to
/// a zone or offset. jiff's civil parsers silently drop both.
fn parse_civil_pieces<'i>(input: &'i str, expected: &'static str) -> Result<Pieces<'i>> {
    let pieces =
        Pieces::parse(input.trim()).map_err(|source| BindError::parse(input, expected, source))?;
    if pieces.offset().is_some() || pieces.time_zone_annotation().is_some() {
        return Err(BindError::parse(
            input,
            expected,
            jiff::Error::from_args(format_args!("unexpected UTC offset or time zone")),
        ));
    }
    Ok(pieces)
}

/// Parses an absolute instant written with a UTC offset.
///
/// # Errors
///
/// Returns `BindError::Parse` if the string has no offset or is malformed.
pub fn parse_instant(input: &str) -> Result<Timestamp> {
    input
        .trim()
        .parse::<Timestamp>()
        .map_err(|source| BindError::parse(input, "an instant", source))
}

/// Canonical `...Z` form of an instant.
pub fn format_instant(instant: Timestamp) -> String {
    instant.to_string()
}

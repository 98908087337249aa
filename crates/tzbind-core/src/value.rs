//! Value types bound to form fields.

use std::fmt;
use std::str::FromStr;

use jiff::{civil, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{
    convert,
    error::{BindError, Result},
    timezone::Timezone,
};

/// A wall-clock time such as a daily pickup time.
///
/// Carries no date and no zone, so it is never converted. The string is kept
/// exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockTime(String);

impl ClockTime {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClockTime {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Value of a date-granularity field.
///
/// A birthdate is a [`DateValue::CivilDate`] and means the same day in every
/// zone. An event day stored as an instant is a [`DateValue::Instant`] and
/// its day depends on the zone it is viewed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DateValue {
    CivilDate(civil::Date),
    Instant(Timestamp),
}

impl DateValue {
    /// Classifies a single untagged string: anything carrying a time marker
    /// (`T`) or a Zulu suffix is an instant, anything else a bare date.
    ///
    /// # Errors
    ///
    /// Returns `BindError::Parse` if the string is neither.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tzbind_core::DateValue;
    ///
    /// assert!(matches!(DateValue::sniff("2015-04-02"), Ok(DateValue::CivilDate(_))));
    /// assert!(matches!(DateValue::sniff("2024-01-16T02:30:00Z"), Ok(DateValue::Instant(_))));
    /// ```
    pub fn sniff(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.contains(['T', 't', 'Z', 'z']) {
            convert::parse_instant(value).map(DateValue::Instant)
        } else {
            convert::parse_local_date(value).map(DateValue::CivilDate)
        }
    }

    /// The civil date shown for this value in `tz`.
    pub fn local_date(&self, tz: &Timezone) -> String {
        match self {
            DateValue::CivilDate(date) => date.to_string(),
            DateValue::Instant(instant) => convert::utc_to_local_date(*instant, tz),
        }
    }

    pub fn is_instant(&self) -> bool {
        matches!(self, DateValue::Instant(_))
    }
}

impl FromStr for DateValue {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self> {
        Self::sniff(s)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::CivilDate(date) => write!(f, "{date}"),
            DateValue::Instant(instant) => f.write_str(&convert::format_instant(*instant)),
        }
    }
}

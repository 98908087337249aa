//! Timezone values and the ambient timezone provider.
//!
//! Binders never look up "the current user timezone" on their own. Callers
//! hand them a [`FormContext`] on every render and commit, usually obtained
//! from a [`TimezoneSource`]. A [`SharedTimezone`] can be updated between
//! renders and every context taken afterwards observes the new zone.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use jiff::{tz::TimeZone, Timestamp};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    convert,
    error::{BindError, Result},
};

/// An IANA timezone together with the identifier it was looked up by.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timezone {
    name: String,
    tz: TimeZone,
}

impl Timezone {
    /// Looks up an IANA zone identifier such as `America/Los_Angeles`.
    ///
    /// # Errors
    ///
    /// Returns `BindError::UnknownTimezone` if the identifier is not in the
    /// timezone database.
    pub fn get(name: &str) -> Result<Self> {
        let name = name.trim();
        let tz = TimeZone::get(name).map_err(|source| BindError::UnknownTimezone {
            name: name.to_string(),
            source,
        })?;
        debug!("Resolved timezone {name}");
        Ok(Self {
            name: name.to_string(),
            tz,
        })
    }

    pub fn utc() -> Self {
        Self {
            name: "UTC".to_string(),
            tz: TimeZone::UTC,
        }
    }

    /// The zone configured on the host, or UTC when the host zone has no
    /// IANA name.
    pub fn system() -> Self {
        let tz = TimeZone::system();
        match tz.iana_name().map(str::to_string) {
            Some(name) => Self { name, tz },
            None => {
                warn!("System timezone has no IANA name, falling back to UTC");
                Self::utc()
            }
        }
    }

    /// The IANA identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_jiff(&self) -> &TimeZone {
        &self.tz
    }

    /// Short, human-facing abbreviation such as `PT` or `CET`.
    pub fn abbreviation(&self, at: Timestamp) -> String {
        convert::timezone_abbr(self, at)
    }
}

impl PartialEq for Timezone {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Timezone {}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Timezone {
    type Err = BindError;

    fn from_str(s: &str) -> Result<Self> {
        Self::get(s)
    }
}

impl TryFrom<String> for Timezone {
    type Error = BindError;

    fn try_from(value: String) -> Result<Self> {
        Self::get(&value)
    }
}

impl From<Timezone> for String {
    fn from(value: Timezone) -> Self {
        value.name
    }
}

/// Per-call inputs a binder needs besides the value itself.
///
/// The reference instant is only used to pick a zone abbreviation for labels
/// when the zone has no fixed short name.
#[derive(Debug, Clone)]
pub struct FormContext {
    timezone: Timezone,
    reference: Timestamp,
}

impl FormContext {
    /// Context for the current moment. Labels of zones without a generic
    /// short name then depend on the wall clock (`CET` in winter, `CEST` in
    /// summer); use [`FormContext::at`] where that matters.
    pub fn new(timezone: Timezone) -> Self {
        Self::at(timezone, Timestamp::now())
    }

    pub fn at(timezone: Timezone, reference: Timestamp) -> Self {
        Self {
            timezone,
            reference,
        }
    }

    pub fn timezone(&self) -> &Timezone {
        &self.timezone
    }

    pub fn reference(&self) -> Timestamp {
        self.reference
    }

    pub fn zone_abbr(&self) -> String {
        self.timezone.abbreviation(self.reference)
    }
}

/// Supplier of the current user timezone.
pub trait TimezoneSource {
    /// The zone in effect right now. Implementations must not cache a stale
    /// value across updates.
    fn timezone(&self) -> Timezone;

    /// A fresh context reflecting the zone in effect right now.
    ///
    /// The label abbreviation is taken at the current instant, so for zones
    /// like `Europe/Paris` it changes with the season. Conversions do not.
    fn context(&self) -> FormContext {
        FormContext::new(self.timezone())
    }

    /// Like [`TimezoneSource::context`], with the abbreviation taken at
    /// `reference` instead of now.
    fn context_at(&self, reference: Timestamp) -> FormContext {
        FormContext::at(self.timezone(), reference)
    }
}

impl TimezoneSource for Timezone {
    fn timezone(&self) -> Timezone {
        self.clone()
    }
}

/// A timezone shared between a form session and whatever updates the user's
/// preference. Clones observe the same zone.
#[derive(Debug, Clone)]
pub struct SharedTimezone {
    inner: Arc<RwLock<Timezone>>,
}

impl SharedTimezone {
    pub fn new(timezone: Timezone) -> Self {
        Self {
            inner: Arc::new(RwLock::new(timezone)),
        }
    }

    /// Replaces the zone seen by all clones.
    pub fn set(&self, timezone: Timezone) {
        debug!("Ambient timezone changed to {timezone}");
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = timezone;
    }

    /// Looks up `name` and installs it.
    ///
    /// # Errors
    ///
    /// Returns `BindError::UnknownTimezone` and leaves the current zone in
    /// place if `name` is not a known identifier.
    pub fn set_name(&self, name: &str) -> Result<()> {
        self.set(Timezone::get(name)?);
        Ok(())
    }
}

impl TimezoneSource for SharedTimezone {
    fn timezone(&self) -> Timezone {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

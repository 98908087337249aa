//! Core library for timezone-aware form field binding.
//!
//! A form stores absolute instants (`2024-01-16T02:30:00Z`), bare civil dates
//! (`2015-04-02`) and wall-clock times (`18:30`). Native date and time
//! controls edit civil strings with no offset. This crate translates between
//! the two, always against the timezone the caller passes in.
//!
//! # Architecture
//!
//! - **Conversions** ([`convert`]): pure instant/civil string functions
//! - **Timezones** ([`timezone`]): zone values, the per-call [`FormContext`]
//!   and injectable [`TimezoneSource`] providers
//! - **Values** ([`value`]): [`ClockTime`] and the tagged [`DateValue`]
//! - **Binders** ([`field`]): [`DateTimeField`], [`DateField`] and
//!   [`ClockTimeField`], all implementing [`FieldBinder`]
//! - **Configuration** ([`config`]): resolves the session timezone and
//!   rendering preferences
//!
//! # Quick Start
//!
//! ```rust
//! use jiff::Timestamp;
//! use tzbind_core::{
//!     DateTimeField, FieldBinder, FieldOptions, SharedTimezone, Timezone, TimezoneSource,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let zone = SharedTimezone::new(Timezone::get("America/Los_Angeles")?);
//! let field = DateTimeField::new(FieldOptions::new("Pickup").zone_abbr(true));
//!
//! let stored: Timestamp = "2024-01-16T02:30:00Z".parse()?;
//! let rendered = field.render(Some(&stored), &zone.context());
//! assert_eq!(rendered.label, "Pickup (PT)");
//! assert_eq!(rendered.value, "2024-01-15T18:30");
//!
//! let mut saved = None;
//! field.edit("2024-01-15T19:00", &zone.context(), |value| saved = value)?;
//! assert_eq!(saved, Some("2024-01-16T03:00:00Z".parse::<Timestamp>()?));
//!
//! // The user switches zones; the next render reflects it.
//! zone.set_name("America/New_York")?;
//! assert_eq!(field.render(Some(&stored), &zone.context()).value, "2024-01-15T21:30");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod field;
pub mod timezone;
pub mod value;

// Re-export commonly used types
pub use config::{Config, ConfigBuilder, ConfigFile};
pub use convert::InputPrecision;
pub use error::{BindError, Result};
pub use field::{
    ClockTimeField, DateField, DateMode, DateTimeField, FieldBinder, FieldOptions, InputKind,
    RenderedField,
};
pub use timezone::{FormContext, SharedTimezone, Timezone, TimezoneSource};
pub use value::{ClockTime, DateValue};

//! Binder for day-granularity fields.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{is_blank, FieldBinder, FieldOptions, InputKind, RenderedField};
use crate::{convert, error::Result, timezone::FormContext, value::DateValue};

/// What a [`DateField`] produces when the user picks a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    /// The picked day itself, e.g. a birthdate.
    #[default]
    Civil,

    /// The instant the picked day starts in the form's timezone.
    Instant,
}

impl FromStr for DateMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "civil" | "date" => Ok(DateMode::Civil),
            "instant" => Ok(DateMode::Instant),
            _ => Err(format!("Invalid date mode: {s}")),
        }
    }
}

/// Binds an `Option<DateValue>` to a `date` control.
///
/// Civil dates are shown as-is in every zone; instants are shown as the day
/// they fall on in the context's zone.
#[derive(Debug, Clone)]
pub struct DateField {
    options: FieldOptions,
    min: Option<DateValue>,
    max: Option<DateValue>,
    mode: DateMode,
}

impl DateField {
    pub fn new(options: impl Into<FieldOptions>) -> Self {
        Self {
            options: options.into(),
            min: None,
            max: None,
            mode: DateMode::default(),
        }
    }

    pub fn with_min(mut self, min: DateValue) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: DateValue) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_mode(mut self, mode: DateMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> DateMode {
        self.mode
    }
}

impl FieldBinder for DateField {
    type Value = DateValue;

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn render(&self, value: Option<&DateValue>, ctx: &FormContext) -> RenderedField {
        let tz = ctx.timezone();
        let mut field = RenderedField::new(&self.options, InputKind::Date, ctx);
        field.value = value.map(|v| v.local_date(tz)).unwrap_or_default();
        field.min = self.min.map(|min| min.local_date(tz));
        field.max = self.max.map(|max| max.local_date(tz));
        field
    }

    fn commit(&self, input: &str, ctx: &FormContext) -> Result<Option<DateValue>> {
        if is_blank(input) {
            return Ok(None);
        }
        let value = match self.mode {
            DateMode::Civil => DateValue::CivilDate(convert::parse_local_date(input)?),
            DateMode::Instant => {
                DateValue::Instant(convert::local_date_to_utc(input, ctx.timezone())?)
            }
        };
        Ok(Some(value))
    }
}

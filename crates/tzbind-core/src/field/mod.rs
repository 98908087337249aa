//! Field binders translating between stored values and control strings.
//!
//! A binder owns only its static configuration (label, flags, bounds). The
//! value and the timezone arrive with every call, so rendering the same
//! value under a different [`FormContext`] always reflects the new zone.
//!
//! ```text
//! stored value ──render(value, ctx)──▶ RenderedField { value: "2024-01-15T18:30", .. }
//!      ▲                                         │
//!      └────────commit(input, ctx)◀──── user edits the control
//! ```
//!
//! ## Binders
//!
//! - [`DateTimeField`]: instants shown as `datetime-local` values
//! - [`DateField`]: civil dates or instants shown as `date` values
//! - [`ClockTimeField`]: wall-clock times passed through untouched

mod clock;
mod date;
mod datetime;

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

pub use clock::ClockTimeField;
pub use date::{DateField, DateMode};
pub use datetime::DateTimeField;

use crate::{
    error::{BindError, Result},
    timezone::FormContext,
};

/// The kind of native control a field renders to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InputKind {
    #[serde(rename = "datetime-local")]
    DateTimeLocal,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "time")]
    Time,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::DateTimeLocal => "datetime-local",
            InputKind::Date => "date",
            InputKind::Time => "time",
        }
    }
}

/// Settings shared by every binder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
    pub label: String,
    pub required: bool,
    pub disabled: bool,
    /// Append the zone abbreviation to the label, e.g. `Pickup (PT)`.
    pub zone_abbr: bool,
}

impl FieldOptions {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn zone_abbr(mut self, zone_abbr: bool) -> Self {
        self.zone_abbr = zone_abbr;
        self
    }

    /// Label as shown to the user under `ctx`.
    pub fn display_label(&self, ctx: &FormContext) -> String {
        if self.zone_abbr {
            format!("{} ({})", self.label, ctx.zone_abbr())
        } else {
            self.label.clone()
        }
    }
}

impl From<&str> for FieldOptions {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for FieldOptions {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

/// Everything a native control needs for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedField {
    pub label: String,
    pub kind: InputKind,
    /// Empty when the bound value is unset.
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    pub required: bool,
    pub disabled: bool,
}

impl RenderedField {
    pub(crate) fn new(options: &FieldOptions, kind: InputKind, ctx: &FormContext) -> Self {
        Self {
            label: options.display_label(ctx),
            kind,
            value: String::new(),
            min: None,
            max: None,
            required: options.required,
            disabled: options.disabled,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for RenderedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.label)?;
        writeln!(f)?;
        writeln!(f, "- **Input**: {}", self.kind.as_str())?;
        if self.value.is_empty() {
            writeln!(f, "- **Value**: (empty)")?;
        } else {
            writeln!(f, "- **Value**: {}", self.value)?;
        }
        if let Some(min) = &self.min {
            writeln!(f, "- **Min**: {min}")?;
        }
        if let Some(max) = &self.max {
            writeln!(f, "- **Max**: {max}")?;
        }
        if self.required {
            writeln!(f, "- Required")?;
        }
        if self.disabled {
            writeln!(f, "- Disabled")?;
        }
        Ok(())
    }
}

/// Two-way binding between a stored value and the string a control edits.
pub trait FieldBinder {
    /// The value the caller stores.
    type Value;

    fn options(&self) -> &FieldOptions;

    /// Renders `value` (or an empty control for `None`) under `ctx`.
    fn render(&self, value: Option<&Self::Value>, ctx: &FormContext) -> RenderedField;

    /// Converts the control string back into a stored value. Blank input is
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns `BindError::Parse` or `BindError::Resolve` when non-blank
    /// input cannot be converted.
    fn commit(&self, input: &str, ctx: &FormContext) -> Result<Option<Self::Value>>;

    /// Commits `input` and hands the result to `on_change`. The callback is
    /// not invoked when the conversion fails.
    ///
    /// # Errors
    ///
    /// Same as [`FieldBinder::commit`].
    fn edit<F>(&self, input: &str, ctx: &FormContext, on_change: F) -> Result<()>
    where
        F: FnOnce(Option<Self::Value>),
    {
        let value = self.commit(input, ctx)?;
        debug!("{}: committed {:?}", self.options().label, input);
        on_change(value);
        Ok(())
    }

    /// Like [`FieldBinder::commit`], but blank input is rejected when the
    /// field is required.
    ///
    /// # Errors
    ///
    /// Returns `BindError::InvalidInput` for blank input on a required field.
    fn commit_checked(&self, input: &str, ctx: &FormContext) -> Result<Option<Self::Value>> {
        self.check_required(self.commit(input, ctx)?)
    }

    /// Rejects an unset value when the field is required.
    ///
    /// # Errors
    ///
    /// Returns `BindError::InvalidInput` for `None` on a required field.
    fn check_required(&self, value: Option<Self::Value>) -> Result<Option<Self::Value>> {
        match value {
            None if self.options().required => Err(BindError::invalid_input(
                self.options().label.clone(),
            )
            .with_reason("a value is required")),
            value => Ok(value),
        }
    }
}

/// Blank control strings mean "unset".
pub(crate) fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

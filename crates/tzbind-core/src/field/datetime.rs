//! Binder for absolute instants edited as local datetimes.

use jiff::Timestamp;
use log::warn;

use super::{is_blank, FieldBinder, FieldOptions, InputKind, RenderedField};
use crate::{
    convert::{self, InputPrecision},
    error::Result,
    timezone::FormContext,
};

/// Binds an `Option<Timestamp>` to a `datetime-local` control.
///
/// Bounds are instants and go through the same conversion as the value, so
/// the control's own range check compares like with like.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use tzbind_core::{DateTimeField, FieldBinder, FormContext, Timezone};
///
/// let field = DateTimeField::new("Exchange").with_min("2024-01-01T00:00:00Z".parse().unwrap());
/// let ctx = FormContext::new(Timezone::get("America/Los_Angeles").unwrap());
///
/// let value: Timestamp = "2024-01-16T02:30:00Z".parse().unwrap();
/// let rendered = field.render(Some(&value), &ctx);
/// assert_eq!(rendered.value, "2024-01-15T18:30");
/// assert_eq!(rendered.min.as_deref(), Some("2023-12-31T16:00"));
///
/// assert_eq!(field.commit("2024-01-15T18:30", &ctx).unwrap(), Some(value));
/// assert_eq!(field.commit("", &ctx).unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeField {
    options: FieldOptions,
    min: Option<Timestamp>,
    max: Option<Timestamp>,
    precision: InputPrecision,
}

impl DateTimeField {
    pub fn new(options: impl Into<FieldOptions>) -> Self {
        Self {
            options: options.into(),
            min: None,
            max: None,
            precision: InputPrecision::default(),
        }
    }

    pub fn with_min(mut self, min: Timestamp) -> Self {
        self.min = Some(min);
        self.warn_on_inverted_bounds();
        self
    }

    pub fn with_max(mut self, max: Timestamp) -> Self {
        self.max = Some(max);
        self.warn_on_inverted_bounds();
        self
    }

    pub fn with_precision(mut self, precision: InputPrecision) -> Self {
        self.precision = precision;
        self
    }

    pub fn precision(&self) -> InputPrecision {
        self.precision
    }

    /// Commits `input`, resolving a time in a DST fold to the side `current`
    /// is on. Use this when the field already holds a value.
    ///
    /// # Errors
    ///
    /// Same as [`FieldBinder::commit`].
    pub fn commit_near(
        &self,
        input: &str,
        ctx: &FormContext,
        current: Option<Timestamp>,
    ) -> Result<Option<Timestamp>> {
        if is_blank(input) {
            return Ok(None);
        }
        convert::local_input_to_utc_near(input, ctx.timezone(), current).map(Some)
    }

    fn to_local(&self, instant: Timestamp, ctx: &FormContext) -> String {
        convert::utc_to_local_input(instant, ctx.timezone(), self.precision)
    }

    fn warn_on_inverted_bounds(&self) {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                warn!("{}: min {min} is after max {max}", self.options.label);
            }
        }
    }
}

impl FieldBinder for DateTimeField {
    type Value = Timestamp;

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn render(&self, value: Option<&Timestamp>, ctx: &FormContext) -> RenderedField {
        let mut field = RenderedField::new(&self.options, InputKind::DateTimeLocal, ctx);
        field.value = value
            .map(|instant| self.to_local(*instant, ctx))
            .unwrap_or_default();
        field.min = self.min.map(|min| self.to_local(min, ctx));
        field.max = self.max.map(|max| self.to_local(max, ctx));
        field
    }

    fn commit(&self, input: &str, ctx: &FormContext) -> Result<Option<Timestamp>> {
        self.commit_near(input, ctx, None)
    }
}

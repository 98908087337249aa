//! Binder for wall-clock times.

use super::{is_blank, FieldBinder, FieldOptions, InputKind, RenderedField};
use crate::{error::Result, timezone::FormContext, value::ClockTime};

/// Binds an `Option<ClockTime>` to a `time` control without any conversion.
///
/// The zone is only ever used for the label annotation.
#[derive(Debug, Clone)]
pub struct ClockTimeField {
    options: FieldOptions,
    min: Option<ClockTime>,
    max: Option<ClockTime>,
}

impl ClockTimeField {
    pub fn new(options: impl Into<FieldOptions>) -> Self {
        Self {
            options: options.into(),
            min: None,
            max: None,
        }
    }

    pub fn with_min(mut self, min: ClockTime) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: ClockTime) -> Self {
        self.max = Some(max);
        self
    }
}

impl FieldBinder for ClockTimeField {
    type Value = ClockTime;

    fn options(&self) -> &FieldOptions {
        &self.options
    }

    fn render(&self, value: Option<&ClockTime>, ctx: &FormContext) -> RenderedField {
        let mut field = RenderedField::new(&self.options, InputKind::Time, ctx);
        field.value = value.map(|v| v.as_str().to_string()).unwrap_or_default();
        field.min = self.min.as_ref().map(|min| min.as_str().to_string());
        field.max = self.max.as_ref().map(|max| max.as_str().to_string());
        field
    }

    fn commit(&self, input: &str, _ctx: &FormContext) -> Result<Option<ClockTime>> {
        if is_blank(input) {
            return Ok(None);
        }
        Ok(Some(ClockTime::new(input)))
    }
}

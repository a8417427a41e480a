//! The customer details form.
//!
//! Seven bounded integer controls, each with a declared minimum, maximum,
//! default, and step (see the `FieldSpec` constants in `domain`). Values
//! outside a control's bounds are unreachable: every mutation clamps. The
//! form's only output is a [`FeatureRecord`] assembled in the fixed field
//! order the scaler/model pairs expect.

use crate::domain::{FeatureField, FeatureRecord, FEATURE_COUNT};

/// Current values of the seven form controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormState {
    values: [i64; FEATURE_COUNT],
}

impl FormState {
    /// A form populated with every field's declared default.
    pub fn new() -> Self {
        let mut values = [0; FEATURE_COUNT];
        for field in FeatureField::ALL {
            values[field.index()] = field.spec().default;
        }
        Self { values }
    }

    /// A form populated with the given values, clamped to each field's bounds.
    pub fn with_values(values: [i64; FEATURE_COUNT]) -> Self {
        let mut form = Self { values };
        for field in FeatureField::ALL {
            form.values[field.index()] = field.spec().clamp(form.values[field.index()]);
        }
        form
    }

    pub fn value(&self, field: FeatureField) -> i64 {
        self.values[field.index()]
    }

    /// Set a field, clamping to its declared bounds.
    pub fn set(&mut self, field: FeatureField, value: i64) {
        self.values[field.index()] = field.spec().clamp(value);
    }

    /// Move a field by `delta` steps of its declared increment, clamped.
    pub fn step(&mut self, field: FeatureField, delta: i64) {
        let spec = field.spec();
        let current = self.values[field.index()];
        let next = current.saturating_add(spec.step.saturating_mul(delta));
        self.values[field.index()] = spec.clamp(next);
    }

    /// Restore every field to its declared default.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Assemble the current values into an immutable feature record.
    pub fn record(&self) -> FeatureRecord {
        FeatureRecord::from_values(self.values)
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

use crate::*;
use ::indexmap::IndexMap;

#[cfg(feature = "serde")]
use ::serde::{Deserialize, Serialize};

/// Failed rule names keyed by field label, in declaration order.
#[derive(AsRef, AsMut, Clone, Debug, Default, Deref, DerefMut, Eq, From, Into, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(transparent))]
pub struct ErrorMap(pub IndexMap<String, Vec<String>>);

/// Submitted values keyed by field label, in declaration order.
#[derive(AsRef, AsMut, Clone, Debug, Default, Deref, DerefMut, Eq, From, Into, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(transparent))]
pub struct FormuValues(pub IndexMap<String, String>);

/// Result of submitting a form.
#[derive(Clone, Debug, Eq, IsVariant, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(tag = "status", content = "data", rename_all = "snake_case"))]
pub enum FormuOutcome {
    Success(FormuValues),
    Invalid(ErrorMap),
}

/// A loaded field: its declaration and current value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldState {
    pub input: FormuInput,
    pub value: String,
}

impl FieldState {
    pub fn new(input: FormuInput) -> Self {
        let value = input.initial_value();
        Self { input, value }
    }
}

pub(crate) fn value_of<'a>(fields: &'a [FieldState], ref_: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|field| field.input.ref_.as_deref() == Some(ref_))
        .map(|field| field.value.as_str())
}

/// The framework-independent form engine behind [`FormuStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormuState {
    fields: Vec<FieldState>,
    errors: ErrorMap,
    submitted: bool,
    generation: usize,
    failure: Option<FormuError>,
}

impl FormuState {
    pub fn new(inputs: impl IntoIterator<Item = FormuInput>) -> Self {
        let mut state = Self::default();
        state.load(inputs);
        state
    }

    /// Replaces the declared fields, starting each at its declared value.
    pub fn load(&mut self, inputs: impl IntoIterator<Item = FormuInput>) {
        self.fields = inputs.into_iter().map(FieldState::new).collect();
        self.errors.clear();
        self.submitted = false;
        self.failure = None;
        self.generation += 1;
        tracing::debug!(fields = self.fields.len(), generation = self.generation, "loaded form inputs");
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        match self.fields.get_mut(index) {
            Some(field) => field.value = value.into(),
            None => tracing::warn!(index, fields = self.fields.len(), "ignoring value for unknown field index"),
        }
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|field| field.value.as_str())
    }

    pub fn value_of(&self, ref_: &str) -> Option<&str> {
        value_of(&self.fields, ref_)
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn field_errors(&self, label: &str) -> &[String] {
        self.errors.get(label).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the last check passed.
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Incremented on every [`load`](Self::load).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Configuration error raised by the last check, if any.
    pub fn failure(&self) -> Option<&FormuError> {
        self.failure.as_ref()
    }

    /// Runs every declared validation and records the failures by label.
    ///
    /// Returns whether the form may be submitted: no field failed and at least
    /// one field is loaded. An unknown validator or a lookup of an unknown ref
    /// aborts the check, leaving the previous errors in place and the form
    /// unsubmitted.
    pub fn check(&mut self, registry: &Registry) -> Result<bool, FormuError> {
        let errors = match collect_errors(&self.fields, registry) {
            Ok(errors) => errors,
            Err(err) => {
                self.submitted = false;
                self.failure = Some(err.clone());
                return Err(err);
            }
        };
        self.submitted = errors.is_empty() && !self.fields.is_empty();
        self.errors = errors;
        self.failure = None;
        tracing::debug!(submitted = self.submitted, failed_fields = self.errors.len(), "checked form");
        Ok(self.submitted)
    }

    pub fn submit(&mut self, registry: &Registry) -> Result<FormuOutcome, FormuError> {
        Ok(match self.check(registry)? {
            true => FormuOutcome::Success(self.values()),
            false => FormuOutcome::Invalid(self.errors.clone()),
        })
    }

    /// Current values keyed by label, without submit inputs.
    pub fn values(&self) -> FormuValues {
        FormuValues(
            self.fields
                .iter()
                .filter(|field| !field.input.is_submit())
                .map(|field| (field.input.label.clone(), field.value.clone()))
                .collect(),
        )
    }
}

fn collect_errors(fields: &[FieldState], registry: &Registry) -> Result<ErrorMap, FormuError> {
    let mut errors = ErrorMap::default();
    for field in fields {
        for rule in &field.input.validations {
            let validator = registry
                .validator(rule.name())
                .ok_or_else(|| FormuError::UnknownValidator(rule.name().to_string()))?;
            let helpers = ValidationHelpers {
                validator: rule.name(),
                args: rule.args(),
                fields,
            };
            if !validator(&field.value, &helpers)? {
                errors
                    .entry(field.input.label.clone())
                    .or_default()
                    .push(rule.name().to_string());
            }
        }
    }
    Ok(errors)
}

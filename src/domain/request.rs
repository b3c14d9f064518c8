// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion requests and outcomes.

use crate::domain::type_key::TypeKey;
use crate::domain::value::Value;

/// One conversion attempt: a value and the type it should become.
///
/// The source type is derived from the value; for `null` it is absent and
/// only null-aware strategies apply.
///
/// # Examples
///
/// ```
/// use convertex::domain::{ConversionRequest, TypeKey, Value};
///
/// let request = ConversionRequest::new(Value::from("42"), TypeKey::of::<i32>());
/// assert_eq!(request.source_type(), Some(TypeKey::of::<String>()));
/// assert_eq!(request.target_type(), TypeKey::of::<i32>());
/// assert!(!request.null_to_default());
/// ```
#[derive(Clone, Debug)]
pub struct ConversionRequest {
    value: Value,
    target: TypeKey,
    null_to_default: bool,
}

impl ConversionRequest {
    /// Creates a request without null-to-default semantics.
    pub fn new(value: Value, target: TypeKey) -> Self {
        ConversionRequest {
            value,
            target,
            null_to_default: false,
        }
    }

    /// Requests that `null` converts to the target's empty value.
    pub fn with_null_to_default(mut self, enabled: bool) -> Self {
        self.null_to_default = enabled;
        self
    }

    /// The value being converted.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The runtime type of the value, absent for `null`.
    pub fn source_type(&self) -> Option<TypeKey> {
        self.value.type_key()
    }

    /// The requested type, possibly nullable.
    pub fn target_type(&self) -> TypeKey {
        self.target
    }

    /// Whether `null` should become the target's empty value.
    pub fn null_to_default(&self) -> bool {
        self.null_to_default
    }
}

/// The result of one strategy, or of a whole chain.
///
/// A strategy either produces a value or declines; faults travel separately as
/// errors.
#[derive(Clone, Debug)]
pub enum ConversionOutcome {
    /// The converted value.
    Success(Value),
    /// The strategy does not apply to the request.
    Decline,
}

impl ConversionOutcome {
    /// Returns `true` for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Success(_))
    }

    /// Returns the converted value, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            ConversionOutcome::Success(value) => Some(value),
            ConversionOutcome::Decline => None,
        }
    }
}

impl From<Option<Value>> for ConversionOutcome {
    fn from(value: Option<Value>) -> Self {
        value.map_or(ConversionOutcome::Decline, ConversionOutcome::Success)
    }
}

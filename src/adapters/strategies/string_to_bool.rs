// SPDX-License-Identifier: MIT OR Apache-2.0

//! String-to-boolean strategy.

use crate::domain::{ConversionOutcome, ConversionRequest, Result, TypeKey, Value};
use crate::ports::{ConversionContext, ConversionStrategy};

/// Strings recognized as `true`, compared trimmed and case-insensitively.
const TRUTHY: [&str; 4] = ["true", "yes", "ok", "1"];

/// Lenient string to `bool` conversion.
///
/// `"true"`, `"yes"`, `"ok"` and `"1"` (trimmed, any case) become `true`; every
/// other string, including `"false"`, `"no"`, `"0"`, `""` and arbitrary text,
/// becomes `false`. Only non-string sources and other targets are declined.
///
/// # Examples
///
/// ```rust
/// use convertex::adapters::StringToBoolStrategy;
/// use convertex::domain::{ConversionRequest, ConverterOptions, TypeKey, TypeTable, Value};
/// use convertex::ports::{ConversionContext, ConversionStrategy};
///
/// let types = TypeTable::new();
/// let options = ConverterOptions::default();
/// let ctx = ConversionContext::new(&types, &options);
///
/// let request = ConversionRequest::new(Value::from(" Yes "), TypeKey::of::<bool>());
/// let value = StringToBoolStrategy.try_convert(&request, &ctx).unwrap().into_value().unwrap();
/// assert_eq!(value.downcast_ref::<bool>(), Some(&true));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StringToBoolStrategy;

impl StringToBoolStrategy {
    /// The strategy name.
    pub const NAME: &'static str = "string-to-bool";

    /// Interprets a string as a boolean.
    pub fn parse(text: &str) -> bool {
        let text = text.trim();
        TRUTHY.iter().any(|truthy| truthy.eq_ignore_ascii_case(text))
    }
}

impl ConversionStrategy for StringToBoolStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn try_convert(
        &self,
        request: &ConversionRequest,
        _ctx: &ConversionContext<'_>,
    ) -> Result<ConversionOutcome> {
        if !request.target_type().same_type(&TypeKey::of::<bool>()) {
            return Ok(ConversionOutcome::Decline);
        }
        Ok(request
            .value()
            .downcast_ref::<String>()
            .map(|text| Value::from(Self::parse(text)))
            .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConverterOptions, TypeTable};

    fn run(value: Value, target: TypeKey) -> Option<bool> {
        let types = TypeTable::new();
        let options = ConverterOptions::default();
        let ctx = ConversionContext::new(&types, &options);
        StringToBoolStrategy
            .try_convert(&ConversionRequest::new(value, target), &ctx)
            .unwrap()
            .into_value()
            .and_then(|v| v.into_inner::<bool>())
    }

    #[test]
    fn test_truthy_values() {
        for text in ["true", "TrUe", " true ", "yes", "YES", "ok", "Ok", "1"] {
            assert_eq!(
                run(Value::from(text), TypeKey::of::<bool>()),
                Some(true),
                "Failed for value: {}",
                text
            );
        }
    }

    #[test]
    fn test_everything_else_is_false() {
        for text in ["false", "no", "0", "hello", "", "  ", "on", "2"] {
            assert_eq!(
                run(Value::from(text), TypeKey::of::<bool>()),
                Some(false),
                "Failed for value: {}",
                text
            );
        }
    }

    #[test]
    fn test_nullable_bool_target() {
        assert_eq!(run(Value::from("ok"), TypeKey::nullable::<bool>()), Some(true));
    }

    #[test]
    fn test_declines_null_and_non_strings() {
        assert_eq!(run(Value::null(), TypeKey::of::<bool>()), None);
        assert_eq!(run(Value::from(1), TypeKey::of::<bool>()), None);
        assert_eq!(run(Value::from("true"), TypeKey::of::<i32>()), None);
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enum strategy.

use crate::domain::scalar::Scalar;
use crate::domain::{ConversionOutcome, ConversionRequest, EnumInfo, PrimitiveKind, Result, Value};
use crate::ports::{ConversionContext, ConversionStrategy};

/// Conversions into and out of described enums.
///
/// Into an enum:
/// - a string matches a member name, trimmed and case-insensitively; there is
///   no fallback to parsing the string as a number,
/// - an integer matches a member's underlying value; undefined values decline.
///
/// Out of an enum:
/// - to a string, the member name,
/// - to a numeric type, the underlying value,
/// - anything else declines.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnumStrategy;

impl EnumStrategy {
    /// The strategy name.
    pub const NAME: &'static str = "enum";

    fn into_enum(info: &EnumInfo, value: &Value) -> Option<Value> {
        let member = if let Some(text) = value.downcast_ref::<String>() {
            info.by_name(text)
        } else {
            let kind = value.type_key()?.primitive()?;
            if !kind.is_integral() {
                return None;
            }
            match Scalar::from_value(value)? {
                Scalar::Int(number) => info.by_underlying(i64::try_from(number).ok()?),
                _ => None,
            }
        };
        member.map(|m| m.value().clone())
    }

    fn from_enum(
        info: &EnumInfo,
        value: &Value,
        target: PrimitiveKind,
        ctx: &ConversionContext<'_>,
    ) -> Option<Value> {
        match target {
            PrimitiveKind::String => info
                .member_of(value)
                .map(|member| Value::from(member.name())),
            kind if kind.is_numeric() => {
                let underlying = info.underlying_of(value)?;
                Scalar::Int(i128::from(underlying)).convert(kind, ctx.options())
            }
            _ => None,
        }
    }
}

impl ConversionStrategy for EnumStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn try_convert(
        &self,
        request: &ConversionRequest,
        ctx: &ConversionContext<'_>,
    ) -> Result<ConversionOutcome> {
        let Some(source) = request.source_type() else {
            return Ok(ConversionOutcome::Decline);
        };
        let target = request.target_type().underlying();
        let value = request.value();

        if let Some(info) = ctx.enumeration(&target) {
            if source.same_type(&target) {
                return Ok(ConversionOutcome::Success(value.clone()));
            }
            return Ok(Self::into_enum(info, value).into());
        }

        match (ctx.enumeration(&source), target.primitive()) {
            (Some(info), Some(kind)) => Ok(Self::from_enum(info, value, kind, ctx).into()),
            _ => Ok(ConversionOutcome::Decline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConverterOptions, EnumType, TypeDescriptor, TypeKey, TypeTable};
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Number {
        One = 1,
        Two = 2,
        Three = 3,
    }

    impl EnumType for Number {
        fn members() -> Vec<(&'static str, Self)> {
            vec![
                ("One", Number::One),
                ("Two", Number::Two),
                ("Three", Number::Three),
            ]
        }

        fn underlying(&self) -> i64 {
            *self as i64
        }
    }

    fn run(value: impl Into<Value>, target: TypeKey) -> Option<Value> {
        let mut types = TypeTable::new();
        types.insert(TypeDescriptor::for_enum::<Number>());
        let options = ConverterOptions::default();
        let ctx = ConversionContext::new(&types, &options);
        EnumStrategy
            .try_convert(&ConversionRequest::new(value.into(), target), &ctx)
            .unwrap()
            .into_value()
    }

    fn to_number(value: impl Into<Value>) -> Option<Number> {
        run(value, TypeKey::of::<Number>()).and_then(|v| v.into_inner::<Number>())
    }

    #[test]
    fn test_string_to_enum() {
        assert_eq!(to_number("Two"), Some(Number::Two));
        assert_eq!(to_number(" THREE "), Some(Number::Three));
        assert_eq!(to_number("XXX"), None);
        assert_eq!(to_number("2"), None);
    }

    #[test]
    fn test_integer_to_enum() {
        assert_eq!(to_number(1i32), Some(Number::One));
        assert_eq!(to_number(3u64), Some(Number::Three));
        assert_eq!(to_number(5i32), None);
        assert_eq!(to_number(2.0f64), None);
    }

    #[test]
    fn test_nullable_enum_target() {
        assert_eq!(
            run("one", TypeKey::nullable::<Number>()).and_then(|v| v.into_inner::<Number>()),
            Some(Number::One)
        );
    }

    #[test]
    fn test_enum_to_string_and_numbers() {
        assert_eq!(
            run(Value::new(Number::One), TypeKey::of::<String>())
                .and_then(|v| v.into_inner::<String>()),
            Some("One".to_string())
        );
        assert_eq!(
            run(Value::new(Number::One), TypeKey::of::<Decimal>())
                .and_then(|v| v.into_inner::<Decimal>()),
            Some(Decimal::ONE)
        );
        assert_eq!(
            run(Value::new(Number::Three), TypeKey::of::<u8>()).and_then(|v| v.into_inner::<u8>()),
            Some(3)
        );
    }

    #[test]
    fn test_enum_to_unrelated_type_declines() {
        assert!(run(Value::new(Number::One), TypeKey::of::<NaiveDateTime>()).is_none());
        assert!(run(Value::new(Number::One), TypeKey::of::<bool>()).is_none());
    }

    #[test]
    fn test_undescribed_types_decline() {
        assert!(run("Two", TypeKey::of::<i32>()).is_none());
        assert!(run(Value::null(), TypeKey::of::<Number>()).is_none());
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Primitive convertible strategy.

use crate::domain::scalar::Scalar;
use crate::domain::{ConversionOutcome, ConversionRequest, PrimitiveKind, Result};
use crate::ports::{ConversionContext, ConversionStrategy};

/// Standard conversions between the built-in primitives.
///
/// Numbers, `bool`, `char`, `Decimal`, strings and the chrono date/time types
/// convert into each other where a conversion is defined; narrowing is range
/// checked, floats round half to even, strings are trimmed and parsed. Nullable
/// targets are unwrapped. A parse or range failure declines.
///
/// Enums take part through their underlying integer: an enum source converts
/// to numeric and string targets as that integer and declines every other
/// primitive, and an integer source converts into an enum target when it
/// equals a defined member's value.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertibleStrategy;

impl ConvertibleStrategy {
    /// The strategy name.
    pub const NAME: &'static str = "convertible";
}

impl ConversionStrategy for ConvertibleStrategy {
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
        let value = request.value();
        let target = request.target_type().underlying();
        let scalar = match Scalar::from_value(value) {
            Some(scalar) => scalar,
            None => match ctx
                .enumeration(&source)
                .and_then(|info| info.underlying_of(value))
            {
                Some(underlying) => {
                    let accepted = target
                        .primitive()
                        .is_some_and(|kind| kind.is_numeric() || kind == PrimitiveKind::String);
                    if !accepted {
                        return Ok(ConversionOutcome::Decline);
                    }
                    Scalar::Int(i128::from(underlying))
                }
                None => return Ok(ConversionOutcome::Decline),
            },
        };

        if let Some(kind) = target.primitive() {
            return Ok(scalar.convert(kind, ctx.options()).into());
        }

        let integral_source = source.primitive().is_some_and(PrimitiveKind::is_integral);
        if let (Some(info), Scalar::Int(number), true) =
            (ctx.enumeration(&target), &scalar, integral_source)
        {
            let member = i64::try_from(*number)
                .ok()
                .and_then(|underlying| info.by_underlying(underlying));
            return Ok(member.map(|m| m.value().clone()).into());
        }

        Ok(ConversionOutcome::Decline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConverterOptions, EnumType, TypeDescriptor, TypeKey, TypeTable, Value,
    };
    use rust_decimal::Decimal;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Tier {
        Bronze = 1,
        Silver = 2,
    }

    impl EnumType for Tier {
        fn members() -> Vec<(&'static str, Self)> {
            vec![("Bronze", Tier::Bronze), ("Silver", Tier::Silver)]
        }

        fn underlying(&self) -> i64 {
            *self as i64
        }
    }

    fn run(value: impl Into<Value>, target: TypeKey) -> Option<Value> {
        let mut types = TypeTable::new();
        types.insert(TypeDescriptor::for_enum::<Tier>());
        let options = ConverterOptions::default();
        let ctx = ConversionContext::new(&types, &options);
        ConvertibleStrategy
            .try_convert(&ConversionRequest::new(value.into(), target), &ctx)
            .unwrap()
            .into_value()
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(
            run(42i32, TypeKey::of::<i64>()).and_then(|v| v.into_inner::<i64>()),
            Some(42)
        );
        assert_eq!(
            run("12.5", TypeKey::of::<Decimal>()).and_then(|v| v.into_inner::<Decimal>()),
            Some(Decimal::new(125, 1))
        );
        assert!(run(1000i32, TypeKey::of::<i8>()).is_none());
    }

    #[test]
    fn test_nullable_target_is_unwrapped() {
        assert_eq!(
            run("7", TypeKey::nullable::<u16>()).and_then(|v| v.into_inner::<u16>()),
            Some(7)
        );
    }

    #[test]
    fn test_parse_failure_declines() {
        assert!(run("seven", TypeKey::of::<i32>()).is_none());
    }

    #[test]
    fn test_enum_source_uses_underlying_value() {
        assert_eq!(
            run(Value::new(Tier::Silver), TypeKey::of::<String>())
                .and_then(|v| v.into_inner::<String>()),
            Some("2".to_string())
        );
        assert_eq!(
            run(Value::new(Tier::Bronze), TypeKey::of::<f64>()).and_then(|v| v.into_inner::<f64>()),
            Some(1.0)
        );
    }

    #[test]
    fn test_enum_source_declines_unrelated_primitives() {
        assert!(run(Value::new(Tier::Bronze), TypeKey::of::<bool>()).is_none());
        assert!(run(Value::new(Tier::Bronze), TypeKey::of::<char>()).is_none());
        assert!(run(Value::new(Tier::Bronze), TypeKey::of::<chrono::NaiveDate>()).is_none());
        assert!(run(Value::new(Tier::Bronze), TypeKey::nullable::<i64>()).is_some());
    }

    #[test]
    fn test_integer_to_defined_enum_member() {
        assert_eq!(
            run(2u8, TypeKey::of::<Tier>()).and_then(|v| v.into_inner::<Tier>()),
            Some(Tier::Silver)
        );
        assert!(run(5i32, TypeKey::of::<Tier>()).is_none());
        assert!(run("2", TypeKey::of::<Tier>()).is_none());
    }

    #[test]
    fn test_non_primitive_declines() {
        assert!(run(vec![1u8], TypeKey::of::<String>()).is_none());
        assert!(run(Value::null(), TypeKey::of::<String>()).is_none());
    }
}

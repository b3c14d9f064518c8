// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type-converter based strategy.

use crate::domain::{ConversionOutcome, ConversionRequest, ConvertError, Result};
use crate::ports::{ConversionContext, ConversionStrategy};

/// Delegates to the [`TypeConverter`](crate::ports::TypeConverter) associated
/// with the target or the source type.
///
/// The target type's converter is asked first whether it can convert from the
/// source type; failing that, the source type's converter is asked whether it
/// can convert to the target type. If neither reports capability the strategy
/// declines. Once a converter has accepted, its errors are host failures.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeConverterStrategy;

impl TypeConverterStrategy {
    /// The strategy name.
    pub const NAME: &'static str = "type-converter";
}

impl ConversionStrategy for TypeConverterStrategy {
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

        let target_converter = ctx
            .descriptor(&target)
            .and_then(|descriptor| descriptor.converter())
            .filter(|converter| converter.can_convert_from(&source));
        if let Some(converter) = target_converter {
            tracing::trace!("Converting {} via the converter of {}", source, target);
            return converter
                .convert_from(value)
                .map(ConversionOutcome::Success)
                .map_err(|e| ConvertError::host_failure(Self::NAME, e));
        }

        let source_converter = ctx
            .descriptor(&source)
            .and_then(|descriptor| descriptor.converter())
            .filter(|converter| converter.can_convert_to(&target));
        if let Some(converter) = source_converter {
            tracing::trace!("Converting to {} via the converter of {}", target, source);
            return converter
                .convert_to(value, &target)
                .map(ConversionOutcome::Success)
                .map_err(|e| ConvertError::host_failure(Self::NAME, e));
        }

        Ok(ConversionOutcome::Decline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoxError, ConverterOptions, TypeDescriptor, TypeKey, TypeTable, Value};
    use crate::ports::TypeConverter;

    #[derive(Clone, Debug, PartialEq)]
    struct Rgb(u8, u8, u8);

    struct RgbConverter;

    impl TypeConverter for RgbConverter {
        fn can_convert_from(&self, source: &TypeKey) -> bool {
            *source == TypeKey::of::<String>()
        }

        fn convert_from(&self, value: &Value) -> std::result::Result<Value, BoxError> {
            let text = value.downcast_ref::<String>().ok_or("expected a string")?;
            let hex = text.trim().trim_start_matches('#');
            if hex.len() != 6 {
                return Err(format!("'{}' is not a hex color", text).into());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
            Ok(Value::new(Rgb(channel(0)?, channel(2)?, channel(4)?)))
        }

        fn can_convert_to(&self, target: &TypeKey) -> bool {
            *target == TypeKey::of::<String>()
        }

        fn convert_to(
            &self,
            value: &Value,
            _target: &TypeKey,
        ) -> std::result::Result<Value, BoxError> {
            let rgb = value.downcast_ref::<Rgb>().ok_or("expected a color")?;
            Ok(Value::from(format!("#{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2)))
        }
    }

    fn run(value: impl Into<Value>, target: TypeKey) -> Result<ConversionOutcome> {
        let mut types = TypeTable::new();
        types.insert(
            TypeDescriptor::builder::<Rgb>()
                .with_converter(RgbConverter)
                .build(),
        );
        let options = ConverterOptions::default();
        let ctx = ConversionContext::new(&types, &options);
        TypeConverterStrategy.try_convert(&ConversionRequest::new(value.into(), target), &ctx)
    }

    #[test]
    fn test_convert_from() {
        let value = run("#ff8000", TypeKey::of::<Rgb>())
            .unwrap()
            .into_value()
            .unwrap();
        assert_eq!(value.downcast_ref::<Rgb>(), Some(&Rgb(255, 128, 0)));
    }

    #[test]
    fn test_convert_to() {
        let value = run(Value::new(Rgb(1, 2, 3)), TypeKey::of::<String>())
            .unwrap()
            .into_value()
            .unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("#010203"));
    }

    #[test]
    fn test_incapable_converter_declines() {
        assert!(!run(5i32, TypeKey::of::<Rgb>()).unwrap().is_success());
        assert!(!run(Value::new(Rgb(0, 0, 0)), TypeKey::of::<i32>())
            .unwrap()
            .is_success());
    }

    #[test]
    fn test_converter_error_is_host_failure() {
        let result = run("not a color", TypeKey::of::<Rgb>());
        assert!(matches!(result, Err(ConvertError::HostFailure { .. })));
    }
}

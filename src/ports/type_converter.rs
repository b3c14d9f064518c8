// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type converter trait definition.
//!
//! A `TypeConverter` is a converter object associated with a type through its
//! [`TypeDescriptor`](crate::domain::TypeDescriptor). The type-converter strategy
//! delegates to it entirely: first to the target type's converter ("convert
//! from"), then to the source type's converter ("convert to").

use crate::domain::{BoxError, TypeKey, Value};

/// A converter object attached to a type.
///
/// Implementations report capability through the `can_*` methods and are only
/// asked to convert after reporting they can. An error from `convert_from` or
/// `convert_to` surfaces as a host failure.
///
/// # Examples
///
/// ```rust
/// use convertex::domain::{BoxError, TypeKey, Value};
/// use convertex::ports::TypeConverter;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Percent(u8);
///
/// struct PercentConverter;
///
/// impl TypeConverter for PercentConverter {
///     fn can_convert_from(&self, source: &TypeKey) -> bool {
///         *source == TypeKey::of::<String>()
///     }
///
///     fn convert_from(&self, value: &Value) -> Result<Value, BoxError> {
///         let text = value.downcast_ref::<String>().ok_or("expected a string")?;
///         let number = text.trim().trim_end_matches('%').parse::<u8>()?;
///         Ok(Value::new(Percent(number)))
///     }
/// }
///
/// let converted = PercentConverter.convert_from(&Value::from("42%")).unwrap();
/// assert_eq!(converted.downcast_ref::<Percent>(), Some(&Percent(42)));
/// ```
pub trait TypeConverter: Send + Sync {
    /// Returns `true` if values of `source` can be converted into the owning type.
    fn can_convert_from(&self, source: &TypeKey) -> bool {
        let _ = source;
        false
    }

    /// Converts `value` into the owning type.
    fn convert_from(&self, value: &Value) -> Result<Value, BoxError> {
        Err(format!("conversion from {} is not supported", value.type_name()).into())
    }

    /// Returns `true` if instances of the owning type can be converted into `target`.
    fn can_convert_to(&self, target: &TypeKey) -> bool {
        let _ = target;
        false
    }

    /// Converts an instance of the owning type into `target`.
    fn convert_to(&self, value: &Value, target: &TypeKey) -> Result<Value, BoxError> {
        let _ = value;
        Err(format!("conversion to {} is not supported", target).into())
    }
}

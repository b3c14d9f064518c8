// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide default converter.
//!
//! The free functions in this module forward to one lazily created
//! [`Converter`] with the built-in strategies and default options. Strategies
//! and type descriptors registered here are visible to every later call from
//! any thread.
//!
//! # Examples
//!
//! ```rust
//! use convertex::convert_ex;
//! use convertex::domain::Value;
//!
//! # fn main() -> convertex::domain::Result<()> {
//! let n: i64 = convert_ex::to("1234")?;
//! assert_eq!(n, 1234);
//! assert!(convert_ex::is_empty(&Value::from("")));
//! assert_eq!(convert_ex::try_to::<bool>(Value::null())?, None);
//! # Ok(())
//! # }
//! ```

use crate::domain::{Result, TypeDescriptor, TypeKey, Value};
use crate::ports::ConversionStrategy;
use crate::service::chain::Position;
use crate::service::converter::Converter;
use once_cell::sync::Lazy;
use std::any::Any;
use std::sync::Arc;

static DEFAULT_CONVERTER: Lazy<Converter> = Lazy::new(Converter::new);

/// Returns the process-wide converter.
pub fn converter() -> &'static Converter {
    &DEFAULT_CONVERTER
}

/// See [`Converter::to`].
pub fn to<T: Any + Send + Sync + Clone>(value: impl Into<Value>) -> Result<T> {
    converter().to(value)
}

/// See [`Converter::to_nullable`].
pub fn to_nullable<T: Any + Send + Sync + Clone>(value: impl Into<Value>) -> Result<Option<T>> {
    converter().to_nullable(value)
}

/// See [`Converter::try_to`].
pub fn try_to<T: Any + Send + Sync + Clone>(value: impl Into<Value>) -> Result<Option<T>> {
    converter().try_to(value)
}

/// See [`Converter::change_type`].
pub fn change_type(value: &Value, target: &TypeKey) -> Result<Value> {
    converter().change_type(value, target)
}

/// See [`Converter::try_change_type`].
pub fn try_change_type(value: &Value, target: &TypeKey) -> Result<Option<Value>> {
    converter().try_change_type(value, target)
}

/// See [`Converter::is_empty`].
pub fn is_empty(value: &Value) -> bool {
    converter().is_empty(value)
}

/// See [`Converter::default_empty_value`].
pub fn default_empty_value<T: Any + Send + Sync + Clone>() -> Option<T> {
    converter().default_empty_value::<T>()
}

/// See [`Converter::default_empty_value_of`].
pub fn default_empty_value_of(key: &TypeKey) -> Value {
    converter().default_empty_value_of(key)
}

/// See [`Converter::register_strategy`].
pub fn register_strategy(strategy: Arc<dyn ConversionStrategy>, position: Position) -> Result<()> {
    converter().register_strategy(strategy, position)
}

/// See [`Converter::unregister_strategy`].
pub fn unregister_strategy(name: &str) -> bool {
    converter().unregister_strategy(name)
}

/// See [`Converter::register_type`].
pub fn register_type(descriptor: TypeDescriptor) -> bool {
    converter().register_type(descriptor)
}

/// See [`Converter::unregister_type`].
pub fn unregister_type(key: &TypeKey) -> bool {
    converter().unregister_type(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConversionOutcome, ConversionRequest, EnumType};
    use crate::ports::ConversionContext;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Season {
        Winter = 0,
        Summer = 6,
    }

    impl EnumType for Season {
        fn members() -> Vec<(&'static str, Self)> {
            vec![("Winter", Season::Winter), ("Summer", Season::Summer)]
        }

        fn underlying(&self) -> i64 {
            *self as i64
        }
    }

    #[test]
    fn test_forwarding() {
        assert_eq!(to::<u8>("7").unwrap(), 7);
        assert_eq!(to_nullable::<String>(Value::null()).unwrap(), None);
        assert_eq!(try_to::<u8>("700").unwrap(), None);
        assert!(change_type(&Value::from(1), &TypeKey::of::<f64>()).is_ok());
        assert!(try_change_type(&Value::from("x"), &TypeKey::of::<f64>())
            .unwrap()
            .is_none());
        assert!(is_empty(&Value::from(0u64)));
        assert_eq!(default_empty_value::<bool>(), Some(false));
        assert!(default_empty_value_of(&TypeKey::of::<Vec<u8>>()).is_null());
    }

    #[test]
    fn test_registered_type_is_visible() {
        register_type(TypeDescriptor::for_enum::<Season>());
        assert_eq!(to::<Season>("summer").unwrap(), Season::Summer);
        assert_eq!(to::<Season>(Value::null()).unwrap(), Season::Winter);
        assert!(unregister_type(&TypeKey::of::<Season>()));
        assert!(try_to::<Season>("summer").unwrap().is_none());
    }

    struct Shouting;

    impl ConversionStrategy for Shouting {
        fn name(&self) -> &str {
            "convert-ex-test-shouting"
        }

        fn try_convert(
            &self,
            request: &ConversionRequest,
            _ctx: &ConversionContext<'_>,
        ) -> Result<ConversionOutcome> {
            Ok(request
                .value()
                .downcast_ref::<char>()
                .filter(|_| request.target_type() == TypeKey::of::<Vec<char>>())
                .map(|c| Value::new(vec![c.to_ascii_uppercase(); 3]))
                .into())
        }
    }

    #[test]
    fn test_registered_strategy_is_visible() {
        register_strategy(Arc::new(Shouting), Position::End).unwrap();
        assert_eq!(to::<Vec<char>>('a').unwrap(), vec!['A', 'A', 'A']);
        assert!(unregister_strategy("convert-ex-test-shouting"));
        assert!(try_to::<Vec<char>>('a').unwrap().is_none());
    }
}

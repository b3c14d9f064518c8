// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in conversion strategies.
//!
//! Each strategy implements the `ConversionStrategy` port for one category of
//! source/target pair. [`default_strategies`] returns them in the order the
//! default chain consults them.

pub mod assignable_from;
pub mod byte_array_binary;
pub mod byte_array_string;
pub mod constructor;
pub mod convert_method;
pub mod convertible;
pub mod enumeration;
pub mod null_value;
pub mod static_operator;
pub mod string_to_bool;
pub mod type_converter;

pub use assignable_from::AssignableFromStrategy;
pub use byte_array_binary::ByteArrayBinaryStrategy;
pub use byte_array_string::ByteArrayStringStrategy;
pub use constructor::ConstructorStrategy;
pub use convert_method::ConvertMethodStrategy;
pub use convertible::ConvertibleStrategy;
pub use enumeration::EnumStrategy;
pub use null_value::NullValueStrategy;
pub use static_operator::StaticOperatorStrategy;
pub use string_to_bool::StringToBoolStrategy;
pub use type_converter::TypeConverterStrategy;

use crate::ports::ConversionStrategy;
use std::sync::Arc;

/// The built-in strategies in default chain order.
///
/// Null and identity handling come first. String-to-bool and enum handling
/// precede the generic primitive conversions, which would otherwise shadow them.
pub fn default_strategies() -> Vec<Arc<dyn ConversionStrategy>> {
    vec![
        Arc::new(NullValueStrategy),
        Arc::new(AssignableFromStrategy),
        Arc::new(StringToBoolStrategy),
        Arc::new(EnumStrategy),
        Arc::new(ConvertibleStrategy),
        Arc::new(TypeConverterStrategy),
        Arc::new(StaticOperatorStrategy),
        Arc::new(ConstructorStrategy),
        Arc::new(ConvertMethodStrategy),
        Arc::new(ByteArrayStringStrategy),
        Arc::new(ByteArrayBinaryStrategy),
    ]
}

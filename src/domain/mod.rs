// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the core conversion types and rules.
//!
//! This module contains the value model, type identity and declared type
//! metadata, the emptiness model, primitive conversion rules and errors. It is
//! independent of how strategies are chained and of the process-wide facade.

pub mod descriptor;
pub mod emptiness;
pub mod errors;
pub mod options;
pub mod request;
pub(crate) mod scalar;
pub mod type_key;
pub mod value;

// Re-export commonly used types
pub use descriptor::{
    Constructor, ConversionOperator, ConvertMethod, DescriptorBuilder, EnumInfo, EnumMember,
    EnumType, OperatorKind, TypeDescriptor, TypeTable, Upcast,
};
pub use errors::{BoxError, ConvertError, Result};
pub use options::{ConverterOptions, TextEncoding};
pub use request::{ConversionOutcome, ConversionRequest};
pub use type_key::{PrimitiveKind, TypeKey};
pub use value::Value;

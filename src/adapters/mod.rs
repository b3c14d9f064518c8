// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the built-in strategy and codec implementations.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer. Each strategy implements `ConversionStrategy` for one category
//! of conversion; the bincode codec implements `BinaryCodec` for serde types.

#[cfg(feature = "bincode")]
pub mod bincode_codec;
pub mod strategies;

#[cfg(feature = "bincode")]
pub use bincode_codec::BincodeCodec;
pub use strategies::{
    default_strategies, AssignableFromStrategy, ByteArrayBinaryStrategy, ByteArrayStringStrategy,
    ConstructorStrategy, ConvertMethodStrategy, ConvertibleStrategy, EnumStrategy,
    NullValueStrategy, StaticOperatorStrategy, StringToBoolStrategy, TypeConverterStrategy,
};

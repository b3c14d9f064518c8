// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture universal value conversion crate.
//!
//! This crate converts an arbitrary runtime value into an arbitrary requested
//! type by consulting an ordered, extensible chain of conversion strategies. It
//! offers must-succeed and try forms of every conversion, and a type-aware
//! notion of semantic emptiness with canonical empty values.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: the value model (`Value`, `TypeKey`), declared type
//!   metadata (`TypeDescriptor`), the emptiness model, options and errors
//! - **Ports**: trait definitions at the seams (`ConversionStrategy`,
//!   `TypeConverter`, `BinaryCodec`)
//! - **Adapters**: the built-in strategies and the bincode codec
//! - **Service**: the strategy chain, the type registry and the `Converter` facade
//!
//! # Features
//!
//! - **Strategy chain**: null, identity, string-to-bool, enum, primitive,
//!   type-converter, operator, constructor, convert-method and byte array
//!   strategies, consulted in a fixed, documented order
//! - **Declines vs. failures**: a strategy that does not apply declines; only
//!   a strategy that committed and then failed raises an error
//! - **Extensible**: register custom strategies at any position and describe
//!   your own types' converters, operators, constructors and codecs
//! - **Emptiness**: `is_empty` and canonical empty values per type
//! - **Concurrent**: conversions read immutable snapshots, registration swaps them
//!
//! # Feature Flags
//!
//! - `yaml`: Enable loading `ConverterOptions` from YAML (default)
//! - `bincode`: Enable the `BincodeCodec` binary format (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use convertex::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let converter = Converter::new();
//!
//! let amount: Decimal = converter.to("12.50")?;
//! assert_eq!(amount.to_string(), "12.50");
//!
//! assert!(converter.to::<bool>(" Yes ")?);
//! assert_eq!(converter.try_to::<u8>("300")?, None);
//! assert!(converter.is_empty(&Value::from(0)));
//! # Ok(())
//! # }
//! ```
//!
//! The same operations are available on a process-wide converter through
//! [`convert_ex`].

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use service::convert_ex;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConversionOutcome, ConversionRequest, ConvertError, ConverterOptions, EnumType, Result,
        TextEncoding, TypeDescriptor, TypeKey, Value,
    };
    pub use crate::ports::{BinaryCodec, ConversionContext, ConversionStrategy, TypeConverter};
    pub use crate::service::{Converter, ConverterBuilder, Position};
    pub use rust_decimal::Decimal;

    #[cfg(feature = "bincode")]
    pub use crate::adapters::BincodeCodec;
}

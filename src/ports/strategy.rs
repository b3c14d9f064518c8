// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion strategy trait definition.
//!
//! This module defines the `ConversionStrategy` trait, the primary port of the
//! engine. Every unit of conversion logic, built-in or host-provided, implements
//! it and is consulted by the strategy chain in order.

use crate::domain::{
    ConversionOutcome, ConversionRequest, ConverterOptions, EnumInfo, Result, TypeDescriptor,
    TypeKey, TypeTable,
};

/// Read-only state a strategy may consult while handling one request.
///
/// The context borrows one snapshot of the type registry, so a request sees a
/// consistent set of descriptors even while the host registers new ones.
#[derive(Clone, Copy, Debug)]
pub struct ConversionContext<'a> {
    types: &'a TypeTable,
    options: &'a ConverterOptions,
}

impl<'a> ConversionContext<'a> {
    /// Creates a context over a type table and options.
    pub fn new(types: &'a TypeTable, options: &'a ConverterOptions) -> Self {
        ConversionContext { types, options }
    }

    /// The type table snapshot.
    pub fn types(&self) -> &'a TypeTable {
        self.types
    }

    /// The converter options.
    pub fn options(&self) -> &'a ConverterOptions {
        self.options
    }

    /// Looks up the descriptor of a type.
    pub fn descriptor(&self, key: &TypeKey) -> Option<&'a TypeDescriptor> {
        self.types.get(key)
    }

    /// Looks up the enum metadata of a type.
    pub fn enumeration(&self, key: &TypeKey) -> Option<&'a EnumInfo> {
        self.types.get(key).and_then(TypeDescriptor::enumeration)
    }
}

/// A trait for conversion strategies.
///
/// A strategy answers one question: can it turn the request's value into the
/// target type, and if so, into what.
///
/// # Declining versus failing
///
/// A strategy that does not apply returns `Ok(ConversionOutcome::Decline)` and
/// the chain moves on. An `Err` is reserved for a strategy that applies but whose
/// underlying mechanism failed (a throwing constructor, a truncated payload). The
/// chain does not swallow such errors and does not try further strategies.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single chain is shared by every thread.
///
/// # Examples
///
/// ```rust
/// use convertex::domain::{ConversionOutcome, ConversionRequest, Result, TypeKey, Value};
/// use convertex::ports::{ConversionContext, ConversionStrategy};
///
/// struct Shout;
///
/// impl ConversionStrategy for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn try_convert(
///         &self,
///         request: &ConversionRequest,
///         _ctx: &ConversionContext<'_>,
///     ) -> Result<ConversionOutcome> {
///         match request.value().downcast_ref::<String>() {
///             Some(s) if request.target_type() == TypeKey::of::<String>() => {
///                 Ok(ConversionOutcome::Success(Value::from(s.to_uppercase())))
///             }
///             _ => Ok(ConversionOutcome::Decline),
///         }
///     }
/// }
/// ```
pub trait ConversionStrategy: Send + Sync {
    /// Returns the name of this strategy.
    ///
    /// Names identify strategies in the chain for registration positions,
    /// removal, logging and error messages.
    fn name(&self) -> &str;

    /// Attempts the conversion.
    ///
    /// # Returns
    ///
    /// * `Ok(ConversionOutcome::Success(value))` - The strategy converted the value
    /// * `Ok(ConversionOutcome::Decline)` - The strategy does not apply
    /// * `Err(ConvertError)` - The strategy applied and its mechanism failed
    fn try_convert(
        &self,
        request: &ConversionRequest,
        ctx: &ConversionContext<'_>,
    ) -> Result<ConversionOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Value;

    struct FixedStrategy;

    impl ConversionStrategy for FixedStrategy {
        fn name(&self) -> &str {
            "fixed"
        }

        fn try_convert(
            &self,
            request: &ConversionRequest,
            _ctx: &ConversionContext<'_>,
        ) -> Result<ConversionOutcome> {
            if request.target_type() == TypeKey::of::<i32>() {
                Ok(ConversionOutcome::Success(Value::from(7)))
            } else {
                Ok(ConversionOutcome::Decline)
            }
        }
    }

    #[test]
    fn test_strategy_name() {
        assert_eq!(FixedStrategy.name(), "fixed");
    }

    #[test]
    fn test_strategy_success_and_decline() {
        let types = TypeTable::new();
        let options = ConverterOptions::default();
        let ctx = ConversionContext::new(&types, &options);

        let request = ConversionRequest::new(Value::from("x"), TypeKey::of::<i32>());
        assert!(FixedStrategy.try_convert(&request, &ctx).unwrap().is_success());

        let request = ConversionRequest::new(Value::from("x"), TypeKey::of::<bool>());
        assert!(!FixedStrategy.try_convert(&request, &ctx).unwrap().is_success());
    }

    #[test]
    fn test_context_lookups() {
        let types = TypeTable::new();
        let options = ConverterOptions::default();
        let ctx = ConversionContext::new(&types, &options);
        assert!(ctx.descriptor(&TypeKey::of::<i32>()).is_none());
        assert!(ctx.enumeration(&TypeKey::of::<i32>()).is_none());
        assert!(ctx.options().null_to_default);
    }

    #[test]
    fn test_conversion_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn ConversionStrategy>>();
    }
}

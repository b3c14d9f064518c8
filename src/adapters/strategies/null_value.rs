// SPDX-License-Identifier: MIT OR Apache-2.0

//! Null value strategy.

use crate::domain::{emptiness, ConversionOutcome, ConversionRequest, Result};
use crate::ports::{ConversionContext, ConversionStrategy};

/// Converts `null` into the target's canonical empty value.
///
/// Applies only to `null` requests that ask for null-to-default semantics;
/// everything else is declined. The produced value may itself be `null` for
/// strings, byte arrays, nullable targets and reference types.
///
/// # Examples
///
/// ```rust
/// use convertex::adapters::NullValueStrategy;
/// use convertex::domain::{ConversionRequest, ConverterOptions, TypeKey, TypeTable, Value};
/// use convertex::ports::{ConversionContext, ConversionStrategy};
///
/// let types = TypeTable::new();
/// let options = ConverterOptions::default();
/// let ctx = ConversionContext::new(&types, &options);
///
/// let request = ConversionRequest::new(Value::null(), TypeKey::of::<i32>())
///     .with_null_to_default(true);
/// let value = NullValueStrategy.try_convert(&request, &ctx).unwrap().into_value().unwrap();
/// assert_eq!(value.downcast_ref::<i32>(), Some(&0));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NullValueStrategy;

impl NullValueStrategy {
    /// The strategy name.
    pub const NAME: &'static str = "null-value";
}

impl ConversionStrategy for NullValueStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn try_convert(
        &self,
        request: &ConversionRequest,
        ctx: &ConversionContext<'_>,
    ) -> Result<ConversionOutcome> {
        if !request.value().is_null() || !request.null_to_default() {
            return Ok(ConversionOutcome::Decline);
        }
        let empty = emptiness::default_empty_value(&request.target_type(), ctx.types());
        Ok(ConversionOutcome::Success(empty))
    }
}

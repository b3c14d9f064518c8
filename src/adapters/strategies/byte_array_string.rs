// SPDX-License-Identifier: MIT OR Apache-2.0

//! Byte array / string strategy.

use crate::domain::{ConversionOutcome, ConversionRequest, Result, TypeKey, Value};
use crate::ports::{ConversionContext, ConversionStrategy};

/// Converts between `String` and `Vec<u8>` with the configured text encoding.
///
/// `string -> bytes -> string` always yields the original string for strings
/// the encoding can represent. A string Latin-1 cannot represent declines.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteArrayStringStrategy;

impl ByteArrayStringStrategy {
    /// The strategy name.
    pub const NAME: &'static str = "byte-array-string";
}

impl ConversionStrategy for ByteArrayStringStrategy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn try_convert(
        &self,
        request: &ConversionRequest,
        ctx: &ConversionContext<'_>,
    ) -> Result<ConversionOutcome> {
        let target = request.target_type();
        let value = request.value();
        let encoding = ctx.options().text_encoding;

        if target.is_bytes() {
            if let Some(text) = value.downcast_ref::<String>() {
                return Ok(encoding.encode(text).map(Value::from).into());
            }
        } else if target.same_type(&TypeKey::of::<String>()) {
            if let Some(bytes) = value.downcast_ref::<Vec<u8>>() {
                return Ok(ConversionOutcome::Success(Value::from(encoding.decode(bytes))));
            }
        }
        Ok(ConversionOutcome::Decline)
    }
}

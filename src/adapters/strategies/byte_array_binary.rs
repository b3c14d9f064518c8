// SPDX-License-Identifier: MIT OR Apache-2.0

//! Byte array / binary format strategy.

use crate::domain::{ConversionOutcome, ConversionRequest, ConvertError, Result, Value};
use crate::ports::{ConversionContext, ConversionStrategy};

/// Encodes a type to `Vec<u8>` and back through its declared
/// [`BinaryCodec`](crate::ports::BinaryCodec).
///
/// Payloads the codec does not recognize decline, so a later strategy may
/// still handle them. A codec error on a recognized payload is a host failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteArrayBinaryStrategy;

impl ByteArrayBinaryStrategy {
    /// The strategy name.
    pub const NAME: &'static str = "byte-array-binary";
}

impl ConversionStrategy for ByteArrayBinaryStrategy {
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

        if target.is_bytes() {
            let Some(codec) = ctx.descriptor(&source).and_then(|d| d.codec()) else {
                return Ok(ConversionOutcome::Decline);
            };
            tracing::trace!("Encoding {} with {}", source, codec.name());
            return codec
                .encode(value)
                .map(|bytes| ConversionOutcome::from(bytes.map(Value::from)))
                .map_err(|e| ConvertError::host_failure(Self::NAME, e));
        }

        let Some(bytes) = value.downcast_ref::<Vec<u8>>() else {
            return Ok(ConversionOutcome::Decline);
        };
        let Some(codec) = ctx.descriptor(&target).and_then(|d| d.codec()) else {
            return Ok(ConversionOutcome::Decline);
        };
        tracing::trace!("Decoding {} bytes as {} with {}", bytes.len(), target, codec.name());
        let decoded = codec
            .decode(bytes)
            .map_err(|e| ConvertError::host_failure(Self::NAME, e))?;
        Ok(decoded
            .filter(|v| v.type_key().is_some_and(|key| key.same_type(&target)))
            .into())
    }
}

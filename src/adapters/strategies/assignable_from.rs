// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assignable-from strategy.

use crate::domain::{ConversionOutcome, ConversionRequest, ConvertError, Result};
use crate::ports::{ConversionContext, ConversionStrategy};

/// Passes values through unchanged when they already are of the target type.
///
/// Applies when the source type equals the target type (ignoring nullability),
/// when the target is [`TypeKey::dynamic`](crate::domain::TypeKey::dynamic), or
/// when the source type declares itself assignable to the target. The first two
/// return the very same value handle; the declared case returns the upcast view.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssignableFromStrategy;

impl AssignableFromStrategy {
    /// The strategy name.
    pub const NAME: &'static str = "assignable-from";
}

impl ConversionStrategy for AssignableFromStrategy {
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
        let target = request.target_type();
        if target.is_dynamic() || source.same_type(&target) {
            return Ok(ConversionOutcome::Success(request.value().clone()));
        }
        let Some(upcast) = ctx
            .descriptor(&source)
            .and_then(|descriptor| descriptor.upcast_to(&target))
        else {
            return Ok(ConversionOutcome::Decline);
        };
        upcast
            .invoke(request.value())
            .map(ConversionOutcome::Success)
            .map_err(|e| ConvertError::host_failure(Self::NAME, e))
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Convert-method based strategy.

use crate::domain::{ConversionOutcome, ConversionRequest, ConvertError, ConvertMethod, Result};
use crate::ports::{ConversionContext, ConversionStrategy};

/// Calls a declared argument-less method of the source type returning the target.
///
/// Among the methods returning the target type, `To` + the target's short type
/// name (e.g. `ToMoney`) is preferred, then any other `To*` method.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertMethodStrategy;

impl ConvertMethodStrategy {
    /// The strategy name.
    pub const NAME: &'static str = "convert-method";
}

impl ConversionStrategy for ConvertMethodStrategy {
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
        let Some(descriptor) = ctx.descriptor(&source) else {
            return Ok(ConversionOutcome::Decline);
        };
        let target = request.target_type().underlying();

        let returning: Vec<&ConvertMethod> = descriptor
            .methods()
            .iter()
            .filter(|method| method.returns().same_type(&target))
            .collect();
        let conventional = format!("To{}", target.short_name());
        let method = returning
            .iter()
            .find(|method| method.name().eq_ignore_ascii_case(&conventional))
            .or_else(|| returning.iter().find(|method| method.name().starts_with("To")));

        let Some(method) = method else {
            return Ok(ConversionOutcome::Decline);
        };
        tracing::trace!("Calling {}::{}", source, method.name());
        method
            .invoke(request.value())
            .map(ConversionOutcome::Success)
            .map_err(|e| ConvertError::host_failure(Self::NAME, e))
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Constructor based strategy.

use crate::domain::scalar::Scalar;
use crate::domain::{
    Constructor, ConversionOutcome, ConversionRequest, ConvertError, Result, TypeKey, Value,
};
use crate::ports::{ConversionContext, ConversionStrategy};

/// Instantiates the target through a declared single-argument constructor.
///
/// A constructor whose parameter is exactly the source type wins. Otherwise
/// the constructors the source converts to trivially are considered:
/// a dynamic parameter, a parameter the source is declared assignable to, or a
/// primitive parameter the source primitive widens to without loss. Exactly
/// one such candidate is required; none or several decline.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstructorStrategy;

impl ConstructorStrategy {
    /// The strategy name.
    pub const NAME: &'static str = "constructor";

    /// Adapts `value` to the constructor's parameter, if that is trivial.
    fn trivial_argument(
        value: &Value,
        source: &TypeKey,
        parameter: &TypeKey,
        ctx: &ConversionContext<'_>,
    ) -> std::result::Result<Option<Value>, ConvertError> {
        if parameter.is_dynamic() {
            return Ok(Some(value.clone()));
        }
        if let Some(upcast) = ctx
            .descriptor(source)
            .and_then(|descriptor| descriptor.upcast_to(parameter))
        {
            return upcast
                .invoke(value)
                .map(Some)
                .map_err(|e| ConvertError::host_failure(Self::NAME, e));
        }
        match (source.primitive(), parameter.primitive()) {
            (Some(from), Some(to)) if from.widens_to(to) => Ok(Scalar::from_value(value)
                .and_then(|scalar| scalar.convert(to, ctx.options()))),
            _ => Ok(None),
        }
    }

    fn is_trivial(source: &TypeKey, parameter: &TypeKey, ctx: &ConversionContext<'_>) -> bool {
        if parameter.is_dynamic() {
            return true;
        }
        if ctx
            .descriptor(source)
            .is_some_and(|descriptor| descriptor.upcast_to(parameter).is_some())
        {
            return true;
        }
        matches!(
            (source.primitive(), parameter.primitive()),
            (Some(from), Some(to)) if from.widens_to(to)
        )
    }
}

impl ConversionStrategy for ConstructorStrategy {
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
        let Some(descriptor) = ctx.descriptor(&target) else {
            return Ok(ConversionOutcome::Decline);
        };
        let value = request.value();
        let constructors = descriptor.constructors();

        if let Some(exact) = constructors
            .iter()
            .find(|ctor| ctor.parameter().same_type(&source))
        {
            tracing::trace!("Constructing {} from {}", target, source);
            return exact
                .invoke(value)
                .map(ConversionOutcome::Success)
                .map_err(|e| ConvertError::host_failure(Self::NAME, e));
        }

        let candidates: Vec<&Constructor> = constructors
            .iter()
            .filter(|ctor| Self::is_trivial(&source, &ctor.parameter(), ctx))
            .collect();
        let constructor = match candidates.as_slice() {
            [] => return Ok(ConversionOutcome::Decline),
            [single] => *single,
            several => {
                tracing::debug!(
                    "Ambiguous constructors for {} from {}: {:?}",
                    target,
                    source,
                    several.iter().map(|c| c.parameter()).collect::<Vec<_>>()
                );
                return Ok(ConversionOutcome::Decline);
            }
        };

        let Some(argument) = Self::trivial_argument(value, &source, &constructor.parameter(), ctx)?
        else {
            return Ok(ConversionOutcome::Decline);
        };
        tracing::trace!(
            "Constructing {} from {} via {}",
            target,
            source,
            constructor.parameter()
        );
        constructor
            .invoke(&argument)
            .map(ConversionOutcome::Success)
            .map_err(|e| ConvertError::host_failure(Self::NAME, e))
    }
}

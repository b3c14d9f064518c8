// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static conversion operator strategy.

use crate::domain::{
    ConversionOperator, ConversionOutcome, ConversionRequest, ConvertError, OperatorKind, Result,
    TypeKey,
};
use crate::ports::{ConversionContext, ConversionStrategy};

/// Invokes a conversion operator declared by the source or the target type.
///
/// Operators are looked up on both descriptors; an implicit operator is
/// preferred over an explicit one.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticOperatorStrategy;

impl StaticOperatorStrategy {
    /// The strategy name.
    pub const NAME: &'static str = "static-operator";
}

fn matching<'a>(
    operators: &'a [ConversionOperator],
    source: &'a TypeKey,
    target: &'a TypeKey,
) -> impl Iterator<Item = &'a ConversionOperator> + 'a {
    operators
        .iter()
        .filter(move |op| op.from_type().same_type(source) && op.to_type().same_type(target))
}

impl ConversionStrategy for StaticOperatorStrategy {
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

        let declared: Vec<&ConversionOperator> = [ctx.descriptor(&source), ctx.descriptor(&target)]
            .into_iter()
            .flatten()
            .flat_map(|descriptor| matching(descriptor.operators(), &source, &target))
            .collect();
        let operator = declared
            .iter()
            .find(|op| op.kind() == OperatorKind::Implicit)
            .or_else(|| declared.first());

        let Some(operator) = operator else {
            return Ok(ConversionOutcome::Decline);
        };
        tracing::trace!(
            "Applying {:?} operator {} -> {}",
            operator.kind(),
            source,
            target
        );
        operator
            .invoke(request.value())
            .map(ConversionOutcome::Success)
            .map_err(|e| ConvertError::host_failure(Self::NAME, e))
    }
}

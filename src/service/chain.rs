// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered strategy chain.
//!
//! The chain is read on every conversion and written only when a host registers
//! or removes a strategy. Readers load the current list from an [`ArcSwap`] and
//! iterate it without taking a lock; writers are serialized by a mutex, build a
//! new list and publish it with a single store.

use crate::adapters::default_strategies;
use crate::domain::{ConversionOutcome, ConversionRequest, ConvertError, Result};
use crate::ports::{ConversionContext, ConversionStrategy};
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// An immutable list of strategies, as seen by one conversion.
pub type StrategySnapshot = Arc<Vec<Arc<dyn ConversionStrategy>>>;

/// Where to insert a strategy into a chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Position {
    /// Highest priority.
    Front,
    /// Lowest priority.
    #[default]
    End,
    /// At the given index, clamped to the chain length.
    Index(usize),
    /// Immediately before the named strategy.
    Before(String),
    /// Immediately after the named strategy.
    After(String),
}

impl Position {
    /// Immediately before the named strategy.
    pub fn before(name: impl Into<String>) -> Self {
        Position::Before(name.into())
    }

    /// Immediately after the named strategy.
    pub fn after(name: impl Into<String>) -> Self {
        Position::After(name.into())
    }
}

/// An ordered, mutable sequence of conversion strategies.
///
/// Resolution consults the strategies in order and stops at the first success
/// or the first error. The order is never changed implicitly.
///
/// # Examples
///
/// ```rust
/// use convertex::adapters::StringToBoolStrategy;
/// use convertex::service::{Position, StrategyChain};
/// use std::sync::Arc;
///
/// let chain = StrategyChain::empty();
/// chain.register(Arc::new(StringToBoolStrategy), Position::End).unwrap();
/// assert_eq!(chain.names(), vec!["string-to-bool".to_string()]);
/// ```
pub struct StrategyChain {
    strategies: ArcSwap<Vec<Arc<dyn ConversionStrategy>>>,
    writer: Mutex<()>,
}

impl StrategyChain {
    /// Creates a chain holding the built-in strategies in default order.
    pub fn with_defaults() -> Self {
        Self::from_strategies(default_strategies())
    }

    /// Creates a chain with no strategies.
    pub fn empty() -> Self {
        Self::from_strategies(Vec::new())
    }

    /// Creates a chain holding `strategies` in the given order.
    pub fn from_strategies(strategies: Vec<Arc<dyn ConversionStrategy>>) -> Self {
        StrategyChain {
            strategies: ArcSwap::from_pointee(strategies),
            writer: Mutex::new(()),
        }
    }

    /// Serializes writers; readers never take this lock.
    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the current list of strategies.
    pub fn snapshot(&self) -> StrategySnapshot {
        self.strategies.load_full()
    }

    /// Inserts a strategy.
    ///
    /// # Errors
    ///
    /// Returns `StrategyNotFound` if `position` names a strategy that is not in
    /// the chain.
    pub fn register(
        &self,
        strategy: Arc<dyn ConversionStrategy>,
        position: Position,
    ) -> Result<()> {
        let _writer = self.lock_writer();
        let mut strategies: Vec<_> = self.strategies.load().iter().cloned().collect();
        let index = match &position {
            Position::Front => 0,
            Position::End => strategies.len(),
            Position::Index(index) => (*index).min(strategies.len()),
            Position::Before(name) => Self::index_of(&strategies, name)?,
            Position::After(name) => Self::index_of(&strategies, name)? + 1,
        };
        tracing::debug!(
            "Registering conversion strategy '{}' at index {}",
            strategy.name(),
            index
        );
        strategies.insert(index, strategy);
        self.strategies.store(Arc::new(strategies));
        Ok(())
    }

    /// Removes every strategy with the given name, returning whether one was removed.
    pub fn unregister(&self, name: &str) -> bool {
        let _writer = self.lock_writer();
        let current = self.strategies.load();
        let before = current.len();
        let strategies: Vec<_> = current
            .iter()
            .filter(|strategy| strategy.name() != name)
            .cloned()
            .collect();
        let removed = strategies.len() != before;
        if removed {
            tracing::debug!("Unregistered conversion strategy '{}'", name);
            self.strategies.store(Arc::new(strategies));
        }
        removed
    }

    fn index_of(strategies: &[Arc<dyn ConversionStrategy>], name: &str) -> Result<usize> {
        strategies
            .iter()
            .position(|strategy| strategy.name() == name)
            .ok_or_else(|| ConvertError::StrategyNotFound {
                name: name.to_string(),
            })
    }

    /// Names of the strategies, in order.
    pub fn names(&self) -> Vec<String> {
        self.snapshot()
            .iter()
            .map(|strategy| strategy.name().to_string())
            .collect()
    }

    /// Returns `true` if a strategy with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.snapshot().iter().any(|strategy| strategy.name() == name)
    }

    /// Number of strategies.
    pub fn len(&self) -> usize {
        self.strategies.load().len()
    }

    /// Returns `true` if the chain holds no strategy.
    pub fn is_empty(&self) -> bool {
        self.strategies.load().is_empty()
    }

    /// Resolves a request against the current snapshot.
    ///
    /// Returns the first success, or `Decline` if every strategy declined.
    /// A strategy error stops the chain and is returned as-is.
    pub fn resolve(
        &self,
        request: &ConversionRequest,
        ctx: &ConversionContext<'_>,
    ) -> Result<ConversionOutcome> {
        let strategies = self.snapshot();
        for strategy in strategies.iter() {
            tracing::trace!(
                "Trying strategy '{}' for {} -> {}",
                strategy.name(),
                request.value().type_name(),
                request.target_type()
            );
            match strategy.try_convert(request, ctx) {
                Ok(ConversionOutcome::Decline) => continue,
                Ok(success) => {
                    tracing::debug!(
                        "Strategy '{}' converted {} to {}",
                        strategy.name(),
                        request.value().type_name(),
                        request.target_type()
                    );
                    return Ok(success);
                }
                Err(e) => {
                    tracing::warn!("Conversion strategy '{}' failed: {}", strategy.name(), e);
                    return Err(e);
                }
            }
        }
        tracing::debug!(
            "No strategy converts {} to {}",
            request.value().type_name(),
            request.target_type()
        );
        Ok(ConversionOutcome::Decline)
    }
}

impl Default for StrategyChain {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for StrategyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyChain")
            .field("strategies", &self.names())
            .finish()
    }
}

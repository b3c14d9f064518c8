// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the strategy chain, the type registry and the
//! conversion facade.
//!
//! This module composes the domain model and the built-in adapters into the
//! `Converter` that application code calls, plus a process-wide default
//! instance behind the free functions of [`convert_ex`].

pub mod chain;
pub mod convert_ex;
pub mod converter;
pub mod type_registry;

// Re-export commonly used types
pub use chain::{Position, StrategyChain, StrategySnapshot};
pub use converter::{Converter, ConverterBuilder};
pub use type_registry::TypeRegistry;

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) at the seams of the
//! engine: conversion strategies, type converter objects and binary codecs.
//! Built-in implementations live in the adapters layer; hosts add their own.

pub mod codec;
pub mod strategy;
pub mod type_converter;

// Re-export commonly used types
pub use codec::BinaryCodec;
pub use strategy::{ConversionContext, ConversionStrategy};
pub use type_converter::TypeConverter;

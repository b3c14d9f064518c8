// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversion facade.
//!
//! [`Converter`] composes the strategy chain, the type registry, the emptiness
//! model and the options into the operations application code calls:
//! must-succeed conversion (`to`, `change_type`), try conversion (`try_to`,
//! `try_change_type`), emptiness checks and canonical empty values.

use crate::domain::scalar::Scalar;
use crate::domain::{
    emptiness, ConversionRequest, ConvertError, ConverterOptions, Result, TypeDescriptor,
    TypeKey, TypeTable, Value,
};
use crate::ports::{ConversionContext, ConversionStrategy};
use crate::service::chain::{Position, StrategyChain};
use crate::service::type_registry::TypeRegistry;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Renders a value for diagnostics, best effort.
fn describe_value(value: &Value, types: &TypeTable) -> String {
    let Some(key) = value.type_key() else {
        return "null".to_string();
    };
    if let Some(text) = value.downcast_ref::<String>() {
        return format!("{:?}", text);
    }
    if let Some(bytes) = value.downcast_ref::<Vec<u8>>() {
        return format!("[{} bytes]", bytes.len());
    }
    if let Some(scalar) = Scalar::from_value(value) {
        return scalar.to_text();
    }
    if let Some(descriptor) = types.get(&key) {
        if let Some(text) = descriptor.display(value) {
            return text;
        }
        if let Some(member) = descriptor
            .enumeration()
            .and_then(|info| info.member_of(value))
        {
            return member.name().to_string();
        }
    }
    format!("<{}>", key.short_name())
}

/// The conversion engine.
///
/// A `Converter` is safe to share between threads; conversions read a snapshot
/// of the strategy chain and the type registry, so concurrent registration
/// never blocks or disturbs a conversion in flight.
///
/// # Examples
///
/// ```rust
/// use convertex::prelude::*;
///
/// # fn main() -> Result<()> {
/// let converter = Converter::new();
///
/// let port: u16 = converter.to(" 8080 ")?;
/// assert_eq!(port, 8080);
///
/// let flag: bool = converter.to("yes")?;
/// assert!(flag);
///
/// assert_eq!(converter.try_to::<i32>("eighty")?, None);
/// assert_eq!(converter.to::<i32>(Value::null())?, 0);
/// assert_eq!(converter.to_nullable::<String>(Value::null())?, None);
/// # Ok(())
/// # }
/// ```
pub struct Converter {
    chain: StrategyChain,
    types: TypeRegistry,
    options: ConverterOptions,
}

impl Converter {
    /// Creates a converter with the built-in strategies and default options.
    pub fn new() -> Self {
        Converter {
            chain: StrategyChain::with_defaults(),
            types: TypeRegistry::new(),
            options: ConverterOptions::default(),
        }
    }

    /// Creates a converter builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use convertex::domain::{ConverterOptions, TextEncoding};
    /// use convertex::service::Converter;
    ///
    /// # fn main() -> convertex::domain::Result<()> {
    /// let converter = Converter::builder()
    ///     .with_options(ConverterOptions {
    ///         text_encoding: TextEncoding::Latin1,
    ///         ..ConverterOptions::default()
    ///     })
    ///     .build()?;
    /// assert_eq!(converter.to::<Vec<u8>>("é")?, vec![0xe9]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    /// The strategy chain.
    pub fn strategies(&self) -> &StrategyChain {
        &self.chain
    }

    /// The type registry.
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// The options shared by every strategy.
    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Runs the chain; `None` means every strategy declined.
    fn resolve(
        &self,
        value: &Value,
        target: &TypeKey,
        null_to_default: bool,
        types: &TypeTable,
    ) -> Result<Option<Value>> {
        let ctx = ConversionContext::new(types, &self.options);
        let request =
            ConversionRequest::new(value.clone(), *target).with_null_to_default(null_to_default);
        let Some(result) = self.chain.resolve(&request, &ctx)?.into_value() else {
            return Ok(None);
        };
        match result.type_key() {
            Some(actual) if !target.is_dynamic() && !actual.same_type(target) => {
                Err(ConvertError::TypeMismatch {
                    expected: target.to_string(),
                    actual: actual.to_string(),
                })
            }
            _ => Ok(Some(result)),
        }
    }

    fn invalid_conversion(value: &Value, target: &TypeKey, types: &TypeTable) -> ConvertError {
        ConvertError::InvalidConversion {
            source_type: value.type_name().to_string(),
            target_type: target.to_string(),
            value: describe_value(value, types),
        }
    }

    /// Converts `value` to `target`, failing if no strategy applies.
    ///
    /// The result is `null` only for targets that admit it (nullable targets,
    /// strings, byte arrays and reference types converted from `null`).
    ///
    /// # Errors
    ///
    /// `InvalidConversion` if every strategy declined, `HostFailure` if a
    /// strategy failed, `TypeMismatch` if a strategy produced the wrong type.
    pub fn change_type(&self, value: &Value, target: &TypeKey) -> Result<Value> {
        let types = self.types.snapshot();
        self.resolve(value, target, self.options.null_to_default, &types)?
            .ok_or_else(|| Self::invalid_conversion(value, target, &types))
    }

    /// Converts `value` to `target`, returning `None` if no strategy applies.
    ///
    /// `null` is never replaced by the target's default here.
    ///
    /// # Errors
    ///
    /// `HostFailure` if a strategy failed, `TypeMismatch` if a strategy
    /// produced the wrong type.
    pub fn try_change_type(&self, value: &Value, target: &TypeKey) -> Result<Option<Value>> {
        let types = self.types.snapshot();
        self.resolve(value, target, false, &types)
    }

    /// Converts a value to `T`.
    ///
    /// `null` converts to the canonical empty value of `T` when the options
    /// enable null-to-default. A `null` result cannot be represented by `T` and
    /// is reported as `InvalidConversion`; use [`Converter::to_nullable`] for
    /// targets where `null` is a legitimate result.
    ///
    /// # Errors
    ///
    /// See [`Converter::change_type`].
    pub fn to<T: Any + Send + Sync + Clone>(&self, value: impl Into<Value>) -> Result<T> {
        let value = value.into();
        let target = TypeKey::of::<T>();
        let result = self.change_type(&value, &target)?;
        if result.is_null() {
            return Err(Self::invalid_conversion(
                &value,
                &target,
                &self.types.snapshot(),
            ));
        }
        Self::extract(result, &target)
    }

    /// Converts a value to `Option<T>`; `null` converts to `None`.
    ///
    /// # Errors
    ///
    /// See [`Converter::change_type`].
    pub fn to_nullable<T: Any + Send + Sync + Clone>(
        &self,
        value: impl Into<Value>,
    ) -> Result<Option<T>> {
        let value = value.into();
        let result = self.change_type(&value, &TypeKey::nullable::<T>())?;
        if result.is_null() {
            return Ok(None);
        }
        Self::extract(result, &TypeKey::of::<T>()).map(Some)
    }

    /// Tries to convert a value to `T`.
    ///
    /// Returns `Ok(None)` if the value is not convertible, including `null`.
    ///
    /// # Errors
    ///
    /// A `HostFailure` is not a negative result and propagates.
    pub fn try_to<T: Any + Send + Sync + Clone>(
        &self,
        value: impl Into<Value>,
    ) -> Result<Option<T>> {
        let value = value.into();
        let target = TypeKey::of::<T>();
        match self.try_change_type(&value, &target)? {
            Some(result) if !result.is_null() => Self::extract(result, &target).map(Some),
            _ => Ok(None),
        }
    }

    fn extract<T: Any + Send + Sync + Clone>(value: Value, target: &TypeKey) -> Result<T> {
        let actual = value.type_name();
        value.into_inner::<T>().ok_or_else(|| ConvertError::TypeMismatch {
            expected: target.to_string(),
            actual: actual.to_string(),
        })
    }

    /// Returns `true` if the value is semantically empty.
    pub fn is_empty(&self, value: &Value) -> bool {
        emptiness::is_empty(value, &self.types.snapshot())
    }

    /// Returns the canonical empty value of `T`, or `None` where that is `null`.
    pub fn default_empty_value<T: Any + Send + Sync + Clone>(&self) -> Option<T> {
        self.default_empty_value_of(&TypeKey::of::<T>())
            .into_inner::<T>()
    }

    /// Returns the canonical empty value of a type.
    pub fn default_empty_value_of(&self, key: &TypeKey) -> Value {
        emptiness::default_empty_value(key, &self.types.snapshot())
    }

    /// Inserts a strategy into the chain.
    ///
    /// # Errors
    ///
    /// Returns `StrategyNotFound` if `position` names an unknown strategy.
    pub fn register_strategy(
        &self,
        strategy: Arc<dyn ConversionStrategy>,
        position: Position,
    ) -> Result<()> {
        self.chain.register(strategy, position)
    }

    /// Removes the named strategy from the chain.
    pub fn unregister_strategy(&self, name: &str) -> bool {
        self.chain.unregister(name)
    }

    /// Registers the declared metadata of a type.
    pub fn register_type(&self, descriptor: TypeDescriptor) -> bool {
        self.types.register(descriptor)
    }

    /// Removes the declared metadata of a type.
    pub fn unregister_type(&self, key: &TypeKey) -> bool {
        self.types.unregister(key)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("chain", &self.chain)
            .field("types", &self.types.len())
            .field("options", &self.options)
            .finish()
    }
}

/// Builder for constructing a [`Converter`].
///
/// # Examples
///
/// ```rust
/// use convertex::adapters::StringToBoolStrategy;
/// use convertex::service::{ConverterBuilder, Position};
/// use std::sync::Arc;
///
/// # fn main() -> convertex::domain::Result<()> {
/// let converter = ConverterBuilder::new()
///     .empty_chain()
///     .with_strategy(Arc::new(StringToBoolStrategy), Position::End)
///     .build()?;
/// assert_eq!(converter.strategies().len(), 1);
/// assert!(converter.to::<bool>("ok")?);
/// assert!(converter.try_to::<i32>("1")?.is_none());
/// # Ok(())
/// # }
/// ```
pub struct ConverterBuilder {
    options: ConverterOptions,
    defaults: bool,
    strategies: Vec<(Arc<dyn ConversionStrategy>, Position)>,
    types: TypeTable,
}

impl ConverterBuilder {
    /// Creates a new builder starting from the built-in strategies.
    pub fn new() -> Self {
        Self {
            options: ConverterOptions::default(),
            defaults: true,
            strategies: Vec::new(),
            types: TypeTable::new(),
        }
    }

    /// Sets the options.
    pub fn with_options(mut self, options: ConverterOptions) -> Self {
        self.options = options;
        self
    }

    /// Loads the options from a YAML file.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use convertex::service::ConverterBuilder;
    ///
    /// # fn main() -> convertex::domain::Result<()> {
    /// let converter = ConverterBuilder::new()
    ///     .with_options_file("/etc/myapp/convert.yaml")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "yaml")]
    pub fn with_options_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let options = ConverterOptions::from_yaml_file(path)?;
        Ok(self.with_options(options))
    }

    /// Starts from an empty chain instead of the built-in strategies.
    pub fn empty_chain(mut self) -> Self {
        self.defaults = false;
        self
    }

    /// Adds a strategy at `position`. Strategies are inserted in the order
    /// they are added, after the built-in ones are in place.
    pub fn with_strategy(
        mut self,
        strategy: Arc<dyn ConversionStrategy>,
        position: Position,
    ) -> Self {
        self.strategies.push((strategy, position));
        self
    }

    /// Registers the declared metadata of a type.
    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.insert(descriptor);
        self
    }

    /// Builds the converter.
    ///
    /// # Errors
    ///
    /// Returns `StrategyNotFound` if a strategy position names an unknown strategy.
    pub fn build(self) -> Result<Converter> {
        let chain = if self.defaults {
            StrategyChain::with_defaults()
        } else {
            StrategyChain::empty()
        };
        for (strategy, position) in self.strategies {
            chain.register(strategy, position)?;
        }
        Ok(Converter {
            chain,
            types: TypeRegistry::from_table(self.types),
            options: self.options,
        })
    }
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests.
//!
//! This module provides application-style types and the descriptors that make
//! them convertible, so each test file can build a converter in one call.

#![allow(dead_code)]

use convertex::domain::{BoxError, EnumType, TypeDescriptor, TypeKey, Value};
use convertex::ports::TypeConverter;
use convertex::service::Converter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An enum without a zero member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MyEnum {
    One = 1,
    Two = 2,
    Three = 3,
}

impl EnumType for MyEnum {
    fn members() -> Vec<(&'static str, Self)> {
        vec![
            ("One", MyEnum::One),
            ("Two", MyEnum::Two),
            ("Three", MyEnum::Three),
        ]
    }

    fn underlying(&self) -> i64 {
        *self as i64
    }
}

/// An enum whose zero member is its empty value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Unknown = 0,
    Active = 1,
    Retired = 2,
}

impl EnumType for Status {
    fn members() -> Vec<(&'static str, Self)> {
        vec![
            ("Unknown", Status::Unknown),
            ("Active", Status::Active),
            ("Retired", Status::Retired),
        ]
    }

    fn underlying(&self) -> i64 {
        *self as i64
    }
}

/// A value type with an `Empty` marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Money {
    pub cents: i64,
}

impl Money {
    pub const EMPTY: Money = Money { cents: i64::MIN };

    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.cents, 2)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.to_decimal())
    }
}

/// A value type without an `Empty` marker; its default instance is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A reference-like type: only `null` is empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub tier: u8,
}

/// An interface-like type `Customer` is assignable to.
#[derive(Clone, Debug, PartialEq)]
pub struct Party {
    pub display_name: String,
}

/// A type only convertible through its type converter.
#[derive(Clone, Debug, PartialEq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

/// Parses `"major.minor"` strings and renders versions back.
pub struct VersionConverter;

impl TypeConverter for VersionConverter {
    fn can_convert_from(&self, source: &TypeKey) -> bool {
        *source == TypeKey::of::<String>()
    }

    fn convert_from(&self, value: &Value) -> Result<Value, BoxError> {
        let text = value.downcast_ref::<String>().ok_or("expected a string")?;
        let (major, minor) = text
            .trim()
            .split_once('.')
            .ok_or_else(|| format!("'{}' is not a version", text))?;
        Ok(Value::new(Version {
            major: major.parse()?,
            minor: minor.parse()?,
        }))
    }

    fn can_convert_to(&self, target: &TypeKey) -> bool {
        target.same_type(&TypeKey::of::<String>())
    }

    fn convert_to(&self, value: &Value, _target: &TypeKey) -> Result<Value, BoxError> {
        let version = value.downcast_ref::<Version>().ok_or("expected a version")?;
        Ok(Value::from(format!("{}.{}", version.major, version.minor)))
    }
}

/// Descriptors for every fixture type.
pub fn descriptors() -> Vec<TypeDescriptor> {
    let mut descriptors = vec![
        TypeDescriptor::for_enum::<MyEnum>(),
        TypeDescriptor::for_enum::<Status>(),
        TypeDescriptor::builder::<Money>()
            .value_type()
            .with_empty(Money::EMPTY)
            .with_display()
            .with_implicit_from(|cents: &i64| Money { cents: *cents })
            .with_explicit_to(|m: &Money| m.cents)
            .with_method("ToDecimal", Money::to_decimal)
            .build(),
        TypeDescriptor::builder::<Point>()
            .value_type()
            .with_fallible_constructor(|s: &String| -> Result<Point, BoxError> {
                let (x, y) = s
                    .split_once(',')
                    .ok_or_else(|| format!("'{}' is not a point", s))?;
                Ok(Point {
                    x: x.trim().parse()?,
                    y: y.trim().parse()?,
                })
            })
            .build(),
        TypeDescriptor::builder::<Party>()
            .with_constructor(|name: &String| Party {
                display_name: name.clone(),
            })
            .build(),
        TypeDescriptor::builder::<Version>()
            .with_converter(VersionConverter)
            .build(),
    ];
    descriptors.push(customer_descriptor());
    descriptors
}

#[cfg(feature = "bincode")]
fn customer_descriptor() -> TypeDescriptor {
    TypeDescriptor::builder::<Customer>()
        .with_codec(convertex::adapters::BincodeCodec::<Customer>::new())
        .assignable_to(|c: &Customer| Party {
            display_name: c.name.clone(),
        })
        .build()
}

#[cfg(not(feature = "bincode"))]
fn customer_descriptor() -> TypeDescriptor {
    TypeDescriptor::builder::<Customer>()
        .assignable_to(|c: &Customer| Party {
            display_name: c.name.clone(),
        })
        .build()
}

/// A converter with the built-in strategies and every fixture type registered.
pub fn converter() -> Converter {
    let mut builder = Converter::builder();
    for descriptor in descriptors() {
        builder = builder.with_type(descriptor);
    }
    builder.build().expect("fixture converter builds")
}

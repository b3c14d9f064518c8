// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic emptiness and canonical empty values.
//!
//! A value is *empty* when it carries no meaningful information for its type:
//! `null`, zero, `false`, the empty string, the minimum date, the null
//! character, or a described type's `Empty` marker or default instance.
//!
//! Both extremes of `i32` count as empty as well. `i32::MIN` and `i32::MAX`
//! are treated as "no value" sentinels, and existing callers rely on that.
//! The rule is deliberately not extended to the other integer widths.

use crate::domain::descriptor::TypeTable;
use crate::domain::type_key::{PrimitiveKind, TypeKey};
use crate::domain::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

/// Returns `true` if `value` is semantically empty for its runtime type.
///
/// # Examples
///
/// ```
/// use convertex::domain::{emptiness, TypeTable, Value};
///
/// let types = TypeTable::new();
/// assert!(emptiness::is_empty(&Value::null(), &types));
/// assert!(emptiness::is_empty(&Value::from(0), &types));
/// assert!(emptiness::is_empty(&Value::from(i32::MAX), &types));
/// assert!(!emptiness::is_empty(&Value::from(123), &types));
/// assert!(!emptiness::is_empty(&Value::from(" "), &types));
/// ```
pub fn is_empty(value: &Value, types: &TypeTable) -> bool {
    let Some(key) = value.type_key() else {
        return true;
    };
    if let Some(kind) = key.primitive() {
        return primitive_is_empty(value, kind);
    }
    let Some(descriptor) = types.get(&key) else {
        return false;
    };
    if let Some(marker) = descriptor.empty_marker() {
        return descriptor.equals(value, marker);
    }
    if let Some(default) = descriptor.default_instance() {
        return descriptor.equals(value, default);
    }
    if let Some(info) = descriptor.enumeration() {
        return info.underlying_of(value) == Some(0);
    }
    false
}

fn primitive_is_empty(value: &Value, kind: PrimitiveKind) -> bool {
    match kind {
        PrimitiveKind::Bool => value.downcast_ref::<bool>() == Some(&false),
        PrimitiveKind::Char => value.downcast_ref::<char>() == Some(&'\0'),
        PrimitiveKind::I8 => value.downcast_ref::<i8>() == Some(&0),
        PrimitiveKind::I16 => value.downcast_ref::<i16>() == Some(&0),
        PrimitiveKind::I32 => matches!(
            value.downcast_ref::<i32>(),
            Some(&0) | Some(&i32::MIN) | Some(&i32::MAX)
        ),
        PrimitiveKind::I64 => value.downcast_ref::<i64>() == Some(&0),
        PrimitiveKind::U8 => value.downcast_ref::<u8>() == Some(&0),
        PrimitiveKind::U16 => value.downcast_ref::<u16>() == Some(&0),
        PrimitiveKind::U32 => value.downcast_ref::<u32>() == Some(&0),
        PrimitiveKind::U64 => value.downcast_ref::<u64>() == Some(&0),
        PrimitiveKind::F32 => value.downcast_ref::<f32>().map(|f| f.to_bits()) == Some(0),
        PrimitiveKind::F64 => value.downcast_ref::<f64>().map(|f| f.to_bits()) == Some(0),
        PrimitiveKind::Decimal => value.downcast_ref::<Decimal>().is_some_and(Decimal::is_zero),
        PrimitiveKind::String => value.downcast_ref::<String>().is_some_and(String::is_empty),
        PrimitiveKind::DateTime => value.downcast_ref::<NaiveDateTime>() == Some(&NaiveDateTime::MIN),
        PrimitiveKind::Date => value.downcast_ref::<NaiveDate>() == Some(&NaiveDate::MIN),
        PrimitiveKind::DateTimeUtc => {
            value.downcast_ref::<DateTime<Utc>>() == Some(&DateTime::<Utc>::MIN_UTC)
        }
    }
}

/// Returns the canonical empty value of `key`.
///
/// `null` for nullable keys, strings, byte arrays and reference types; zero,
/// `false`, `'\0'` or the minimum date for primitives; the zero member of an
/// enum; the default instance of a described value type.
///
/// # Examples
///
/// ```
/// use convertex::domain::{emptiness, TypeKey, TypeTable};
///
/// let types = TypeTable::new();
/// let zero = emptiness::default_empty_value(&TypeKey::of::<i32>(), &types);
/// assert_eq!(zero.downcast_ref::<i32>(), Some(&0));
/// assert!(emptiness::default_empty_value(&TypeKey::of::<String>(), &types).is_null());
/// assert!(emptiness::default_empty_value(&TypeKey::nullable::<i32>(), &types).is_null());
/// ```
pub fn default_empty_value(key: &TypeKey, types: &TypeTable) -> Value {
    if key.is_nullable() || key.is_bytes() {
        return Value::null();
    }
    if let Some(kind) = key.primitive() {
        return primitive_default(kind);
    }
    let Some(descriptor) = types.get(key) else {
        return Value::null();
    };
    if let Some(zero) = descriptor.enumeration().and_then(|info| info.zero()) {
        return zero.value().clone();
    }
    descriptor.default_instance().cloned().unwrap_or_default()
}

fn primitive_default(kind: PrimitiveKind) -> Value {
    match kind {
        PrimitiveKind::Bool => Value::from(false),
        PrimitiveKind::Char => Value::from('\0'),
        PrimitiveKind::I8 => Value::from(0i8),
        PrimitiveKind::I16 => Value::from(0i16),
        PrimitiveKind::I32 => Value::from(0i32),
        PrimitiveKind::I64 => Value::from(0i64),
        PrimitiveKind::U8 => Value::from(0u8),
        PrimitiveKind::U16 => Value::from(0u16),
        PrimitiveKind::U32 => Value::from(0u32),
        PrimitiveKind::U64 => Value::from(0u64),
        PrimitiveKind::F32 => Value::from(0f32),
        PrimitiveKind::F64 => Value::from(0f64),
        PrimitiveKind::Decimal => Value::from(Decimal::ZERO),
        PrimitiveKind::String => Value::null(),
        PrimitiveKind::DateTime => Value::from(NaiveDateTime::MIN),
        PrimitiveKind::Date => Value::from(NaiveDate::MIN),
        PrimitiveKind::DateTimeUtc => Value::from(DateTime::<Utc>::MIN_UTC),
    }
}

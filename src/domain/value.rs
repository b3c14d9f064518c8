// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamically typed values flowing through the conversion engine.

use crate::domain::type_key::TypeKey;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A dynamically typed value, or `null`.
///
/// Cloning a `Value` shares the underlying allocation, so identity pass-through
/// can be observed with [`Value::ptr_eq`].
///
/// # Examples
///
/// ```
/// use convertex::domain::{TypeKey, Value};
///
/// let value = Value::from(42);
/// assert_eq!(value.type_key(), Some(TypeKey::of::<i32>()));
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
///
/// let none: Option<i32> = None;
/// assert!(Value::from(none).is_null());
/// ```
#[derive(Clone, Default)]
pub struct Value {
    inner: Option<Inner>,
}

#[derive(Clone)]
struct Inner {
    data: Arc<dyn Any + Send + Sync>,
    ty: TypeKey,
}

impl Value {
    /// Returns the `null` value.
    pub fn null() -> Self {
        Value { inner: None }
    }

    /// Wraps any thread-safe value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Value {
            inner: Some(Inner {
                data: Arc::new(value),
                ty: TypeKey::of::<T>(),
            }),
        }
    }

    /// Wraps an optional value, mapping `None` to `null`.
    pub fn from_option<T: Any + Send + Sync>(value: Option<T>) -> Self {
        value.map(Value::new).unwrap_or_default()
    }

    /// Returns `true` if this is `null`.
    pub fn is_null(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns the runtime type of the value, or `None` for `null`.
    pub fn type_key(&self) -> Option<TypeKey> {
        self.inner.as_ref().map(|inner| inner.ty)
    }

    /// Returns the runtime type name, or `"null"`.
    pub fn type_name(&self) -> &'static str {
        self.inner.as_ref().map_or("null", |inner| inner.ty.name())
    }

    /// Returns `true` if the value holds a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Borrows the value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner
            .as_ref()
            .and_then(|inner| inner.data.as_ref().downcast_ref::<T>())
    }

    /// Extracts a `T`, cloning only if the allocation is shared.
    pub fn into_inner<T: Any + Send + Sync + Clone>(self) -> Option<T> {
        let data = self.inner?.data.downcast::<T>().ok()?;
        Some(Arc::try_unwrap(data).unwrap_or_else(|shared| (*shared).clone()))
    }

    /// Returns `true` if both values share the same allocation, or both are `null`.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Arc::ptr_eq(&a.data, &b.data),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::domain::scalar::Scalar::from_value(self) {
            Some(scalar) => write!(f, "Value({:?})", scalar),
            None if self.is_null() => write!(f, "Value(null)"),
            None => write!(f, "Value(<{}>)", self.type_name()),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::new(value)
                }
            }
        )*
    };
}

value_from!(
    bool char i8 i16 i32 i64 u8 u16 u32 u64 f32 f64
    Decimal String NaiveDateTime NaiveDate DateTime<Utc> Vec<u8>
);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::new(value.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::new(value.to_vec())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null() {
        let value = Value::null();
        assert!(value.is_null());
        assert_eq!(value.type_key(), None);
        assert_eq!(value.type_name(), "null");
        assert!(value.downcast_ref::<i32>().is_none());
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true).downcast_ref::<bool>(), Some(&true));
        assert_eq!(Value::from(7u8).type_key(), Some(TypeKey::of::<u8>()));
        assert_eq!(
            Value::from("hello").downcast_ref::<String>().map(String::as_str),
            Some("hello")
        );
        assert!(Value::from(vec![1u8, 2, 3]).is::<Vec<u8>>());
    }

    #[test]
    fn test_from_option() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some(5)).downcast_ref::<i32>(), Some(&5));
        assert!(Value::from_option(None::<String>).is_null());
    }

    #[test]
    fn test_into_inner_unique_and_shared() {
        let value = Value::from("owned");
        assert_eq!(value.into_inner::<String>(), Some("owned".to_string()));

        let value = Value::from("shared");
        let other = value.clone();
        assert_eq!(value.into_inner::<String>(), Some("shared".to_string()));
        assert!(other.is::<String>());
    }

    #[test]
    fn test_into_inner_wrong_type() {
        assert_eq!(Value::from(1i32).into_inner::<i64>(), None);
        assert_eq!(Value::null().into_inner::<i32>(), None);
    }

    #[test]
    fn test_ptr_eq() {
        let value = Value::from(1);
        let clone = value.clone();
        assert!(value.ptr_eq(&clone));
        assert!(!value.ptr_eq(&Value::from(1)));
        assert!(Value::null().ptr_eq(&Value::null()));
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", Value::null()), "Value(null)");
        assert!(format!("{:?}", Value::from(3)).contains('3'));
    }
}

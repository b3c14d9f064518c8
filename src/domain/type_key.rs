// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime type identity used by conversion requests.
//!
//! A `TypeKey` names the source or target of a conversion. It wraps a
//! [`TypeId`] together with the type's name (for diagnostics) and a nullable
//! flag, which plays the role `Nullable<T>` plays on other platforms: the
//! target accepts either `null` or a value of the underlying type.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker type behind [`TypeKey::dynamic`].
struct Dynamic;

/// Identity of a runtime type.
///
/// Two keys are equal when they name the same type with the same nullability;
/// the name only serves diagnostics.
///
/// # Examples
///
/// ```
/// use convertex::domain::TypeKey;
///
/// let key = TypeKey::of::<i32>();
/// assert_eq!(key.name(), "i32");
/// assert!(!key.is_nullable());
/// assert_eq!(TypeKey::nullable::<i32>().underlying(), key);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
    nullable: bool,
}

impl TypeKey {
    /// Returns the key of the concrete type `T`.
    pub fn of<T: Any>() -> Self {
        TypeKey {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            nullable: false,
        }
    }

    /// Returns the nullable key of `T`.
    pub fn nullable<T: Any>() -> Self {
        Self::of::<T>().as_nullable()
    }

    /// Returns the universal target type every value is assignable to.
    pub fn dynamic() -> Self {
        TypeKey {
            id: TypeId::of::<Dynamic>(),
            name: "dynamic",
            nullable: true,
        }
    }

    /// Returns the underlying [`TypeId`].
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the last path segment of the type name, without generics.
    ///
    /// ```
    /// use convertex::domain::TypeKey;
    ///
    /// assert_eq!(TypeKey::of::<String>().short_name(), "String");
    /// ```
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Returns `true` if this key accepts `null`.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns `true` if this is the [`TypeKey::dynamic`] key.
    pub fn is_dynamic(&self) -> bool {
        self.id == TypeId::of::<Dynamic>()
    }

    /// Returns the non-nullable form of this key.
    pub fn underlying(&self) -> Self {
        TypeKey {
            nullable: false,
            ..*self
        }
    }

    /// Returns the nullable form of this key.
    pub fn as_nullable(&self) -> Self {
        TypeKey {
            nullable: true,
            ..*self
        }
    }

    /// Returns `true` if both keys name the same type, ignoring nullability.
    pub fn same_type(&self, other: &TypeKey) -> bool {
        self.id == other.id
    }

    /// Returns the primitive kind of this type, if it is a built-in primitive.
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        PrimitiveKind::from_type_id(self.id)
    }

    /// Returns `true` if this is the byte array type `Vec<u8>`.
    pub fn is_bytes(&self) -> bool {
        self.id == TypeId::of::<Vec<u8>>()
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.nullable == other.nullable
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.nullable.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable && !self.is_dynamic() {
            write!(f, "Option<{}>", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// The built-in primitive types handled by the convertible strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `rust_decimal::Decimal`
    Decimal,
    /// `String`
    String,
    /// `chrono::NaiveDateTime`
    DateTime,
    /// `chrono::NaiveDate`
    Date,
    /// `chrono::DateTime<Utc>`
    DateTimeUtc,
}

static PRIMITIVES: Lazy<HashMap<TypeId, PrimitiveKind>> = Lazy::new(|| {
    HashMap::from([
        (TypeId::of::<bool>(), PrimitiveKind::Bool),
        (TypeId::of::<char>(), PrimitiveKind::Char),
        (TypeId::of::<i8>(), PrimitiveKind::I8),
        (TypeId::of::<i16>(), PrimitiveKind::I16),
        (TypeId::of::<i32>(), PrimitiveKind::I32),
        (TypeId::of::<i64>(), PrimitiveKind::I64),
        (TypeId::of::<u8>(), PrimitiveKind::U8),
        (TypeId::of::<u16>(), PrimitiveKind::U16),
        (TypeId::of::<u32>(), PrimitiveKind::U32),
        (TypeId::of::<u64>(), PrimitiveKind::U64),
        (TypeId::of::<f32>(), PrimitiveKind::F32),
        (TypeId::of::<f64>(), PrimitiveKind::F64),
        (TypeId::of::<Decimal>(), PrimitiveKind::Decimal),
        (TypeId::of::<String>(), PrimitiveKind::String),
        (TypeId::of::<NaiveDateTime>(), PrimitiveKind::DateTime),
        (TypeId::of::<NaiveDate>(), PrimitiveKind::Date),
        (TypeId::of::<DateTime<Utc>>(), PrimitiveKind::DateTimeUtc),
    ])
});

impl PrimitiveKind {
    /// Looks up the primitive kind of a type id.
    pub fn from_type_id(id: TypeId) -> Option<Self> {
        PRIMITIVES.get(&id).copied()
    }

    /// Returns the type key of this primitive.
    pub fn type_key(self) -> TypeKey {
        match self {
            PrimitiveKind::Bool => TypeKey::of::<bool>(),
            PrimitiveKind::Char => TypeKey::of::<char>(),
            PrimitiveKind::I8 => TypeKey::of::<i8>(),
            PrimitiveKind::I16 => TypeKey::of::<i16>(),
            PrimitiveKind::I32 => TypeKey::of::<i32>(),
            PrimitiveKind::I64 => TypeKey::of::<i64>(),
            PrimitiveKind::U8 => TypeKey::of::<u8>(),
            PrimitiveKind::U16 => TypeKey::of::<u16>(),
            PrimitiveKind::U32 => TypeKey::of::<u32>(),
            PrimitiveKind::U64 => TypeKey::of::<u64>(),
            PrimitiveKind::F32 => TypeKey::of::<f32>(),
            PrimitiveKind::F64 => TypeKey::of::<f64>(),
            PrimitiveKind::Decimal => TypeKey::of::<Decimal>(),
            PrimitiveKind::String => TypeKey::of::<String>(),
            PrimitiveKind::DateTime => TypeKey::of::<NaiveDateTime>(),
            PrimitiveKind::Date => TypeKey::of::<NaiveDate>(),
            PrimitiveKind::DateTimeUtc => TypeKey::of::<DateTime<Utc>>(),
        }
    }

    /// Returns `true` for the integer kinds.
    pub fn is_integral(self) -> bool {
        self.integral_range().is_some()
    }

    /// Returns `true` for integer, floating point and decimal kinds.
    pub fn is_numeric(self) -> bool {
        self.is_integral()
            || matches!(
                self,
                PrimitiveKind::F32 | PrimitiveKind::F64 | PrimitiveKind::Decimal
            )
    }

    /// Returns `true` for the date/time kinds.
    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            PrimitiveKind::DateTime | PrimitiveKind::Date | PrimitiveKind::DateTimeUtc
        )
    }

    /// Returns `true` for every kind except `String`, which behaves as a reference type.
    pub fn is_value_type(self) -> bool {
        self != PrimitiveKind::String
    }

    /// Returns the inclusive range of an integer kind.
    pub fn integral_range(self) -> Option<(i128, i128)> {
        let range = match self {
            PrimitiveKind::I8 => (i8::MIN as i128, i8::MAX as i128),
            PrimitiveKind::I16 => (i16::MIN as i128, i16::MAX as i128),
            PrimitiveKind::I32 => (i32::MIN as i128, i32::MAX as i128),
            PrimitiveKind::I64 => (i64::MIN as i128, i64::MAX as i128),
            PrimitiveKind::U8 => (0, u8::MAX as i128),
            PrimitiveKind::U16 => (0, u16::MAX as i128),
            PrimitiveKind::U32 => (0, u32::MAX as i128),
            PrimitiveKind::U64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }

    /// Returns `true` if every value of `self` converts to `other` without loss
    /// of magnitude, following the implicit numeric conversions of C-family languages.
    pub fn widens_to(self, other: PrimitiveKind) -> bool {
        use PrimitiveKind::*;
        if self == other {
            return true;
        }
        match self {
            Char => matches!(other, U16 | I32 | U32 | I64 | U64 | F32 | F64 | Decimal),
            F32 => other == F64,
            DateTime => other == DateTimeUtc,
            Date => matches!(other, DateTime | DateTimeUtc),
            _ => match (self.integral_range(), other.integral_range()) {
                (Some((lo, hi)), Some((olo, ohi))) => olo <= lo && hi <= ohi,
                (Some(_), None) => matches!(other, F32 | F64 | Decimal),
                _ => false,
            },
        }
    }
}

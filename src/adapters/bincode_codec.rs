// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bincode binary codec adapter.
//!
//! This module provides a [`BinaryCodec`] for any serde type, encoding it with
//! bincode. Attach it to a type descriptor to make the type convertible to and
//! from `Vec<u8>`.

use crate::domain::{BoxError, Value};
use crate::ports::BinaryCodec;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::marker::PhantomData;

/// Maximum payload size accepted when decoding (16MB).
const MAX_PAYLOAD_SIZE: u64 = 16 * 1024 * 1024;

/// Bincode codec for a serde type `T`.
///
/// A payload that ends in the middle of a value is reported as an error, every
/// other decoding problem (trailing bytes, invalid tags, oversized lengths)
/// declines.
///
/// # Examples
///
/// ```rust
/// use convertex::adapters::BincodeCodec;
/// use convertex::domain::Value;
/// use convertex::ports::BinaryCodec;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let codec = BincodeCodec::<Point>::new();
/// let bytes = codec.encode(&Value::new(Point { x: 1, y: 2 })).unwrap().unwrap();
/// let decoded = codec.decode(&bytes).unwrap().unwrap();
/// assert_eq!(decoded.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
/// ```
pub struct BincodeCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> BincodeCodec<T> {
    /// Creates a new codec.
    pub fn new() -> Self {
        BincodeCodec {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for BincodeCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for BincodeCodec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BincodeCodec")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

fn options() -> impl bincode::Options {
    use bincode::Options;
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_PAYLOAD_SIZE)
}

impl<T> BinaryCodec for BincodeCodec<T>
where
    T: Serialize + DeserializeOwned + Any + Send + Sync,
{
    fn name(&self) -> &str {
        "bincode"
    }

    fn encode(&self, value: &Value) -> Result<Option<Vec<u8>>, BoxError> {
        use bincode::Options;
        let Some(typed) = value.downcast_ref::<T>() else {
            return Ok(None);
        };
        let bytes = options().serialize(typed)?;
        Ok(Some(bytes))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Option<Value>, BoxError> {
        use bincode::Options;
        match options().deserialize::<T>(bytes) {
            Ok(decoded) => Ok(Some(Value::new(decoded))),
            Err(err) => {
                let truncated = matches!(
                    err.as_ref(),
                    bincode::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof
                );
                if truncated {
                    Err(err)
                } else {
                    tracing::debug!(
                        "Bincode payload is not a {}: {}",
                        std::any::type_name::<T>(),
                        err
                    );
                    Ok(None)
                }
            }
        }
    }
}

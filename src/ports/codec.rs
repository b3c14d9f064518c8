// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binary codec trait definition.
//!
//! A `BinaryCodec` encodes instances of one type to bytes and back. It is
//! attached to a type through its [`TypeDescriptor`](crate::domain::TypeDescriptor)
//! and used by the byte-array binary-format strategy.

use crate::domain::{BoxError, Value};

/// Encodes and decodes one domain type to and from `Vec<u8>`.
///
/// Both operations distinguish two kinds of failure:
///
/// * `Ok(None)` - the input is not something this codec handles (wrong type,
///   unrecognized or corrupt payload). The strategy declines.
/// * `Err(_)` - the codec recognized the input and failed mid-way, e.g. a
///   payload truncated in the middle of a record. This surfaces as a host failure.
///
/// # Examples
///
/// ```rust
/// use convertex::domain::{BoxError, Value};
/// use convertex::ports::BinaryCodec;
///
/// struct AsciiCodec;
///
/// impl BinaryCodec for AsciiCodec {
///     fn name(&self) -> &str {
///         "ascii"
///     }
///
///     fn encode(&self, value: &Value) -> Result<Option<Vec<u8>>, BoxError> {
///         Ok(value.downcast_ref::<char>().filter(|c| c.is_ascii()).map(|c| vec![*c as u8]))
///     }
///
///     fn decode(&self, bytes: &[u8]) -> Result<Option<Value>, BoxError> {
///         Ok(match bytes {
///             [b] if b.is_ascii() => Some(Value::from(*b as char)),
///             _ => None,
///         })
///     }
/// }
///
/// assert_eq!(AsciiCodec.encode(&Value::from('A')).unwrap(), Some(vec![65]));
/// ```
pub trait BinaryCodec: Send + Sync {
    /// Returns the name of the format, for logging and error messages.
    fn name(&self) -> &str;

    /// Encodes `value` to bytes.
    fn encode(&self, value: &Value) -> Result<Option<Vec<u8>>, BoxError>;

    /// Decodes bytes into a value.
    fn decode(&self, bytes: &[u8]) -> Result<Option<Value>, BoxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NibbleCodec;

    impl BinaryCodec for NibbleCodec {
        fn name(&self) -> &str {
            "nibble"
        }

        fn encode(&self, value: &Value) -> Result<Option<Vec<u8>>, BoxError> {
            Ok(value.downcast_ref::<u8>().filter(|b| **b < 16).map(|b| vec![*b]))
        }

        fn decode(&self, bytes: &[u8]) -> Result<Option<Value>, BoxError> {
            match bytes {
                [] => Err("empty payload".into()),
                [b] if *b < 16 => Ok(Some(Value::from(*b))),
                _ => Ok(None),
            }
        }
    }

    #[test]
    fn test_codec_outcomes() {
        assert_eq!(NibbleCodec.name(), "nibble");
        assert_eq!(NibbleCodec.encode(&Value::from(3u8)).unwrap(), Some(vec![3]));
        assert_eq!(NibbleCodec.encode(&Value::from(30u8)).unwrap(), None);
        assert!(NibbleCodec.decode(&[3]).unwrap().is_some());
        assert!(NibbleCodec.decode(&[30]).unwrap().is_none());
        assert!(NibbleCodec.decode(&[]).is_err());
    }

    #[test]
    fn test_binary_codec_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn BinaryCodec>>();
    }
}

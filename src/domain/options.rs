// SPDX-License-Identifier: MIT OR Apache-2.0

//! Converter options.
//!
//! Options are plain serde data so a host can keep them next to the rest of its
//! configuration. With the `yaml` feature they can be loaded straight from YAML.

use serde::{Deserialize, Serialize};

#[cfg(feature = "yaml")]
use crate::domain::errors::{ConvertError, Result};
#[cfg(feature = "yaml")]
use std::path::Path;

/// Maximum allowed size for an options file (1MB).
#[cfg(feature = "yaml")]
const MAX_OPTIONS_FILE_SIZE: u64 = 1024 * 1024;

/// Text encoding used when converting between strings and byte arrays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// UTF-8; invalid byte sequences decode lossily.
    #[default]
    Utf8,
    /// ISO-8859-1; one byte per character, characters above U+00FF do not encode.
    Latin1,
}

impl TextEncoding {
    /// Encodes a string, returning `None` if it contains unencodable characters.
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Some(text.as_bytes().to_vec()),
            TextEncoding::Latin1 => text.chars().map(|c| u8::try_from(c).ok()).collect(),
        }
    }

    /// Decodes a byte array.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

/// Options shared by every strategy of a converter.
///
/// # Examples
///
/// ```
/// use convertex::domain::{ConverterOptions, TextEncoding};
///
/// let options = ConverterOptions::default();
/// assert_eq!(options.text_encoding, TextEncoding::Utf8);
/// assert!(options.null_to_default);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterOptions {
    /// Encoding used by the byte-array/string strategy.
    pub text_encoding: TextEncoding,
    /// Whether `to`/`change_type` map `null` to the target's empty value.
    pub null_to_default: bool,
    /// chrono format strings tried, in order, when parsing date/time strings.
    /// RFC 3339 is always tried first.
    pub date_formats: Vec<String>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        ConverterOptions {
            text_encoding: TextEncoding::Utf8,
            null_to_default: true,
            date_formats: vec![
                "%Y-%m-%d %H:%M:%S%.f".to_string(),
                "%Y-%m-%dT%H:%M:%S%.f".to_string(),
                "%Y/%m/%d %H:%M:%S%.f".to_string(),
                "%Y-%m-%d".to_string(),
                "%Y/%m/%d".to_string(),
            ],
        }
    }
}

#[cfg(feature = "yaml")]
impl ConverterOptions {
    /// Parses options from a YAML document. Missing fields keep their defaults.
    ///
    /// ```
    /// use convertex::domain::{ConverterOptions, TextEncoding};
    ///
    /// let options = ConverterOptions::from_yaml_str("text_encoding: latin1").unwrap();
    /// assert_eq!(options.text_encoding, TextEncoding::Latin1);
    /// assert!(options.null_to_default);
    /// ```
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| ConvertError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }

    /// Reads options from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if metadata.len() > MAX_OPTIONS_FILE_SIZE {
            return Err(ConvertError::ParseError {
                message: format!(
                    "Options file '{}' is too large ({} bytes, max {})",
                    path.display(),
                    metadata.len(),
                    MAX_OPTIONS_FILE_SIZE
                ),
                source: None,
            });
        }
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded converter options from '{}'", path.display());
        Self::from_yaml_str(&content)
    }
}

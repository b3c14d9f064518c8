// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for converter options.
//!
//! These tests load options from YAML files and verify that the text
//! encoding, date formats and null handling they select reach the strategies.

#![cfg(feature = "yaml")]

use chrono::NaiveDate;
use convertex::domain::{ConvertError, ConverterOptions, TextEncoding, TypeKey, Value};
use convertex::service::Converter;
use std::io::Write;
use tempfile::NamedTempFile;

fn options_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_options_from_file() {
    let file = options_file(
        r#"
text_encoding: latin1
null_to_default: false
date_formats:
  - "%d.%m.%Y"
"#,
    );

    let options = ConverterOptions::from_yaml_file(file.path()).unwrap();
    assert_eq!(options.text_encoding, TextEncoding::Latin1);
    assert!(!options.null_to_default);
    assert_eq!(options.date_formats, vec!["%d.%m.%Y".to_string()]);
}

#[test]
fn test_missing_fields_keep_defaults() {
    let file = options_file("null_to_default: false\n");
    let options = ConverterOptions::from_yaml_file(file.path()).unwrap();
    let defaults = ConverterOptions::default();
    assert_eq!(options.text_encoding, defaults.text_encoding);
    assert_eq!(options.date_formats, defaults.date_formats);
}

#[test]
fn test_invalid_yaml_is_a_parse_error() {
    let file = options_file("text_encoding: ebcdic\n");
    let result = ConverterOptions::from_yaml_file(file.path());
    assert!(matches!(result, Err(ConvertError::ParseError { .. })));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Converter::builder().with_options_file(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConvertError::IoError(_))));
}

#[test]
fn test_latin1_encoding_from_file() {
    let file = options_file("text_encoding: latin1\n");
    let converter = Converter::builder()
        .with_options_file(file.path())
        .unwrap()
        .build()
        .unwrap();

    let bytes: Vec<u8> = converter.to("café").unwrap();
    assert_eq!(bytes, vec![b'c', b'a', b'f', 0xE9]);
    assert_eq!(converter.to::<String>(vec![0xE9u8]).unwrap(), "é");

    // The euro sign has no Latin-1 byte.
    assert_eq!(converter.try_to::<Vec<u8>>("€").unwrap(), None);
    assert!(converter
        .to::<Vec<u8>>("€")
        .unwrap_err()
        .is_invalid_conversion());
}

#[test]
fn test_custom_date_format_from_file() {
    let file = options_file("date_formats:\n  - \"%d.%m.%Y\"\n");
    let converter = Converter::builder()
        .with_options_file(file.path())
        .unwrap()
        .build()
        .unwrap();

    let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    assert_eq!(converter.to::<NaiveDate>("01.03.2024").unwrap(), expected);
    // RFC 3339 is always accepted.
    assert_eq!(
        converter.to::<NaiveDate>("2024-03-01T00:00:00Z").unwrap(),
        expected
    );
    // The default formats were replaced.
    assert_eq!(converter.try_to::<NaiveDate>("2024/03/01").unwrap(), None);

    let defaults = Converter::new();
    assert_eq!(defaults.try_to::<NaiveDate>("01.03.2024").unwrap(), None);
}

#[test]
fn test_null_to_default_disabled() {
    let file = options_file("null_to_default: false\n");
    let converter = Converter::builder()
        .with_options_file(file.path())
        .unwrap()
        .build()
        .unwrap();

    let result = converter.change_type(&Value::null(), &TypeKey::of::<i32>());
    assert!(result.unwrap_err().is_invalid_conversion());

    assert_eq!(converter.try_to::<i32>(Value::null()).unwrap(), None);

    let enabled = Converter::new();
    assert_eq!(enabled.to::<i32>(Value::null()).unwrap(), 0);
}

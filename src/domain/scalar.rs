// SPDX-License-Identifier: MIT OR Apache-2.0

//! Primitive-to-primitive conversion rules.
//!
//! Every built-in primitive is lifted into a `Scalar` and lowered into the
//! target [`PrimitiveKind`]. Lowering returns `None` on parse or range failures
//! so the calling strategy can decline instead of failing.

use crate::domain::options::ConverterOptions;
use crate::domain::type_key::PrimitiveKind;
use crate::domain::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// A primitive value lifted out of a [`Value`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Scalar {
    Bool(bool),
    Char(char),
    Int(i128),
    Single(f32),
    Double(f64),
    Decimal(Decimal),
    Text(String),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
}

impl Scalar {
    /// Lifts a primitive value; `None` for `null` and non-primitive values.
    pub(crate) fn from_value(value: &Value) -> Option<Scalar> {
        let kind = value.type_key()?.primitive()?;
        let scalar = match kind {
            PrimitiveKind::Bool => Scalar::Bool(*value.downcast_ref::<bool>()?),
            PrimitiveKind::Char => Scalar::Char(*value.downcast_ref::<char>()?),
            PrimitiveKind::I8 => Scalar::Int(i128::from(*value.downcast_ref::<i8>()?)),
            PrimitiveKind::I16 => Scalar::Int(i128::from(*value.downcast_ref::<i16>()?)),
            PrimitiveKind::I32 => Scalar::Int(i128::from(*value.downcast_ref::<i32>()?)),
            PrimitiveKind::I64 => Scalar::Int(i128::from(*value.downcast_ref::<i64>()?)),
            PrimitiveKind::U8 => Scalar::Int(i128::from(*value.downcast_ref::<u8>()?)),
            PrimitiveKind::U16 => Scalar::Int(i128::from(*value.downcast_ref::<u16>()?)),
            PrimitiveKind::U32 => Scalar::Int(i128::from(*value.downcast_ref::<u32>()?)),
            PrimitiveKind::U64 => Scalar::Int(i128::from(*value.downcast_ref::<u64>()?)),
            PrimitiveKind::F32 => Scalar::Single(*value.downcast_ref::<f32>()?),
            PrimitiveKind::F64 => Scalar::Double(*value.downcast_ref::<f64>()?),
            PrimitiveKind::Decimal => Scalar::Decimal(*value.downcast_ref::<Decimal>()?),
            PrimitiveKind::String => Scalar::Text(value.downcast_ref::<String>()?.clone()),
            PrimitiveKind::DateTime => Scalar::DateTime(*value.downcast_ref::<NaiveDateTime>()?),
            PrimitiveKind::Date => Scalar::Date(*value.downcast_ref::<NaiveDate>()?),
            PrimitiveKind::DateTimeUtc => {
                Scalar::DateTimeUtc(*value.downcast_ref::<DateTime<Utc>>()?)
            }
        };
        Some(scalar)
    }

    /// Lowers the scalar into `target`, or `None` if the conversion is not defined
    /// or the value does not parse or fit.
    pub(crate) fn convert(&self, target: PrimitiveKind, options: &ConverterOptions) -> Option<Value> {
        match target {
            PrimitiveKind::Bool => self.to_bool().map(Value::from),
            PrimitiveKind::Char => self.to_char().map(Value::from),
            PrimitiveKind::I8 => self.to_integer().and_then(|i| i8::try_from(i).ok()).map(Value::from),
            PrimitiveKind::I16 => self.to_integer().and_then(|i| i16::try_from(i).ok()).map(Value::from),
            PrimitiveKind::I32 => self.to_integer().and_then(|i| i32::try_from(i).ok()).map(Value::from),
            PrimitiveKind::I64 => self.to_integer().and_then(|i| i64::try_from(i).ok()).map(Value::from),
            PrimitiveKind::U8 => self.to_integer().and_then(|i| u8::try_from(i).ok()).map(Value::from),
            PrimitiveKind::U16 => self.to_integer().and_then(|i| u16::try_from(i).ok()).map(Value::from),
            PrimitiveKind::U32 => self.to_integer().and_then(|i| u32::try_from(i).ok()).map(Value::from),
            PrimitiveKind::U64 => self.to_integer().and_then(|i| u64::try_from(i).ok()).map(Value::from),
            PrimitiveKind::F32 => self.to_f32().map(Value::from),
            PrimitiveKind::F64 => self.to_f64().map(Value::from),
            PrimitiveKind::Decimal => self.to_decimal().map(Value::from),
            PrimitiveKind::String => Some(Value::from(self.to_text())),
            PrimitiveKind::DateTime => self.to_utc(options).map(|dt| Value::from(dt.naive_utc())),
            PrimitiveKind::Date => self.to_utc(options).map(|dt| Value::from(dt.naive_utc().date())),
            PrimitiveKind::DateTimeUtc => self.to_utc(options).map(Value::from),
        }
    }

    /// Renders the scalar the way string conversion does.
    pub(crate) fn to_text(&self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Char(c) => c.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Single(f) => f.to_string(),
            Scalar::Double(f) => f.to_string(),
            Scalar::Decimal(d) => d.to_string(),
            Scalar::Text(s) => s.clone(),
            Scalar::DateTime(dt) => dt.to_string(),
            Scalar::Date(d) => d.to_string(),
            Scalar::DateTimeUtc(dt) => dt.to_rfc3339(),
        }
    }

    fn to_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            Scalar::Int(i) => Some(*i != 0),
            Scalar::Single(f) => Some(*f != 0.0),
            Scalar::Double(f) => Some(*f != 0.0),
            Scalar::Decimal(d) => Some(!d.is_zero()),
            Scalar::Text(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn to_char(&self) -> Option<char> {
        match self {
            Scalar::Char(c) => Some(*c),
            Scalar::Int(i) => u32::try_from(*i).ok().and_then(char::from_u32),
            Scalar::Text(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn to_integer(&self) -> Option<i128> {
        match self {
            Scalar::Bool(b) => Some(i128::from(*b)),
            Scalar::Char(c) => Some(i128::from(u32::from(*c))),
            Scalar::Int(i) => Some(*i),
            Scalar::Single(f) => round_float(f64::from(*f)),
            Scalar::Double(f) => round_float(*f),
            Scalar::Decimal(d) => d
                .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
                .to_i128(),
            Scalar::Text(s) => s.trim().parse::<i128>().ok(),
            _ => None,
        }
    }

    fn to_f64(&self) -> Option<f64> {
        match self {
            Scalar::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Single(f) => Some(f64::from(*f)),
            Scalar::Double(f) => Some(*f),
            Scalar::Decimal(d) => d.to_f64(),
            Scalar::Text(s) => parse_float::<f64>(s, f64::is_infinite),
            _ => None,
        }
    }

    fn to_f32(&self) -> Option<f32> {
        match self {
            Scalar::Single(f) => Some(*f),
            Scalar::Text(s) => parse_float::<f32>(s, f32::is_infinite),
            _ => {
                let wide = self.to_f64()?;
                if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
                    None
                } else {
                    Some(wide as f32)
                }
            }
        }
    }

    fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Scalar::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
            Scalar::Int(i) => Decimal::from_i128(*i),
            Scalar::Single(f) => Decimal::from_f32(*f),
            Scalar::Double(f) => Decimal::from_f64(*f),
            Scalar::Decimal(d) => Some(*d),
            Scalar::Text(s) => {
                let s = s.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .ok()
            }
            _ => None,
        }
    }

    fn to_utc(&self, options: &ConverterOptions) -> Option<DateTime<Utc>> {
        match self {
            Scalar::DateTime(dt) => Some(Utc.from_utc_datetime(dt)),
            Scalar::Date(d) => d.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt)),
            Scalar::DateTimeUtc(dt) => Some(*dt),
            Scalar::Text(s) => parse_datetime(s, options),
            _ => None,
        }
    }
}

fn round_float(value: f64) -> Option<i128> {
    if value.is_finite() {
        Some(value.round_ties_even() as i128)
    } else {
        None
    }
}

const EXTENDED_RFC3339: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Parses a float, declining finite text whose magnitude overflows to infinity.
fn parse_float<F: FromStr + Copy>(text: &str, is_infinite: fn(F) -> bool) -> Option<F> {
    let text = text.trim();
    let parsed = text.parse::<F>().ok()?;
    let unsigned = text.trim_start_matches(['+', '-']);
    let literal = unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity");
    if is_infinite(parsed) && !literal {
        None
    } else {
        Some(parsed)
    }
}

fn parse_datetime(text: &str, options: &ConverterOptions) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    // RFC 3339 with years outside 0000..=9999, as rendered for the extremes.
    if let Ok(dt) = DateTime::parse_from_str(text, EXTENDED_RFC3339) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in &options.date_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&dt));
        }
        if let Ok(d) = NaiveDate::parse_from_str(text, format) {
            return d.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
        }
    }
    None
}

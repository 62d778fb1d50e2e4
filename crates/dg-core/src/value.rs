//! Scalar cell values and their textual wire encoding
//!
//! The wire format is JSON and has no native representation for IEEE-754
//! non-finite numbers or missing timestamps, so those serialize as literal
//! sentinel tokens. The serde impls here keep the mapping symmetric: every
//! path that writes a sentinel reads it back to the same value.

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wire sentinel for NaN
pub const NAN_TOKEN: &str = "$NaN$";
/// Wire sentinel for positive infinity
pub const INFINITY_TOKEN: &str = "$Infinity$";
/// Wire sentinel for negative infinity
pub const NEG_INFINITY_TOKEN: &str = "$NegInfinity$";
/// Wire sentinel for a missing timestamp
pub const NAT_TOKEN: &str = "$NaT$";

/// A single cell's value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    DateTime(DateTime<Utc>),
    /// Missing timestamp ("not a time")
    NaT,
}

impl CellValue {
    /// True for null, NaT and NaN, the values the view renders as missing
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null | CellValue::NaT => true,
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Str(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Str(v)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(v) => serializer.serialize_bool(*v),
            CellValue::Int(v) => serializer.serialize_i64(*v),
            CellValue::Float(v) => {
                if v.is_nan() {
                    serializer.serialize_str(NAN_TOKEN)
                } else if *v == f64::INFINITY {
                    serializer.serialize_str(INFINITY_TOKEN)
                } else if *v == f64::NEG_INFINITY {
                    serializer.serialize_str(NEG_INFINITY_TOKEN)
                } else {
                    serializer.serialize_f64(*v)
                }
            }
            CellValue::Str(v) => serializer.serialize_str(v),
            CellValue::DateTime(v) => serializer.serialize_str(&v.to_rfc3339()),
            CellValue::NaT => serializer.serialize_str(NAT_TOKEN),
        }
    }
}

struct CellValueVisitor;

impl<'de> Visitor<'de> for CellValueVisitor {
    type Value = CellValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON scalar")
    }

    fn visit_unit<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<CellValue, D::Error> {
        deserializer.deserialize_any(CellValueVisitor)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<CellValue, E> {
        Ok(CellValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<CellValue, E> {
        Ok(CellValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<CellValue, E> {
        if v <= i64::MAX as u64 {
            Ok(CellValue::Int(v as i64))
        } else {
            Ok(CellValue::Float(v as f64))
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<CellValue, E> {
        Ok(CellValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<CellValue, E> {
        Ok(match v {
            NAN_TOKEN => CellValue::Float(f64::NAN),
            INFINITY_TOKEN => CellValue::Float(f64::INFINITY),
            NEG_INFINITY_TOKEN => CellValue::Float(f64::NEG_INFINITY),
            NAT_TOKEN => CellValue::NaT,
            other => CellValue::Str(other.to_string()),
        })
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<CellValue, D::Error> {
        deserializer.deserialize_any(CellValueVisitor)
    }
}

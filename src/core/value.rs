//! Host value materialization
//!
//! This module turns the values a driver reads off the wire into the values
//! the host runtime sees. Each column's type code picks a [`ValueKind`]; the
//! kind then decides how the raw [`NativeValue`] is converted.

use super::error::{BridgeError, Result};
use super::temporal::{self, NativeTemporal, TemporalValue};
use super::value_kind::{self, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value as read by the driver
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    /// SQL NULL
    Null,
    /// Any integer column
    Integer(i64),
    /// Any floating point column
    Real(f64),
    /// Boolean or bit column
    Boolean(bool),
    /// Character data
    Text(String),
    /// Exact numeric in its decimal text form
    Numeric(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// Date, time or timestamp
    Temporal(NativeTemporal),
}

impl NativeValue {
    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Integer(_) => "integer",
            NativeValue::Real(_) => "real",
            NativeValue::Boolean(_) => "boolean",
            NativeValue::Text(_) => "text",
            NativeValue::Numeric(_) => "numeric",
            NativeValue::Bytes(_) => "bytes",
            NativeValue::Temporal(_) => "temporal",
        }
    }
}

/// Value handed to the host runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostValue {
    /// Null value
    Null,
    /// Machine-sized integer
    Integer(i64),
    /// Big integer, wide enough for unsigned 64-bit columns
    BigInteger(i128),
    /// Boolean value
    Boolean(bool),
    /// String value
    Text(String),
    /// Exact decimal as text plus the column scale
    Decimal { digits: String, scale: i32 },
    /// 64-bit floating point
    Float(f64),
    /// Binary data
    Bytes(Vec<u8>),
    /// Date, date-time or time
    Temporal(TemporalValue),
}

impl HostValue {
    /// Convert `native` into the host value for a column of `kind`.
    ///
    /// A NULL always materializes as [`HostValue::Null`], as do the temporal
    /// null sentinels. A value that cannot be read as `kind` is a
    /// [`BridgeError::TypeMismatch`].
    pub fn materialize(kind: ValueKind, native: NativeValue, scale: i32) -> Result<HostValue> {
        let mismatch =
            |native: &NativeValue| BridgeError::type_mismatch(kind.to_str(), native.type_name());

        let value = match (kind, native) {
            (_, NativeValue::Null) | (ValueKind::Null, _) => HostValue::Null,

            (ValueKind::SmallInt, native) => {
                HostValue::Integer(integer(&native).ok_or_else(|| mismatch(&native))?)
            }
            (ValueKind::BigInt, native) => {
                HostValue::BigInteger(big_integer(&native).ok_or_else(|| mismatch(&native))?)
            }

            (ValueKind::Boolean, NativeValue::Boolean(v)) => HostValue::Boolean(v),
            (ValueKind::Boolean, NativeValue::Integer(v)) => HostValue::Boolean(v != 0),
            (ValueKind::Boolean, NativeValue::Text(s)) => match parse_bool(&s) {
                Some(v) => HostValue::Boolean(v),
                None => return Err(mismatch(&NativeValue::Text(s))),
            },

            (ValueKind::Text, NativeValue::Text(s) | NativeValue::Numeric(s)) => HostValue::Text(s),
            (ValueKind::Text, NativeValue::Bytes(b)) => {
                HostValue::Text(String::from_utf8_lossy(&b).into_owned())
            }
            (ValueKind::Text, NativeValue::Integer(v)) => HostValue::Text(v.to_string()),
            (ValueKind::Text, NativeValue::Real(v)) => HostValue::Text(v.to_string()),
            (ValueKind::Text, NativeValue::Boolean(v)) => HostValue::Text(v.to_string()),
            (ValueKind::Text, NativeValue::Temporal(t)) => {
                HostValue::Text(t.epoch_millis().to_string())
            }

            (ValueKind::Date, NativeValue::Temporal(t)) => {
                temporal_or_null(temporal::convert_date(&t))
            }
            (ValueKind::DateTime, NativeValue::Temporal(t)) => {
                temporal_or_null(temporal::convert_datetime(&t))
            }
            (ValueKind::Time, NativeValue::Temporal(t)) => {
                temporal_or_null(temporal::convert_time(&t))
            }

            (ValueKind::Decimal, NativeValue::Numeric(s) | NativeValue::Text(s)) => {
                HostValue::Decimal {
                    digits: s.trim().to_string(),
                    scale,
                }
            }
            (ValueKind::Decimal, NativeValue::Integer(v)) => HostValue::Decimal {
                digits: v.to_string(),
                scale,
            },
            (ValueKind::Decimal, NativeValue::Real(v)) => HostValue::Decimal {
                digits: v.to_string(),
                scale,
            },

            (ValueKind::Float, NativeValue::Real(v)) => HostValue::Float(v),
            (ValueKind::Float, NativeValue::Integer(v)) => HostValue::Float(v as f64),
            (ValueKind::Float, native @ (NativeValue::Text(_) | NativeValue::Numeric(_))) => {
                match numeric_text(&native).and_then(|s| s.parse().ok()) {
                    Some(v) => HostValue::Float(v),
                    None => return Err(mismatch(&native)),
                }
            }

            (ValueKind::ByteArray, NativeValue::Bytes(b)) => HostValue::Bytes(b),
            (ValueKind::ByteArray, NativeValue::Text(s)) => HostValue::Bytes(s.into_bytes()),

            (_, native) => return Err(mismatch(&native)),
        };

        Ok(value)
    }

    /// Get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Boolean(v) => Some(*v),
            HostValue::Integer(v) => Some(*v != 0),
            HostValue::BigInteger(v) => Some(*v != 0),
            HostValue::Text(s) => parse_bool(s),
            _ => None,
        }
    }

    /// Get the value as an i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HostValue::Integer(v) => Some(*v),
            HostValue::BigInteger(v) => i64::try_from(*v).ok(),
            HostValue::Boolean(v) => Some(i64::from(*v)),
            HostValue::Float(v) => Some(*v as i64),
            HostValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Get the value as an i128, covering every integer column
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            HostValue::BigInteger(v) => Some(*v),
            other => other.as_i64().map(i128::from),
        }
    }

    /// Get the value as an f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HostValue::Float(v) => Some(*v),
            HostValue::Integer(v) => Some(*v as f64),
            HostValue::BigInteger(v) => Some(*v as f64),
            HostValue::Decimal { digits, .. } => digits.parse().ok(),
            HostValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Get the value as a string (zero-copy for text values)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Text(s) => Some(s.as_str()),
            HostValue::Decimal { digits, .. } => Some(digits.as_str()),
            _ => None,
        }
    }

    /// Get the value as bytes (zero-copy)
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            HostValue::Bytes(b) => Some(b),
            HostValue::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Get the temporal payload
    pub fn as_temporal(&self) -> Option<&TemporalValue> {
        match self {
            HostValue::Temporal(t) => Some(t),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    /// Kind this value belongs to
    pub fn kind(&self) -> ValueKind {
        match self {
            HostValue::Null => ValueKind::Null,
            HostValue::Integer(_) => ValueKind::SmallInt,
            HostValue::BigInteger(_) => ValueKind::BigInt,
            HostValue::Boolean(_) => ValueKind::Boolean,
            HostValue::Text(_) => ValueKind::Text,
            HostValue::Decimal { .. } => ValueKind::Decimal,
            HostValue::Float(_) => ValueKind::Float,
            HostValue::Bytes(_) => ValueKind::ByteArray,
            HostValue::Temporal(t) => t.kind(),
        }
    }

    /// Render the value as text
    pub fn render(&self) -> String {
        match self {
            HostValue::Null => "null".to_string(),
            HostValue::Integer(v) => v.to_string(),
            HostValue::BigInteger(v) => v.to_string(),
            HostValue::Boolean(v) => v.to_string(),
            HostValue::Text(s) => s.clone(),
            HostValue::Decimal { digits, .. } => digits.clone(),
            HostValue::Float(v) => v.to_string(),
            HostValue::Bytes(b) => format!("<{} bytes>", b.len()),
            HostValue::Temporal(t) => t.render(),
        }
    }
}

impl From<bool> for HostValue {
    fn from(v: bool) -> Self {
        HostValue::Boolean(v)
    }
}

impl From<i64> for HostValue {
    fn from(v: i64) -> Self {
        HostValue::Integer(v)
    }
}

impl From<f64> for HostValue {
    fn from(v: f64) -> Self {
        HostValue::Float(v)
    }
}

impl From<String> for HostValue {
    fn from(v: String) -> Self {
        HostValue::Text(v)
    }
}

impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        HostValue::Text(v.to_string())
    }
}

impl From<Vec<u8>> for HostValue {
    fn from(v: Vec<u8>) -> Self {
        HostValue::Bytes(v)
    }
}

impl From<TemporalValue> for HostValue {
    fn from(v: TemporalValue) -> Self {
        HostValue::Temporal(v)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => HostValue::Null,
        }
    }
}

/// Column metadata reported by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub type_code: i32,
    pub scale: i32,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, type_code: i32, scale: i32) -> Self {
        Self {
            name: name.into(),
            type_code,
            scale,
        }
    }

    /// Kind values of this column materialize as.
    ///
    /// Unknown type codes fall back to text with a warning.
    pub fn value_kind(&self) -> ValueKind {
        if !value_kind::is_known_type_code(self.type_code) {
            tracing::warn!(
                column = %self.name,
                type_code = self.type_code,
                "no casting rule for column type, reading as text"
            );
        }
        value_kind::map_type_code(self.type_code, self.scale)
    }

    /// Materialize one value read from this column
    pub fn materialize(&self, native: NativeValue) -> Result<HostValue> {
        HostValue::materialize(self.value_kind(), native, self.scale)
    }
}

/// A row of host values (column name -> value mapping)
pub type HostRow = HashMap<String, HostValue>;

/// Materialize a driver row given its column metadata
pub fn materialize_row(
    columns: &[ColumnDescriptor],
    values: Vec<NativeValue>,
) -> Result<HostRow> {
    if columns.len() != values.len() {
        return Err(BridgeError::other(format!(
            "Row has {} values for {} columns",
            values.len(),
            columns.len()
        )));
    }

    columns
        .iter()
        .zip(values)
        .map(|(column, native)| Ok((column.name.clone(), column.materialize(native)?)))
        .collect()
}

fn integer(native: &NativeValue) -> Option<i64> {
    match native {
        NativeValue::Integer(v) => Some(*v),
        NativeValue::Boolean(v) => Some(i64::from(*v)),
        NativeValue::Real(v) => Some(*v as i64),
        NativeValue::Text(s) | NativeValue::Numeric(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn big_integer(native: &NativeValue) -> Option<i128> {
    match native {
        NativeValue::Text(s) | NativeValue::Numeric(s) => s.trim().parse().ok(),
        other => integer(other).map(i128::from),
    }
}

fn numeric_text(native: &NativeValue) -> Option<&str> {
    match native {
        NativeValue::Text(s) | NativeValue::Numeric(s) => Some(s.trim()),
        _ => None,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "t" | "1" | "yes" => Some(true),
        "false" | "f" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn temporal_or_null(value: Option<TemporalValue>) -> HostValue {
    value.map_or(HostValue::Null, HostValue::Temporal)
}

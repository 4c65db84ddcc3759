//! Column type codes and host value kinds
//!
//! Backends report column types as integer codes from the JDBC
//! `java.sql.Types` constant space. [`map_type_code`] folds that space onto
//! the closed [`ValueKind`] tag set the host layer knows how to build.

use serde::{Deserialize, Serialize};

/// `java.sql.Types` constants
pub mod sql_types {
    pub const BIT: i32 = -7;
    pub const TINYINT: i32 = -6;
    pub const SMALLINT: i32 = 5;
    pub const INTEGER: i32 = 4;
    pub const BIGINT: i32 = -5;
    pub const FLOAT: i32 = 6;
    pub const REAL: i32 = 7;
    pub const DOUBLE: i32 = 8;
    pub const NUMERIC: i32 = 2;
    pub const DECIMAL: i32 = 3;
    pub const CHAR: i32 = 1;
    pub const VARCHAR: i32 = 12;
    pub const LONGVARCHAR: i32 = -1;
    pub const DATE: i32 = 91;
    pub const TIME: i32 = 92;
    pub const TIMESTAMP: i32 = 93;
    pub const BINARY: i32 = -2;
    pub const VARBINARY: i32 = -3;
    pub const LONGVARBINARY: i32 = -4;
    pub const NULL: i32 = 0;
    pub const OTHER: i32 = 1111;
    pub const JAVA_OBJECT: i32 = 2000;
    pub const BLOB: i32 = 2004;
    pub const CLOB: i32 = 2005;
    pub const BOOLEAN: i32 = 16;
}

/// Host value category chosen for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Machine-sized integer (tiny/small/regular int columns)
    SmallInt,
    /// 64-bit integer
    BigInt,
    /// Boolean or single bit
    Boolean,
    /// Character data, and every unrecognized type
    Text,
    /// Calendar date
    Date,
    /// Date with time of day and zone offset
    DateTime,
    /// Time of day
    Time,
    /// Exact numeric
    Decimal,
    /// Approximate numeric
    Float,
    /// Raw bytes
    ByteArray,
    /// Column that can only hold NULL
    Null,
}

impl ValueKind {
    /// Short lowercase name used in logs and error messages
    pub fn to_str(&self) -> &'static str {
        match self {
            ValueKind::SmallInt => "small_int",
            ValueKind::BigInt => "big_int",
            ValueKind::Boolean => "boolean",
            ValueKind::Text => "text",
            ValueKind::Date => "date",
            ValueKind::DateTime => "date_time",
            ValueKind::Time => "time",
            ValueKind::Decimal => "decimal",
            ValueKind::Float => "float",
            ValueKind::ByteArray => "byte_array",
            ValueKind::Null => "null",
        }
    }

    /// Check if values of this kind go through the temporal converter
    pub fn is_temporal(&self) -> bool {
        matches!(self, ValueKind::Date | ValueKind::DateTime | ValueKind::Time)
    }

    /// Check if values of this kind are numeric
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueKind::SmallInt | ValueKind::BigInt | ValueKind::Decimal | ValueKind::Float
        )
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Map a backend type code to the host value kind.
///
/// Total: codes outside the table degrade to [`ValueKind::Text`]. `scale` is
/// accepted for precision-aware decimal handling and does not change the tag.
pub fn map_type_code(type_code: i32, _scale: i32) -> ValueKind {
    use sql_types::*;

    match type_code {
        INTEGER | SMALLINT | TINYINT => ValueKind::SmallInt,
        BIGINT => ValueKind::BigInt,
        BIT | BOOLEAN => ValueKind::Boolean,
        CHAR | VARCHAR => ValueKind::Text,
        DATE => ValueKind::Date,
        TIMESTAMP => ValueKind::DateTime,
        TIME => ValueKind::Time,
        DECIMAL | NUMERIC => ValueKind::Decimal,
        REAL | FLOAT | DOUBLE => ValueKind::Float,
        BLOB | JAVA_OBJECT | VARBINARY | BINARY | LONGVARBINARY => ValueKind::ByteArray,
        NULL => ValueKind::Null,
        _ => ValueKind::Text,
    }
}

/// Check whether `type_code` has an explicit entry in the mapping table.
///
/// Callers use this to tell a deliberate `Text` mapping from the fallback.
pub fn is_known_type_code(type_code: i32) -> bool {
    use sql_types::*;

    matches!(
        type_code,
        INTEGER
            | SMALLINT
            | TINYINT
            | BIGINT
            | BIT
            | BOOLEAN
            | CHAR
            | VARCHAR
            | DATE
            | TIMESTAMP
            | TIME
            | DECIMAL
            | NUMERIC
            | REAL
            | FLOAT
            | DOUBLE
            | BLOB
            | JAVA_OBJECT
            | VARBINARY
            | BINARY
            | LONGVARBINARY
            | NULL
    )
}

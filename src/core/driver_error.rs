//! Driver error normalization
//!
//! Every driver reports failures its own way. [`DriverError`] is the single
//! shape the host layer sees: a category, the vendor error code when the
//! driver supplies one, the SQL state, the driver's message and optionally
//! the statement that failed.
//!
//! The rendered message has a fixed layout so tooling can pattern-match on
//! it:
//!
//! ```text
//! (vendor_errno=1062, sql_state=23000) Duplicate entry
//! Query: INSERT INTO users ...
//! ```
//!
//! The `vendor_errno` segment is present only for codes greater than zero and
//! the `Query:` line only when a statement was supplied.

use super::dialect::DialectPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

const VENDOR_PREFIX: &str = "vendor_errno=";
const STATE_PREFIX: &str = "sql_state=";
const QUERY_SEPARATOR: &str = "\nQuery: ";

/// Error class a driver failure is raised as
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    SqlError,
    ConnectionError,
    DataError,
    IntegrityError,
    SyntaxError,
    TransactionError,
    /// Driver-specific class name
    Other(String),
}

impl ErrorCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCategory::SqlError => "SQLError",
            ErrorCategory::ConnectionError => "ConnectionError",
            ErrorCategory::DataError => "DataError",
            ErrorCategory::IntegrityError => "IntegrityError",
            ErrorCategory::SyntaxError => "SyntaxError",
            ErrorCategory::TransactionError => "TransactionError",
            ErrorCategory::Other(name) => name,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ErrorCategory {
    fn from(name: &str) -> Self {
        match name {
            "SQLError" => ErrorCategory::SqlError,
            "ConnectionError" => ErrorCategory::ConnectionError,
            "DataError" => ErrorCategory::DataError,
            "IntegrityError" => ErrorCategory::IntegrityError,
            "SyntaxError" => ErrorCategory::SyntaxError,
            "TransactionError" => ErrorCategory::TransactionError,
            other => ErrorCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for ErrorCategory {
    fn from(name: String) -> Self {
        ErrorCategory::from(name.as_str())
    }
}

/// Failure as reported by a native database driver
pub trait NativeException {
    /// Vendor error code, `0` or negative when the driver has none
    fn vendor_code(&self) -> i32;

    /// Five-character SQL state
    fn sql_state(&self) -> Option<String>;

    /// Human-readable message
    fn localized_message(&self) -> String;
}

/// Plain native exception for drivers without their own error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlException {
    pub vendor_code: i32,
    pub sql_state: Option<String>,
    pub message: String,
}

impl SqlException {
    pub fn new(vendor_code: i32, sql_state: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            vendor_code,
            sql_state: sql_state.map(str::to_string),
            message: message.into(),
        }
    }
}

impl NativeException for SqlException {
    fn vendor_code(&self) -> i32 {
        self.vendor_code
    }

    fn sql_state(&self) -> Option<String> {
        self.sql_state.clone()
    }

    fn localized_message(&self) -> String {
        self.message.clone()
    }
}

/// Normalized driver failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct DriverError {
    category: ErrorCategory,
    vendor_code: Option<i32>,
    sql_state: Option<String>,
    native_message: String,
    query_text: Option<String>,
    message: String,
}

impl DriverError {
    /// Create a driver error that carries only a message
    pub fn new(category: impl Into<ErrorCategory>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            category: category.into(),
            vendor_code: None,
            sql_state: None,
            native_message: message.clone(),
            query_text: None,
            message,
        }
    }

    /// Normalize a native driver failure
    pub fn from_native<E>(category: impl Into<ErrorCategory>, exception: &E) -> Self
    where
        E: NativeException + ?Sized,
    {
        Self::build(category.into(), exception, None)
    }

    /// Normalize a native driver failure raised while running `statement`
    pub fn from_native_with_statement<E>(
        category: impl Into<ErrorCategory>,
        exception: &E,
        statement: impl fmt::Display,
    ) -> Self
    where
        E: NativeException + ?Sized,
    {
        Self::build(category.into(), exception, Some(statement.to_string()))
    }

    /// Like [`from_native_with_statement`](Self::from_native_with_statement),
    /// with the statement text cleaned up by the backend's dialect first
    pub fn from_native_with_dialect<E>(
        category: impl Into<ErrorCategory>,
        exception: &E,
        dialect: &dyn DialectPolicy,
        raw_statement: &str,
    ) -> Self
    where
        E: NativeException + ?Sized,
    {
        let statement = dialect.describe_statement(raw_statement);
        Self::build(category.into(), exception, Some(statement))
    }

    fn build<E>(category: ErrorCategory, exception: &E, query_text: Option<String>) -> Self
    where
        E: NativeException + ?Sized,
    {
        let code = exception.vendor_code();
        let vendor_code = (code > 0).then_some(code);
        let sql_state = exception.sql_state();
        let native_message = exception.localized_message();

        let mut message = String::from("(");
        if let Some(code) = vendor_code {
            message.push_str(VENDOR_PREFIX);
            message.push_str(&code.to_string());
            message.push_str(", ");
        }
        message.push_str(STATE_PREFIX);
        message.push_str(sql_state.as_deref().unwrap_or("null"));
        message.push_str(") ");
        message.push_str(&native_message);
        if let Some(query) = &query_text {
            message.push_str(QUERY_SEPARATOR);
            message.push_str(query);
        }

        Self {
            category,
            vendor_code,
            sql_state,
            native_message,
            query_text,
            message,
        }
    }

    pub fn category(&self) -> &ErrorCategory {
        &self.category
    }

    pub fn vendor_code(&self) -> Option<i32> {
        self.vendor_code
    }

    pub fn sql_state(&self) -> Option<&str> {
        self.sql_state.as_deref()
    }

    /// Message as reported by the driver, without the code prefix
    pub fn native_message(&self) -> &str {
        &self.native_message
    }

    pub fn query_text(&self) -> Option<&str> {
        self.query_text.as_deref()
    }

    /// Fully rendered message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Split a rendered driver error message back into its segments.
    ///
    /// Returns `None` for text that does not start with the
    /// `(…sql_state=…) ` prefix.
    ///
    /// The layout is ambiguous when the driver message itself contains a
    /// `\nQuery: ` line: the last such line is taken as the statement. When
    /// the caller knows no statement was attached, use
    /// [`parse_message_without_statement`](Self::parse_message_without_statement).
    pub fn parse_message(rendered: &str) -> Option<ParsedMessage> {
        Self::parse_rendered(rendered, true)
    }

    /// Like [`parse_message`](Self::parse_message) for errors raised without
    /// a statement; the whole tail after the prefix is the message.
    pub fn parse_message_without_statement(rendered: &str) -> Option<ParsedMessage> {
        Self::parse_rendered(rendered, false)
    }

    fn parse_rendered(rendered: &str, with_statement: bool) -> Option<ParsedMessage> {
        let rest = rendered.strip_prefix('(')?;

        let (vendor_code, rest) = match rest.strip_prefix(VENDOR_PREFIX) {
            Some(tail) => {
                let (code, tail) = tail.split_once(", ")?;
                (Some(code.parse().ok()?), tail)
            }
            None => (None, rest),
        };

        let rest = rest.strip_prefix(STATE_PREFIX)?;
        let (state, rest) = rest.split_once(") ")?;
        let sql_state = (state != "null").then(|| state.to_string());

        let split = if with_statement {
            rest.rfind(QUERY_SEPARATOR)
        } else {
            None
        };
        let (message, query_text) = match split {
            Some(pos) => (
                &rest[..pos],
                Some(rest[pos + QUERY_SEPARATOR.len()..].to_string()),
            ),
            None => (rest, None),
        };

        Some(ParsedMessage {
            vendor_code,
            sql_state,
            message: message.to_string(),
            query_text,
        })
    }
}

/// Segments recovered from a rendered [`DriverError`] message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub vendor_code: Option<i32>,
    pub sql_state: Option<String>,
    pub message: String,
    pub query_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_with_vendor_code() {
        let exc = SqlException::new(1062, Some("23000"), "Duplicate entry");
        let err = DriverError::from_native("SQLError", &exc);

        assert_eq!(err.message(), "(vendor_errno=1062, sql_state=23000) Duplicate entry");
        assert_eq!(err.vendor_code(), Some(1062));
        assert_eq!(err.sql_state(), Some("23000"));
        assert_eq!(err.native_message(), "Duplicate entry");
        assert_eq!(err.query_text(), None);
        assert_eq!(err.category(), &ErrorCategory::SqlError);
    }

    #[test]
    fn test_vendor_code_zero_or_negative_is_omitted() {
        let exc = SqlException::new(0, Some("42P01"), "relation does not exist");
        let err = DriverError::from_native(ErrorCategory::SyntaxError, &exc);
        assert_eq!(err.message(), "(sql_state=42P01) relation does not exist");
        assert_eq!(err.vendor_code(), None);

        let exc = SqlException::new(-1, Some("08001"), "no route");
        let err = DriverError::from_native(ErrorCategory::ConnectionError, &exc);
        assert!(!err.message().contains(VENDOR_PREFIX));
    }

    #[test]
    fn test_message_with_statement() {
        let exc = SqlException::new(1064, Some("42000"), "You have an error");
        let err = DriverError::from_native_with_statement(
            "SyntaxError",
            &exc,
            "SELEC * FROM users",
        );
        assert_eq!(
            err.message(),
            "(vendor_errno=1064, sql_state=42000) You have an error\nQuery: SELEC * FROM users"
        );
        assert_eq!(err.query_text(), Some("SELEC * FROM users"));
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn test_missing_sql_state_renders_null() {
        let exc = SqlException::new(5, None, "database is locked");
        let err = DriverError::from_native("SQLError", &exc);
        assert_eq!(err.message(), "(vendor_errno=5, sql_state=null) database is locked");
        assert_eq!(err.sql_state(), None);
    }

    #[test]
    fn test_parse_message_recovers_segments() {
        let exc = SqlException::new(1062, Some("23000"), "Duplicate entry 'a' for key 1");
        let err = DriverError::from_native_with_statement(
            "IntegrityError",
            &exc,
            "INSERT INTO t VALUES ('a')",
        );

        let parsed = DriverError::parse_message(err.message()).unwrap();
        assert_eq!(parsed.vendor_code, Some(1062));
        assert_eq!(parsed.sql_state.as_deref(), Some("23000"));
        assert_eq!(parsed.message, "Duplicate entry 'a' for key 1");
        assert_eq!(parsed.query_text.as_deref(), Some("INSERT INTO t VALUES ('a')"));
    }

    #[test]
    fn test_parse_message_without_optional_segments() {
        let parsed = DriverError::parse_message("(sql_state=null) boom").unwrap();
        assert_eq!(parsed.vendor_code, None);
        assert_eq!(parsed.sql_state, None);
        assert_eq!(parsed.message, "boom");
        assert_eq!(parsed.query_text, None);

        assert!(DriverError::parse_message("plain failure").is_none());
    }

    #[test]
    fn test_parse_message_with_query_line_in_driver_text() {
        let exc = SqlException::new(0, Some("HY000"), "bad\nQuery: nope");
        let err = DriverError::from_native("SQLError", &exc);

        // the layout alone cannot tell this from an attached statement
        let parsed = DriverError::parse_message(err.message()).unwrap();
        assert_eq!(parsed.query_text.as_deref(), Some("nope"));

        let parsed = DriverError::parse_message_without_statement(err.message()).unwrap();
        assert_eq!(parsed.message, "bad\nQuery: nope");
        assert_eq!(parsed.query_text, None);
        assert_eq!(parsed.sql_state.as_deref(), Some("HY000"));
    }

    #[test]
    fn test_plain_message_error() {
        let err = DriverError::new("ConnectionError", "Unable to connect");
        assert_eq!(err.message(), "Unable to connect");
        assert_eq!(err.category(), &ErrorCategory::ConnectionError);
        assert_eq!(err.vendor_code(), None);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(ErrorCategory::from("DataError"), ErrorCategory::DataError);
        assert_eq!(ErrorCategory::SqlError.to_string(), "SQLError");
        assert_eq!(
            ErrorCategory::from("MysqlError"),
            ErrorCategory::Other("MysqlError".to_string())
        );
        assert_eq!(ErrorCategory::Other("X".into()).as_str(), "X");
    }

    #[test]
    fn test_serializes_to_json() {
        let exc = SqlException::new(1, Some("HY000"), "oops");
        let err = DriverError::from_native("SQLError", &exc);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["vendor_code"], 1);
        assert_eq!(json["sql_state"], "HY000");
    }
}

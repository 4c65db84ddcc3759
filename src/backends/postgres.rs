//! PostgreSQL dialect
//!
//! Quoting assumes `standard_conforming_strings = on` (the server default
//! since 9.1): backslashes are literal and quotes are doubled.

use crate::core::backend::BackendKind;
use crate::core::dialect::DialectPolicy;
use std::borrow::Cow;

/// PostgreSQL dialect policy
#[derive(Debug, Clone, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Create a new PostgreSQL dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl DialectPolicy for PostgresDialect {
    fn backend(&self) -> BackendKind {
        BackendKind::Postgres
    }

    fn supports_generated_keys(&self) -> bool {
        // inserts use RETURNING instead
        false
    }

    fn supports_scrollable_results(&self) -> bool {
        true
    }

    fn supports_connection_encodings(&self) -> bool {
        true
    }

    fn supports_calendar_in_prepared_statement(&self) -> bool {
        true
    }

    fn encoding_property_key(&self) -> Option<&'static str> {
        Some("charSet")
    }

    fn native_encoding_name<'a>(&self, encoding: &'a str) -> Cow<'a, str> {
        match encoding.to_ascii_lowercase().as_str() {
            "latin1" | "iso8859_1" | "iso-8859-1" => Cow::Borrowed("LATIN1"),
            "utf8" | "utf-8" => Cow::Borrowed("UTF8"),
            _ => Cow::Borrowed(encoding),
        }
    }

    fn uri_scheme(&self) -> &str {
        "postgres"
    }

    fn default_port(&self) -> Option<u16> {
        Some(5432)
    }
}

#[cfg(feature = "postgres")]
impl crate::core::driver_error::NativeException for tokio_postgres::Error {
    fn vendor_code(&self) -> i32 {
        // PostgreSQL reports SQL states only
        0
    }

    fn sql_state(&self) -> Option<String> {
        self.code().map(|state| state.code().to_string())
    }

    fn localized_message(&self) -> String {
        match self.as_db_error() {
            Some(db_error) => db_error.message().to_string(),
            None => self.to_string(),
        }
    }
}

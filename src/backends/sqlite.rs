//! SQLite dialect

use crate::core::backend::BackendKind;
use crate::core::dialect::DialectPolicy;

/// SQLite dialect policy
#[derive(Debug, Clone, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Create a new SQLite dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl DialectPolicy for SqliteDialect {
    fn backend(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    fn supports_generated_keys(&self) -> bool {
        true
    }

    fn supports_scrollable_results(&self) -> bool {
        false
    }

    fn supports_connection_encodings(&self) -> bool {
        false
    }

    fn supports_calendar_in_prepared_statement(&self) -> bool {
        false
    }

    fn uri_scheme(&self) -> &str {
        "sqlite3"
    }
}

#[cfg(feature = "sqlite")]
impl crate::core::driver_error::NativeException for rusqlite::Error {
    fn vendor_code(&self) -> i32 {
        match self {
            rusqlite::Error::SqliteFailure(err, _) => err.extended_code,
            _ => 0,
        }
    }

    fn sql_state(&self) -> Option<String> {
        None
    }

    fn localized_message(&self) -> String {
        match self {
            rusqlite::Error::SqliteFailure(err, Some(message)) => {
                format!("{} ({})", message, err)
            }
            other => other.to_string(),
        }
    }
}

//! Oracle dialect

use crate::core::backend::BackendKind;
use crate::core::dialect::DialectPolicy;

/// Oracle dialect policy
///
/// The thin driver negotiates the character set with the server, so no
/// connection encoding is passed.
#[derive(Debug, Clone, Default)]
pub struct OracleDialect;

impl OracleDialect {
    /// Create a new Oracle dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl DialectPolicy for OracleDialect {
    fn backend(&self) -> BackendKind {
        BackendKind::Oracle
    }

    fn supports_generated_keys(&self) -> bool {
        true
    }

    fn supports_scrollable_results(&self) -> bool {
        true
    }

    fn supports_connection_encodings(&self) -> bool {
        false
    }

    fn supports_calendar_in_prepared_statement(&self) -> bool {
        true
    }

    fn default_port(&self) -> Option<u16> {
        Some(1521)
    }
}

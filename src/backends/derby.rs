//! Apache Derby dialect

use crate::core::backend::BackendKind;
use crate::core::dialect::{ConnectionProperties, DialectPolicy};

/// Derby dialect policy
#[derive(Debug, Clone, Default)]
pub struct DerbyDialect;

impl DerbyDialect {
    /// Create a new Derby dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl DialectPolicy for DerbyDialect {
    fn backend(&self) -> BackendKind {
        BackendKind::Derby
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

    fn default_connection_properties(&self) -> ConnectionProperties {
        // embedded databases are created on first connect
        let mut props = ConnectionProperties::new();
        props.insert("create".to_string(), "true".to_string());
        props
    }

    fn default_port(&self) -> Option<u16> {
        // network server mode
        Some(1527)
    }
}

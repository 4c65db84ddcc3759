//! Dialect registry
//!
//! Maps backend names to their [`DialectPolicy`]. Dialects are registered
//! once, typically at startup, and shared by every connection to that
//! backend. Lookups take a read lock only; registration is the sole writer.

use super::backend::BackendKind;
use super::dialect::DialectPolicy;
use super::error::{BridgeError, Result};
use crate::backends::{DerbyDialect, MysqlDialect, OracleDialect, PostgresDialect, SqliteDialect};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Registry of dialect policies keyed by backend name
#[derive(Default)]
pub struct DialectRegistry {
    dialects: RwLock<HashMap<String, Arc<dyn DialectPolicy>>>,
}

impl DialectRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in dialect registered.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(MysqlDialect::new());
        registry.register(PostgresDialect::new());
        registry.register(SqliteDialect::new());
        registry.register(OracleDialect::new());
        registry.register(DerbyDialect::new());
        registry
    }

    /// Process-wide registry, populated with the built-in dialects on first use.
    pub fn global() -> &'static DialectRegistry {
        static GLOBAL: OnceLock<DialectRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_builtins)
    }

    /// Register a dialect under its own name.
    pub fn register(&self, dialect: impl DialectPolicy + 'static) {
        let name = dialect.name().to_string();
        self.register_arc(name, Arc::new(dialect));
    }

    /// Register a shared dialect under `name`, replacing any previous entry.
    pub fn register_arc(&self, name: impl Into<String>, dialect: Arc<dyn DialectPolicy>) {
        let name = name.into().to_lowercase();
        tracing::debug!(backend = %name, "registering dialect");
        self.dialects.write().insert(name, dialect);
    }

    /// Get a dialect by name. Backend aliases such as `postgresql` resolve to
    /// the canonical entry.
    pub fn get(&self, name: &str) -> Option<Arc<dyn DialectPolicy>> {
        let key = name.to_lowercase();
        let dialects = self.dialects.read();
        if let Some(dialect) = dialects.get(&key) {
            return Some(Arc::clone(dialect));
        }

        let backend = key.parse::<BackendKind>().ok()?;
        dialects.get(backend.to_str()).cloned()
    }

    /// Get a dialect by name, returning an error if not found.
    pub fn require(&self, name: &str) -> Result<Arc<dyn DialectPolicy>> {
        self.get(name)
            .ok_or_else(|| BridgeError::unknown_backend(name))
    }

    /// Get the dialect registered for a built-in backend.
    pub fn for_backend(&self, backend: BackendKind) -> Option<Arc<dyn DialectPolicy>> {
        self.get(backend.to_str())
    }

    /// Check if a dialect is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.dialects.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for DialectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectRegistry")
            .field("dialects", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = DialectRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec!["derby", "mysql", "oracle", "postgres", "sqlite"]
        );
    }

    #[test]
    fn test_lookup_by_alias() {
        let registry = DialectRegistry::with_builtins();
        assert_eq!(
            registry.get("postgresql").map(|d| d.backend()),
            Some(BackendKind::Postgres)
        );
        assert_eq!(
            registry.get("SQLite3").map(|d| d.backend()),
            Some(BackendKind::Sqlite)
        );
        assert!(registry.contains("MariaDB"));
    }

    #[test]
    fn test_lookup_returns_shared_instance() {
        let registry = DialectRegistry::with_builtins();
        let first = registry.require("mysql").unwrap();
        let second = registry.require("mysql").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unknown_backend_errors() {
        let registry = DialectRegistry::with_builtins();
        let err = registry.require("db2").unwrap_err();
        assert!(matches!(err, BridgeError::UnknownBackend(ref name) if name == "db2"));
        assert!(DialectRegistry::new().get("mysql").is_none());
    }

    #[test]
    fn test_register_custom_name() {
        let registry = DialectRegistry::new();
        registry.register_arc("MySQL-Legacy", Arc::new(MysqlDialect::new()));
        let dialect = registry.require("mysql-legacy").unwrap();
        assert_eq!(dialect.backend(), BackendKind::Mysql);
        // alias resolution needs the canonical entry
        assert!(registry.get("mysql").is_none());
    }

    #[test]
    fn test_global_registry() {
        let dialect = DialectRegistry::global().require("oracle").unwrap();
        assert_eq!(dialect.backend(), BackendKind::Oracle);
        assert_eq!(
            DialectRegistry::global().for_backend(BackendKind::Derby).map(|d| d.backend()),
            Some(BackendKind::Derby)
        );
    }
}

//! Backend identifiers
//!
//! This module defines the database backends the bridge ships dialects for.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Built-in database backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BackendKind {
    /// PostgreSQL database
    Postgres = 1,
    /// MySQL/MariaDB database
    Mysql = 2,
    /// SQLite database
    Sqlite = 3,
    /// Oracle database
    Oracle = 4,
    /// Apache Derby (embedded or network)
    Derby = 5,
}

impl BackendKind {
    /// All built-in backends, in registration order
    pub const ALL: [BackendKind; 5] = [
        BackendKind::Mysql,
        BackendKind::Postgres,
        BackendKind::Sqlite,
        BackendKind::Oracle,
        BackendKind::Derby,
    ];

    /// Convert backend to its registry name
    pub fn to_str(&self) -> &'static str {
        match self {
            BackendKind::Postgres => "postgres",
            BackendKind::Mysql => "mysql",
            BackendKind::Sqlite => "sqlite",
            BackendKind::Oracle => "oracle",
            BackendKind::Derby => "derby",
        }
    }

    /// Check if this backend runs in-process rather than behind a server
    pub fn is_embedded(&self) -> bool {
        matches!(self, BackendKind::Sqlite | BackendKind::Derby)
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(BackendKind::Postgres),
            "mysql" | "mariadb" => Ok(BackendKind::Mysql),
            "sqlite" | "sqlite3" => Ok(BackendKind::Sqlite),
            "oracle" => Ok(BackendKind::Oracle),
            "derby" => Ok(BackendKind::Derby),
            _ => Err(format!("Invalid backend: '{}'", s)),
        }
    }
}

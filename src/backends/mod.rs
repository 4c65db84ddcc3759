//! Backend dialect implementations
//!
//! One [`DialectPolicy`](crate::core::DialectPolicy) implementation per
//! supported database. With the matching Cargo feature enabled, each module
//! also teaches the error normalizer to read that backend's native driver
//! error.

pub mod derby;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod sqlite;

pub use derby::DerbyDialect;
pub use mysql::MysqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

//! # Rust Value Bridge
//!
//! The layer between native database drivers and a dynamic host runtime.
//! Drivers speak in integer type codes, epoch milliseconds and vendor error
//! objects; the host wants tagged values, calendar fields and one uniform
//! error shape. This crate does that translation and keeps the small
//! per-backend differences in one place.
//!
//! ## Features
//!
//! - **Type Mapping**: Backend type codes fold onto a closed set of host value kinds
//! - **Temporal Conversion**: Epoch-millisecond values become calendar fields with
//!   the null sentinels drivers use for absent values
//! - **Error Normalization**: Vendor code, SQL state, message and failing statement
//!   rendered in one parseable layout
//! - **Dialect Policies**: Capability flags, default properties, encoding names and
//!   string quoting per backend, behind a shared registry
//! - **Connection URIs**: Form-urlencoded option strings, URI assembly and parsing
//! - **Native Error Adapters**: Optional `rusqlite`, `tokio-postgres` and `mysql_async`
//!   integration behind Cargo features
//!
//! ## Supported Backends
//!
//! | Backend | Generated keys | Scrollable | Encodings | Calendar |
//! |---------|----------------|------------|-----------|----------|
//! | MySQL | ✓ | ✓ | ✓ | ✗ |
//! | PostgreSQL | ✗ | ✓ | ✓ | ✓ |
//! | SQLite | ✓ | ✗ | ✗ | ✗ |
//! | Oracle | ✓ | ✓ | ✗ | ✓ |
//! | Derby | ✓ | ✓ | ✗ | ✓ |
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! rust_value_bridge = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! ### Materializing a row
//!
//! ```rust
//! use rust_value_bridge::prelude::*;
//! use rust_value_bridge::core::value::materialize_row;
//! use rust_value_bridge::core::value_kind::sql_types;
//!
//! fn main() -> Result<()> {
//!     let columns = vec![
//!         ColumnDescriptor::new("id", sql_types::BIGINT, 0),
//!         ColumnDescriptor::new("created_at", sql_types::DATE, 0),
//!     ];
//!     let row = materialize_row(
//!         &columns,
//!         vec![
//!             NativeValue::Integer(7),
//!             NativeValue::Temporal(NativeTemporal::utc(0)),
//!         ],
//!     )?;
//!
//!     assert_eq!(row["id"].as_i64(), Some(7));
//!     // epoch zero is the "no date" sentinel
//!     assert!(row["created_at"].is_null());
//!     Ok(())
//! }
//! ```
//!
//! ### Building a connection URI
//!
//! ```rust
//! use rust_value_bridge::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let uri = ConnectionBuilder::for_backend("mysql")?
//!         .host("localhost")
//!         .database("app")
//!         .encoding("utf8")
//!         .build_uri()?;
//!
//!     assert_eq!(
//!         uri,
//!         "mysql://localhost:3306/app?characterEncoding=UTF-8&useUnicode=yes"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ### Normalizing a driver error
//!
//! ```rust
//! use rust_value_bridge::prelude::*;
//!
//! let exc = SqlException::new(1062, Some("23000"), "Duplicate entry");
//! let err = DriverError::from_native_with_statement("SQLError", &exc, "INSERT INTO t VALUES (1)");
//! assert_eq!(
//!     err.message(),
//!     "(vendor_errno=1062, sql_state=23000) Duplicate entry\nQuery: INSERT INTO t VALUES (1)"
//! );
//! ```
//!
//! ## Project Structure
//!
//! ```text
//! rust_value_bridge/
//! ├── src/
//! │   ├── core/                # Backend-independent types and traits
//! │   │   ├── backend.rs       # Backend enum
//! │   │   ├── connection.rs    # Connection builder and URI parser
//! │   │   ├── dialect.rs       # DialectPolicy trait
//! │   │   ├── driver_error.rs  # Driver error normalization
//! │   │   ├── error.rs         # Crate error type
//! │   │   ├── query_string.rs  # Query string codec
//! │   │   ├── registry.rs      # Dialect registry
//! │   │   ├── temporal.rs      # Temporal conversion
//! │   │   ├── value.rs         # Value materialization
//! │   │   ├── value_kind.rs    # Type code mapping
//! │   │   └── mod.rs
//! │   ├── backends/            # One dialect per backend
//! │   └── lib.rs
//! ├── tests/                   # Integration and property tests
//! ├── benches/                 # Criterion benchmarks
//! └── Cargo.toml
//! ```

/// Core bridge types and traits
pub mod core;

/// Backend dialect implementations
pub mod backends;

/// Prelude for convenient imports
///
/// ```rust
/// use rust_value_bridge::prelude::*;
///
/// let dialect = DialectRegistry::global().require("postgresql").unwrap();
/// assert_eq!(dialect.backend(), BackendKind::Postgres);
/// ```
pub mod prelude {
    pub use crate::core::{
        BackendKind, BridgeError, ColumnDescriptor, ConnectionBuilder, ConnectionUri,
        DialectPolicy, DialectRegistry, DriverError, ErrorCategory, HostRow, HostValue,
        NativeException, NativeTemporal, NativeValue, Result, SqlException, TemporalValue,
        ValueKind,
    };
}

// Re-export at root level for convenience
pub use core::{
    BackendKind, BridgeError, ColumnDescriptor, ConnectionBuilder, ConnectionUri, DialectPolicy,
    DialectRegistry, DriverError, ErrorCategory, HostRow, HostValue, NativeException,
    NativeTemporal, NativeValue, Result, SqlException, TemporalValue, ValueKind,
};

//! Core bridge types and traits
//!
//! This module provides the building blocks shared by every backend: value
//! kinds and materialization, temporal conversion, driver error
//! normalization, the dialect policy contract and its registry, and
//! connection URI handling.

pub mod backend;
pub mod connection;
pub mod dialect;
pub mod driver_error;
pub mod error;
pub mod query_string;
pub mod registry;
pub mod temporal;
pub mod value;
pub mod value_kind;

// Re-export commonly used types
pub use backend::BackendKind;
pub use connection::{ConnectionBuilder, ConnectionUri};
pub use dialect::{ConnectionProperties, DialectPolicy};
pub use driver_error::{DriverError, ErrorCategory, NativeException, SqlException};
pub use error::{BridgeError, Result};
pub use registry::DialectRegistry;
pub use temporal::{AsNativeTemporal, NativeTemporal, TemporalValue};
pub use value::{ColumnDescriptor, HostRow, HostValue, NativeValue};
pub use value_kind::{map_type_code, ValueKind};

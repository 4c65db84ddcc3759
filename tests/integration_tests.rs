//! Integration tests for the value bridge
//!
//! These tests drive the public API the way a driver integration does:
//! - Dialect lookup and connection URI assembly
//! - Row materialization from column metadata
//! - Error normalization with dialect statement cleanup
//! - Concurrent registry access

use chrono::{FixedOffset, TimeZone};
use rust_value_bridge::core::value::materialize_row;
use rust_value_bridge::core::value_kind::sql_types;
use rust_value_bridge::prelude::*;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_every_backend_builds_a_parseable_uri() {
    init_tracing();

    for backend in BackendKind::ALL {
        let builder = ConnectionBuilder::for_backend(backend.to_str())
            .expect("built-in backend")
            .database("bridge_test")
            .encoding("utf8")
            .option("connectTimeout", "5");
        let builder = if backend.is_embedded() {
            builder
        } else {
            builder.host("db.example.com").username("app").password("p@ss word")
        };

        let uri = builder.build_uri().expect("uri should build");
        let parsed = ConnectionUri::parse(&uri).expect("uri should parse");

        assert_eq!(parsed.backend(), Some(backend), "{}", uri);
        assert_eq!(parsed.properties, builder.properties(), "{}", uri);
        assert_eq!(parsed.dialect().unwrap().backend(), backend);
        if !backend.is_embedded() {
            assert_eq!(parsed.password.as_deref(), Some("p@ss word"));
            assert!(parsed.port.is_some());
        }
    }
}

#[test]
fn test_encoding_only_reaches_backends_that_take_it() {
    let registry = DialectRegistry::with_builtins();

    for name in registry.names() {
        let dialect = registry.require(&name).unwrap();
        let props = ConnectionBuilder::new(Arc::clone(&dialect))
            .encoding("latin1")
            .properties();

        let has_encoding = props
            .values()
            .any(|v| v == "ISO8859_1" || v == "LATIN1");
        assert_eq!(has_encoding, dialect.supports_connection_encodings(), "{}", name);
    }
}

#[test]
fn test_materialize_mixed_row() {
    init_tracing();

    let zone = FixedOffset::east_opt(2 * 3600).unwrap();
    let stamp = zone.with_ymd_and_hms(2024, 7, 14, 18, 45, 30).unwrap();

    let columns = vec![
        ColumnDescriptor::new("id", sql_types::INTEGER, 0),
        ColumnDescriptor::new("total", sql_types::BIGINT, 0),
        ColumnDescriptor::new("active", sql_types::BIT, 0),
        ColumnDescriptor::new("name", sql_types::VARCHAR, 0),
        ColumnDescriptor::new("price", sql_types::DECIMAL, 2),
        ColumnDescriptor::new("ratio", sql_types::DOUBLE, 0),
        ColumnDescriptor::new("payload", sql_types::BLOB, 0),
        ColumnDescriptor::new("born", sql_types::DATE, 0),
        ColumnDescriptor::new("updated", sql_types::TIMESTAMP, 0),
        ColumnDescriptor::new("deleted", sql_types::TIMESTAMP, 0),
        ColumnDescriptor::new("geometry", 1234, 0),
    ];
    let values = vec![
        NativeValue::Integer(1),
        NativeValue::Integer(9_000_000_000),
        NativeValue::Boolean(true),
        NativeValue::Text("Alice".to_string()),
        NativeValue::Numeric("19.99".to_string()),
        NativeValue::Real(0.25),
        NativeValue::Bytes(vec![0xDE, 0xAD]),
        NativeValue::Temporal(NativeTemporal::new(stamp.timestamp_millis(), zone)),
        NativeValue::Temporal(NativeTemporal::new(stamp.timestamp_millis(), zone)),
        NativeValue::Temporal(NativeTemporal::utc(0)),
        NativeValue::Text("POINT(1 2)".to_string()),
    ];

    let row = materialize_row(&columns, values).unwrap();

    assert_eq!(row["id"], HostValue::Integer(1));
    assert_eq!(row["total"], HostValue::BigInteger(9_000_000_000));
    assert_eq!(row["active"].as_bool(), Some(true));
    assert_eq!(row["name"].as_str(), Some("Alice"));
    assert_eq!(
        row["price"],
        HostValue::Decimal {
            digits: "19.99".to_string(),
            scale: 2
        }
    );
    assert_eq!(row["ratio"].as_f64(), Some(0.25));
    assert_eq!(row["payload"].as_bytes(), Some(&[0xDE, 0xAD][..]));
    assert_eq!(
        row["born"].as_temporal(),
        Some(&TemporalValue::Date {
            year: 2024,
            month: 7,
            day: 14
        })
    );
    assert_eq!(row["updated"].render(), "2024-07-14T18:45:30+02:00");
    assert_eq!(
        row["updated"].as_temporal().and_then(|t| t.offset_day_fraction()),
        Some((2, 24))
    );
    assert!(row["deleted"].is_null());
    assert_eq!(row["geometry"].kind(), ValueKind::Text);
}

#[test]
fn test_materialize_row_type_mismatch() {
    let columns = vec![ColumnDescriptor::new("id", sql_types::INTEGER, 0)];
    let err = materialize_row(&columns, vec![NativeValue::Bytes(vec![1])]).unwrap_err();
    assert!(matches!(err, BridgeError::TypeMismatch { .. }));

    let err = materialize_row(&columns, vec![]).unwrap_err();
    assert!(matches!(err, BridgeError::Other(_)));
}

#[test]
fn test_driver_error_through_dialect() {
    let dialect = DialectRegistry::global().require("mysql").unwrap();
    let exc = SqlException::new(1062, Some("23000"), "Duplicate entry 'alice' for key 'name'");

    let err = DriverError::from_native_with_dialect(
        ErrorCategory::IntegrityError,
        &exc,
        dialect.as_ref(),
        "com.mysql.jdbc.ServerPreparedStatement[12] - INSERT INTO users (name) VALUES ('alice')",
    );

    assert_eq!(
        err.message(),
        "(vendor_errno=1062, sql_state=23000) Duplicate entry 'alice' for key 'name'\n\
         Query: INSERT INTO users (name) VALUES ('alice')"
    );

    let bridge: BridgeError = err.clone().into();
    assert_eq!(bridge.to_string(), err.message());

    let parsed = DriverError::parse_message(&bridge.to_string()).unwrap();
    assert_eq!(parsed.query_text.as_deref(), Some("INSERT INTO users (name) VALUES ('alice')"));
}

#[test]
fn test_driver_error_serializes_for_host() {
    let exc = SqlException::new(0, Some("42P01"), "relation \"users\" does not exist");
    let err = DriverError::from_native_with_statement("SQLError", &exc, "SELECT * FROM users");

    let json = serde_json::to_string(&err).unwrap();
    let back: DriverError = serde_json::from_str(&json).unwrap();
    assert_eq!(back, err);
    assert_eq!(back.vendor_code(), None);
}

#[test]
fn test_concurrent_registry_access() {
    let registry = Arc::new(DialectRegistry::with_builtins());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                if i % 2 == 0 {
                    registry.register_arc(
                        format!("custom{}", i),
                        Arc::new(rust_value_bridge::backends::DerbyDialect::new()),
                    );
                }
                for _ in 0..100 {
                    assert!(registry.get("postgresql").is_some());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    assert_eq!(registry.names().len(), 5 + 4);
    assert!(registry.contains("custom6"));
}

#[cfg(feature = "sqlite")]
mod sqlite_tests {
    use rust_value_bridge::prelude::*;

    #[test]
    fn test_constraint_violation_is_normalized() {
        let conn = rusqlite::Connection::open_in_memory().expect("Failed to open");
        conn.execute_batch("CREATE TABLE users (name TEXT UNIQUE); INSERT INTO users VALUES ('a');")
            .expect("Failed to set up");

        let sql = "INSERT INTO users VALUES ('a')";
        let err = conn.execute(sql, []).unwrap_err();
        let dialect = DialectRegistry::global().require("sqlite").unwrap();
        let driver = DriverError::from_native_with_dialect("IntegrityError", &err, dialect.as_ref(), sql);

        // SQLITE_CONSTRAINT_UNIQUE
        assert_eq!(driver.vendor_code(), Some(2067));
        assert_eq!(driver.sql_state(), None);
        assert!(driver.message().starts_with("(vendor_errno=2067, sql_state=null) "));
        assert!(driver.message().ends_with("\nQuery: INSERT INTO users VALUES ('a')"));
    }
}

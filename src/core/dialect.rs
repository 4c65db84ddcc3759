//! Per-backend dialect policy
//!
//! Each backend answers a fixed set of questions: which JDBC capabilities it
//! supports, which connection properties it needs by default, how a generic
//! encoding name is spelled for its driver, how string literals are quoted
//! and how a prepared statement is shown in logs. One [`DialectPolicy`]
//! implementation exists per backend (see [`crate::backends`]); instances are
//! built once at registration and only read afterwards.

use super::backend::BackendKind;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Driver connection properties
pub type ConnectionProperties = BTreeMap<String, String>;

/// Dialect-specific behavior for one backend
pub trait DialectPolicy: Send + Sync + fmt::Debug {
    /// Backend this policy belongs to
    fn backend(&self) -> BackendKind;

    /// Registry name
    fn name(&self) -> &str {
        self.backend().to_str()
    }

    /// Driver can return generated keys from an insert
    fn supports_generated_keys(&self) -> bool;

    /// Driver supports scrollable result sets
    fn supports_scrollable_results(&self) -> bool;

    /// Driver accepts a client encoding as a connection property
    fn supports_connection_encodings(&self) -> bool;

    /// Prepared statements honor an explicit calendar when binding temporals
    fn supports_calendar_in_prepared_statement(&self) -> bool;

    /// Properties every connection starts with
    fn default_connection_properties(&self) -> ConnectionProperties {
        ConnectionProperties::new()
    }

    /// Property key the driver reads the client encoding from
    fn encoding_property_key(&self) -> Option<&'static str> {
        None
    }

    /// Translate a generic encoding name into the driver's spelling
    fn native_encoding_name<'a>(&self, encoding: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(encoding)
    }

    /// Store the client encoding in `properties`.
    ///
    /// Backends without connection encodings leave `properties` untouched.
    fn set_encoding_property(&self, properties: &mut ConnectionProperties, encoding: &str) {
        match self.encoding_property_key() {
            Some(key) if self.supports_connection_encodings() => {
                let native = self.native_encoding_name(encoding).into_owned();
                properties.insert(key.to_string(), native);
            }
            _ => {
                tracing::debug!(
                    backend = self.name(),
                    encoding,
                    "backend takes no connection encoding, ignoring"
                );
            }
        }
    }

    /// Quote `value` as a string literal
    fn quote_string(&self, value: &str) -> String {
        quote_doubling(value)
    }

    /// Readable form of a prepared statement's driver rendering
    fn describe_statement(&self, raw_statement: &str) -> String {
        raw_statement.trim().to_string()
    }

    /// Scheme used in connection URIs
    fn uri_scheme(&self) -> &str {
        self.name()
    }

    /// Port the server listens on by default
    fn default_port(&self) -> Option<u16> {
        None
    }
}

/// Standard SQL literal quoting: wrap in `'` and double embedded quotes.
///
/// Backslashes are ordinary characters.
pub fn quote_doubling(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' {
            quoted.push('\'');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

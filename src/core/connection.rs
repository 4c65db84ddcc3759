//! Connection URI assembly
//!
//! Builds the URI a driver is opened with from a dialect's default
//! properties, the requested client encoding and explicit options, and parses
//! such URIs back into their parts.
//!
//! Layout: `scheme://[user[:password]@]host[:port]/database[?key=value&…]`.
//! Embedded backends without a host use `scheme:path[?…]`.

use super::backend::BackendKind;
use super::dialect::{ConnectionProperties, DialectPolicy};
use super::error::{BridgeError, Result};
use super::query_string;
use super::registry::DialectRegistry;
use std::sync::Arc;

/// Database connection builder
#[derive(Debug, Clone)]
pub struct ConnectionBuilder {
    dialect: Arc<dyn DialectPolicy>,
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    username: Option<String>,
    password: Option<String>,
    encoding: Option<String>,
    options: ConnectionProperties,
}

impl ConnectionBuilder {
    /// Create a new connection builder for the given dialect
    pub fn new(dialect: Arc<dyn DialectPolicy>) -> Self {
        Self {
            dialect,
            host: None,
            port: None,
            database: None,
            username: None,
            password: None,
            encoding: None,
            options: ConnectionProperties::new(),
        }
    }

    /// Create a builder for a backend registered in the global registry
    pub fn for_backend(name: &str) -> Result<Self> {
        Ok(Self::new(DialectRegistry::global().require(name)?))
    }

    /// Set the database host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the database port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the database name (or file path for embedded backends)
    pub fn database<S: Into<String>>(mut self, database: S) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the username
    pub fn username<S: Into<String>>(mut self, username: S) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password
    pub fn password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Request a client encoding, in generic spelling
    pub fn encoding<S: Into<String>>(mut self, encoding: S) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Add a custom option
    pub fn option<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Driver properties: dialect defaults, then the encoding, then explicit
    /// options, later entries overriding earlier ones
    pub fn properties(&self) -> ConnectionProperties {
        let mut props = self.dialect.default_connection_properties();
        if let Some(encoding) = &self.encoding {
            self.dialect.set_encoding_property(&mut props, encoding);
        }
        props.extend(self.options.clone());
        props
    }

    /// Build the connection URI.
    ///
    /// Server backends need a host; only embedded backends fall back to the
    /// `scheme:path` form.
    pub fn build_uri(&self) -> Result<String> {
        let mut uri = String::from(self.dialect.uri_scheme());

        match &self.host {
            Some(host) => {
                uri.push_str("://");
                if let Some(username) = &self.username {
                    uri.push_str(&query_string::escape(username));
                    if let Some(password) = &self.password {
                        uri.push(':');
                        uri.push_str(&query_string::escape(password));
                    }
                    uri.push('@');
                }
                uri.push_str(&query_string::escape(host));
                if let Some(port) = self.port.or_else(|| self.dialect.default_port()) {
                    uri.push(':');
                    uri.push_str(&port.to_string());
                }
                uri.push('/');
                uri.push_str(&query_string::escape_path(
                    self.database.as_deref().unwrap_or(""),
                ));
            }
            None if self.dialect.backend().is_embedded() => {
                uri.push(':');
                uri.push_str(&query_string::escape_path(
                    self.database.as_deref().unwrap_or(":memory:"),
                ));
            }
            None => {
                return Err(BridgeError::invalid_uri(format!(
                    "{} connections need a host",
                    self.dialect.name()
                )));
            }
        }

        let props = self.properties();
        if !props.is_empty() {
            uri.push('?');
            uri.push_str(&query_string::encode(&props));
        }
        Ok(uri)
    }
}

/// Parsed connection URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUri {
    pub scheme: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: String,
    pub properties: ConnectionProperties,
}

impl ConnectionUri {
    /// Parse a connection URI
    pub fn parse(uri: &str) -> Result<Self> {
        let (location, query) = match uri.split_once('?') {
            Some((location, query)) => (location, Some(query)),
            None => (uri, None),
        };
        let properties: ConnectionProperties = query_string::decode(query)
            .map(|pairs| pairs.into_iter().collect())
            .unwrap_or_default();

        if let Some((scheme, rest)) = location.split_once("://") {
            let scheme = Self::check_scheme(scheme, uri)?;
            let (authority, database) = rest.split_once('/').unwrap_or((rest, ""));

            let (userinfo, hostport) = match authority.rsplit_once('@') {
                Some((userinfo, hostport)) => (Some(userinfo), hostport),
                None => (None, authority),
            };
            let (username, password) = match userinfo {
                Some(info) => match info.split_once(':') {
                    Some((user, pass)) => (
                        Some(query_string::unescape(user)),
                        Some(query_string::unescape(pass)),
                    ),
                    None => (Some(query_string::unescape(info)), None),
                },
                None => (None, None),
            };

            let (host, port) = match hostport.rsplit_once(':') {
                Some((host, port)) => {
                    let port = port.parse::<u16>().map_err(|_| {
                        BridgeError::invalid_uri(format!("bad port '{}' in {}", port, uri))
                    })?;
                    (host, Some(port))
                }
                None => (hostport, None),
            };
            if host.is_empty() {
                return Err(BridgeError::invalid_uri(format!("missing host in {}", uri)));
            }

            Ok(Self {
                scheme,
                username,
                password,
                host: Some(query_string::unescape(host)),
                port,
                database: query_string::unescape_path(database),
                properties,
            })
        } else if let Some((scheme, path)) = location.split_once(':') {
            Ok(Self {
                scheme: Self::check_scheme(scheme, uri)?,
                username: None,
                password: None,
                host: None,
                port: None,
                database: query_string::unescape_path(path),
                properties,
            })
        } else {
            Err(BridgeError::invalid_uri(format!("missing scheme in {}", uri)))
        }
    }

    /// Backend named by the scheme, if it is a built-in one
    pub fn backend(&self) -> Option<BackendKind> {
        self.scheme.parse().ok()
    }

    /// Dialect for the scheme from the global registry
    pub fn dialect(&self) -> Result<Arc<dyn DialectPolicy>> {
        DialectRegistry::global().require(&self.scheme)
    }

    fn check_scheme(scheme: &str, uri: &str) -> Result<String> {
        if scheme.is_empty()
            || !scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(BridgeError::invalid_uri(format!("bad scheme in {}", uri)));
        }
        Ok(scheme.to_lowercase())
    }
}

impl std::str::FromStr for ConnectionUri {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

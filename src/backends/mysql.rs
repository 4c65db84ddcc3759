//! MySQL dialect
//!
//! MySQL (with the default `sql_mode`) treats backslash as an escape
//! character inside string literals, so both `\` and `'` are escaped with a
//! backslash when quoting.

use crate::core::backend::BackendKind;
use crate::core::dialect::{ConnectionProperties, DialectPolicy};
use std::borrow::Cow;

/// MySQL/MariaDB dialect policy
#[derive(Debug, Clone, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Create a new MySQL dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl DialectPolicy for MysqlDialect {
    fn backend(&self) -> BackendKind {
        BackendKind::Mysql
    }

    fn supports_generated_keys(&self) -> bool {
        true
    }

    fn supports_scrollable_results(&self) -> bool {
        true
    }

    fn supports_connection_encodings(&self) -> bool {
        true
    }

    fn supports_calendar_in_prepared_statement(&self) -> bool {
        false
    }

    fn default_connection_properties(&self) -> ConnectionProperties {
        let mut props = ConnectionProperties::new();
        props.insert("useUnicode".to_string(), "yes".to_string());
        props
    }

    fn encoding_property_key(&self) -> Option<&'static str> {
        Some("characterEncoding")
    }

    fn native_encoding_name<'a>(&self, encoding: &'a str) -> Cow<'a, str> {
        // Connector/J expects Java charset names
        if encoding.eq_ignore_ascii_case("latin1") {
            Cow::Borrowed("ISO8859_1")
        } else if encoding.eq_ignore_ascii_case("utf8") || encoding.eq_ignore_ascii_case("utf8mb4")
        {
            Cow::Borrowed("UTF-8")
        } else {
            Cow::Borrowed(encoding)
        }
    }

    fn quote_string(&self, value: &str) -> String {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('\'');
        for c in value.chars() {
            match c {
                '\\' => quoted.push_str("\\\\"),
                '\'' => quoted.push_str("\\'"),
                _ => quoted.push(c),
            }
        }
        quoted.push('\'');
        quoted
    }

    fn describe_statement(&self, raw_statement: &str) -> String {
        strip_driver_prefix(raw_statement).trim().to_string()
    }

    fn default_port(&self) -> Option<u16> {
        Some(3306)
    }
}

/// Drop the object prefix Connector/J puts in front of the SQL text.
///
/// Server-side statements render as `…ServerPreparedStatement[12] - SELECT …`;
/// everything up to the last `]?-` on the first line that has one, plus the
/// whitespace after it, is removed. Client-side statements render as
/// `…PreparedStatement@1b6d3586: SELECT …`.
fn strip_driver_prefix(raw: &str) -> Cow<'_, str> {
    let mut line_start = 0;
    for line in raw.split_inclusive('\n') {
        let chars: Vec<(usize, char)> = line.char_indices().collect();
        let cut = chars
            .windows(3)
            .filter(|w| w[0].1 == ']' && w[2].1 == '-')
            .map(|w| w[2].0 + 1)
            .last();

        if let Some(cut) = cut {
            let rest = raw[line_start + cut..].trim_start();
            return Cow::Owned(format!("{}{}", &raw[..line_start], rest));
        }
        line_start += line.len();
    }

    if let Some((prefix, rest)) = raw.split_once(": ") {
        if prefix.contains("PreparedStatement@") && !prefix.contains(char::is_whitespace) {
            return Cow::Borrowed(rest);
        }
    }

    Cow::Borrowed(raw)
}

#[cfg(feature = "mysql")]
impl crate::core::driver_error::NativeException for mysql_async::Error {
    fn vendor_code(&self) -> i32 {
        match self {
            mysql_async::Error::Server(err) => i32::from(err.code),
            _ => 0,
        }
    }

    fn sql_state(&self) -> Option<String> {
        match self {
            mysql_async::Error::Server(err) => Some(err.state.clone()),
            _ => None,
        }
    }

    fn localized_message(&self) -> String {
        match self {
            mysql_async::Error::Server(err) => err.message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities() {
        let dialect = MysqlDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert!(dialect.supports_generated_keys());
        assert!(dialect.supports_scrollable_results());
        assert!(dialect.supports_connection_encodings());
        assert!(!dialect.supports_calendar_in_prepared_statement());
    }

    #[test]
    fn test_default_properties_request_unicode() {
        let props = MysqlDialect::new().default_connection_properties();
        assert_eq!(props.get("useUnicode").map(String::as_str), Some("yes"));
    }

    #[test]
    fn test_encoding_names_are_translated() {
        let dialect = MysqlDialect::new();
        let mut props = ConnectionProperties::new();

        dialect.set_encoding_property(&mut props, "latin1");
        assert_eq!(props["characterEncoding"], "ISO8859_1");

        dialect.set_encoding_property(&mut props, "utf8mb4");
        assert_eq!(props["characterEncoding"], "UTF-8");

        dialect.set_encoding_property(&mut props, "Shift_JIS");
        assert_eq!(props["characterEncoding"], "Shift_JIS");
    }

    #[test]
    fn test_quote_string_escapes_quotes_and_backslashes() {
        let dialect = MysqlDialect::new();
        assert_eq!(dialect.quote_string("O'Brien"), r"'O\'Brien'");
        assert_eq!(dialect.quote_string(r"a\b"), r"'a\\b'");
        assert_eq!(dialect.quote_string(r"\'"), r"'\\\''");
        assert_eq!(dialect.quote_string(""), "''");
    }

    #[test]
    fn test_describe_server_prepared_statement() {
        let dialect = MysqlDialect::new();
        assert_eq!(
            dialect.describe_statement(
                "com.mysql.jdbc.ServerPreparedStatement[4] - SELECT * FROM users WHERE id = 1"
            ),
            "SELECT * FROM users WHERE id = 1"
        );
    }

    #[test]
    fn test_describe_client_prepared_statement() {
        let dialect = MysqlDialect::new();
        assert_eq!(
            dialect.describe_statement(
                "com.mysql.cj.jdbc.ClientPreparedStatement@1b6d3586: INSERT INTO t VALUES (1)"
            ),
            "INSERT INTO t VALUES (1)"
        );
    }

    #[test]
    fn test_describe_plain_statement_untouched() {
        let dialect = MysqlDialect::new();
        assert_eq!(
            dialect.describe_statement("SELECT a: b FROM t"),
            "SELECT a: b FROM t"
        );
        assert_eq!(
            dialect.describe_statement("SELECT 'x - y' FROM t"),
            "SELECT 'x - y' FROM t"
        );
    }
}

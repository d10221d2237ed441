//! Log redaction for personal data
//!
//! User records carry personal data (emails, names). Log lines built from
//! them are `key=value` pairs joined by a separator; [`filter_datum`]
//! obfuscates the values of the sensitive fields before the line reaches any
//! sink, and [`redact`] applies the default field list.

/// Field names whose values never appear in logs.
pub const PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

/// Replacement for redacted values.
pub const REDACTION: &str = "***";

/// Separator between `key=value` pairs in a log message.
pub const SEPARATOR: char = ';';

/// Replace the value of every listed field in `message` with `redaction`.
///
/// Unlisted pairs and segments that are not `key=value` pairs pass through
/// untouched.
pub fn filter_datum(fields: &[&str], redaction: &str, message: &str, separator: char) -> String {
    message
        .split(separator)
        .map(|segment| match segment.split_once('=') {
            Some((name, _)) if fields.contains(&name.trim_start()) => {
                format!("{name}={redaction}")
            }
            _ => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

/// [`filter_datum`] with the default PII field list, redaction, and separator.
pub fn redact(message: &str) -> String {
    filter_datum(&PII_FIELDS, REDACTION, message, SEPARATOR)
}

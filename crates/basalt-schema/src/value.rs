//! Formatting of literal values into dialect-safe SQL text.

use serde_json::Value;

/// Escapes a text literal by doubling every single quote.
///
/// This is the one escaping rule shared by all supported dialects; no
/// other transformation is applied.
#[must_use]
pub fn escape_text(text: &str) -> String {
    text.replace('\'', "''")
}

/// Escapes a text literal and wraps it in single quotes.
#[must_use]
pub fn quote_text(text: &str) -> String {
    format!("'{}'", escape_text(text))
}

/// Renders a result-set scalar as an SQL literal.
///
/// Nulls become a bare `NULL`, numbers their decimal text, booleans `1`
/// or `0`, strings a quoted escaped literal. Nested arrays and objects
/// are dumped to JSON text and quoted like any other string.
#[must_use]
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(flag) => if *flag { "1" } else { "0" }.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => quote_text(text),
        nested => quote_text(&nested.to_string()),
    }
}

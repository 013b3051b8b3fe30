//! Item formatters for sinks
//!
//! A formatter turns one item into the text of one output line. Sinks append
//! the line terminator when the formatter did not.

use serde::Serialize;
use std::fmt::Display;

/// Format with `Display`. The default formatter.
#[must_use]
pub fn display<T: Display + ?Sized>(item: &T) -> String {
    item.to_string()
}

/// Serialize the item as a single JSON line.
///
/// Formatters cannot fail, so an item serde rejects is written as a literal
/// `null` line and only reported through `log::warn!`. Use
/// [`SinkConfig::json_lines`](crate::SinkConfig::json_lines) to make such
/// failures fail the flush instead.
#[must_use]
pub fn json_line<T: Serialize + ?Sized>(item: &T) -> String {
    serde_json::to_string(item).unwrap_or_else(|e| {
        log::warn!("Failed to serialize item as JSON: {e}");
        "null".to_string()
    })
}

/// Build a formatter that fills the `{}` placeholders of `pattern`, in order,
/// with the fields `fields` extracts from the item.
///
/// Surplus placeholders are left as-is; surplus fields are ignored.
pub fn template<T, F>(pattern: &str, fields: F) -> impl Fn(&T) -> String + use<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> Vec<String>,
{
    let pattern = pattern.to_string();
    move |item: &T| fill_placeholders(&pattern, &fields(item))
}

/// Replace each `{}` in `pattern` with the next value.
#[must_use]
pub fn fill_placeholders(pattern: &str, values: &[String]) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut values = values.iter();
    let mut rest = pattern;

    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match values.next() {
            Some(v) => out.push_str(v),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

/// Append `\n` unless the text already ends with one.
#[must_use]
pub fn ensure_newline(mut formatted: String) -> String {
    if !formatted.ends_with('\n') {
        formatted.push('\n');
    }
    formatted
}

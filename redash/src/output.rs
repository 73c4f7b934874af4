//! Output formatting: plain text (human-readable) and JSON.

use serde_json::Value;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables and key-value
    #[default]
    Plain,
    /// JSON (pretty-printed)
    Json,
}

/// Format a listing page: a summary line followed by a table of `columns`.
pub fn format_page(page: &Value, columns: &[&str]) -> String {
    let mut out = String::new();
    let num = |k: &str| page.get(k).and_then(Value::as_u64).unwrap_or(0);
    let rows = page
        .get("results")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "page {} ({} per page, {} total)",
        num("page"),
        num("page_size"),
        num("count")
    );
    out.push_str(&format_table(rows, columns));
    out
}

/// Fixed-width table of the given keys; missing values show as `-`.
pub fn format_table(rows: &[Value], columns: &[&str]) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        let _ = writeln!(out, "<empty>");
        return out;
    }
    let widths: Vec<usize> = columns
        .iter()
        .map(|c| {
            rows.iter()
                .map(|r| cell(r, c).chars().count())
                .chain(std::iter::once(c.len()))
                .max()
                .unwrap_or(0)
                .min(40)
        })
        .collect();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect();
    let header = header.join("  ");
    let _ = writeln!(out, "{}", header.trim_end());
    let _ = writeln!(out, "{}", "-".repeat(header.trim_end().len()));
    for row in rows {
        let line: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<w$}", truncate(&cell(row, c), *w), w = *w))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

fn cell(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(as_short_str)
        .unwrap_or_else(|| "-".to_string())
}

/// Format value as plain text (nested key-value, arrays as numbered items).
pub fn format_plain(value: &Value) -> String {
    let mut out = String::new();
    format_plain_impl(value, &mut out, 0);
    out
}

fn format_plain_impl(v: &Value, out: &mut String, indent: usize) {
    let pad = "  ".repeat(indent);
    match v {
        Value::Array(arr) => {
            if arr.is_empty() {
                let _ = writeln!(out, "{}<empty>", pad);
                return;
            }
            for (i, item) in arr.iter().enumerate() {
                if item.is_object() || item.is_array() {
                    let _ = writeln!(out, "{}[{}]", pad, i + 1);
                    format_plain_impl(item, out, indent + 1);
                } else {
                    let _ = writeln!(out, "{}{}", pad, as_short_str(item).unwrap_or_default());
                }
            }
        }
        Value::Object(map) => {
            for (k, val) in map {
                if val.is_object() || val.is_array() {
                    let _ = writeln!(out, "{}{}:", pad, k);
                    format_plain_impl(val, out, indent + 1);
                } else {
                    let s = as_short_str(val).unwrap_or_default();
                    let _ = writeln!(out, "{}{}: {}", pad, k, s);
                }
            }
        }
        scalar => {
            let _ = writeln!(out, "{}{}", pad, as_short_str(scalar).unwrap_or_default());
        }
    }
}

fn as_short_str(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        _ => None,
    }
}

fn truncate(s: &str, max: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max {
        s
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

/// Format value as JSON (pretty).
pub fn format_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

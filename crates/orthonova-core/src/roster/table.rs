//! Read-only tabular rendering of roster records.

use serde::Serialize;
use serde_json::Value;

/// Placeholder shown instead of a table when there are no records.
pub const NO_DATA: &str = "No data yet.";

/// Header text for a column: underscores become spaces, then upper-cased.
pub fn column_header(column: &str) -> String {
    column.replace('_', " ").to_uppercase()
}

/// Keep a value on one line and out of the column separators.
fn flatten(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '|' => '/',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect()
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => flatten(s),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string()),
        },
        Some(other) => other.to_string(),
    }
}

/// Render `rows` as an aligned text table with the given columns.
///
/// Values are looked up by serialized field name; a missing field renders as
/// an empty cell.
pub fn render_table<T: Serialize>(rows: &[T], columns: &[&str]) -> String {
    if rows.is_empty() {
        return format!("{}\n", NO_DATA);
    }

    let header: Vec<String> = columns.iter().map(|c| column_header(c)).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let value = serde_json::to_value(row).unwrap_or(Value::Null);
            columns.iter().map(|c| cell(value.get(*c))).collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            body.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        format!("{}\n", padded.join(" | ").trim_end())
    };

    let mut out = line(&header);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("-+-")));
    for row in &body {
        out.push_str(&line(row));
    }
    out
}

//! Plain-text rendering of argument lists.
//!
//! Arguments are JSON values. Strings print without quotes, everything else
//! prints as compact JSON, and arguments are separated by a single space.

use serde_json::Value;

/// Render one argument.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render an argument list on one line.
#[must_use]
pub fn render_args(args: &[Value]) -> String {
    args.iter()
        .map(render_value)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pretty JSON lines for `dir`-style inspection.
#[must_use]
pub fn render_pretty(value: &Value) -> Vec<String> {
    match value {
        Value::Array(_) | Value::Object(_) => serde_json::to_string_pretty(value)
            .map(|text| text.lines().map(String::from).collect())
            .unwrap_or_else(|_| vec![value.to_string()]),
        other => vec![render_value(other)],
    }
}

const INDEX_HEADER: &str = "(index)";
const VALUES_HEADER: &str = "Values";

/// Render an array or object of rows as aligned columns.
///
/// Object rows contribute one column per key, in order of first appearance.
/// Scalar rows go into a trailing `Values` column. Anything that is not an
/// array or object renders as a single line.
#[must_use]
pub fn render_table(data: &Value) -> Vec<String> {
    let rows: Vec<(String, &Value)> = match data {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        other => return vec![render_value(other)],
    };

    let mut columns: Vec<String> = Vec::new();
    let mut has_values = false;
    for (_, row) in &rows {
        match row {
            Value::Object(fields) => {
                for key in fields.keys() {
                    if !columns.contains(key) {
                        columns.push(key.clone());
                    }
                }
            }
            _ => has_values = true,
        }
    }

    let mut header = vec![INDEX_HEADER.to_string()];
    header.extend(columns.iter().cloned());
    if has_values {
        header.push(VALUES_HEADER.to_string());
    }

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|(index, row)| {
            let mut cells = vec![index.clone()];
            for column in &columns {
                let cell = match row {
                    Value::Object(fields) => fields.get(column).map(render_value),
                    _ => None,
                };
                cells.push(cell.unwrap_or_default());
            }
            if has_values {
                cells.push(match row {
                    Value::Object(_) => String::new(),
                    scalar => render_value(scalar),
                });
            }
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format_row(&header));
    lines.push(separator);
    lines.extend(body.iter().map(|cells| format_row(cells)));
    lines
}

use serde::Serialize;
use serde_json::Value;

use crate::cli::{GlobalFlags, OutputFormat};

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => Ok(render_table(&serde_json::to_value(value)?)),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Print a non-fatal notice on stderr unless `--quiet` is set.
pub fn advise(flags: &GlobalFlags, message: impl std::fmt::Display) {
    if !flags.quiet {
        eprintln!("note: {message}");
    }
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(items) if items.is_empty() => "(no rows)".to_string(),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let mut headers: Vec<&str> = Vec::new();
            for key in items.iter().filter_map(Value::as_object).flat_map(|m| m.keys()) {
                if !headers.contains(&key.as_str()) {
                    headers.push(key);
                }
            }
            let rows: Vec<Vec<String>> = items
                .iter()
                .filter_map(Value::as_object)
                .map(|map| {
                    headers
                        .iter()
                        .map(|h| map.get(*h).map_or_else(|| "-".to_string(), cell))
                        .collect()
                })
                .collect();
            table::render(&headers, &rows)
        }
        Value::Array(items) => {
            let rows: Vec<Vec<String>> = items.iter().map(|v| vec![cell(v)]).collect();
            table::render(&["value"], &rows)
        }
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect();
            table::render(&["key", "value"], &rows)
        }
        scalar => cell(scalar),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(b) => if *b { "yes" } else { "no" }.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

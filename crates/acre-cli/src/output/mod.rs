use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;

pub mod table;

use table::{TableOptions, render_table};

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_value(serde_json::to_value(value)?, TableOptions::from_env())),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_value(value: Value, options: TableOptions) -> String {
    match value {
        Value::Array(items) => render_array(&items, options),
        Value::Object(mut map) => {
            // List pages: the rows, then a position line.
            if let (Some(Value::Array(items)), Some(page), Some(pages), Some(total)) = (
                map.get("items"),
                map.get("page"),
                map.get("num_pages"),
                map.get("total"),
            ) {
                return format!(
                    "{}\npage {page} of {pages} ({total} total)",
                    render_array(items, options)
                );
            }
            // Write confirmations: the message, then the record.
            if let Some(Value::String(message)) = map.get("message").cloned() {
                if let Some(record) = map.remove("record") {
                    return format!("{message}\n{}", render_value(record, options));
                }
            }
            render_object(map, options)
        }
        scalar => render_table(&["value"], &[vec![value_to_cell(&scalar)]], options),
    }
}

fn render_object(map: Map<String, Value>, options: TableOptions) -> String {
    let rows = map
        .into_iter()
        .map(|(key, value)| vec![key, value_to_cell(&value)])
        .collect::<Vec<_>>();
    render_table(&["key", "value"], &rows, options)
}

fn render_array(items: &[Value], options: TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return render_table(&["value"], &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    render_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => other.to_string(),
    }
}

// src/export/csv.rs
use crate::errors::ServerError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Render a homogeneous collection as CSV.
///
/// The header row is the first record's field names, unquoted. Every value
/// cell is quoted with embedded quotes doubled; fields a later record lacks
/// are left empty. Rows are joined with `\n`.
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String, ServerError> {
    if records.is_empty() {
        return Err(ServerError::BadRequest("Nothing to export.".to_string()));
    }

    let rows: Vec<Map<String, Value>> = records
        .iter()
        .map(|r| match serde_json::to_value(r) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(ServerError::BadRequest(
                "Only records can be exported.".to_string(),
            )),
            Err(e) => Err(ServerError::BadRequest(format!("Unexportable record: {e}"))),
        })
        .collect::<Result<_, _>>()?;

    let headers: Vec<&String> = rows[0].keys().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| h.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in &rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| quote(&cell_text(row.get(h.as_str()))))
            .collect();
        lines.push(cells.join(","));
    }

    Ok(lines.join("\n"))
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => match n.as_f64() {
            // Whole floats print without a trailing ".0".
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Some(nested) => nested.to_string(),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

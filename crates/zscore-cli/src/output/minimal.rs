use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "z_score",
        "zone_label",
        "mean",
        "summary",
    ];

    if let Value::Object(map) = result_obj {
        // Try priority keys first (skip null values), then one level down
        // for analyses that nest the score.
        let nested = map.get("score").and_then(Value::as_object);
        for key in &priority_keys {
            let found = map
                .get(*key)
                .or_else(|| nested.and_then(|n| n.get(*key)));
            if let Some(val) = found {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    if let Value::Array(rows) = result_obj {
        for row in rows {
            let first = row.as_object().and_then(|m| m.values().next());
            println!("{}", format_minimal(first.unwrap_or(row)));
        }
        return;
    }

    // Not an object, just print directly
    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

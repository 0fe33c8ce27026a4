//! Change summaries for audit entries
//!
//! Compares two JSON snapshots field by field at the top level.

use serde_json::Value;

/// Summarize the top-level fields that differ between two snapshots
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let mut changes = Vec::new();
    for (key, before_val) in before_obj {
        match after_obj.get(key) {
            Some(after_val) if after_val != before_val => changes.push(format!(
                "{}: {} -> {}",
                key,
                format_value(before_val),
                format_value(after_val)
            )),
            Some(_) => {}
            None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
        }
    }
    for (key, after_val) in after_obj {
        if !before_obj.contains_key(key) {
            changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
        }
    }

    (!changes.is_empty()).then(|| changes.join(", "))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} entries}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_changes() {
        let before = json!({
            "discretionary_total": 280000,
            "weight_source": "declared_frequencies",
            "discretionary_breakdown": {"coffee": 1000, "travel": 2000}
        });
        let after = json!({
            "discretionary_total": 300000,
            "weight_source": "behavior_adjusted",
            "discretionary_breakdown": {"coffee": 1000, "travel": 2000}
        });

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("discretionary_total: 280000 -> 300000"));
        assert!(diff.contains("weight_source: \"declared_frequencies\" -> \"behavior_adjusted\""));
        assert!(!diff.contains("discretionary_breakdown"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"over_committed": false});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_nested_change_reported_at_top_level() {
        let before = json!({"weights": {"coffee": 0.5}});
        let after = json!({"weights": {"coffee": 0.5, "travel": 0.5}});
        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "weights: {1 entries} -> {2 entries}"
        );
    }
}

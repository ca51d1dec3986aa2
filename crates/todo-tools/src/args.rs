//! Argument extraction for tool calls.

use serde_json::Value;

use crate::registry::ToolError;

/// Reads an optional string argument; `null` counts as absent.
pub(crate) fn optional_string(args: &Value, key: &str) -> Result<Option<String>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(ToolError::InvalidArguments(format!(
            "'{}' must be a string, got {}",
            key, other
        ))),
    }
}

pub(crate) fn required_string(args: &Value, key: &str) -> Result<String, ToolError> {
    optional_string(args, key)?
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{}' parameter", key)))
}

/// Reads a string argument, treating any non-string value as absent.
pub(crate) fn lenient_string(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Raw JSON argument passed through untyped; `null` counts as absent.
pub(crate) fn optional_value(args: &Value, key: &str) -> Option<Value> {
    args.get(key).filter(|value| !value.is_null()).cloned()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn strings_and_nulls() {
        let args = json!({"title": "x", "status": null, "count": 3});

        assert_eq!(optional_string(&args, "title"), Ok(Some("x".to_string())));
        assert_eq!(optional_string(&args, "status"), Ok(None));
        assert_eq!(optional_string(&args, "missing"), Ok(None));
        assert!(matches!(
            optional_string(&args, "count"),
            Err(ToolError::InvalidArguments(_))
        ));
    }

    #[test]
    fn lenient_string_drops_other_types() {
        let args = json!({"status": "Done", "priority": 2, "extra": null});

        assert_eq!(lenient_string(&args, "status"), Some("Done".to_string()));
        assert_eq!(lenient_string(&args, "priority"), None);
        assert_eq!(lenient_string(&args, "extra"), None);
        assert_eq!(lenient_string(&args, "missing"), None);
    }

    #[test]
    fn required_reports_missing_key() {
        assert_eq!(
            required_string(&json!({}), "todo_id"),
            Err(ToolError::InvalidArguments(
                "Missing 'todo_id' parameter".to_string()
            ))
        );
    }

    #[test]
    fn optional_value_skips_null() {
        assert_eq!(optional_value(&json!({"todos": null}), "todos"), None);
        assert_eq!(
            optional_value(&json!({"todos": ["a"]}), "todos"),
            Some(json!(["a"]))
        );
    }
}

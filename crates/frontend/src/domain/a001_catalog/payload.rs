use contracts::domain::a001_product::RawProduct;
use serde_json::Value;

use crate::shared::error::StorefrontError;

/// Extract product records from the products endpoint body.
///
/// Accepted shapes:
/// - `[...]`
/// - `{ "data": [...] }`
///
/// Anything else is a `DataFormat` error. Elements that do not decode as a
/// product record are skipped.
pub fn parse_catalog_payload(payload: Value) -> Result<Vec<RawProduct>, StorefrontError> {
    let records = match payload {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(StorefrontError::DataFormat(
                    "expected an object with a `data` array".to_string(),
                ))
            }
        },
        other => {
            return Err(StorefrontError::DataFormat(format!(
                "expected an array, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<RawProduct>(record) {
            Ok(raw) => Some(raw),
            Err(e) => {
                log::warn!("skipping product record #{}: {}", index, e);
                None
            }
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let records = parse_catalog_payload(json!([{ "id": 1 }, { "id": 2 }])).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_data_envelope() {
        let records = parse_catalog_payload(json!({ "data": [{ "id": 1 }], "count": 1 })).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_other_shapes_are_format_errors() {
        for payload in [
            json!({ "error": "boom" }),
            json!({ "data": { "id": 1 } }),
            json!("products"),
            json!(null),
        ] {
            assert!(matches!(
                parse_catalog_payload(payload),
                Err(StorefrontError::DataFormat(_))
            ));
        }
    }

    #[test]
    fn test_non_object_elements_are_skipped() {
        let records = parse_catalog_payload(json!([{ "id": 1 }, 42, "x", { "id": 2 }])).unwrap();
        assert_eq!(records.len(), 2);
    }
}

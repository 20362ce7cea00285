use super::model::FlattenedRecord;
use serde_json::Value;

/// Lift nested objects to the top level, prefixing each inner key with `<parent>_`.
/// Applies at any depth. A non-object input yields an empty record.
pub fn flatten(value: &Value) -> FlattenedRecord {
    let mut flat = FlattenedRecord::new();
    if let Value::Object(map) = value {
        flatten_into(&mut flat, map, "");
    }
    flat
}

fn flatten_into(flat: &mut FlattenedRecord, map: &serde_json::Map<String, Value>, prefix: &str) {
    for (key, value) in map {
        let key = format!("{}{}", prefix, key);
        match value {
            Value::Object(inner) => flatten_into(flat, inner, &format!("{}_", key)),
            leaf => {
                flat.insert(key, leaf.clone());
            }
        }
    }
}

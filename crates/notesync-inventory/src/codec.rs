//! JSON ⇄ Firestore typed-value codec.
//!
//! Firestore's REST API wraps every field in a type discriminator
//! (`stringValue`, `integerValue`, ...). Records round-trip through
//! plain JSON so the open metadata bag survives storage unchanged.

use serde_json::{json, Map, Value};

use notesync_core::InventoryRecord;

use crate::{InventoryError, InventoryResult};

/// Encodes a JSON value as a Firestore typed value.
#[must_use]
pub fn json_to_firestore(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            // Firestore carries integers as strings.
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": {
                "values": items.iter().map(json_to_firestore).collect::<Vec<_>>()
            }
        }),
        Value::Object(fields) => json!({
            "mapValue": {
                "fields": fields
                    .iter()
                    .map(|(k, v)| (k.clone(), json_to_firestore(v)))
                    .collect::<Map<String, Value>>()
            }
        }),
    }
}

/// Decodes a Firestore typed value back into plain JSON.
pub fn firestore_to_json(value: &Value) -> InventoryResult<Value> {
    let obj = value
        .as_object()
        .ok_or_else(|| InventoryError::Decode("Typed value is not an object".to_string()))?;

    if obj.contains_key("nullValue") {
        return Ok(Value::Null);
    }
    if let Some(b) = obj.get("booleanValue") {
        return Ok(b.clone());
    }
    if let Some(s) = obj.get("stringValue") {
        return Ok(s.clone());
    }
    if let Some(i) = obj.get("integerValue") {
        let parsed: i64 = i
            .as_str()
            .and_then(|s| s.parse().ok())
            .or_else(|| i.as_i64())
            .ok_or_else(|| InventoryError::Decode(format!("Bad integerValue: {i}")))?;
        return Ok(json!(parsed));
    }
    if let Some(d) = obj.get("doubleValue") {
        return Ok(d.clone());
    }
    if let Some(ts) = obj.get("timestampValue") {
        return Ok(ts.clone());
    }
    if let Some(array) = obj.get("arrayValue") {
        let items = array
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(firestore_to_json).collect())
            .unwrap_or_else(|| Ok(Vec::new()))?;
        return Ok(Value::Array(items));
    }
    if let Some(map) = obj.get("mapValue") {
        let mut fields = Map::new();
        if let Some(entries) = map.get("fields").and_then(Value::as_object) {
            for (k, v) in entries {
                fields.insert(k.clone(), firestore_to_json(v)?);
            }
        }
        return Ok(Value::Object(fields));
    }

    Err(InventoryError::Decode(format!(
        "Unsupported typed value: {value}"
    )))
}

/// Encodes a record as a Firestore document `fields` object.
pub fn record_to_fields(record: &InventoryRecord) -> InventoryResult<Value> {
    let Value::Object(plain) = serde_json::to_value(record)? else {
        return Err(InventoryError::Decode(
            "Record did not serialize to an object".to_string(),
        ));
    };

    let fields: Map<String, Value> = plain
        .iter()
        .map(|(k, v)| (k.clone(), json_to_firestore(v)))
        .collect();
    Ok(Value::Object(fields))
}

/// Decodes a Firestore document `fields` object into a record.
pub fn fields_to_record(fields: &Value) -> InventoryResult<InventoryRecord> {
    let obj = fields
        .as_object()
        .ok_or_else(|| InventoryError::Decode("Document fields missing".to_string()))?;

    let mut plain = Map::new();
    for (k, v) in obj {
        plain.insert(k.clone(), firestore_to_json(v)?);
    }

    serde_json::from_value(Value::Object(plain))
        .map_err(|e| InventoryError::Decode(format!("Record decode failed: {e}")))
}

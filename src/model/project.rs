//! Projection: turning model instances back into untyped JSON
//!
//! - Output keys are wire keys
//! - Unset fields are omitted; explicitly nulled fields emit `null`
//! - Nulls are dropped from sequences at every depth, including inside
//!   free-form JSON
//! - Map entries keep their keys, values projected recursively
//! - Datetimes are written in RFC 3339 with a `Z` for zero offsets and 0, 3,
//!   6 or 9 fractional digits, so `+00:00` or 7-digit fractions come back
//!   normalized rather than byte-for-byte

use chrono::SecondsFormat;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use super::record::Record;
use super::value::FieldValue;

impl Record {
    /// Projects this record into a JSON object keyed by wire keys.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (field, slot) in self.fields() {
            if let Some(value) = slot {
                object.insert(field.wire_key.clone(), project(value));
            }
        }
        Value::Object(object)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Projects a single field value.
pub fn project(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Int(n) => Value::from(*n),
        // JSON has no NaN or infinity
        FieldValue::Float(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
        FieldValue::Str(s) | FieldValue::Enum(s) => Value::String(s.clone()),
        FieldValue::DateTime(dt) => {
            Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        FieldValue::Model(record) => record.to_json(),
        FieldValue::List(items) => Value::Array(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(project)
                .collect(),
        ),
        FieldValue::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), project(item)))
                .collect(),
        ),
        FieldValue::Json(raw) => project_json(raw),
    }
}

fn project_json(raw: &Value) -> Value {
    match raw {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(project_json)
                .collect(),
        ),
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), project_json(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

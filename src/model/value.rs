//! Typed field values
//!
//! `FieldValue` is what a populated slot of a `Record` holds. Free-form
//! payloads (tags, untyped metadata) stay as `serde_json::Value`.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::mem;

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use super::record::Record;

/// A value held by one field of a model instance
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Explicitly assigned null
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    DateTime(DateTime<FixedOffset>),
    /// Member of an enum value set, or the unknown sentinel
    Enum(String),
    Model(Box<Record>),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
    /// Free-form JSON
    Json(Value),
}

impl FieldValue {
    /// Returns the kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Str(_) => "string",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Enum(_) => "enum",
            FieldValue::Model(_) => "model",
            FieldValue::List(_) => "list",
            FieldValue::Map(_) => "map",
            FieldValue::Json(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// String content of a string or enum value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) | FieldValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(n) => Some(*n),
            FieldValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            FieldValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Model(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            FieldValue::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            // Bitwise so that Eq and Hash agree
            (FieldValue::Float(a), FieldValue::Float(b)) => float_bits(*a) == float_bits(*b),
            (FieldValue::Str(a), FieldValue::Str(b)) => a == b,
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a == b,
            (FieldValue::Enum(a), FieldValue::Enum(b)) => a == b,
            (FieldValue::Model(a), FieldValue::Model(b)) => a == b,
            (FieldValue::List(a), FieldValue::List(b)) => a == b,
            (FieldValue::Map(a), FieldValue::Map(b)) => a == b,
            (FieldValue::Json(a), FieldValue::Json(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

/// Bit pattern with `-0.0` folded into `0.0`.
fn float_bits(n: f64) -> u64 {
    if n == 0.0 {
        0.0_f64.to_bits()
    } else {
        n.to_bits()
    }
}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            FieldValue::Null => {}
            FieldValue::Bool(b) => b.hash(state),
            FieldValue::Int(n) => n.hash(state),
            FieldValue::Float(n) => float_bits(*n).hash(state),
            FieldValue::Str(s) | FieldValue::Enum(s) => s.hash(state),
            FieldValue::DateTime(dt) => dt.hash(state),
            FieldValue::Model(record) => record.hash(state),
            FieldValue::List(items) => items.hash(state),
            FieldValue::Map(entries) => entries.hash(state),
            // serde_json maps are key-sorted, so the text is canonical
            FieldValue::Json(value) => value.to_string().hash(state),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Float(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        FieldValue::DateTime(dt)
    }
}

impl From<Record> for FieldValue {
    fn from(record: Record) -> Self {
        FieldValue::Model(Box::new(record))
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        FieldValue::List(items)
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(entries: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Map(entries)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Json(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

//! Model instances
//!
//! A `Record` holds one slot per declared field. A slot is either unset
//! (never assigned) or holds a `FieldValue`, which may be an explicit null.
//! Projection treats the two differently; equality does not.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::value::FieldValue;
use crate::observability::{Diagnostic, DiagnosticSink};
use crate::schema::{
    EnumPolicy, FieldDef, ModelDescriptor, ModelError, ModelResult, TypeTag, UNKNOWN_ENUM_VALUE,
};

static NULL_VALUE: FieldValue = FieldValue::Null;

/// One instance of a described model
#[derive(Debug, Clone)]
pub struct Record {
    descriptor: Arc<ModelDescriptor>,
    slots: Vec<Option<FieldValue>>,
}

impl Record {
    /// Creates an instance with every field unset. Defaults are not applied.
    pub fn new(descriptor: Arc<ModelDescriptor>) -> Self {
        let slots = vec![None; descriptor.fields.len()];
        Self { descriptor, slots }
    }

    pub fn descriptor(&self) -> &Arc<ModelDescriptor> {
        &self.descriptor
    }

    /// Concrete model name
    pub fn type_name(&self) -> &str {
        &self.descriptor.name
    }

    /// Value of a field, `None` when unset or undeclared
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        let index = self.descriptor.field_index(field)?;
        self.slots[index].as_ref()
    }

    /// Whether the field was ever assigned, including to null
    pub fn is_set(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Whether no field has been assigned
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Fields in declaration order with their slot contents
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDef, Option<&FieldValue>)> {
        self.descriptor
            .fields
            .iter()
            .zip(self.slots.iter().map(Option::as_ref))
    }

    /// Assigns a field without a diagnostic sink.
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> ModelResult<()> {
        self.set_with(field, value, None)
    }

    /// Assigns a field through the type check and enum guard.
    ///
    /// Lenient enum fields report out-of-set values to `sink`; strict enum
    /// fields fail with `InvalidEnumValue`. Null always bypasses the guard.
    pub fn set_with(
        &mut self,
        field: &str,
        value: impl Into<FieldValue>,
        sink: Option<&dyn DiagnosticSink>,
    ) -> ModelResult<()> {
        let index = self
            .descriptor
            .field_index(field)
            .ok_or_else(|| ModelError::unknown_field(&self.descriptor.name, field))?;
        self.set_at(index, value.into(), sink)
    }

    /// Returns a field to the never-assigned state.
    pub fn unset(&mut self, field: &str) -> ModelResult<()> {
        let index = self
            .descriptor
            .field_index(field)
            .ok_or_else(|| ModelError::unknown_field(&self.descriptor.name, field))?;
        self.slots[index] = None;
        Ok(())
    }

    pub(crate) fn set_at(
        &mut self,
        index: usize,
        value: FieldValue,
        sink: Option<&dyn DiagnosticSink>,
    ) -> ModelResult<()> {
        let field = &self.descriptor.fields[index];
        let admitted = admit(&self.descriptor.name, &field.name, &field.tag, value, sink)?;
        self.slots[index] = Some(admitted);
        Ok(())
    }

    fn slot_values(&self) -> impl Iterator<Item = &FieldValue> {
        self.slots.iter().map(|slot| slot.as_ref().unwrap_or(&NULL_VALUE))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name == other.descriptor.name
            && self.slots.len() == other.slots.len()
            && self.slot_values().eq(other.slot_values())
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.name.hash(state);
        for value in self.slot_values() {
            value.hash(state);
        }
    }
}

/// Checks a value against a declared tag, normalizing where the tag allows.
///
/// Strings become enum values for enum tags. Float tags also admit integers,
/// which keep their integer form. Enum membership is enforced here, per
/// element for containers.
fn admit(
    model: &str,
    field: &str,
    tag: &TypeTag,
    value: FieldValue,
    sink: Option<&dyn DiagnosticSink>,
) -> ModelResult<FieldValue> {
    let mismatch = |value: &FieldValue| {
        ModelError::type_mismatch(model, field, tag.type_name(), value.kind_name())
    };

    match (tag, value) {
        (_, FieldValue::Null) => Ok(FieldValue::Null),
        (TypeTag::String, value @ FieldValue::Str(_)) => Ok(value),
        (TypeTag::Int, value @ FieldValue::Int(_)) => Ok(value),
        (TypeTag::Float, value @ FieldValue::Float(_)) => Ok(value),
        // Integral numbers keep their wire form
        (TypeTag::Float, value @ FieldValue::Int(_)) => Ok(value),
        (TypeTag::Bool, value @ FieldValue::Bool(_)) => Ok(value),
        (TypeTag::DateTime, value @ FieldValue::DateTime(_)) => Ok(value),
        (TypeTag::Enum { values, policy }, FieldValue::Str(s) | FieldValue::Enum(s)) => {
            guard_enum(model, field, values, *policy, s, sink)
        }
        (TypeTag::Model { model: expected }, FieldValue::Model(record)) => {
            let descriptor = record.descriptor();
            if descriptor.name == *expected
                || descriptor.parent.as_deref() == Some(expected.as_str())
            {
                Ok(FieldValue::Model(record))
            } else {
                Err(ModelError::type_mismatch(model, field, expected.as_str(), record.type_name()))
            }
        }
        (TypeTag::List { element }, FieldValue::List(items)) => items
            .into_iter()
            .map(|item| admit(model, field, element, item, sink))
            .collect::<ModelResult<Vec<_>>>()
            .map(FieldValue::List),
        (TypeTag::Map { value: inner }, FieldValue::Map(entries)) => entries
            .into_iter()
            .map(|(key, item)| admit(model, field, inner, item, sink).map(|item| (key, item)))
            .collect::<ModelResult<BTreeMap<_, _>>>()
            .map(FieldValue::Map),
        (TypeTag::Object, value @ FieldValue::Json(_)) => Ok(value),
        (_, value) => Err(mismatch(&value)),
    }
}

fn guard_enum(
    model: &str,
    field: &str,
    values: &[String],
    policy: EnumPolicy,
    candidate: String,
    sink: Option<&dyn DiagnosticSink>,
) -> ModelResult<FieldValue> {
    if values.contains(&candidate) {
        return Ok(FieldValue::Enum(candidate));
    }

    match policy {
        EnumPolicy::Strict => Err(ModelError::invalid_enum_value(model, field, candidate, values)),
        // Already degraded, e.g. a projected record decoded again
        EnumPolicy::Lenient if candidate == UNKNOWN_ENUM_VALUE => Ok(FieldValue::Enum(candidate)),
        EnumPolicy::Lenient => {
            if let Some(sink) = sink {
                sink.emit(&Diagnostic::unknown_enum_value(
                    model,
                    field,
                    &candidate,
                    UNKNOWN_ENUM_VALUE,
                ));
            }
            Ok(FieldValue::Enum(UNKNOWN_ENUM_VALUE.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemorySink;
    use crate::schema::FieldDef;
    use std::collections::hash_map::DefaultHasher;

    fn key_descriptor() -> Arc<ModelDescriptor> {
        Arc::new(ModelDescriptor::new(
            "Key",
            vec![
                FieldDef::string("id", "id"),
                FieldDef::lenient_enum(
                    "lifecycle_state",
                    "lifecycleState",
                    &["ENABLED", "DISABLED"],
                ),
                FieldDef::strict_enum("message_type", "messageType", &["RAW", "DIGEST"]),
                FieldDef::float("length", "length"),
                FieldDef::list(
                    "states",
                    "states",
                    TypeTag::enumeration(&["ON", "OFF"], EnumPolicy::Lenient),
                ),
            ],
        ))
    }

    fn hash_of(record: &Record) -> u64 {
        let mut hasher = DefaultHasher::new();
        record.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_new_record_is_empty() {
        let record = Record::new(key_descriptor());
        assert!(record.is_empty());
        assert!(!record.is_set("id"));
        assert_eq!(record.get("id"), None);
    }

    #[test]
    fn test_explicit_null_is_set() {
        let mut record = Record::new(key_descriptor());
        record.set("id", FieldValue::Null).unwrap();
        assert!(record.is_set("id"));
        assert_eq!(record.get("id"), Some(&FieldValue::Null));

        record.unset("id").unwrap();
        assert!(!record.is_set("id"));
    }

    #[test]
    fn test_lenient_enum_degrades_and_reports() {
        let sink = MemorySink::new();
        let mut record = Record::new(key_descriptor());
        record
            .set_with("lifecycle_state", "MELTING", Some(&sink))
            .unwrap();

        assert_eq!(
            record.get("lifecycle_state"),
            Some(&FieldValue::Enum(UNKNOWN_ENUM_VALUE.into()))
        );
        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, "MELTING");
        assert_eq!(entries[0].model, "Key");
    }

    #[test]
    fn test_lenient_enum_without_sink() {
        let mut record = Record::new(key_descriptor());
        record.set("lifecycle_state", "MELTING").unwrap();
        assert_eq!(
            record.get("lifecycle_state").and_then(FieldValue::as_str),
            Some(UNKNOWN_ENUM_VALUE)
        );
    }

    #[test]
    fn test_lenient_sentinel_accepted_silently() {
        let sink = MemorySink::new();
        let mut record = Record::new(key_descriptor());
        record
            .set_with("lifecycle_state", UNKNOWN_ENUM_VALUE, Some(&sink))
            .unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_strict_enum_rejects() {
        let mut record = Record::new(key_descriptor());
        let err = record.set("message_type", "HEX").unwrap_err();
        assert_eq!(err.code().code(), "SDK_MODEL_INVALID_ENUM_VALUE");
        assert!(!record.is_set("message_type"));

        record.set("message_type", "DIGEST").unwrap();
        assert_eq!(record.get("message_type"), Some(&FieldValue::Enum("DIGEST".into())));
    }

    #[test]
    fn test_null_bypasses_strict_guard() {
        let mut record = Record::new(key_descriptor());
        record.set("message_type", FieldValue::Null).unwrap();
        assert_eq!(record.get("message_type"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_enum_guard_applies_to_list_elements() {
        let mut record = Record::new(key_descriptor());
        record
            .set("states", vec![FieldValue::from("ON"), FieldValue::from("DIMMED")])
            .unwrap();
        assert_eq!(
            record.get("states"),
            Some(&FieldValue::List(vec![
                FieldValue::Enum("ON".into()),
                FieldValue::Enum(UNKNOWN_ENUM_VALUE.into()),
            ]))
        );
    }

    #[test]
    fn test_float_field_accepts_int() {
        let mut record = Record::new(key_descriptor());
        record.set("length", 256_i64).unwrap();
        assert_eq!(record.get("length"), Some(&FieldValue::Int(256)));
        assert_eq!(record.get("length").and_then(FieldValue::as_f64), Some(256.0));
    }

    #[test]
    fn test_type_mismatch() {
        let mut record = Record::new(key_descriptor());
        let err = record.set("id", 5_i64).unwrap_err();
        assert_eq!(
            err,
            ModelError::type_mismatch("Key", "id", "string", "int")
        );
        let err = record.set("states", BTreeMap::<String, FieldValue>::new()).unwrap_err();
        assert_eq!(err.code().code(), "SDK_MODEL_TYPE_MISMATCH");
    }

    #[test]
    fn test_unknown_field() {
        let mut record = Record::new(key_descriptor());
        let err = record.set("key_id", "x").unwrap_err();
        assert_eq!(err, ModelError::unknown_field("Key", "key_id"));
    }

    #[test]
    fn test_structural_equality_and_hash() {
        let mut a = Record::new(key_descriptor());
        let mut b = Record::new(key_descriptor());
        a.set("id", "k1").unwrap();
        b.set("id", "k1").unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        b.set("length", 128.0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unset_equals_explicit_null() {
        let a = Record::new(key_descriptor());
        let mut b = Record::new(key_descriptor());
        b.set("id", FieldValue::Null).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_different_types_never_equal() {
        let fields = key_descriptor().fields.clone();
        let other = Arc::new(ModelDescriptor::new("KeyVersion", fields));
        assert_ne!(Record::new(key_descriptor()), Record::new(other));
    }

    #[test]
    fn test_nested_model_type_checked() {
        let holder = Arc::new(ModelDescriptor::new(
            "Holder",
            vec![FieldDef::model("key", "key", "Key")],
        ));
        let mut record = Record::new(holder.clone());
        record.set("key", Record::new(key_descriptor())).unwrap();

        let err = record.set("key", Record::new(holder)).unwrap_err();
        assert_eq!(err.code().code(), "SDK_MODEL_TYPE_MISMATCH");
    }

    #[test]
    fn test_subtype_accepted_for_base_field() {
        let base = ModelDescriptor::new("Base", vec![FieldDef::string("kind", "kind")]);
        let sub = Arc::new(ModelDescriptor::subtype_of(&base, "Sub", vec![]));
        let holder = Arc::new(ModelDescriptor::new(
            "Holder",
            vec![FieldDef::model("item", "item", "Base")],
        ));
        let mut record = Record::new(holder);
        assert!(record.set("item", Record::new(sub)).is_ok());
    }
}

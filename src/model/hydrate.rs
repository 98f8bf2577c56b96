//! Hydration: building model instances from untyped JSON
//!
//! For every declared field the input may carry the wire key (`keyId`) or
//! the snake_case name (`key_id`). Supplying both is a conflict even when
//! the values agree. Absent fields take their declared default, if any,
//! and otherwise stay unset. Keys the model does not declare are ignored.

use std::sync::Arc;

use serde_json::Value;

use super::convert::convert_value;
use super::record::Record;
use crate::observability::DiagnosticSink;
use crate::schema::{ModelDescriptor, ModelError, ModelRegistry, ModelResult};

/// Builds records against a registry, reporting diagnostics to an optional sink.
#[derive(Clone, Copy)]
pub struct Hydrator<'a> {
    registry: &'a ModelRegistry,
    sink: Option<&'a dyn DiagnosticSink>,
}

impl<'a> Hydrator<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self {
            registry,
            sink: None,
        }
    }

    /// Routes lenient enum diagnostics to `sink`.
    pub fn with_sink(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn registry(&self) -> &'a ModelRegistry {
        self.registry
    }

    pub fn sink(&self) -> Option<&'a dyn DiagnosticSink> {
        self.sink
    }

    /// Hydrates exactly the named model, without subtype resolution.
    pub fn hydrate(&self, model: &str, input: &Value) -> ModelResult<Record> {
        let descriptor = self.registry.require(model)?;
        self.hydrate_descriptor(descriptor, input)
    }

    /// Hydrates a record of the given descriptor.
    ///
    /// A non-object input yields a record with no fields populated.
    pub fn hydrate_descriptor(
        &self,
        descriptor: &Arc<ModelDescriptor>,
        input: &Value,
    ) -> ModelResult<Record> {
        let mut record = Record::new(Arc::clone(descriptor));
        let Some(object) = input.as_object() else {
            return Ok(record);
        };

        for (index, field) in descriptor.fields.iter().enumerate() {
            let by_wire_key = object.get(&field.wire_key);
            let by_name = if field.has_alias() {
                object.get(&field.name)
            } else {
                None
            };

            let raw = match (by_wire_key, by_name) {
                (Some(_), Some(_)) => {
                    return Err(ModelError::conflicting_alias(
                        &descriptor.name,
                        &field.wire_key,
                        &field.name,
                    ));
                }
                (Some(raw), None) | (None, Some(raw)) => raw,
                (None, None) => match &field.default {
                    Some(default) => default,
                    None => continue,
                },
            };

            let value = convert_value(self, &descriptor.name, &field.name, &field.tag, raw)?;
            record.set_at(index, value, self.sink)?;
        }

        Ok(record)
    }

    /// Concrete model name for `input` per the model's discriminator.
    pub fn resolve_subtype(&self, model: &str, input: &Value) -> ModelResult<&'a str> {
        let descriptor = self.registry.require(model)?;
        Ok(descriptor.resolve_subtype(input))
    }

    /// Resolves the concrete subtype, then hydrates it.
    pub fn decode(&self, model: &str, input: &Value) -> ModelResult<Record> {
        let concrete = self.resolve_subtype(model, input)?;
        self.hydrate(concrete, input)
    }

    /// Converts `raw` to the field's declared type and assigns it.
    pub fn assign(&self, record: &mut Record, field: &str, raw: &Value) -> ModelResult<()> {
        let descriptor = Arc::clone(record.descriptor());
        let index = descriptor
            .field_index(field)
            .ok_or_else(|| ModelError::unknown_field(&descriptor.name, field))?;
        let def = &descriptor.fields[index];
        let value = convert_value(self, &descriptor.name, &def.name, &def.tag, raw)?;
        record.set_at(index, value, self.sink)
    }
}

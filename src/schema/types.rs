//! Model descriptor definitions
//!
//! Supported type tags:
//! - string, int (64-bit signed), float (64-bit), bool
//! - datetime: RFC 3339 string on the wire
//! - enum: string constrained to a closed value set, with a per-field policy
//! - model: nested model referenced by registered name
//! - list / map: homogeneous containers of any tag
//! - object: free-form JSON

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved value stored when a lenient enum field receives a value outside its set.
pub const UNKNOWN_ENUM_VALUE: &str = "UNKNOWN_ENUM_VALUE";

/// What an enum field does with a value outside its set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumPolicy {
    /// Replace with `UNKNOWN_ENUM_VALUE` and emit a diagnostic
    Lenient,
    /// Reject the assignment with `InvalidEnumValue`
    Strict,
}

/// Declared semantic type of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeTag {
    String,
    Int,
    Float,
    Bool,
    #[serde(rename = "datetime")]
    DateTime,
    Enum {
        values: Vec<String>,
        policy: EnumPolicy,
    },
    /// Nested model, resolved through the registry by name
    Model { model: String },
    List { element: Box<TypeTag> },
    /// Map from string keys to values of one tag
    Map { value: Box<TypeTag> },
    /// Free-form JSON kept verbatim
    Object,
}

impl TypeTag {
    pub fn enumeration(values: &[&str], policy: EnumPolicy) -> Self {
        TypeTag::Enum {
            values: values.iter().map(|v| v.to_string()).collect(),
            policy,
        }
    }

    pub fn model(name: impl Into<String>) -> Self {
        TypeTag::Model { model: name.into() }
    }

    pub fn list(element: TypeTag) -> Self {
        TypeTag::List {
            element: Box::new(element),
        }
    }

    pub fn map(value: TypeTag) -> Self {
        TypeTag::Map {
            value: Box::new(value),
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Bool => "bool",
            TypeTag::DateTime => "datetime",
            TypeTag::Enum { .. } => "enum",
            TypeTag::Model { .. } => "model",
            TypeTag::List { .. } => "list",
            TypeTag::Map { .. } => "map",
            TypeTag::Object => "object",
        }
    }

    /// Calls `visit` on this tag and every tag nested inside it.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a TypeTag)) {
        visit(self);
        match self {
            TypeTag::List { element } => element.walk(visit),
            TypeTag::Map { value } => value.walk(visit),
            _ => {}
        }
    }
}

/// One field of a model: canonical name, wire key and declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Canonical snake_case name
    pub name: String,
    /// Exact key used in the JSON payload
    pub wire_key: String,
    #[serde(flatten)]
    pub tag: TypeTag,
    /// Applied during hydration when neither alias is present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, wire_key: impl Into<String>, tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            wire_key: wire_key.into(),
            tag,
            default: None,
        }
    }

    pub fn string(name: &str, wire_key: &str) -> Self {
        Self::new(name, wire_key, TypeTag::String)
    }

    pub fn int(name: &str, wire_key: &str) -> Self {
        Self::new(name, wire_key, TypeTag::Int)
    }

    pub fn float(name: &str, wire_key: &str) -> Self {
        Self::new(name, wire_key, TypeTag::Float)
    }

    pub fn bool(name: &str, wire_key: &str) -> Self {
        Self::new(name, wire_key, TypeTag::Bool)
    }

    pub fn datetime(name: &str, wire_key: &str) -> Self {
        Self::new(name, wire_key, TypeTag::DateTime)
    }

    /// Enum field that degrades unknown values to the sentinel
    pub fn lenient_enum(name: &str, wire_key: &str, values: &[&str]) -> Self {
        Self::new(name, wire_key, TypeTag::enumeration(values, EnumPolicy::Lenient))
    }

    /// Enum field that rejects unknown values
    pub fn strict_enum(name: &str, wire_key: &str, values: &[&str]) -> Self {
        Self::new(name, wire_key, TypeTag::enumeration(values, EnumPolicy::Strict))
    }

    pub fn model(name: &str, wire_key: &str, model: &str) -> Self {
        Self::new(name, wire_key, TypeTag::model(model))
    }

    pub fn list(name: &str, wire_key: &str, element: TypeTag) -> Self {
        Self::new(name, wire_key, TypeTag::list(element))
    }

    pub fn map(name: &str, wire_key: &str, value: TypeTag) -> Self {
        Self::new(name, wire_key, TypeTag::map(value))
    }

    pub fn object(name: &str, wire_key: &str) -> Self {
        Self::new(name, wire_key, TypeTag::Object)
    }

    /// Sets the hydration default
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Whether the snake_case name differs from the wire key
    pub fn has_alias(&self) -> bool {
        self.name != self.wire_key
    }
}

/// Discriminator of a polymorphic model family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discriminator {
    /// Canonical name of the discriminating field
    pub field: String,
    /// Discriminator value to concrete model name
    pub mapping: BTreeMap<String, String>,
}

impl Discriminator {
    pub fn new(field: impl Into<String>, mapping: &[(&str, &str)]) -> Self {
        Self {
            field: field.into(),
            mapping: mapping
                .iter()
                .map(|(value, model)| (value.to_string(), model.to_string()))
                .collect(),
        }
    }
}

/// Static description of one model type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Unique model name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base model this one extends, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Fields in declaration order
    pub fields: Vec<FieldDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parent: None,
            fields,
            discriminator: None,
        }
    }

    /// Creates a subtype carrying the base fields followed by `extra`.
    pub fn subtype_of(
        base: &ModelDescriptor,
        name: impl Into<String>,
        extra: Vec<FieldDef>,
    ) -> Self {
        let mut fields = base.fields.clone();
        fields.extend(extra);
        Self {
            name: name.into(),
            description: None,
            parent: Some(base.name.clone()),
            fields,
            discriminator: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_discriminator(mut self, discriminator: Discriminator) -> Self {
        self.discriminator = Some(discriminator);
        self
    }

    /// Returns the field with the given canonical name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the declaration index of the given field
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field name to wire key, in declaration order
    pub fn attribute_map(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|f| (f.name.as_str(), f.wire_key.as_str()))
    }

    /// Field name to type tag, in declaration order
    pub fn type_map(&self) -> impl Iterator<Item = (&str, &TypeTag)> {
        self.fields.iter().map(|f| (f.name.as_str(), &f.tag))
    }

    /// Resolves the concrete model name for a raw payload.
    ///
    /// Reads the discriminator field under its wire key. Falls back to this
    /// model's own name when there is no discriminator, the value is absent
    /// or not a string, or the value has no mapping.
    pub fn resolve_subtype<'a>(&'a self, input: &Value) -> &'a str {
        let Some(discriminator) = &self.discriminator else {
            return &self.name;
        };
        let Some(field) = self.field(&discriminator.field) else {
            return &self.name;
        };

        input
            .get(&field.wire_key)
            .and_then(Value::as_str)
            .and_then(|value| discriminator.mapping.get(value))
            .map(String::as_str)
            .unwrap_or(&self.name)
    }

    /// Names of every model this descriptor refers to
    pub fn referenced_models(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for field in &self.fields {
            field.tag.walk(&mut |tag| {
                if let TypeTag::Model { model } = tag {
                    names.push(model.as_str());
                }
            });
        }
        if let Some(discriminator) = &self.discriminator {
            names.extend(discriminator.mapping.values().map(String::as_str));
        }
        if let Some(parent) = &self.parent {
            names.push(parent.as_str());
        }
        names
    }

    /// Validates the descriptor structure itself (not a payload)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("model name must not be empty".into());
        }

        let mut names = HashSet::new();
        let mut wire_keys = HashSet::new();
        // Input key (name or wire key) to the field it fills
        let mut input_keys: HashMap<&str, &str> = HashMap::new();
        for field in &self.fields {
            if !field_name_pattern().is_match(&field.name) {
                return Err(format!("field '{}' is not snake_case", field.name));
            }
            if field.wire_key.is_empty() {
                return Err(format!("field '{}' has an empty wire key", field.name));
            }
            if !names.insert(field.name.as_str()) {
                return Err(format!("field '{}' declared twice", field.name));
            }
            if !wire_keys.insert(field.wire_key.as_str()) {
                return Err(format!("wire key '{}' declared twice", field.wire_key));
            }
            for key in [field.name.as_str(), field.wire_key.as_str()] {
                match input_keys.insert(key, field.name.as_str()) {
                    Some(owner) if owner != field.name => {
                        return Err(format!(
                            "key '{}' of field '{}' is also an alias of field '{}'",
                            key, field.name, owner
                        ));
                    }
                    _ => {}
                }
            }
            validate_tag(&field.name, &field.tag)?;
            if let (Some(Value::String(default)), TypeTag::Enum { values, .. }) =
                (&field.default, &field.tag)
            {
                if !values.contains(default) {
                    return Err(format!(
                        "default '{}' of field '{}' is not an allowed value",
                        default, field.name
                    ));
                }
            }
        }

        if let Some(discriminator) = &self.discriminator {
            let field = self.field(&discriminator.field).ok_or_else(|| {
                format!("discriminator field '{}' is not declared", discriminator.field)
            })?;
            if !matches!(field.tag, TypeTag::String | TypeTag::Enum { .. }) {
                return Err(format!(
                    "discriminator field '{}' must be a string or enum",
                    field.name
                ));
            }
            if discriminator.mapping.values().any(|m| m.trim().is_empty()) {
                return Err("discriminator maps to an empty model name".into());
            }
        }

        Ok(())
    }
}

fn validate_tag(field: &str, tag: &TypeTag) -> Result<(), String> {
    let mut result = Ok(());
    tag.walk(&mut |tag| match tag {
        TypeTag::Enum { values, .. } if result.is_ok() => {
            if values.is_empty() {
                result = Err(format!("enum of field '{}' has no values", field));
            } else if values.iter().any(|v| v == UNKNOWN_ENUM_VALUE) {
                result = Err(format!(
                    "enum of field '{}' must not list {}",
                    field, UNKNOWN_ENUM_VALUE
                ));
            }
        }
        TypeTag::Model { model } if result.is_ok() && model.trim().is_empty() => {
            result = Err(format!("field '{}' references an empty model name", field));
        }
        _ => {}
    });
    result
}

fn field_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("field name pattern is valid"))
}

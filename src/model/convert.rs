//! Raw JSON to declared type conversion
//!
//! Conversion rules:
//! - null converts to explicit null for every tag
//! - string: strings as-is, numbers and booleans by their text
//! - int: integers, floats truncated toward zero, numeric strings; values
//!   outside the i64 range are a mismatch
//! - float: any number, numeric strings; integral wire numbers stay integers
//!   so that projection reproduces them
//! - bool: booleans, otherwise true iff the text is true/t/yes/y/1
//! - datetime: RFC 3339 strings
//! - enum: strings (membership is checked on assignment)
//! - model: objects, hydrated after subtype resolution
//! - list / map: converted element-wise
//! - object: kept verbatim

use chrono::DateTime;
use serde_json::Value;

use super::hydrate::Hydrator;
use super::value::FieldValue;
use crate::schema::{ModelError, ModelResult, TypeTag};

/// Converts `raw` to a value of the declared `tag`.
///
/// `model` and `field` only name the location for errors.
pub fn convert_value(
    hydrator: &Hydrator<'_>,
    model: &str,
    field: &str,
    tag: &TypeTag,
    raw: &Value,
) -> ModelResult<FieldValue> {
    let mismatch = || ModelError::type_mismatch(model, field, tag.type_name(), json_type_name(raw));

    if raw.is_null() {
        return Ok(FieldValue::Null);
    }

    match tag {
        TypeTag::String => match raw {
            Value::String(s) => Ok(FieldValue::Str(s.clone())),
            Value::Number(n) => Ok(FieldValue::Str(n.to_string())),
            Value::Bool(b) => Ok(FieldValue::Str(b.to_string())),
            _ => Err(mismatch()),
        },
        TypeTag::Int => match raw {
            Value::Number(n) if n.is_u64() && !n.is_i64() => Err(mismatch()),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(truncate_to_i64))
                .map(FieldValue::Int)
                .ok_or_else(mismatch),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|_| mismatch()),
            _ => Err(mismatch()),
        },
        TypeTag::Float => match raw {
            Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| n.as_f64().map(FieldValue::Float))
                .ok_or_else(mismatch),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|_| mismatch()),
            _ => Err(mismatch()),
        },
        TypeTag::Bool => Ok(FieldValue::Bool(truthy(raw))),
        TypeTag::DateTime => raw
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(FieldValue::DateTime)
            .ok_or_else(mismatch),
        TypeTag::Enum { .. } => raw
            .as_str()
            .map(|s| FieldValue::Enum(s.to_string()))
            .ok_or_else(mismatch),
        TypeTag::Model { model: nested } => {
            if !raw.is_object() {
                return Err(mismatch());
            }
            hydrator.decode(nested, raw).map(FieldValue::from)
        }
        TypeTag::List { element } => {
            let items = raw.as_array().ok_or_else(mismatch)?;
            items
                .iter()
                .map(|item| convert_value(hydrator, model, field, element, item))
                .collect::<ModelResult<Vec<_>>>()
                .map(FieldValue::List)
        }
        TypeTag::Map { value } => {
            let entries = raw.as_object().ok_or_else(mismatch)?;
            let mut converted = std::collections::BTreeMap::new();
            for (key, item) in entries {
                converted.insert(key.clone(), convert_value(hydrator, model, field, value, item)?);
            }
            Ok(FieldValue::Map(converted))
        }
        TypeTag::Object => Ok(FieldValue::Json(raw.clone())),
    }
}

/// Truncates toward zero, `None` when the result does not fit in an i64.
fn truncate_to_i64(f: f64) -> Option<i64> {
    // 2^63 is exact in f64; i64::MAX is not
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let truncated = f.trunc();
    if truncated.is_finite() && truncated >= -LIMIT && truncated < LIMIT {
        Some(truncated as i64)
    } else {
        None
    }
}

/// Loose boolean reading of any JSON value.
fn truthy(raw: &Value) -> bool {
    let text = match raw {
        Value::Bool(b) => return *b,
        Value::String(s) => s.trim().to_ascii_lowercase(),
        Value::Number(n) => n.to_string(),
        _ => return false,
    };
    matches!(text.as_str(), "true" | "t" | "yes" | "y" | "1")
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumPolicy, ModelRegistry};
    use serde_json::json;

    fn convert(tag: &TypeTag, raw: Value) -> ModelResult<FieldValue> {
        let registry = ModelRegistry::new();
        let hydrator = Hydrator::new(&registry);
        convert_value(&hydrator, "Test", "field", tag, &raw)
    }

    #[test]
    fn test_null_for_any_tag() {
        assert_eq!(convert(&TypeTag::Int, Value::Null).unwrap(), FieldValue::Null);
        assert_eq!(convert(&TypeTag::model("Anything"), Value::Null).unwrap(), FieldValue::Null);
    }

    #[test]
    fn test_string_from_scalars() {
        assert_eq!(convert(&TypeTag::String, json!("abc")).unwrap(), FieldValue::from("abc"));
        assert_eq!(convert(&TypeTag::String, json!(42)).unwrap(), FieldValue::from("42"));
        assert_eq!(convert(&TypeTag::String, json!(true)).unwrap(), FieldValue::from("true"));
        assert!(convert(&TypeTag::String, json!([1])).is_err());
    }

    #[test]
    fn test_int_conversion() {
        assert_eq!(convert(&TypeTag::Int, json!(7)).unwrap(), FieldValue::Int(7));
        assert_eq!(convert(&TypeTag::Int, json!(7.9)).unwrap(), FieldValue::Int(7));
        assert_eq!(convert(&TypeTag::Int, json!(-7.9)).unwrap(), FieldValue::Int(-7));
        assert_eq!(convert(&TypeTag::Int, json!(" 12 ")).unwrap(), FieldValue::Int(12));

        let err = convert(&TypeTag::Int, json!("twelve")).unwrap_err();
        assert_eq!(err, ModelError::type_mismatch("Test", "field", "int", "string"));
    }

    #[test]
    fn test_int_out_of_range_rejected() {
        let err = convert(&TypeTag::Int, json!(u64::MAX)).unwrap_err();
        assert_eq!(err, ModelError::type_mismatch("Test", "field", "int", "int"));

        let err = convert(&TypeTag::Int, json!(1e30)).unwrap_err();
        assert_eq!(err, ModelError::type_mismatch("Test", "field", "int", "float"));

        assert!(convert(&TypeTag::Int, json!(-1e30)).is_err());
        assert!(convert(&TypeTag::Int, json!("99999999999999999999")).is_err());
        assert_eq!(
            convert(&TypeTag::Int, json!(i64::MIN)).unwrap(),
            FieldValue::Int(i64::MIN)
        );
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(convert(&TypeTag::Float, json!(2)).unwrap(), FieldValue::Int(2));
        assert_eq!(convert(&TypeTag::Float, json!(2.0)).unwrap(), FieldValue::Float(2.0));
        assert_eq!(convert(&TypeTag::Float, json!("0.25")).unwrap(), FieldValue::Float(0.25));
        assert!(convert(&TypeTag::Float, json!({})).is_err());
    }

    #[test]
    fn test_bool_conversion() {
        let truthy_values = [
            json!(true),
            json!("TRUE"),
            json!("t"),
            json!("Yes"),
            json!("y"),
            json!(1),
            json!("1"),
        ];
        for truthy_value in truthy_values {
            assert_eq!(convert(&TypeTag::Bool, truthy_value).unwrap(), FieldValue::Bool(true));
        }
        let falsy_values = [json!(false), json!("no"), json!(0), json!("2"), json!([]), json!({})];
        for falsy_value in falsy_values {
            assert_eq!(convert(&TypeTag::Bool, falsy_value).unwrap(), FieldValue::Bool(false));
        }
    }

    #[test]
    fn test_datetime_conversion() {
        let value = convert(&TypeTag::DateTime, json!("2024-05-01T10:15:30.250Z")).unwrap();
        assert_eq!(value.as_datetime().unwrap().timestamp_millis(), 1714558530250);
        assert!(convert(&TypeTag::DateTime, json!("yesterday")).is_err());
        assert!(convert(&TypeTag::DateTime, json!(1714558530)).is_err());
    }

    #[test]
    fn test_enum_conversion_defers_membership() {
        let tag = TypeTag::enumeration(&["A"], EnumPolicy::Strict);
        assert_eq!(convert(&tag, json!("Z")).unwrap(), FieldValue::Enum("Z".into()));
        assert!(convert(&tag, json!(1)).is_err());
    }

    #[test]
    fn test_containers() {
        let list = convert(&TypeTag::list(TypeTag::Int), json!([1, null, "3"])).unwrap();
        assert_eq!(
            list,
            FieldValue::List(vec![FieldValue::Int(1), FieldValue::Null, FieldValue::Int(3)])
        );

        let map = convert(&TypeTag::map(TypeTag::String), json!({"a": "x", "b": null})).unwrap();
        let entries = map.as_map().unwrap();
        assert_eq!(entries["a"], FieldValue::from("x"));
        assert_eq!(entries["b"], FieldValue::Null);

        assert!(convert(&TypeTag::list(TypeTag::Int), json!({"a": 1})).is_err());
    }

    #[test]
    fn test_object_kept_verbatim() {
        let raw = json!({"Operations": {"CostCenter": "42", "nested": [null, 1]}});
        assert_eq!(convert(&TypeTag::Object, raw.clone()).unwrap(), FieldValue::Json(raw));
    }

    #[test]
    fn test_unregistered_nested_model() {
        let err = convert(&TypeTag::model("Missing"), json!({})).unwrap_err();
        assert_eq!(err, ModelError::UnknownModel("Missing".into()));
        assert!(convert(&TypeTag::model("Missing"), json!("x")).is_err());
    }
}

//! JSON boundary for valchemy.
//!
//! Parsed `serde_json` documents convert losslessly into the engine's
//! [`Value`] model and back, so schemas built with `valchemy-core` can
//! validate external JSON without the core crate knowing about wire formats.
//! Callable descriptors, non-finite floats, and big integers beyond the JSON
//! number range have no JSON shape and fail the reverse conversion.

use valchemy_core::{ObjectValue, Schema, Validation, ValidationError, Value};

use thiserror::Error;

/// Failures converting engine values back into JSON.
#[derive(Debug, Error, PartialEq)]
pub enum JsonError {
    /// Callable descriptors have no JSON representation.
    #[error("function values have no JSON representation")]
    UnrepresentableFunction,
    /// NaN and the infinities have no JSON representation.
    #[error("non-finite number {0} has no JSON representation")]
    NonFiniteNumber(f64),
    /// The big integer exceeds the JSON number range.
    #[error("big integer {0} exceeds the JSON number range")]
    BigIntOutOfRange(i128),
}

/// Convert a parsed JSON document into an engine value. Total: every JSON
/// document has an engine shape. Integral JSON numbers become integers
/// (widening to big integers past the i64 range); everything else maps
/// variant for variant.
pub fn to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::Big(i128::from(u))
            } else {
                Value::Num(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => Value::Arr(items.iter().map(to_value).collect()),
        serde_json::Value::Object(entries) => Value::Obj(ObjectValue {
            tag: None,
            entries: entries
                .iter()
                .map(|(k, v)| (k.clone(), to_value(v)))
                .collect(),
        }),
    }
}

/// Convert an engine value back into JSON. Object tags are dropped; values
/// with no JSON shape are an error.
pub fn to_json(value: &Value) -> Result<serde_json::Value, JsonError> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Num(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .ok_or(JsonError::NonFiniteNumber(*n))?,
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Big(b) => {
            if let Ok(i) = i64::try_from(*b) {
                serde_json::Value::Number(i.into())
            } else if let Ok(u) = u64::try_from(*b) {
                serde_json::Value::Number(u.into())
            } else {
                return Err(JsonError::BigIntOutOfRange(*b));
            }
        }
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Arr(items) => serde_json::Value::Array(
            items.iter().map(to_json).collect::<Result<_, _>>()?,
        ),
        Value::Obj(object) => serde_json::Value::Object(
            object
                .entries
                .iter()
                .map(|(k, v)| Ok((k.clone(), to_json(v)?)))
                .collect::<Result<_, JsonError>>()?,
        ),
        Value::Fun(_) => return Err(JsonError::UnrepresentableFunction),
    })
}

/// Run a full validation of a JSON document against a schema.
pub fn validate_json(schema: &Schema, document: &serde_json::Value) -> Validation {
    schema.validate(&to_value(document))
}

/// Quick yes/no acceptance of a JSON document.
pub fn accepts_json(schema: &Schema, document: &serde_json::Value) -> bool {
    schema.accepts(&to_value(document))
}

/// Assert a JSON document against a schema, formatting failures with the
/// bundled catalog.
pub fn assert_json(
    schema: &Schema,
    document: &serde_json::Value,
) -> Result<(), ValidationError> {
    schema.assert(&to_value(document)).map(|_| ())
}

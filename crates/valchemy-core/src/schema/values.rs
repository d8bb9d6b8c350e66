//! The value facets: literal and enum, both using deep structural equality.

use crate::error::{Result, SchemaError};
use crate::schema::{Kind, Schema};
use crate::value::Value;
use crate::violation::Validation;

/// Accepts only values structurally equal to `value`.
///
/// A `Null` literal selects specifically for the absent representation, so
/// the schema comes back implicitly optional. A bare NaN could never match
/// and is rejected outright.
pub fn literal(value: impl Into<Value>) -> Result<Schema> {
    let value = value.into();
    if value.is_nan() {
        return Err(SchemaError::UnmatchableNan { what: "literal" });
    }
    let schema = Schema::from_kind(Kind::Literal(value.clone()));
    Ok(if value.is_absent() {
        schema.optional()
    } else {
        schema
    })
}

/// Accepts values structurally equal to any of `variants`.
///
/// Variants must be non-empty and structurally distinct; a `Null` variant
/// makes the schema implicitly optional, and bare-NaN variants are rejected
/// because they could never match.
pub fn enum_of(variants: Vec<Value>) -> Result<Schema> {
    if variants.is_empty() {
        return Err(SchemaError::Empty {
            what: "enum_of",
            unit: "variant",
        });
    }
    for (i, variant) in variants.iter().enumerate() {
        if variant.is_nan() {
            return Err(SchemaError::UnmatchableNan {
                what: "enum variant",
            });
        }
        if variants[..i].iter().any(|seen| seen.structural_eq(variant)) {
            return Err(SchemaError::DuplicateVariant);
        }
    }
    let absent = variants.iter().any(Value::is_absent);
    let schema = Schema::from_kind(Kind::Enum(variants));
    Ok(if absent { schema.optional() } else { schema })
}

pub(super) fn check_literal(expected: &Value, validation: &mut Validation) {
    if !validation.value().structural_eq(expected) {
        validation.add("lit", vec![expected.clone()]);
    }
}

pub(super) fn check_enum(variants: &[Value], validation: &mut Validation) {
    let matched = variants
        .iter()
        .any(|variant| validation.value().structural_eq(variant));
    if !matched {
        validation.add("enm", vec![Value::Arr(variants.to_vec())]);
    }
}

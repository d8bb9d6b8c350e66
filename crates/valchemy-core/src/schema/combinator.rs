//! Boolean combinators over child schemas.
//!
//! Membership tests against children always run quick (only the yes/no
//! matters); `all_of` is the exception, subsuming full child validations so
//! nothing a child found is dropped.

use crate::error::{Result, SchemaError};
use crate::schema::{Kind, Schema};
use crate::value::Value;
use crate::violation::Validation;

fn non_empty(what: &'static str, children: &[Schema]) -> Result<()> {
    if children.is_empty() {
        return Err(SchemaError::Empty {
            what,
            unit: "child schema",
        });
    }
    Ok(())
}

/// Accepts when at least one child accepts.
pub fn any_of(children: Vec<Schema>) -> Result<Schema> {
    non_empty("any_of", &children)?;
    Ok(Schema::from_kind(Kind::AnyOf(children)))
}

/// Accepts when every child accepts.
pub fn all_of(children: Vec<Schema>) -> Result<Schema> {
    non_empty("all_of", &children)?;
    Ok(Schema::from_kind(Kind::AllOf(children)))
}

/// Accepts when exactly one child accepts.
pub fn one_of(children: Vec<Schema>) -> Result<Schema> {
    non_empty("one_of", &children)?;
    Ok(Schema::from_kind(Kind::OneOf(children)))
}

/// Accepts when no child accepts.
pub fn none_of(children: Vec<Schema>) -> Result<Schema> {
    non_empty("none_of", &children)?;
    Ok(Schema::from_kind(Kind::NoneOf(children)))
}

/// Inverts a single child schema's acceptance.
pub fn not(child: Schema) -> Schema {
    Schema::from_kind(Kind::Not(child))
}

fn child_accepts(child: &Schema, validation: &Validation) -> bool {
    child
        .apply(validation.value(), validation.label(), true)
        .ok()
}

pub(super) fn check_any_of(children: &[Schema], validation: &mut Validation) {
    let matched = children
        .iter()
        .any(|child| child_accepts(child, validation));
    if !matched {
        validation.add("ano", vec![Value::from(children.len() as i64)]);
    }
}

pub(super) fn check_all_of(children: &[Schema], validation: &mut Validation) {
    let value = validation.value().clone();
    let label = validation.label().to_string();
    let quick = validation.quick();
    for child in children {
        validation.subsume(child.apply(&value, &label, quick));
        if validation.halted() {
            return;
        }
    }
}

pub(super) fn check_one_of(children: &[Schema], validation: &mut Validation) {
    let mut first: Option<usize> = None;
    for (i, child) in children.iter().enumerate() {
        if !child_accepts(child, validation) {
            continue;
        }
        match first {
            None => first = Some(i),
            Some(f) => {
                // a second match settles it; later children go unexamined
                validation.add(
                    "ono.mlt",
                    vec![Value::from(f as i64), Value::from(i as i64)],
                );
                return;
            }
        }
    }
    if first.is_none() {
        validation.add("ono.non", Vec::new());
    }
}

pub(super) fn check_none_of(children: &[Schema], validation: &mut Validation) {
    let matched = children
        .iter()
        .position(|child| child_accepts(child, validation));
    if let Some(i) = matched {
        validation.add("nno", vec![Value::from(i as i64)]);
    }
}

pub(super) fn check_not(child: &Schema, validation: &mut Validation) {
    if child_accepts(child, validation) {
        validation.add("not", Vec::new());
    }
}

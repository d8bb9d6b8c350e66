//! The scalar facets: none, any, boolean, and the callable facet.

use crate::schema::bounds::LengthBounds;
use crate::schema::{Kind, Schema};
use crate::value::Value;
use crate::violation::Validation;

/// Accepts no present value at all.
pub fn none() -> Schema {
    Schema::from_kind(Kind::None)
}

/// Accepts any present value.
pub fn any() -> Schema {
    Schema::from_kind(Kind::Any)
}

/// Accepts true and false.
pub fn boolean() -> Schema {
    Schema::from_kind(Kind::Boolean)
}

/// Accepts callable descriptors; length bounds apply to the arity.
pub fn function() -> Schema {
    Schema::from_kind(Kind::Function(LengthBounds::default()))
}

pub(super) fn check_boolean(validation: &mut Validation) {
    if !matches!(validation.value(), Value::Bool(_)) {
        validation.add("bul", Vec::new());
    }
}

pub(super) fn check_function(len: &LengthBounds, validation: &mut Validation) {
    let arity = match validation.value() {
        Value::Fun(fun) => fun.arity,
        _ => {
            validation.add("fun", Vec::new());
            return;
        }
    };
    len.check("fun", arity, validation);
}

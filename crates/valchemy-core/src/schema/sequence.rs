//! The sequence facets: homogeneous arrays and positional tuples.

use crate::error::{Result, SchemaError};
use crate::schema::bounds::LengthBounds;
use crate::schema::{Kind, Schema};
use crate::value::Value;
use crate::violation::Validation;

/// Array-facet state: size bounds plus an optional item schema every
/// element must satisfy.
#[derive(Debug, Clone, Default)]
pub(crate) struct ArrayFacet {
    pub(crate) len: LengthBounds,
    pub(crate) item: Option<Schema>,
}

/// Tuple-facet state: one schema per position, in order.
#[derive(Debug, Clone)]
pub(crate) struct TupleFacet {
    pub(crate) members: Vec<Schema>,
    pub(crate) closed: bool,
    pub(crate) len: LengthBounds,
}

/// Accepts arrays.
pub fn array() -> Schema {
    Schema::from_kind(Kind::Array(ArrayFacet::default()))
}

/// Accepts arrays whose every element satisfies `item`.
pub fn array_of(item: Schema) -> Schema {
    Schema::from_kind(Kind::Array(ArrayFacet {
        len: LengthBounds::default(),
        item: Some(item),
    }))
}

/// Accepts arrays validated position by position against `members`.
pub fn tuple(members: Vec<Schema>) -> Result<Schema> {
    if members.is_empty() {
        return Err(SchemaError::Empty {
            what: "tuple",
            unit: "member schema",
        });
    }
    Ok(Schema::from_kind(Kind::Tuple(TupleFacet {
        members,
        closed: false,
        len: LengthBounds::default(),
    })))
}

impl Schema {
    /// Require every array element to satisfy `item`. At most once; the
    /// item schema must not reach back to this node.
    pub fn of(&self, item: Schema) -> Result<Schema> {
        let Kind::Array(facet) = &self.node.kind else {
            return Err(self.misapplied("of"));
        };
        if facet.item.is_some() {
            return Err(SchemaError::Redundant { what: "of" });
        }
        self.guard_cycle(&item, "of")?;
        Ok(self.with_kind(Kind::Array(ArrayFacet {
            len: facet.len,
            item: Some(item),
        })))
    }
}

pub(super) fn check_array(facet: &ArrayFacet, validation: &mut Validation) {
    let items = match validation.value() {
        Value::Arr(items) => items.clone(),
        _ => {
            validation.add("arr", Vec::new());
            return;
        }
    };
    facet.len.check("arr", items.len(), validation);
    if validation.halted() {
        return;
    }
    if let Some(item_schema) = &facet.item {
        let label = validation.label().to_string();
        let quick = validation.quick();
        for (i, item) in items.iter().enumerate() {
            validation.subsume(item_schema.apply(item, &format!("{label}[{i}]"), quick));
            if validation.halted() {
                return;
            }
        }
    }
}

pub(super) fn check_tuple(facet: &TupleFacet, validation: &mut Validation) {
    let items = match validation.value() {
        Value::Arr(items) => items.clone(),
        _ => {
            validation.add("tup", vec![Value::from(facet.members.len() as i64)]);
            return;
        }
    };
    facet.len.check("tup", items.len(), validation);
    if validation.halted() {
        return;
    }
    let label = validation.label().to_string();
    let quick = validation.quick();
    for (i, member) in facet.members.iter().enumerate() {
        let item = items.get(i).cloned().unwrap_or(Value::Null);
        validation.subsume(member.apply(&item, &format!("{label}[{i}]"), quick));
        if validation.halted() {
            return;
        }
    }
    if facet.closed && items.len() > facet.members.len() {
        validation.add(
            "tup.cls",
            vec![
                Value::from(items.len() as i64),
                Value::from(facet.members.len() as i64),
            ],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::numeric::{integer, number};
    use crate::schema::text::string;
    use crate::testing::{assert_code, assert_code_at, assert_ok};

    #[test]
    fn arrays_only() {
        for value in [
            Value::Arr(Vec::new()),
            Value::from(vec![1]),
            Value::Arr(vec![Value::from(vec![1])]),
        ] {
            assert_ok(&array(), &value);
        }
        for value in [Value::from(1), Value::from("hi"), Value::Num(f64::NAN)] {
            assert_code(&array(), &value, "arr");
        }
    }

    #[test]
    fn recurses_into_item_values_with_indexed_labels() {
        let schema = array_of(integer());
        assert_ok(&schema, &Value::from(vec![1, 2]));

        let mixed = Value::Arr(vec![Value::from(1), Value::from("hi")]);
        assert_code_at(&schema, &mixed, "int", "value[1]");
    }

    #[test]
    fn of_composes_onto_a_plain_array() {
        let schema = array().of(integer()).unwrap();
        assert_ok(&schema, &Value::from(vec![1, 2]));
        assert_code(&schema, &Value::Arr(vec![Value::from("hi")]), "int");
    }

    #[test]
    fn of_is_single_shot_and_array_only() {
        assert!(matches!(
            array_of(integer()).of(integer()),
            Err(SchemaError::Redundant { .. })
        ));
        assert!(matches!(
            string().of(integer()),
            Err(SchemaError::Misapplied { .. })
        ));
    }

    #[test]
    fn of_rejects_self_reference() {
        let schema = array();
        assert!(matches!(
            schema.of(schema.clone()),
            Err(SchemaError::CyclicReference { .. })
        ));
    }

    #[test]
    fn size_bounds() {
        let ranged = array().length(1, 3).unwrap();
        assert_code(&ranged, &Value::Arr(Vec::new()), "arr.len.min");
        assert_ok(&ranged, &Value::from(vec![1]));
        assert_ok(&ranged, &Value::from(vec![1, 2, 3]));
        assert_code(&ranged, &Value::from(vec![1, 2, 3, 4]), "arr.len.max");

        let exact = array().exact_length(2).unwrap();
        assert_code(&exact, &Value::from(vec![1]), "arr.len.eq");
        assert_ok(&exact, &Value::from(vec![1, 2]));
        assert_code(&exact, &Value::from(vec![1, 2, 3]), "arr.len.eq");
    }

    #[test]
    fn tuples_check_members_positionally() {
        let schema = tuple(vec![integer(), string()]).unwrap();
        let good = Value::Arr(vec![Value::from(1), Value::from("hi")]);
        assert_ok(&schema, &good);

        let swapped = Value::Arr(vec![Value::from("hi"), Value::from(1)]);
        assert_code_at(&schema, &swapped, "int", "value[0]");
        assert_code_at(&schema, &swapped, "str", "value[1]");
    }

    #[test]
    fn tuples_treat_missing_members_as_absent() {
        let schema = tuple(vec![integer(), string()]).unwrap();
        let short = Value::Arr(vec![Value::from(1)]);
        assert_code_at(&schema, &short, "opt", "value[1]");

        let lax = tuple(vec![integer(), string().optional()]).unwrap();
        assert_ok(&lax, &Value::Arr(vec![Value::from(1)]));
    }

    #[test]
    fn closed_tuples_reject_extra_members() {
        let open = tuple(vec![integer()]).unwrap();
        let long = Value::Arr(vec![Value::from(1), Value::from(2)]);
        assert_ok(&open, &long);

        let closed = open.closed().unwrap();
        assert_code(&closed, &long, "tup.cls");
    }

    #[test]
    fn tuple_requires_members() {
        assert!(matches!(tuple(Vec::new()), Err(SchemaError::Empty { .. })));
    }

    #[test]
    fn non_arrays_fail_the_tuple_type_check() {
        let schema = tuple(vec![number()]).unwrap();
        assert_code(&schema, &Value::from(2), "tup");
    }
}

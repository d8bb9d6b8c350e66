//! The structural facets: open objects and closed records.

use std::collections::BTreeMap;

use crate::error::{Result, SchemaError};
use crate::schema::bounds::LengthBounds;
use crate::schema::{Kind, Schema};
use crate::value::Value;
use crate::violation::Validation;

/// Object-facet state.
#[derive(Debug, Clone, Default)]
pub(crate) struct ObjectFacet {
    /// Schemas for specific named properties.
    pub(crate) props: Option<BTreeMap<String, Schema>>,
    /// Schema every property name must satisfy.
    pub(crate) keys: Option<Schema>,
    /// Schema every property value must satisfy.
    pub(crate) values: Option<Schema>,
    /// Required runtime representation tag.
    pub(crate) tag: Option<String>,
    /// Whether properties outside `props` are rejected.
    pub(crate) closed: bool,
    /// Bounds on the property count.
    pub(crate) len: LengthBounds,
}

/// Accepts object values.
pub fn object() -> Schema {
    Schema::from_kind(Kind::Object(ObjectFacet::default()))
}

/// Accepts object values with no properties beyond the enumerated ones:
/// the object facet with `closed` on from the start.
pub fn record() -> Schema {
    Schema::from_kind(Kind::Object(ObjectFacet {
        closed: true,
        ..ObjectFacet::default()
    }))
}

impl Schema {
    /// Validate specific properties by name. At most once; none of the
    /// property schemas may reach back to this node.
    pub fn props<K, I>(&self, props: I) -> Result<Schema>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        let facet = self.object_facet("props")?;
        if facet.props.is_some() {
            return Err(SchemaError::Redundant { what: "props" });
        }
        let mut map = BTreeMap::new();
        for (name, schema) in props {
            self.guard_cycle(&schema, "props")?;
            map.insert(name.into(), schema);
        }
        let mut facet = facet.clone();
        facet.props = Some(map);
        Ok(self.with_kind(Kind::Object(facet)))
    }

    /// Validate every property name against `schema`. At most once.
    pub fn keys(&self, schema: Schema) -> Result<Schema> {
        let facet = self.object_facet("keys")?;
        if facet.keys.is_some() {
            return Err(SchemaError::Redundant { what: "keys" });
        }
        self.guard_cycle(&schema, "keys")?;
        let mut facet = facet.clone();
        facet.keys = Some(schema);
        Ok(self.with_kind(Kind::Object(facet)))
    }

    /// Validate every property value against `schema`. At most once.
    pub fn values(&self, schema: Schema) -> Result<Schema> {
        let facet = self.object_facet("values")?;
        if facet.values.is_some() {
            return Err(SchemaError::Redundant { what: "values" });
        }
        self.guard_cycle(&schema, "values")?;
        let mut facet = facet.clone();
        facet.values = Some(schema);
        Ok(self.with_kind(Kind::Object(facet)))
    }

    /// Require the object's runtime representation tag. At most once.
    pub fn tag(&self, name: impl Into<String>) -> Result<Schema> {
        let facet = self.object_facet("tag")?;
        if facet.tag.is_some() {
            return Err(SchemaError::Redundant { what: "tag" });
        }
        let mut facet = facet.clone();
        facet.tag = Some(name.into());
        Ok(self.with_kind(Kind::Object(facet)))
    }

    /// Reject properties not named in `props()`. Applies to objects and
    /// tuples; at most once.
    pub fn closed(&self) -> Result<Schema> {
        match &self.node.kind {
            Kind::Object(facet) => {
                if facet.closed {
                    return Err(SchemaError::Redundant { what: "closed" });
                }
                let mut facet = facet.clone();
                facet.closed = true;
                Ok(self.with_kind(Kind::Object(facet)))
            }
            Kind::Tuple(facet) => {
                if facet.closed {
                    return Err(SchemaError::Redundant { what: "closed" });
                }
                let mut facet = facet.clone();
                facet.closed = true;
                Ok(self.with_kind(Kind::Tuple(facet)))
            }
            _ => Err(self.misapplied("closed")),
        }
    }

    fn object_facet(&self, method: &'static str) -> Result<&ObjectFacet> {
        match &self.node.kind {
            Kind::Object(facet) => Ok(facet),
            _ => Err(self.misapplied(method)),
        }
    }
}

pub(super) fn check(facet: &ObjectFacet, validation: &mut Validation) {
    let object = match validation.value() {
        Value::Obj(object) => object.clone(),
        _ => {
            validation.add("obj", Vec::new());
            return;
        }
    };
    if let Some(expected) = &facet.tag {
        if object.tag.as_deref() != Some(expected.as_str()) {
            validation.add("obj.typ", vec![Value::from(expected.as_str())]);
        }
        if validation.halted() {
            return;
        }
    }
    facet.len.check("obj", object.entries.len(), validation);
    if validation.halted() {
        return;
    }
    if let Some(key_schema) = &facet.keys {
        for name in object.entries.keys() {
            if key_schema.rejects(&Value::from(name.as_str())) {
                validation.add("obj.key", vec![Value::from(name.as_str())]);
                if validation.halted() {
                    return;
                }
            }
        }
    }
    if let Some(value_schema) = &facet.values {
        let label = validation.label().to_string();
        let quick = validation.quick();
        for (name, value) in &object.entries {
            validation.subsume(value_schema.apply(value, &format!("{label}.{name}"), quick));
            if validation.halted() {
                return;
            }
        }
    }
    if let Some(props) = &facet.props {
        let label = validation.label().to_string();
        let quick = validation.quick();
        for (name, schema) in props {
            let value = object.entries.get(name).cloned().unwrap_or(Value::Null);
            validation.subsume(schema.apply(&value, &format!("{label}.{name}"), quick));
            if validation.halted() {
                return;
            }
        }
    }
    if facet.closed {
        for name in object.entries.keys() {
            let enumerated = facet
                .props
                .as_ref()
                .is_some_and(|props| props.contains_key(name));
            if !enumerated {
                validation.add("obj.cls", vec![Value::from(name.as_str())]);
                if validation.halted() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::numeric::{integer, number};
    use crate::schema::text::string;
    use crate::schema::values::literal;
    use crate::testing::{assert_code, assert_code_at, assert_ok};

    #[test]
    fn objects_only() {
        assert_ok(&object(), &Value::object([] as [(&str, Value); 0]));
        assert_ok(&object(), &Value::object([("one", Value::from(1))]));
        for value in [Value::from("hi"), Value::Num(2.2), Value::from(false)] {
            assert_code(&object(), &value, "obj");
        }
        assert_code(&object(), &Value::Null, "opt");
    }

    #[test]
    fn props_validate_named_properties() {
        let schema = object()
            .props([
                ("one", literal(1).unwrap()),
                ("num", number()),
            ])
            .unwrap();
        assert_ok(
            &schema,
            &Value::object([("one", Value::from(1)), ("num", Value::from(2))]),
        );
        assert_code_at(
            &schema,
            &Value::object([("one", Value::from(1))]),
            "opt",
            "value.num",
        );
        assert_code_at(
            &schema,
            &Value::object([("one", Value::from(2)), ("num", Value::from(2))]),
            "lit",
            "value.one",
        );
        assert_code(&schema, &Value::from(2), "obj");
    }

    #[test]
    fn props_is_single_shot() {
        let schema = object().props([("a", number())]).unwrap();
        assert!(matches!(
            schema.props([("b", number())]),
            Err(SchemaError::Redundant { .. })
        ));
    }

    #[test]
    fn keys_screen_property_names() {
        let schema = object().keys(string().slug().unwrap()).unwrap();
        assert_ok(&schema, &Value::object([("good-key", Value::from(1))]));
        assert_code(
            &schema,
            &Value::object([("BAD KEY", Value::from(1))]),
            "obj.key",
        );
    }

    #[test]
    fn values_screen_property_values() {
        let schema = object().values(integer()).unwrap();
        assert_ok(&schema, &Value::object([("n", Value::from(1))]));
        assert_code_at(
            &schema,
            &Value::object([("n", Value::from("hi"))]),
            "int",
            "value.n",
        );
    }

    #[test]
    fn tags_gate_the_representation() {
        let schema = object().tag("Thing").unwrap();
        assert_ok(&schema, &Value::tagged_object("Thing", [("x", Value::from(1))]));
        assert_code(&schema, &Value::object([("x", Value::from(1))]), "obj.typ");
        assert_code(
            &schema,
            &Value::tagged_object("Other", [("x", Value::from(1))]),
            "obj.typ",
        );
    }

    #[test]
    fn single_shot_refinements() {
        assert!(matches!(
            object().tag("A").unwrap().tag("B"),
            Err(SchemaError::Redundant { .. })
        ));
        assert!(matches!(
            object().keys(string()).unwrap().keys(string()),
            Err(SchemaError::Redundant { .. })
        ));
        assert!(matches!(
            object().values(string()).unwrap().values(string()),
            Err(SchemaError::Redundant { .. })
        ));
        assert!(matches!(
            object().closed().unwrap().closed(),
            Err(SchemaError::Redundant { .. })
        ));
        assert!(matches!(
            string().keys(string()),
            Err(SchemaError::Misapplied { .. })
        ));
    }

    #[test]
    fn closed_objects_reject_unenumerated_properties() {
        let schema = object()
            .props([("one", literal(1).unwrap())])
            .unwrap()
            .closed()
            .unwrap();
        assert_ok(&schema, &Value::object([("one", Value::from(1))]));
        assert_code(
            &schema,
            &Value::object([("one", Value::from(1)), ("two", Value::from(2))]),
            "obj.cls",
        );
    }

    #[test]
    fn record_is_closed_from_the_start() {
        let schema = record().props([("one", number())]).unwrap();
        assert_ok(&schema, &Value::object([("one", Value::from(1))]));
        assert_code(
            &schema,
            &Value::object([("one", Value::from(1)), ("two", Value::from(2))]),
            "obj.cls",
        );
        assert!(matches!(record().closed(), Err(SchemaError::Redundant { .. })));
    }

    #[test]
    fn a_bare_closed_object_allows_nothing() {
        let schema = record();
        assert_ok(&schema, &Value::object([] as [(&str, Value); 0]));
        assert_code(&schema, &Value::object([("x", Value::from(1))]), "obj.cls");
    }

    #[test]
    fn property_count_bounds() {
        let exact = object().exact_length(2).unwrap();
        let (x, y, z) = (Value::from(77), Value::from(88), Value::from(99));
        assert_code(&exact, &Value::object([("x", x.clone())]), "obj.len.eq");
        assert_ok(&exact, &Value::object([("x", x.clone()), ("y", y.clone())]));

        let ranged = object().length(1, 2).unwrap();
        assert_code(&ranged, &Value::object([] as [(&str, Value); 0]), "obj.len.min");
        assert_ok(&ranged, &Value::object([("x", x.clone())]));
        assert_code(
            &ranged,
            &Value::object([("x", x), ("y", y), ("z", z)]),
            "obj.len.max",
        );
    }

    #[test]
    fn attach_time_cycle_rejection() {
        let schema = object();
        assert!(matches!(
            schema.values(schema.clone()),
            Err(SchemaError::CyclicReference { .. })
        ));
        assert!(matches!(
            schema.keys(schema.clone()),
            Err(SchemaError::CyclicReference { .. })
        ));
        assert!(matches!(
            schema.props([("self", schema.clone())]),
            Err(SchemaError::CyclicReference { .. })
        ));
    }

    #[test]
    fn transitive_cycles_are_rejected() {
        let inner = object();
        let outer = object().values(inner.clone()).unwrap();
        // outer references inner, so inner may not adopt outer below itself
        assert!(matches!(
            inner.values(outer),
            Err(SchemaError::CyclicReference { .. })
        ));
    }
}

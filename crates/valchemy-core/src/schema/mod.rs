//! Immutable schema nodes.
//!
//! A [`Schema`] is a cheap-clone handle over a shared, immutable node. Every
//! builder method returns a new schema; the receiver is never mutated, so
//! handles can be shared between parents and across threads freely. The
//! node's kind is a closed set of facets and combinators; validation is a
//! recursive walk dispatching on that kind.

pub(crate) mod bounds;
pub(crate) mod combinator;
pub(crate) mod numeric;
pub(crate) mod object;
pub(crate) mod scalar;
pub(crate) mod sequence;
pub(crate) mod text;
pub(crate) mod values;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::codes;
use crate::error::{Result, SchemaError};
use crate::messages::{Catalog, MessageFormat};
use crate::value::Value;
use crate::violation::{Validation, ValidationError};

use bounds::LengthBounds;
use numeric::{Bounds, NumberFacet};
use object::ObjectFacet;
use sequence::{ArrayFacet, TupleFacet};
use text::TextFacet;

/// Default label for the root of a validation walk.
pub const DEFAULT_LABEL: &str = "value";

/// An immutable schema: a shared node plus everything reachable below it.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) node: Arc<Node>,
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) optional: bool,
    pub(crate) code: Option<String>,
    pub(crate) rules: Vec<Rule>,
    pub(crate) kind: Kind,
}

/// A user-supplied extra check, run after the node's own checks pass.
#[derive(Clone)]
pub struct Rule(Arc<dyn Fn(&mut Validation) + Send + Sync>);

impl Rule {
    pub(crate) fn run(&self, validation: &mut Validation) {
        (self.0)(validation)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Rule(..)")
    }
}

/// The closed set of facets and combinators.
#[derive(Debug, Clone)]
pub(crate) enum Kind {
    None,
    Any,
    Boolean,
    Number(NumberFacet),
    Integer(Bounds<i64>),
    BigInt(Bounds<i128>),
    String(TextFacet),
    Array(ArrayFacet),
    Tuple(TupleFacet),
    Function(LengthBounds),
    Object(ObjectFacet),
    Literal(Value),
    Enum(Vec<Value>),
    AnyOf(Vec<Schema>),
    AllOf(Vec<Schema>),
    OneOf(Vec<Schema>),
    NoneOf(Vec<Schema>),
    Not(Schema),
}

impl Schema {
    pub(crate) fn from_kind(kind: Kind) -> Schema {
        Schema {
            node: Arc::new(Node {
                optional: false,
                code: None,
                rules: Vec::new(),
                kind,
            }),
        }
    }

    /// Clone this schema with a replaced kind, preserving the base state.
    pub(crate) fn with_kind(&self, kind: Kind) -> Schema {
        Schema {
            node: Arc::new(Node {
                optional: self.node.optional,
                code: self.node.code.clone(),
                rules: self.node.rules.clone(),
                kind,
            }),
        }
    }

    fn with_optional(&self, optional: bool) -> Schema {
        Schema {
            node: Arc::new(Node {
                optional,
                code: self.node.code.clone(),
                rules: self.node.rules.clone(),
                kind: self.node.kind.clone(),
            }),
        }
    }

    /// Clone with the presence requirement lifted: absent values accepted.
    pub fn optional(&self) -> Schema {
        self.with_optional(true)
    }

    /// Clone with the presence requirement restored.
    pub fn required(&self) -> Schema {
        self.with_optional(false)
    }

    /// Clone with a custom violation code for checks raised directly by this
    /// node. The code must be non-empty and must not shadow a reserved code.
    pub fn code(&self, name: &str) -> Result<Schema> {
        if name.is_empty() {
            return Err(SchemaError::EmptyCode);
        }
        if codes::is_reserved(name) {
            return Err(SchemaError::ReservedCode(name.to_string()));
        }
        Ok(Schema {
            node: Arc::new(Node {
                optional: self.node.optional,
                code: Some(name.to_string()),
                rules: self.node.rules.clone(),
                kind: self.node.kind.clone(),
            }),
        })
    }

    /// Clone with an extra user rule appended. Rules run in attachment order
    /// once the node's own checks pass.
    pub fn rule<F>(&self, rule: F) -> Schema
    where
        F: Fn(&mut Validation) + Send + Sync + 'static,
    {
        let mut rules = self.node.rules.clone();
        rules.push(Rule(Arc::new(rule)));
        Schema {
            node: Arc::new(Node {
                optional: self.node.optional,
                code: self.node.code.clone(),
                rules,
                kind: self.node.kind.clone(),
            }),
        }
    }

    /// Whether absent values are accepted.
    pub fn is_optional(&self) -> bool {
        self.node.optional
    }

    pub(crate) fn code_override(&self) -> Option<&str> {
        self.node.code.as_deref()
    }

    /// The facet/combinator name, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match &self.node.kind {
            Kind::None => "none",
            Kind::Any => "any",
            Kind::Boolean => "boolean",
            Kind::Number(_) => "number",
            Kind::Integer(_) => "integer",
            Kind::BigInt(_) => "bigint",
            Kind::String(_) => "string",
            Kind::Array(_) => "array",
            Kind::Tuple(_) => "tuple",
            Kind::Function(_) => "function",
            Kind::Object(_) => "object",
            Kind::Literal(_) => "literal",
            Kind::Enum(_) => "enum",
            Kind::AnyOf(_) => "any_of",
            Kind::AllOf(_) => "all_of",
            Kind::OneOf(_) => "one_of",
            Kind::NoneOf(_) => "none_of",
            Kind::Not(_) => "not",
        }
    }

    /// True when both handles share the same underlying node.
    pub fn same(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Full validation: walks the whole schema and collects every violation.
    pub fn validate(&self, value: &Value) -> Validation {
        self.validate_at(value, DEFAULT_LABEL)
    }

    /// Full validation with an explicit root label.
    pub fn validate_at(&self, value: &Value, label: &str) -> Validation {
        trace!(kind = self.kind_name(), label, "validating value");
        self.apply(value, label, false)
    }

    /// Quick yes/no acceptance check.
    pub fn accepts(&self, value: &Value) -> bool {
        self.apply(value, DEFAULT_LABEL, true).ok()
    }

    /// Quick yes/no rejection check.
    pub fn rejects(&self, value: &Value) -> bool {
        !self.accepts(value)
    }

    /// Validate and fail loudly: a failing value becomes a
    /// [`ValidationError`] formatted with the bundled catalog.
    pub fn assert(&self, value: &Value) -> std::result::Result<&Schema, ValidationError> {
        self.assert_with(value, DEFAULT_LABEL, &Catalog::new())
    }

    /// [`Schema::assert`] with an explicit root label and formatter.
    pub fn assert_with(
        &self,
        value: &Value,
        label: &str,
        strings: &dyn MessageFormat,
    ) -> std::result::Result<&Schema, ValidationError> {
        let validation = self.apply(value, label, true);
        match validation.into_error(strings) {
            None => Ok(self),
            Some(error) => {
                debug!(kind = self.kind_name(), label, %error, "assertion failed");
                Err(error)
            }
        }
    }

    /// The shared check pipeline. Presence first, then the facet check, then
    /// user rules (only when the facet check passed cleanly).
    pub(crate) fn apply(&self, value: &Value, label: &str, quick: bool) -> Validation {
        let mut validation = Validation::new(self, value, label, quick);
        if value.is_absent() {
            if !self.node.optional {
                validation.add("opt", Vec::new());
            }
            return validation;
        }
        self.check(&mut validation);
        if validation.ok() {
            for rule in &self.node.rules {
                rule.run(&mut validation);
                if validation.halted() {
                    break;
                }
            }
        }
        validation
    }

    fn check(&self, validation: &mut Validation) {
        match &self.node.kind {
            Kind::None => validation.add("none", Vec::new()),
            Kind::Any => {}
            Kind::Boolean => scalar::check_boolean(validation),
            Kind::Number(facet) => numeric::check_number(facet, validation),
            Kind::Integer(bounds) => numeric::check_integer(bounds, validation),
            Kind::BigInt(bounds) => numeric::check_bigint(bounds, validation),
            Kind::String(facet) => text::check(facet, validation),
            Kind::Array(facet) => sequence::check_array(facet, validation),
            Kind::Tuple(facet) => sequence::check_tuple(facet, validation),
            Kind::Function(len) => scalar::check_function(len, validation),
            Kind::Object(facet) => object::check(facet, validation),
            Kind::Literal(expected) => values::check_literal(expected, validation),
            Kind::Enum(variants) => values::check_enum(variants, validation),
            Kind::AnyOf(children) => combinator::check_any_of(children, validation),
            Kind::AllOf(children) => combinator::check_all_of(children, validation),
            Kind::OneOf(children) => combinator::check_one_of(children, validation),
            Kind::NoneOf(children) => combinator::check_none_of(children, validation),
            Kind::Not(child) => combinator::check_not(child, validation),
        }
    }

    /// Reachability over structural child references: true when `target`'s
    /// node is this node or any schema referenced below it.
    pub fn reaches(&self, target: &Schema) -> bool {
        if self.same(target) {
            return true;
        }
        self.child_schemas()
            .iter()
            .any(|child| child.reaches(target))
    }

    fn child_schemas(&self) -> Vec<&Schema> {
        match &self.node.kind {
            Kind::None
            | Kind::Any
            | Kind::Boolean
            | Kind::Number(_)
            | Kind::Integer(_)
            | Kind::BigInt(_)
            | Kind::String(_)
            | Kind::Function(_)
            | Kind::Literal(_)
            | Kind::Enum(_) => Vec::new(),
            Kind::Array(facet) => facet.item.iter().collect(),
            Kind::Tuple(facet) => facet.members.iter().collect(),
            Kind::Object(facet) => {
                let mut children: Vec<&Schema> = facet
                    .props
                    .iter()
                    .flat_map(|props| props.values())
                    .collect();
                children.extend(&facet.keys);
                children.extend(&facet.values);
                children
            }
            Kind::AnyOf(children)
            | Kind::AllOf(children)
            | Kind::OneOf(children)
            | Kind::NoneOf(children) => children.iter().collect(),
            Kind::Not(child) => vec![child],
        }
    }

    /// Refuse to attach a child that can already reach this node.
    pub(crate) fn guard_cycle(&self, child: &Schema, what: &'static str) -> Result<()> {
        if child.reaches(self) {
            warn!(what, "rejected cyclic schema composition");
            return Err(SchemaError::CyclicReference { what });
        }
        Ok(())
    }

    pub(crate) fn misapplied(&self, method: &'static str) -> SchemaError {
        SchemaError::Misapplied {
            method,
            kind: self.kind_name(),
        }
    }
}

/// An anonymous schema carrying one user rule; accepts any present value the
/// rule accepts.
pub fn rule<F>(rule: F) -> Schema
where
    F: Fn(&mut Validation) + Send + Sync + 'static,
{
    scalar::any().rule(rule)
}

/// An accept-anything schema with a custom violation code, for use as a
/// building block under `rule()` checks.
pub fn code(name: &str) -> Result<Schema> {
    scalar::any().code(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::numeric::number;
    use crate::schema::scalar::{any, boolean};

    #[test]
    fn refinements_return_distinct_handles() {
        let base = boolean();
        let refined = base.optional();
        assert!(!base.same(&refined));
        assert!(base.rejects(&Value::Null));
        assert!(refined.accepts(&Value::Null));
    }

    #[test]
    fn accepts_mirrors_validate() {
        let schema = number().gte(2).unwrap();
        for value in [Value::from(1), Value::from(3), Value::from("x"), Value::Null] {
            assert_eq!(schema.accepts(&value), schema.validate(&value).ok());
        }
    }

    #[test]
    fn absent_values_short_circuit_the_pipeline() {
        let validation = boolean().validate(&Value::Null);
        let codes: Vec<&str> = validation
            .violations()
            .iter()
            .map(|violation| violation.code.as_str())
            .collect();
        assert_eq!(codes, ["opt"]);
    }

    #[test]
    fn custom_codes_relabel_direct_violations() {
        let schema = boolean().code("flag").unwrap();
        let validation = schema.validate(&Value::from(3));
        assert_eq!(validation.violations()[0].code, "flag");
    }

    #[test]
    fn custom_codes_must_not_shadow_reserved_ones() {
        assert!(matches!(
            boolean().code("bul"),
            Err(SchemaError::ReservedCode(_))
        ));
        assert!(matches!(boolean().code(""), Err(SchemaError::EmptyCode)));
    }

    #[test]
    fn rules_run_only_after_base_checks_pass() {
        let schema = boolean().rule(|validation| validation.fail());
        let validation = schema.validate(&Value::from(1));
        let codes: Vec<&str> = validation
            .violations()
            .iter()
            .map(|violation| violation.code.as_str())
            .collect();
        assert_eq!(codes, ["bul"]);

        let validation = schema.validate(&Value::from(true));
        assert_eq!(validation.violations()[0].code, "rul");
    }

    #[test]
    fn rule_factory_wraps_any() {
        let schema = rule(|validation| {
            if !matches!(validation.value(), Value::Bool(_)) {
                validation.fail();
            }
        });
        assert!(schema.accepts(&Value::from(true)));
        assert!(schema.rejects(&Value::from(2)));
        assert!(schema.rejects(&Value::Null));
    }

    #[test]
    fn assert_reports_first_message_and_count() {
        let schema = number().range(2.0, 4.0, false, false).unwrap();
        let error = schema.assert(&Value::from("hi")).unwrap_err();
        assert_eq!(error.message, "value must be a number");

        let full = schema.validate(&Value::from(5.0));
        assert!(!full.ok());
        assert!(schema.assert(&Value::from(3.0)).is_ok());
    }

    #[test]
    fn assert_with_carries_the_label() {
        let error = any()
            .assert_with(&Value::Null, "config.port", &Catalog::new())
            .unwrap_err();
        assert_eq!(error.message, "config.port must be present");
    }

    #[test]
    fn reaches_finds_shared_nodes() {
        let leaf = boolean();
        let arr = sequence::array().of(leaf.clone()).unwrap();
        assert!(arr.reaches(&leaf));
        assert!(!leaf.reaches(&arr));
    }
}

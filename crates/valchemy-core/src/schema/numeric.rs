//! The numeric facet family: number, integer, big integer.
//!
//! All three share the same bound state and refinement surface; they differ
//! in which value variants they admit and in the comparison type. Bounds are
//! passed as anything convertible to [`Value`] and checked against the
//! facet's own numeric kind at construction.

use crate::error::{Result, SchemaError};
use crate::schema::{Kind, Schema};
use crate::value::Value;
use crate::violation::Validation;

/// Optional min/max with per-end exclusivity.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bounds<T> {
    min: Option<T>,
    max: Option<T>,
    xmin: bool,
    xmax: bool,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            xmin: false,
            xmax: false,
        }
    }
}

impl<T: PartialOrd + Copy> Bounds<T> {
    fn with(min: Option<T>, max: Option<T>, xmin: bool, xmax: bool) -> Result<Self> {
        if let (Some(lo), Some(hi)) = (min, max) {
            if hi < lo {
                return Err(SchemaError::BackwardsBounds { what: "numeric" });
            }
        }
        Ok(Self {
            min,
            max,
            xmin,
            xmax,
        })
    }

    fn gte(&self, n: T) -> Result<Self> {
        Self::with(Some(n), self.max, false, self.xmax)
    }

    fn gt(&self, n: T) -> Result<Self> {
        Self::with(Some(n), self.max, true, self.xmax)
    }

    fn lte(&self, n: T) -> Result<Self> {
        Self::with(self.min, Some(n), self.xmin, false)
    }

    fn lt(&self, n: T) -> Result<Self> {
        Self::with(self.min, Some(n), self.xmin, true)
    }
}

impl<T: PartialOrd + Copy + Into<Value>> Bounds<T> {
    /// Both ends are checked independently; quick mode stops after the
    /// first hit.
    fn check(&self, prefix: &str, value: T, validation: &mut Validation) {
        if let Some(min) = self.min {
            if self.xmin && value <= min {
                validation.add(&format!("{prefix}.xmn"), vec![min.into()]);
            } else if !self.xmin && value < min {
                validation.add(&format!("{prefix}.min"), vec![min.into()]);
            }
        }
        if validation.halted() {
            return;
        }
        if let Some(max) = self.max {
            if self.xmax && value >= max {
                validation.add(&format!("{prefix}.xmx"), vec![max.into()]);
            } else if !self.xmax && value > max {
                validation.add(&format!("{prefix}.max"), vec![max.into()]);
            }
        }
    }
}

/// Number-facet state: bounds plus the finiteness requirement.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NumberFacet {
    pub(crate) bounds: Bounds<f64>,
    pub(crate) finite: bool,
}

/// Floating-point numbers. Admits integer values, widening them for
/// comparison; NaN and the infinities pass unless `finite()` is set.
pub fn number() -> Schema {
    Schema::from_kind(Kind::Number(NumberFacet::default()))
}

/// 64-bit integers.
pub fn integer() -> Schema {
    Schema::from_kind(Kind::Integer(Bounds::default()))
}

/// Big integers. Admits plain integer values, widening them for comparison.
pub fn bigint() -> Schema {
    Schema::from_kind(Kind::BigInt(Bounds::default()))
}

enum BoundOp {
    Gte,
    Gt,
    Lte,
    Lt,
}

fn float_bound(bound: &Value, method: &'static str) -> Result<f64> {
    match bound {
        Value::Num(n) if !n.is_nan() => Ok(*n),
        Value::Int(n) => Ok(*n as f64),
        _ => Err(SchemaError::InvalidBound {
            method,
            kind: "number",
        }),
    }
}

fn int_bound(bound: &Value, method: &'static str) -> Result<i64> {
    match bound {
        Value::Int(n) => Ok(*n),
        _ => Err(SchemaError::InvalidBound {
            method,
            kind: "integer",
        }),
    }
}

fn big_bound(bound: &Value, method: &'static str) -> Result<i128> {
    match bound {
        Value::Big(n) => Ok(*n),
        Value::Int(n) => Ok(i128::from(*n)),
        _ => Err(SchemaError::InvalidBound {
            method,
            kind: "bigint",
        }),
    }
}

impl Schema {
    /// Set both bounds at once, with explicit exclusivity per end.
    pub fn range(
        &self,
        min: impl Into<Value>,
        max: impl Into<Value>,
        xmin: bool,
        xmax: bool,
    ) -> Result<Schema> {
        let (min, max) = (min.into(), max.into());
        let kind = match &self.node.kind {
            Kind::Number(facet) => Kind::Number(NumberFacet {
                bounds: Bounds::with(
                    Some(float_bound(&min, "range")?),
                    Some(float_bound(&max, "range")?),
                    xmin,
                    xmax,
                )?,
                finite: facet.finite,
            }),
            Kind::Integer(_) => Kind::Integer(Bounds::with(
                Some(int_bound(&min, "range")?),
                Some(int_bound(&max, "range")?),
                xmin,
                xmax,
            )?),
            Kind::BigInt(_) => Kind::BigInt(Bounds::with(
                Some(big_bound(&min, "range")?),
                Some(big_bound(&max, "range")?),
                xmin,
                xmax,
            )?),
            _ => return Err(self.misapplied("range")),
        };
        Ok(self.with_kind(kind))
    }

    /// Inclusive bounds on both ends.
    pub fn between(&self, lo: impl Into<Value>, hi: impl Into<Value>) -> Result<Schema> {
        self.range(lo, hi, false, false)
    }

    /// Inclusive lower bound; the upper bound is untouched.
    pub fn gte(&self, n: impl Into<Value>) -> Result<Schema> {
        self.bound("gte", BoundOp::Gte, n.into())
    }

    /// Exclusive lower bound; the upper bound is untouched.
    pub fn gt(&self, n: impl Into<Value>) -> Result<Schema> {
        self.bound("gt", BoundOp::Gt, n.into())
    }

    /// Inclusive upper bound; the lower bound is untouched.
    pub fn lte(&self, n: impl Into<Value>) -> Result<Schema> {
        self.bound("lte", BoundOp::Lte, n.into())
    }

    /// Exclusive upper bound; the lower bound is untouched.
    pub fn lt(&self, n: impl Into<Value>) -> Result<Schema> {
        self.bound("lt", BoundOp::Lt, n.into())
    }

    /// Require a finite float (no NaN, no infinities). Number facet only.
    pub fn finite(&self) -> Result<Schema> {
        match &self.node.kind {
            Kind::Number(facet) => Ok(self.with_kind(Kind::Number(NumberFacet {
                bounds: facet.bounds,
                finite: true,
            }))),
            _ => Err(self.misapplied("finite")),
        }
    }

    /// Natural-number shorthand: a non-negative integer. Integer facet only.
    pub fn nat(&self) -> Result<Schema> {
        match &self.node.kind {
            Kind::Integer(_) => self.gte(0),
            _ => Err(self.misapplied("nat")),
        }
    }

    fn bound(&self, method: &'static str, op: BoundOp, n: Value) -> Result<Schema> {
        let kind = match &self.node.kind {
            Kind::Number(facet) => {
                let n = float_bound(&n, method)?;
                let bounds = match op {
                    BoundOp::Gte => facet.bounds.gte(n),
                    BoundOp::Gt => facet.bounds.gt(n),
                    BoundOp::Lte => facet.bounds.lte(n),
                    BoundOp::Lt => facet.bounds.lt(n),
                }?;
                Kind::Number(NumberFacet {
                    bounds,
                    finite: facet.finite,
                })
            }
            Kind::Integer(current) => {
                let n = int_bound(&n, method)?;
                Kind::Integer(match op {
                    BoundOp::Gte => current.gte(n),
                    BoundOp::Gt => current.gt(n),
                    BoundOp::Lte => current.lte(n),
                    BoundOp::Lt => current.lt(n),
                }?)
            }
            Kind::BigInt(current) => {
                let n = big_bound(&n, method)?;
                Kind::BigInt(match op {
                    BoundOp::Gte => current.gte(n),
                    BoundOp::Gt => current.gt(n),
                    BoundOp::Lte => current.lte(n),
                    BoundOp::Lt => current.lt(n),
                }?)
            }
            _ => return Err(self.misapplied(method)),
        };
        Ok(self.with_kind(kind))
    }
}

pub(super) fn check_number(facet: &NumberFacet, validation: &mut Validation) {
    let value = match validation.value() {
        Value::Num(n) => *n,
        Value::Int(n) => *n as f64,
        _ => {
            validation.add("num", Vec::new());
            return;
        }
    };
    if facet.finite && !value.is_finite() {
        validation.add("num.fin", Vec::new());
    }
    if validation.halted() {
        return;
    }
    facet.bounds.check("num", value, validation);
}

pub(super) fn check_integer(bounds: &Bounds<i64>, validation: &mut Validation) {
    let value = match validation.value() {
        Value::Int(n) => *n,
        _ => {
            validation.add("int", Vec::new());
            return;
        }
    };
    bounds.check("int", value, validation);
}

pub(super) fn check_bigint(bounds: &Bounds<i128>, validation: &mut Validation) {
    let value = match validation.value() {
        Value::Big(n) => *n,
        Value::Int(n) => i128::from(*n),
        _ => {
            validation.add("big", Vec::new());
            return;
        }
    };
    bounds.check("big", value, validation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_code, assert_ok};

    #[test]
    fn accepts_numbers() {
        let nums = number();
        for value in [
            Value::Num(f64::NEG_INFINITY),
            Value::Num(f64::INFINITY),
            Value::Num(f64::NAN),
            Value::Num(-0.0),
            Value::from(22),
            Value::Num(3.697296376497268e197),
        ] {
            assert_ok(&nums, &value);
        }
    }

    #[test]
    fn rejects_non_numbers() {
        let nums = number();
        for value in [
            Value::from("hi"),
            Value::from(true),
            Value::Arr(Vec::new()),
            Value::function(1),
        ] {
            assert_code(&nums, &value, "num");
        }
    }

    #[test]
    fn bounds_with_between() {
        let schema = number().between(2.0, 4.0).unwrap();
        assert_ok(&schema, &Value::Num(2.0));
        assert_ok(&schema, &Value::Num(2.21));
        assert_ok(&schema, &Value::Num(4.0));
        assert_code(&schema, &Value::Num(1.0), "num.min");
        assert_code(&schema, &Value::Num(4.1), "num.max");
    }

    #[test]
    fn exclusive_bounds_use_their_own_codes() {
        let schema = number().gte(5.0).unwrap().lt(12.0).unwrap();
        assert_ok(&schema, &Value::Num(5.0));
        assert_ok(&schema, &Value::Num(11.999));
        assert_code(&schema, &Value::Num(4.0), "num.min");
        assert_code(&schema, &Value::Num(12.0), "num.xmx");

        let schema = number().gt(5.0).unwrap();
        assert_code(&schema, &Value::Num(5.0), "num.xmn");
        assert_ok(&schema, &Value::Num(5.1));
    }

    #[test]
    fn full_mode_reports_every_bound_violation() {
        // an exclusive point range violates both ends at once
        let schema = number().range(5.0, 5.0, true, true).unwrap();
        let full = schema.validate(&Value::Num(5.0));
        let codes: Vec<&str> = full
            .violations()
            .iter()
            .map(|violation| violation.code.as_str())
            .collect();
        assert_eq!(codes, ["num.xmn", "num.xmx"]);
    }

    #[test]
    fn rejects_backwards_bounds() {
        assert!(matches!(
            number().between(99.0, 55.0),
            Err(SchemaError::BackwardsBounds { .. })
        ));
        assert!(matches!(
            number().lte(2.0).unwrap().gte(5.0),
            Err(SchemaError::BackwardsBounds { .. })
        ));
    }

    #[test]
    fn rejects_foreign_bound_kinds() {
        assert!(matches!(
            number().gte(f64::NAN),
            Err(SchemaError::InvalidBound { .. })
        ));
        assert!(matches!(
            integer().gte(1.5),
            Err(SchemaError::InvalidBound { .. })
        ));
        assert!(matches!(
            boolean_bound_attempt(),
            Err(SchemaError::Misapplied { .. })
        ));
    }

    fn boolean_bound_attempt() -> Result<Schema> {
        crate::schema::scalar::boolean().gte(1)
    }

    #[test]
    fn number_widens_integer_values_and_bounds() {
        let schema = number().gte(2).unwrap();
        assert_ok(&schema, &Value::from(2));
        assert_code(&schema, &Value::from(1), "num.min");
    }

    #[test]
    fn integer_is_strict_about_variants() {
        let ints = integer();
        assert_ok(&ints, &Value::from(-1));
        assert_code(&ints, &Value::Num(1.1), "int");
        assert_code(&ints, &Value::Num(1.0), "int");
        assert_code(&ints, &Value::Big(1), "int");
    }

    #[test]
    fn bigint_widens_integers() {
        let bigs = bigint().gte(0).unwrap();
        assert_ok(&bigs, &Value::Big(i128::from(i64::MAX) * 2));
        assert_ok(&bigs, &Value::from(7));
        assert_code(&bigs, &Value::Big(-1), "big.min");
        assert_code(&bigs, &Value::Num(1.0), "big");
    }

    #[test]
    fn finiteness_is_number_only() {
        let schema = number().finite().unwrap();
        assert_ok(&schema, &Value::Num(-5.7e103));
        assert_ok(&schema, &Value::Num(8.0));
        assert_code(&schema, &Value::Num(f64::NAN), "num.fin");
        assert_code(&schema, &Value::Num(f64::INFINITY), "num.fin");
        assert_code(&schema, &Value::Num(f64::NEG_INFINITY), "num.fin");
        assert!(matches!(
            integer().finite(),
            Err(SchemaError::Misapplied { .. })
        ));
    }

    #[test]
    fn nat_is_a_non_negative_integer() {
        let nats = integer().nat().unwrap();
        assert_ok(&nats, &Value::from(0));
        assert_ok(&nats, &Value::from(1));
        assert_code(&nats, &Value::from(-1), "int.min");
        assert_code(&nats, &Value::Num(1.5), "int");
        assert!(matches!(number().nat(), Err(SchemaError::Misapplied { .. })));
    }
}

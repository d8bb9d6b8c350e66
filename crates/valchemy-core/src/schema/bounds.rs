//! Shared length-bound state for the string/array/tuple/function/object
//! facets.

use crate::error::{Result, SchemaError};
use crate::schema::{Kind, Schema};
use crate::value::Value;
use crate::violation::Validation;

/// Either an exact length or a min/max pair; the two are mutually exclusive
/// and may be given at most once.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LengthBounds {
    min: Option<usize>,
    max: Option<usize>,
    exact: Option<usize>,
}

impl LengthBounds {
    fn is_set(&self) -> bool {
        self.min.is_some() || self.max.is_some() || self.exact.is_some()
    }

    pub(crate) fn ranged(&self, min: usize, max: usize) -> Result<LengthBounds> {
        if self.is_set() {
            return Err(SchemaError::RedundantLength);
        }
        if max < min {
            return Err(SchemaError::BackwardsBounds { what: "length" });
        }
        Ok(LengthBounds {
            min: Some(min),
            max: Some(max),
            exact: None,
        })
    }

    pub(crate) fn exactly(&self, len: usize) -> Result<LengthBounds> {
        if self.is_set() {
            return Err(SchemaError::RedundantLength);
        }
        Ok(LengthBounds {
            min: None,
            max: None,
            exact: Some(len),
        })
    }

    /// Check `actual` against the bounds, raising `<prefix>.len.*` codes.
    pub(crate) fn check(&self, prefix: &str, actual: usize, validation: &mut Validation) {
        if let Some(exact) = self.exact {
            if actual != exact {
                validation.add(&format!("{prefix}.len.eq"), vec![Value::from(exact as i64)]);
            }
            return;
        }
        if let Some(min) = self.min {
            if actual < min {
                validation.add(&format!("{prefix}.len.min"), vec![Value::from(min as i64)]);
            }
        }
        if validation.halted() {
            return;
        }
        if let Some(max) = self.max {
            if actual > max {
                validation.add(&format!("{prefix}.len.max"), vec![Value::from(max as i64)]);
            }
        }
    }
}

impl Schema {
    /// Bound the facet's length (string characters, array/tuple size,
    /// function arity, object property count) to `min..=max`.
    pub fn length(&self, min: usize, max: usize) -> Result<Schema> {
        self.map_length("length", |bounds| bounds.ranged(min, max))
    }

    /// Require the facet's length to be exactly `len`.
    pub fn exact_length(&self, len: usize) -> Result<Schema> {
        self.map_length("exact_length", |bounds| bounds.exactly(len))
    }

    fn map_length<F>(&self, method: &'static str, refine: F) -> Result<Schema>
    where
        F: FnOnce(&LengthBounds) -> Result<LengthBounds>,
    {
        let kind = match &self.node.kind {
            Kind::String(facet) => {
                let mut facet = facet.clone();
                facet.len = refine(&facet.len)?;
                Kind::String(facet)
            }
            Kind::Array(facet) => {
                let mut facet = facet.clone();
                facet.len = refine(&facet.len)?;
                Kind::Array(facet)
            }
            Kind::Tuple(facet) => {
                let mut facet = facet.clone();
                facet.len = refine(&facet.len)?;
                Kind::Tuple(facet)
            }
            Kind::Function(len) => Kind::Function(refine(len)?),
            Kind::Object(facet) => {
                let mut facet = facet.clone();
                facet.len = refine(&facet.len)?;
                Kind::Object(facet)
            }
            _ => return Err(self.misapplied(method)),
        };
        Ok(self.with_kind(kind))
    }
}

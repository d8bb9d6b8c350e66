//! The candidate value model.
//!
//! Schemas validate [`Value`] trees: a closed union covering the shapes the
//! facet family can check. `Value::Null` doubles as the absent-value
//! sentinel, so "missing property" and "explicitly null" are the same thing
//! as far as presence checks are concerned.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A dynamically-typed candidate value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent-value sentinel.
    Null,
    Bool(bool),
    /// Floating-point number. NaN and the infinities are representable.
    Num(f64),
    /// 64-bit integer.
    Int(i64),
    /// Big integer.
    Big(i128),
    Str(String),
    Arr(Vec<Value>),
    Obj(ObjectValue),
    Fun(FunctionValue),
}

/// An object value: named entries plus an optional runtime representation
/// tag, the analog of a constructor name.
#[derive(Debug, Clone, Default)]
pub struct ObjectValue {
    pub tag: Option<String>,
    pub entries: BTreeMap<String, Value>,
}

/// An opaque callable descriptor. Only its arity is observable, which is
/// what the function facet's length bounds check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionValue {
    pub name: Option<String>,
    pub arity: usize,
}

impl Value {
    /// True for the absent-value sentinel.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The variant name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Num(_) => "number",
            Value::Int(_) => "integer",
            Value::Big(_) => "bigint",
            Value::Str(_) => "string",
            Value::Arr(_) => "array",
            Value::Obj(_) => "object",
            Value::Fun(_) => "function",
        }
    }

    /// Build an untagged object value from entries.
    pub fn object<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Obj(ObjectValue {
            tag: None,
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        })
    }

    /// Build a tagged object value from entries.
    pub fn tagged_object<K, I>(tag: impl Into<String>, entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut object = match Value::object(entries) {
            Value::Obj(object) => object,
            _ => unreachable!(),
        };
        object.tag = Some(tag.into());
        Value::Obj(object)
    }

    /// Build a callable descriptor of the given arity.
    pub fn function(arity: usize) -> Value {
        Value::Fun(FunctionValue { name: None, arity })
    }

    /// Deep structural equality.
    ///
    /// NaN never equals anything, including itself. Object tags do not
    /// participate; two objects are equal when their entries are. Numeric
    /// variants never compare equal across variants.
    pub fn structural_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Big(a), Value::Big(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Arr(a), Value::Arr(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| x.structural_eq(y))
            }
            (Value::Obj(a), Value::Obj(b)) => {
                a.entries.len() == b.entries.len()
                    && a.entries.iter().all(|(k, x)| {
                        b.entries.get(k).is_some_and(|y| x.structural_eq(y))
                    })
            }
            (Value::Fun(a), Value::Fun(b)) => a == b,
            _ => false,
        }
    }

    /// True when the value contains a bare NaN at its top level.
    pub(crate) fn is_nan(&self) -> bool {
        matches!(self, Value::Num(n) if n.is_nan())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Num(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Value {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Int(n)
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Value {
        Value::Big(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Value {
        Value::Arr(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Num(n) => write!(f, "{n}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Big(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Arr(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Obj(object) => {
                write!(f, "{{")?;
                for (i, (k, v)) in object.entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Fun(fun) => match &fun.name {
                Some(name) => write!(f, "{name}/{}", fun.arity),
                None => write!(f, "fn/{}", fun.arity),
            },
        }
    }
}

// Serialized as the natural JSON shape where one exists. Big integers that
// do not fit a JSON number and callable descriptors get one-key marker maps.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Num(n) => serializer.serialize_f64(*n),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Big(n) => {
                if let Ok(small) = i64::try_from(*n) {
                    serializer.serialize_i64(small)
                } else {
                    let mut map = serializer.serialize_map(Some(1))?;
                    map.serialize_entry("$bigint", &n.to_string())?;
                    map.end()
                }
            }
            Value::Str(s) => serializer.serialize_str(s),
            Value::Arr(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Obj(object) => {
                let mut map = serializer.serialize_map(Some(object.entries.len()))?;
                for (k, v) in &object.entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Fun(fun) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$arity", &fun.arity)?;
                map.end()
            }
        }
    }
}

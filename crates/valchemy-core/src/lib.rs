//! Core engine for valchemy: composable runtime value validation.
//!
//! Schemas are immutable descriptions of acceptable value shapes, built from
//! atomic facets (booleans, numbers, strings, arrays, objects, …) and boolean
//! combinators, then run against [`Value`] trees. A failing walk yields
//! path-addressed [`Violation`] records rather than errors; malformed schema
//! compositions fail at construction time instead.
//!
//! ```
//! use valchemy_core::{object, integer, string, Value};
//!
//! let user = object()
//!     .props([
//!         ("name", string().length(1, 64).unwrap()),
//!         ("age", integer().nat().unwrap().optional()),
//!     ])
//!     .unwrap();
//!
//! let candidate = Value::object([("name", Value::from("Ada"))]);
//! assert!(user.accepts(&candidate));
//! ```

pub mod codes;
pub mod error;
pub mod messages;
pub mod registry;
pub mod schema;
pub mod value;
pub mod violation;

pub use error::{Result, SchemaError};
pub use messages::{Catalog, MessageFormat};
pub use schema::combinator::{all_of, any_of, none_of, not, one_of};
pub use schema::numeric::{bigint, integer, number};
pub use schema::object::{object, record};
pub use schema::scalar::{any, boolean, function, none};
pub use schema::sequence::{array, array_of, tuple};
pub use schema::text::string;
pub use schema::values::{enum_of, literal};
pub use schema::{code, rule, Schema, DEFAULT_LABEL};
pub use value::{FunctionValue, ObjectValue, Value};
pub use violation::{Validation, ValidationError, Violation};

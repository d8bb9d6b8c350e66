use thiserror::Error;

/// Construction-time schema errors.
///
/// These are programmer errors raised by the builder call that introduced the
/// problem. They are never collected into a validation; a malformed schema
/// simply cannot be built.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A refinement was called on a facet that does not support it.
    #[error("{method}() does not apply to a {kind} schema")]
    Misapplied {
        method: &'static str,
        kind: &'static str,
    },
    /// A numeric bound was not of the facet's own numeric kind.
    #[error("{method}() bounds must be of type {kind}")]
    InvalidBound {
        method: &'static str,
        kind: &'static str,
    },
    /// `max < min` after applying the refinement.
    #[error("backwards {what} bounds")]
    BackwardsBounds { what: &'static str },
    /// A length refinement was applied to an already-bounded schema.
    #[error("redundant length specification")]
    RedundantLength,
    /// A refinement that may be given at most once was given again.
    #[error("redundant {what} specification")]
    Redundant { what: &'static str },
    /// A custom pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    /// A custom violation code collided with a reserved one.
    #[error("code '{0}' is reserved")]
    ReservedCode(String),
    /// A custom violation code was empty.
    #[error("violation codes must be non-empty")]
    EmptyCode,
    /// Attaching the child would make the schema graph cyclic.
    #[error("{what}() schema references its parent")]
    CyclicReference { what: &'static str },
    /// A combinator or enum was given no children to work with.
    #[error("{what}() requires at least one {unit}")]
    Empty {
        what: &'static str,
        unit: &'static str,
    },
    /// An enum listed the same variant twice.
    #[error("duplicate variant in enum_of()")]
    DuplicateVariant,
    /// A literal or enum variant can never match.
    #[error("NaN can never compare equal; it is not a usable {what}")]
    UnmatchableNan { what: &'static str },
}

/// Convenience alias for construction-time results.
pub type Result<T> = std::result::Result<T, SchemaError>;

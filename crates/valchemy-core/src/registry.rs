//! The shorthand registry.
//!
//! Every construction-surface factory registers its shorthand name here.
//! The table is static, but its invariants (non-empty, collision-free
//! names) are validated once on first access rather than trusted.

use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Shorthand names in declaration order, one per factory.
pub const SHORTHANDS: &[&str] = &[
    "none",
    "any",
    "boolean",
    "number",
    "integer",
    "bigint",
    "string",
    "array",
    "tuple",
    "function",
    "object",
    "record",
    "literal",
    "enum_of",
    "any_of",
    "all_of",
    "one_of",
    "none_of",
    "not",
    "rule",
    "code",
];

static TABLE: OnceLock<BTreeSet<&'static str>> = OnceLock::new();

/// The validated shorthand set.
pub fn shorthands() -> &'static BTreeSet<&'static str> {
    TABLE.get_or_init(|| {
        let mut seen = BTreeSet::new();
        for name in SHORTHANDS {
            assert!(!name.is_empty(), "no shorthand defined");
            assert!(seen.insert(*name), "shorthand '{name}' already used");
        }
        seen
    })
}

/// True when `name` is a registered factory shorthand.
pub fn is_shorthand(name: &str) -> bool {
    shorthands().contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_factory_once() {
        assert_eq!(shorthands().len(), SHORTHANDS.len());
    }

    #[test]
    fn knows_its_names() {
        for name in ["none", "record", "enum_of", "one_of", "code"] {
            assert!(is_shorthand(name));
        }
        assert!(!is_shorthand("struct"));
        assert!(!is_shorthand(""));
    }
}

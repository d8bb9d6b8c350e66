//! Human-readable message formatting.
//!
//! The engine itself only records violation codes and args; turning those
//! into display strings is the formatter's job. [`Catalog`] is the bundled
//! English formatter. Callers with their own wording (or language) implement
//! [`MessageFormat`] and pass it at the assert/describe boundary.

use crate::value::Value;

/// Maps a violation's code, label, and args to a display string.
pub trait MessageFormat {
    fn format(&self, code: &str, label: &str, args: &[Value]) -> String;
}

/// Template per reserved code, sorted by code. `{0}` is the label, `{1}` and
/// up are the violation args in order.
const STRINGS: &[(&str, &str)] = &[
    ("ano", "{0} must match at least one of {1} alternatives"),
    ("arr", "{0} must be an array"),
    ("arr.len.eq", "{0} must have size {1}"),
    ("arr.len.max", "{0} can be at most size {1}"),
    ("arr.len.min", "{0} must be at least size {1}"),
    ("big", "{0} must be a big integer"),
    ("big.max", "{0} must be at most {1}"),
    ("big.min", "{0} must be at least {1}"),
    ("big.xmn", "{0} must be greater than {1}"),
    ("big.xmx", "{0} must be less than {1}"),
    ("bul", "{0} must be either true or false"),
    ("enm", "{0} must be one of {1}"),
    ("fun", "{0} must be a function"),
    ("fun.len.eq", "{0} must take {1} arguments"),
    ("fun.len.max", "{0} must take at most {1} arguments"),
    ("fun.len.min", "{0} must take at least {1} arguments"),
    ("int", "{0} must be an integer"),
    ("int.max", "{0} must be at most {1}"),
    ("int.min", "{0} must be at least {1}"),
    ("int.xmn", "{0} must be greater than {1}"),
    ("int.xmx", "{0} must be less than {1}"),
    ("lit", "{0} must be exactly '{1}'"),
    ("nno", "{0} must not match alternative {1}"),
    ("none", "no values are accepted"),
    ("not", "{0} must not match the inverted schema"),
    ("num", "{0} must be a number"),
    ("num.fin", "{0} must be finite"),
    ("num.max", "{0} must be at most {1}"),
    ("num.min", "{0} must be at least {1}"),
    ("num.xmn", "{0} must be greater than {1}"),
    ("num.xmx", "{0} must be less than {1}"),
    ("obj", "{0} must be an object"),
    ("obj.cls", "{0} must not have unenumerated property '{1}'"),
    ("obj.key", "{0} has unacceptable property name '{1}'"),
    ("obj.len.eq", "{0} must have {1} properties"),
    ("obj.len.max", "{0} must have at most {1} properties"),
    ("obj.len.min", "{0} must have at least {1} properties"),
    ("obj.typ", "{0} must be tagged {1}"),
    ("ono.mlt", "{0} must match exactly one alternative (matched {1} and {2})"),
    ("ono.non", "{0} must match exactly one alternative (matched none)"),
    ("opt", "{0} must be present"),
    ("rul", "{0} fails a custom rule"),
    ("str", "{0} must be a string"),
    ("str.ascii", "{0} must be a printable-ASCII string"),
    ("str.date8601", "{0} must be a valid ISO 8601 date"),
    ("str.ipv4", "{0} must be a valid IPv4 address"),
    ("str.ipv6", "{0} must be a valid IPv6 address"),
    ("str.len.eq", "{0} must have length {1}"),
    ("str.len.max", "{0} must be at most length {1}"),
    ("str.len.min", "{0} must be at least length {1}"),
    ("str.pat", "{0} must match pattern {1}"),
    ("str.slug", "{0} must be a URL slug"),
    ("str.url", "{0} must be a valid URL"),
    ("tup", "{0} must be a {1}-tuple"),
    ("tup.cls", "{0} can have at most {2} members (found {1})"),
    ("tup.len.eq", "{0} must have size {1}"),
    ("tup.len.max", "{0} can be at most size {1}"),
    ("tup.len.min", "{0} must be at least size {1}"),
];

/// The bundled English message catalog.
///
/// Lenient catalogs render a visible placeholder for codes with no entry;
/// strict catalogs panic instead, which surfaces missing entries in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    strict: bool,
}

impl Catalog {
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// A catalog that panics on unknown codes.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// True when the catalog has a template for `code`.
    pub fn has(code: &str) -> bool {
        lookup(code).is_some()
    }
}

impl MessageFormat for Catalog {
    fn format(&self, code: &str, label: &str, args: &[Value]) -> String {
        match lookup(code) {
            Some(template) => substitute(template, label, args),
            None if self.strict => panic!("missing message for code '{code}'"),
            None => {
                let args = args
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[[missing code {code} at {label}, with args {args}]]")
            }
        }
    }
}

fn lookup(code: &str) -> Option<&'static str> {
    STRINGS
        .binary_search_by(|(probe, _)| (*probe).cmp(code))
        .ok()
        .map(|index| STRINGS[index].1)
}

fn substitute(template: &str, label: &str, args: &[Value]) -> String {
    let mut out = template.replace("{0}", label);
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{}}}", i + 1), &arg.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;

    #[test]
    fn table_is_sorted_by_code() {
        let mut sorted = STRINGS.to_vec();
        sorted.sort_unstable_by_key(|(code, _)| *code);
        assert_eq!(sorted, STRINGS);
    }

    #[test]
    fn covers_every_reserved_code() {
        for code in codes::RESERVED {
            assert!(Catalog::has(code), "no message for reserved code {code}");
        }
        assert_eq!(STRINGS.len(), codes::RESERVED.len());
    }

    #[test]
    fn substitutes_label_and_args() {
        let message = Catalog::new().format("num.min", "value.age", &[Value::from(18)]);
        assert_eq!(message, "value.age must be at least 18");
    }

    #[test]
    fn lenient_catalog_renders_placeholders() {
        let message = Catalog::new().format("mystery", "value", &[Value::from(1)]);
        assert_eq!(message, "[[missing code mystery at value, with args 1]]");
    }

    #[test]
    #[should_panic(expected = "missing message for code")]
    fn strict_catalog_panics_on_misses() {
        Catalog::strict().format("mystery", "value", &[]);
    }
}

//! The string facet: length bounds plus one pattern, custom or named.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{Result, SchemaError};
use crate::schema::bounds::LengthBounds;
use crate::schema::{Kind, Schema};
use crate::value::Value;
use crate::violation::Validation;

static ASCII: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\x20-\x7E]*$").expect("ascii pattern"));
static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+(-[a-z0-9]+)*$").expect("slug pattern"));
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern"));

/// One pattern per string schema: either a caller-supplied regex or one of
/// the named built-ins. Named patterns that a regex alone cannot decide
/// (calendar validity, address syntax) defer to a dedicated predicate.
#[derive(Debug, Clone)]
pub(crate) enum Pattern {
    Custom(Regex),
    Ascii,
    Slug,
    Date8601,
    Ipv4,
    Ipv6,
    Url,
}

impl Pattern {
    fn code(&self) -> &'static str {
        match self {
            Pattern::Custom(_) => "str.pat",
            Pattern::Ascii => "str.ascii",
            Pattern::Slug => "str.slug",
            Pattern::Date8601 => "str.date8601",
            Pattern::Ipv4 => "str.ipv4",
            Pattern::Ipv6 => "str.ipv6",
            Pattern::Url => "str.url",
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            Pattern::Custom(regex) => regex.is_match(text),
            Pattern::Ascii => ASCII.is_match(text),
            Pattern::Slug => SLUG.is_match(text),
            Pattern::Date8601 => {
                DATE.is_match(text)
                    && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
            }
            Pattern::Ipv4 => text.parse::<std::net::Ipv4Addr>().is_ok(),
            Pattern::Ipv6 => text.parse::<std::net::Ipv6Addr>().is_ok(),
            Pattern::Url => url::Url::parse(text).is_ok(),
        }
    }

    fn args(&self) -> Vec<Value> {
        match self {
            Pattern::Custom(regex) => vec![Value::from(regex.as_str())],
            _ => Vec::new(),
        }
    }
}

/// String-facet state.
#[derive(Debug, Clone, Default)]
pub(crate) struct TextFacet {
    pub(crate) len: LengthBounds,
    pub(crate) pattern: Option<Pattern>,
}

/// Accepts strings; length bounds count characters.
pub fn string() -> Schema {
    Schema::from_kind(Kind::String(TextFacet::default()))
}

impl Schema {
    /// Require the string to match a caller-supplied regular expression.
    pub fn pattern(&self, pattern: &str) -> Result<Schema> {
        let regex = Regex::new(pattern)
            .map_err(|error| SchemaError::InvalidPattern(error.to_string()))?;
        self.with_pattern("pattern", Pattern::Custom(regex))
    }

    /// Require printable-ASCII content.
    pub fn ascii(&self) -> Result<Schema> {
        self.with_pattern("ascii", Pattern::Ascii)
    }

    /// Require URL-slug shape: lowercase words joined by single dashes.
    pub fn slug(&self) -> Result<Schema> {
        self.with_pattern("slug", Pattern::Slug)
    }

    /// Require a valid ISO 8601 calendar date.
    pub fn date8601(&self) -> Result<Schema> {
        self.with_pattern("date8601", Pattern::Date8601)
    }

    /// Require a valid IPv4 address literal.
    pub fn ipv4(&self) -> Result<Schema> {
        self.with_pattern("ipv4", Pattern::Ipv4)
    }

    /// Require a valid IPv6 address literal.
    pub fn ipv6(&self) -> Result<Schema> {
        self.with_pattern("ipv6", Pattern::Ipv6)
    }

    /// Require an absolute URL.
    pub fn url(&self) -> Result<Schema> {
        self.with_pattern("url", Pattern::Url)
    }

    fn with_pattern(&self, method: &'static str, pattern: Pattern) -> Result<Schema> {
        let Kind::String(facet) = &self.node.kind else {
            return Err(self.misapplied(method));
        };
        if facet.pattern.is_some() {
            return Err(SchemaError::Redundant { what: "pattern" });
        }
        Ok(self.with_kind(Kind::String(TextFacet {
            len: facet.len,
            pattern: Some(pattern),
        })))
    }
}

pub(super) fn check(facet: &TextFacet, validation: &mut Validation) {
    let text = match validation.value() {
        Value::Str(text) => text.clone(),
        _ => {
            validation.add("str", Vec::new());
            return;
        }
    };
    facet.len.check("str", text.chars().count(), validation);
    if validation.halted() {
        return;
    }
    if let Some(pattern) = &facet.pattern {
        if !pattern.matches(&text) {
            validation.add(pattern.code(), pattern.args());
        }
    }
}

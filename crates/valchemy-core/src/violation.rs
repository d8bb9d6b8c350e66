//! Violations and the per-call validation builder.

use serde::Serialize;
use thiserror::Error;

use crate::messages::MessageFormat;
use crate::schema::Schema;
use crate::value::Value;

/// One recorded failure of a value against a schema.
///
/// The wire shape consumed by message formatters is `{ code, label, value,
/// args }`; the schema backref exists for programmatic callers and is not
/// serialized.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    #[serde(skip)]
    pub schema: Schema,
    pub code: String,
    pub label: String,
    pub value: Value,
    pub args: Vec<Value>,
}

impl Violation {
    /// Render this violation through a formatter.
    pub fn message(&self, strings: &dyn MessageFormat) -> String {
        strings.format(&self.code, &self.label, &self.args)
    }
}

/// The mutable, call-scoped accumulator handed through a validation walk.
///
/// One builder exists per schema node visited; child builders are merged
/// back into their parent with [`Validation::subsume`]. User rules receive
/// the builder for the node they are attached to and may record violations
/// with [`Validation::add`] or [`Validation::fail`].
#[derive(Debug)]
pub struct Validation {
    schema: Schema,
    value: Value,
    label: String,
    quick: bool,
    violations: Vec<Violation>,
}

impl Validation {
    pub(crate) fn new(schema: &Schema, value: &Value, label: &str, quick: bool) -> Self {
        Self {
            schema: schema.clone(),
            value: value.clone(),
            label: label.to_string(),
            quick,
            violations: Vec::new(),
        }
    }

    /// The value under validation at this node.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The path-qualified name of the value under validation.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// True when running in first-violation short-circuit mode.
    pub fn quick(&self) -> bool {
        self.quick
    }

    /// True when no violations have been recorded.
    pub fn ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Record a violation against the current value and label.
    ///
    /// The node's custom code override, when present, replaces `code`.
    pub fn add(&mut self, code: &str, args: Vec<Value>) {
        let code = self
            .schema
            .code_override()
            .unwrap_or(code)
            .to_string();
        self.violations.push(Violation {
            schema: self.schema.clone(),
            code,
            label: self.label.clone(),
            value: self.value.clone(),
            args,
        });
    }

    /// Record a generic user-rule failure (`rul`).
    pub fn fail(&mut self) {
        self.add("rul", Vec::new());
    }

    /// Merge a child validation's violations into this one.
    pub(crate) fn subsume(&mut self, child: Validation) {
        self.violations.extend(child.violations);
    }

    /// True when quick mode demands no further checks at this node.
    pub(crate) fn halted(&self) -> bool {
        self.quick && !self.ok()
    }

    /// The violations recorded so far, in discovery order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the builder, keeping only its violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Render every violation through a formatter.
    pub fn messages(&self, strings: &dyn MessageFormat) -> Vec<String> {
        self.violations
            .iter()
            .map(|violation| violation.message(strings))
            .collect()
    }

    /// Convert a failed validation into the assert-bridge error.
    pub(crate) fn into_error(self, strings: &dyn MessageFormat) -> Option<ValidationError> {
        let first = self.violations.first()?;
        let head = first.message(strings);
        let message = match self.violations.len() {
            1 => head,
            n => format!("{head} (+ {} more)", n - 1),
        };
        Some(ValidationError {
            message,
            violations: self.violations,
        })
    }
}

/// The error produced when [`Schema::assert`] meets a failing value.
///
/// Carries every violation found; the display string is the first
/// violation's formatted message plus a count of the rest.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub violations: Vec<Violation>,
}

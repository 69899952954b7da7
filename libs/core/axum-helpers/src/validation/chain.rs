use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{FieldError, ValidationErrors};

/// Where a rule reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Matched path segment, always a JSON string
    Param,
    /// Top-level key of a JSON object body
    Body,
}

type Predicate = Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>;

#[derive(Clone)]
struct Check {
    passes: Predicate,
    message: String,
}

/// Checks for a single field.
#[derive(Clone)]
pub struct FieldRule {
    field: String,
    source: Source,
    optional: bool,
    checks: Vec<Check>,
}

/// Starts a rule for a path parameter.
pub fn param(field: impl Into<String>) -> FieldRule {
    FieldRule::new(field, Source::Param)
}

/// Starts a rule for a JSON body field.
pub fn body(field: impl Into<String>) -> FieldRule {
    FieldRule::new(field, Source::Body)
}

impl FieldRule {
    fn new(field: impl Into<String>, source: Source) -> Self {
        Self {
            field: field.into(),
            source,
            optional: false,
            checks: Vec::new(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// Skip every check when the field is absent. An explicit `null` is
    /// still checked.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Present, not `null` and not the empty string.
    pub fn not_empty(self, message: impl Into<String>) -> Self {
        self.check(is_non_empty, message)
    }

    /// A JSON string.
    pub fn is_string(self, message: impl Into<String>) -> Self {
        self.check(|value| matches!(value, Some(Value::String(_))), message)
    }

    /// An integer in `i32` range, as a JSON integer or a decimal string.
    pub fn is_int(self, message: impl Into<String>) -> Self {
        self.check(|value| value.is_some_and(is_int), message)
    }

    /// A JSON number or a decimal string such as `"100"` or `"-2.5"`.
    pub fn is_numeric(self, message: impl Into<String>) -> Self {
        self.check(|value| value.and_then(numeric_value).is_some(), message)
    }

    /// A JSON boolean or the string `"true"` / `"false"`.
    pub fn is_boolean(self, message: impl Into<String>) -> Self {
        self.check(|value| value.and_then(boolean_value).is_some(), message)
    }

    /// Arbitrary predicate over a present value. Absent values fail.
    pub fn custom<F>(self, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.check(move |value| value.is_some_and(|v| predicate(v)), message)
    }

    fn check<F>(mut self, passes: F, message: impl Into<String>) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        self.checks.push(Check {
            passes: Arc::new(passes),
            message: message.into(),
        });
        self
    }

    fn run(&self, input: &RequestInput, errors: &mut Vec<FieldError>) {
        let value = input.lookup(self.source, &self.field);
        if self.optional && value.is_none() {
            return;
        }

        for check in &self.checks {
            if !(check.passes)(value) {
                errors.push(FieldError::new(&self.field, &check.message));
            }
        }
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("source", &self.source)
            .field("optional", &self.optional)
            .field(
                "messages",
                &self.checks.iter().map(|c| c.message.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn is_non_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Reads a JSON number or a decimal string (`[+-]digits[.digits]`, no
/// exponent, no surrounding whitespace).
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if is_decimal(s) => s.parse().ok(),
        _ => None,
    }
}

/// Reads a JSON boolean or its string spelling.
pub fn boolean_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

fn is_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or(("", unsigned));

    !fraction.is_empty()
        && fraction.bytes().all(|b| b.is_ascii_digit())
        && whole.bytes().all(|b| b.is_ascii_digit())
}

fn is_int(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_i64().is_some_and(|n| i32::try_from(n).is_ok()),
        Value::String(s) => s.parse::<i32>().is_ok(),
        _ => false,
    }
}

/// The parts of a request a chain can inspect.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    params: HashMap<String, Value>,
    body: Option<Value>,
}

impl RequestInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), Value::String(value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    fn lookup(&self, source: Source, field: &str) -> Option<&Value> {
        match source {
            Source::Param => self.params.get(field),
            Source::Body => self.body.as_ref().and_then(|body| body.get(field)),
        }
    }
}

/// Ordered list of field rules.
#[derive(Debug, Clone, Default)]
pub struct ValidationChain {
    rules: Vec<FieldRule>,
}

impl ValidationChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Runs every rule; errors are reported in rule order then check order.
    pub fn validate(&self, input: &RequestInput) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        for rule in &self.rules {
            rule.run(input, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(errors))
        }
    }
}

//! Request validation.
//!
//! A [`Validator`] declares an optional rule-set for each of the three request
//! parts (params, body, query). Parts without rules are passed through as raw
//! JSON. Rule-sets deserialize the part into a concrete type with serde and
//! then run any extra checks attached with [`Rules::check`]. By default a
//! rule-set converts numeric and boolean strings and rejects keys the target
//! type doesn't declare.
//!
//! ```
//! use apigw_handler::validation::{Rules, Validate, Validator, RawRequest};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct NewTodo {
//!     title: String,
//! }
//!
//! let validator = Validator::new()
//!     .body(Rules::<NewTodo>::new().check(|t| {
//!         if t.title.is_empty() { Err("title must not be empty".into()) } else { Ok(()) }
//!     }));
//!
//! let raw = RawRequest::new(json!({}), json!({ "title": "milk" }), json!({}));
//! let request = validator.validate(raw).unwrap();
//! assert_eq!(request.body.title, "milk");
//! ```

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};
use tracing::debug;

use crate::errors::StatusError;

/// The three parts of an API request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Request<P = Value, B = Value, Q = Value> {
    pub params: P,
    pub body: B,
    pub query: Q,
}

/// A request as it arrives, before any rules are applied.
pub type RawRequest = Request<Value, Value, Value>;

impl<P, B, Q> Request<P, B, Q> {
    pub fn new(params: P, body: B, query: Q) -> Self {
        Self {
            params,
            body,
            query,
        }
    }
}

/// Turns a raw request into a typed one, or explains why it can't.
pub trait Validate: Send + Sync {
    type Output;

    /// # Errors
    ///
    /// Returns a bad-request [`StatusError`] whose details describe the first
    /// violated rule.
    fn validate(&self, raw: RawRequest) -> Result<Self::Output, StatusError>;
}

/// Plain functions can act as validators.
impl<F, T> Validate for F
where
    F: Fn(RawRequest) -> Result<T, StatusError> + Send + Sync,
{
    type Output = T;

    fn validate(&self, raw: RawRequest) -> Result<T, StatusError> {
        self(raw)
    }
}

/// Accepts every request unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValidation;

impl Validate for NoValidation {
    type Output = RawRequest;

    fn validate(&self, raw: RawRequest) -> Result<RawRequest, StatusError> {
        Ok(raw)
    }
}

/// Rules for a single request part.
pub trait PartSchema: Send + Sync {
    type Output;

    /// # Errors
    ///
    /// Returns a human-readable explanation of the violated rule.
    fn apply(&self, value: Value) -> Result<Self::Output, String>;
}

/// No rules declared: any value passes as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unchecked;

impl PartSchema for Unchecked {
    type Output = Value;

    fn apply(&self, value: Value) -> Result<Value, String> {
        Ok(value)
    }
}

type Rule<T> = Box<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// A declared rule-set: deserialize into `T`, then run the extra checks in
/// the order they were added.
pub struct Rules<T> {
    checks: Vec<Rule<T>>,
    convert: bool,
    allow_unknown: bool,
    _target: PhantomData<fn() -> T>,
}

impl<T> Rules<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            convert: true,
            allow_unknown: false,
            _target: PhantomData,
        }
    }

    /// Add a check that runs after deserialization succeeds.
    #[must_use]
    pub fn check<F>(mut self, rule: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        self.checks.push(Box::new(rule));
        self
    }

    /// Stop string values such as `"10"` or `"true"` from satisfying numeric
    /// and boolean fields. Conversion is on by default since path and query
    /// parameters always arrive as strings.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.convert = false;
        self
    }

    /// Accept keys that `T` doesn't declare instead of rejecting them.
    #[must_use]
    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }
}

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Rules<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("target", &std::any::type_name::<T>())
            .field("checks", &self.checks.len())
            .field("convert", &self.convert)
            .field("allow_unknown", &self.allow_unknown)
            .finish()
    }
}

impl<T: DeserializeOwned> PartSchema for Rules<T> {
    type Output = T;

    fn apply(&self, value: Value) -> Result<T, String> {
        let parsed = if self.convert {
            self.deserialize(value.clone())
                .or_else(|strict| self.deserialize(convert_scalars(value)).map_err(|_| strict))
        } else {
            self.deserialize(value)
        }?;

        for rule in &self.checks {
            rule(&parsed)?;
        }
        Ok(parsed)
    }
}

impl<T: DeserializeOwned> Rules<T> {
    fn deserialize(&self, value: Value) -> Result<T, String> {
        let mut unknown = Vec::new();
        let parsed: T = serde_ignored::deserialize(value, |path| unknown.push(path.to_string()))
            .map_err(|e| e.to_string())?;

        match unknown.first() {
            Some(path) if !self.allow_unknown => Err(format!("unknown field `{path}`")),
            _ => Ok(parsed),
        }
    }
}

/// Replace string leaves that spell a number or boolean with the typed value.
fn convert_scalars(value: Value) -> Value {
    match value {
        Value::String(s) => match s.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ if s.trim() == s && !s.is_empty() => match serde_json::from_str::<Number>(&s) {
                Ok(n) => Value::Number(n),
                Err(_) => Value::String(s),
            },
            _ => Value::String(s),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(convert_scalars).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, convert_scalars(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Per-part rule-sets for a request.
///
/// Built with [`Validator::new`] and the `params`/`body`/`query` methods;
/// undeclared parts stay [`Unchecked`]. Parts are checked body first, then
/// params, then query, and only the first failure is reported.
#[derive(Debug, Clone, Default)]
pub struct Validator<P = Unchecked, B = Unchecked, Q = Unchecked> {
    params: P,
    body: B,
    query: Q,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P, B, Q> Validator<P, B, Q> {
    #[must_use]
    pub fn params<T>(self, rules: Rules<T>) -> Validator<Rules<T>, B, Q> {
        Validator {
            params: rules,
            body: self.body,
            query: self.query,
        }
    }

    #[must_use]
    pub fn body<T>(self, rules: Rules<T>) -> Validator<P, Rules<T>, Q> {
        Validator {
            params: self.params,
            body: rules,
            query: self.query,
        }
    }

    #[must_use]
    pub fn query<T>(self, rules: Rules<T>) -> Validator<P, B, Rules<T>> {
        Validator {
            params: self.params,
            body: self.body,
            query: rules,
        }
    }
}

impl<P, B, Q> Validate for Validator<P, B, Q>
where
    P: PartSchema,
    B: PartSchema,
    Q: PartSchema,
{
    type Output = Request<P::Output, B::Output, Q::Output>;

    fn validate(&self, raw: RawRequest) -> Result<Self::Output, StatusError> {
        let Request {
            params,
            body,
            query,
        } = raw;

        let body = check_part("body", &self.body, body)?;
        let params = check_part("params", &self.params, params)?;
        let query = check_part("query", &self.query, query)?;

        Ok(Request {
            params,
            body,
            query,
        })
    }
}

fn check_part<S: PartSchema>(part: &str, schema: &S, value: Value) -> Result<S::Output, StatusError> {
    schema.apply(value).map_err(|reason| {
        debug!(part, reason = %reason, "Request part failed validation");
        StatusError::bad_request().with_details(format!("{part}: {reason}"))
    })
}

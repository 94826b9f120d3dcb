//! Request validation.
//!
//! Each rule checks one field and yields a [`Violation`]; a DTO's
//! [`Validate`] impl runs all of its rules and reports every broken one at
//! once instead of stopping at the first.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// One broken rule on one field. `field` uses the wire (camelCase) name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Non-empty list of violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    /// Gather rule results; `Ok(())` when every rule passed.
    pub fn collect<I>(results: I) -> Result<(), ValidationErrors>
    where
        I: IntoIterator<Item = Result<(), Violation>>,
    {
        let violations: Vec<Violation> = results.into_iter().filter_map(Result::err).collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(violations))
        }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationErrors(vec![Violation::new(field, message)])
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|v| v.field.as_str()).collect()
    }
}

impl From<Violation> for ValidationErrors {
    fn from(v: Violation) -> Self {
        ValidationErrors(vec![v])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Implemented by every inbound DTO; runs before business logic.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

pub fn require_non_empty(value: &str, field: &str) -> Result<(), Violation> {
    if value.trim().is_empty() {
        return Err(Violation::new(field, "must not be empty"));
    }
    Ok(())
}

pub fn require_non_empty_if_present(value: &Option<String>, field: &str) -> Result<(), Violation> {
    match value {
        Some(v) => require_non_empty(v, field),
        None => Ok(()),
    }
}

pub fn require_min_length(value: &str, min: usize, field: &str) -> Result<(), Violation> {
    if value.chars().count() < min {
        return Err(Violation::new(field, format!("must be at least {min} characters")));
    }
    Ok(())
}

pub fn require_email(value: &str, field: &str) -> Result<(), Violation> {
    if !models::user::is_valid_email(value) {
        return Err(Violation::new(field, "must be a valid email address"));
    }
    Ok(())
}

pub fn require_positive(value: f64, field: &str) -> Result<(), Violation> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Violation::new(field, "must be a positive number"));
    }
    Ok(())
}

pub fn require_positive_int(value: i32, field: &str) -> Result<(), Violation> {
    if value <= 0 {
        return Err(Violation::new(field, "must be a positive number"));
    }
    Ok(())
}

/// Parse `value` as one of the `allowed` variants; the violation lists them.
pub fn require_one_of<T>(value: &str, allowed: &[T], field: &str) -> Result<T, Violation>
where
    T: FromStr + fmt::Display,
{
    value.parse::<T>().map_err(|_| {
        let names: Vec<String> = allowed.iter().map(ToString::to_string).collect();
        Violation::new(field, format!("must be one of {}", names.join(", ")))
    })
}

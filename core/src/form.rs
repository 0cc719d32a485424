//! Declarative field validation for creation forms.
//!
//! A form is described by a static table of [`FieldSpec`]s, each carrying the
//! rules for one field. [`Form`] keeps the raw text of every field and
//! re-evaluates that field's rules on every change, so `is_valid` is always
//! current and never computed lazily at submit time.
//!
//! Length and numeric rules only judge non-empty input; an empty field is the
//! business of [`Rule::Required`] alone. This matches how browser form
//! validators behave and keeps one message per problem.

use crate::error::FormInvalid;

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    /// Minimum length in characters.
    MinLength(usize),
    /// Maximum length in characters.
    MaxLength(usize),
    /// Exact match against one of the listed values.
    OneOf(&'static [&'static str]),
    /// Digits only.
    WholeNumber,
    /// Inclusive numeric lower bound.
    Min(u64),
    /// Inclusive numeric upper bound.
    Max(u64),
    /// Loose `local@domain` shape.
    Email,
}

impl Rule {
    pub fn check(&self, value: &str) -> bool {
        if value.is_empty() {
            return !matches!(self, Rule::Required);
        }
        match *self {
            Rule::Required => true,
            Rule::MinLength(min) => value.chars().count() >= min,
            Rule::MaxLength(max) => value.chars().count() <= max,
            Rule::OneOf(allowed) => allowed.contains(&value),
            Rule::WholeNumber => value.chars().all(|c| c.is_ascii_digit()),
            Rule::Min(min) => as_number(value).is_none_or(|n| n >= min),
            Rule::Max(max) => as_number(value).is_none_or(|n| n <= max),
            Rule::Email => is_email(value),
        }
    }

    pub fn message(&self, label: &str) -> String {
        match *self {
            Rule::Required => format!("{label} is required"),
            Rule::MinLength(min) => format!(
                "{label} must be at least {min} character{} long",
                if min == 1 { "" } else { "s" }
            ),
            Rule::MaxLength(max) => format!("{label} cannot be more than {max} characters long"),
            Rule::OneOf(allowed) => format!("{label} must be {}", alternatives(allowed)),
            Rule::WholeNumber => format!("{label} must be a whole number"),
            Rule::Min(min) => format!("{label} must be at least {min}"),
            Rule::Max(max) => format!("{label} may not be greater than {max}"),
            Rule::Email => format!("{label} must be formatted properly"),
        }
    }
}

/// Numeric reading of a field for the bound rules. Non-numeric input is
/// `None` (WholeNumber's concern); digits too long for `u64` saturate, so
/// they stay above every upper bound.
fn as_number(value: &str) -> Option<u64> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(value.parse::<u64>().unwrap_or(u64::MAX))
}

/// "a or b", "a, b, or c".
fn alternatives(values: &[&str]) -> String {
    match values {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Rules for one named form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    /// Every rule the value breaks, in declaration order.
    pub fn validate(&self, value: &str) -> Vec<ValidationError> {
        self.rules
            .iter()
            .filter(|rule| !rule.check(value))
            .map(|rule| ValidationError {
                field: self.name,
                rule: *rule,
                message: rule.message(self.label),
            })
            .collect()
    }
}

/// A broken rule on a field, shown inline next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub rule: Rule,
    pub message: String,
}

#[derive(Debug, Clone)]
struct FieldState {
    spec: FieldSpec,
    value: String,
    errors: Vec<ValidationError>,
    touched: bool,
}

/// Raw field values of a record under construction plus their validity.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FieldState>,
}

impl Form {
    /// A form with every field empty. Required fields start out invalid.
    pub fn new(specs: &'static [FieldSpec]) -> Self {
        let fields = specs
            .iter()
            .map(|spec| FieldState {
                spec: *spec,
                value: String::new(),
                errors: spec.validate(""),
                touched: false,
            })
            .collect();
        Self { fields }
    }

    fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.spec.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FieldState> {
        self.fields.iter_mut().find(|f| f.spec.name == name)
    }

    /// Replace a field's text and re-run its rules. Returns `false` for an
    /// unknown field name.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        let Some(field) = self.field_mut(name) else {
            return false;
        };
        field.value = value.into();
        field.errors = field.spec.validate(&field.value);
        true
    }

    /// Mark a field as visited; from now on its errors are visible.
    pub fn blur(&mut self, name: &str) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.touched = true;
                true
            }
            None => false,
        }
    }

    /// Current text of a field; empty for unknown names.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map_or("", |f| f.value.as_str())
    }

    pub fn is_field_valid(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.errors.is_empty())
    }

    /// Whether every field satisfies every rule.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|f| f.errors.is_empty())
    }

    /// All broken rules of a field, touched or not.
    pub fn errors(&self, name: &str) -> &[ValidationError] {
        self.field(name).map(|f| f.errors.as_slice()).unwrap_or_default()
    }

    /// Broken rules of a field that should be displayed: only once the user
    /// has left the field at least once.
    pub fn visible_errors(&self, name: &str) -> &[ValidationError] {
        match self.field(name) {
            Some(f) if f.touched => f.errors.as_slice(),
            _ => &[],
        }
    }

    pub fn invalid_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| !f.errors.is_empty())
            .map(|f| f.spec.name)
            .collect()
    }

    pub fn ensure_valid(&self) -> Result<(), FormInvalid> {
        let fields = self.invalid_fields();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(FormInvalid { fields })
        }
    }
}

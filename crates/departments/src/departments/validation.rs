use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::domain::{DepartmentDraft, DepartmentFields};

pub const NAME_MIN_CHARS: usize = 2;
pub const ADDRESS_MIN_CHARS: usize = 10;
pub const MAX_CHARS: usize = 255;

/// Per-field validation failures, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: String) {
        self.errors.entry(field).or_default().push(message);
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn errors(&self) -> &BTreeMap<&'static str, Vec<String>> {
        &self.errors
    }

    /// First message, suffixed with the number of remaining ones.
    pub fn message(&self) -> String {
        let mut all = self.errors.values().flatten();
        let Some(first) = all.next() else {
            return "The given data was invalid.".to_string();
        };
        match all.count() {
            0 => first.clone(),
            1 => format!("{first} (and 1 more error)"),
            rest => format!("{first} (and {rest} more errors)"),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationErrors {}

struct LengthRule {
    field: &'static str,
    min: usize,
    max: usize,
}

const NAME_RULE: LengthRule = LengthRule {
    field: "name",
    min: NAME_MIN_CHARS,
    max: MAX_CHARS,
};

const ADDRESS_RULE: LengthRule = LengthRule {
    field: "address",
    min: ADDRESS_MIN_CHARS,
    max: MAX_CHARS,
};

impl LengthRule {
    fn check(&self, value: Option<&str>, errors: &mut ValidationErrors) -> Option<String> {
        let field = self.field;
        let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
            errors.push(field, format!("The {field} field is required."));
            return None;
        };

        let length = value.chars().count();
        if length < self.min {
            errors.push(
                field,
                format!("The {field} field must be at least {} characters.", self.min),
            );
            return None;
        }
        if length > self.max {
            errors.push(
                field,
                format!(
                    "The {field} field must not be greater than {} characters.",
                    self.max
                ),
            );
            return None;
        }

        Some(value.to_string())
    }
}

pub fn validate(draft: &DepartmentDraft) -> Result<DepartmentFields, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let name = NAME_RULE.check(draft.name.as_deref(), &mut errors);
    let address = ADDRESS_RULE.check(draft.address.as_deref(), &mut errors);

    match (name, address) {
        (Some(name), Some(address)) => Ok(DepartmentFields { name, address }),
        _ => Err(errors),
    }
}

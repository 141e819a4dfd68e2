//! Required-field checks run before any changelog is submitted.

use crate::error::{Error, Result};
use crate::models::ChangelogInput;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Version,
    Title,
}

impl Field {
    pub fn as_str(&self) -> &str {
        match self {
            Field::Version => "version",
            Field::Title => "title",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field messages; empty means the input may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// `version` and `title` must be non-blank; `description` and `git_diff` are free.
pub fn validate(input: &ChangelogInput) -> ValidationReport {
    let mut report = ValidationReport::default();

    if input.version.trim().is_empty() {
        report
            .errors
            .insert(Field::Version, "Version is required".to_string());
    }

    if input.title.trim().is_empty() {
        report
            .errors
            .insert(Field::Title, "Title is required".to_string());
    }

    report
}

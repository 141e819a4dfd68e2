//! # changelog-core
//!
//! Core library for changelog - versioned release notes with a draft/published
//! lifecycle.
//!
//! This crate provides the entity model, the error taxonomy shared by client and
//! server, required-field validation, content generation and SQLite storage.

pub mod diff;
pub mod error;
pub mod generator;
pub mod models;
pub mod storage;
pub mod validation;

pub use error::{Error, Result};
pub use generator::{ContentGenerator, TemplateGenerator};
pub use models::{Changelog, ChangelogFilter, ChangelogId, ChangelogInput, PublishRequest};
pub use storage::Storage;
pub use validation::{validate, Field, ValidationReport};

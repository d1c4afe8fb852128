//! Input normalization and validation for names, descriptions and colors.
//!
//! Rules:
//! - Names are trimmed and must not be empty afterwards
//! - Descriptions are trimmed; an empty description is stored as absent
//! - Tag colors are opaque strings, trimmed, non-empty; default [`DEFAULT_TAG_COLOR`]

use thiserror::Error;

use crate::error::{EntityKind, ListedError};

/// Color given to tags created without one.
pub const DEFAULT_TAG_COLOR: &str = "#8BA89C";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} name cannot be empty")]
    EmptyName(EntityKind),

    #[error("Tag color cannot be empty")]
    EmptyColor,
}

impl From<ValidationError> for ListedError {
    fn from(err: ValidationError) -> Self {
        ListedError::Validation(err.to_string())
    }
}

/// Trims a name and rejects it if nothing is left.
///
/// # Examples
/// ```
/// use listedapp::error::EntityKind;
/// use listedapp::validation::normalize_name;
///
/// assert_eq!(normalize_name(EntityKind::List, "  Groceries ").unwrap(), "Groceries");
/// assert!(normalize_name(EntityKind::Item, "   ").is_err());
/// ```
pub fn normalize_name(kind: EntityKind, raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName(kind));
    }
    Ok(name.to_string())
}

pub fn normalize_description(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

pub fn normalize_color(raw: Option<&str>) -> Result<String, ValidationError> {
    match raw {
        None => Ok(DEFAULT_TAG_COLOR.to_string()),
        Some(color) => {
            let color = color.trim();
            if color.is_empty() {
                Err(ValidationError::EmptyColor)
            } else {
                Ok(color.to_string())
            }
        }
    }
}

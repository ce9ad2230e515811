use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// Category entity - a published grouping of posts addressed by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Longest slug the `categories.slug` column stores.
pub const MAX_SLUG_LENGTH: usize = 64;

impl Category {
    /// Create a new, published category.
    pub fn new(title: String, description: String, slug: String) -> Result<Self, DomainError> {
        super::validate_title("Title", &title)?;
        Self::validate_slug(&slug)?;
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description,
            slug,
            is_published: true,
            created_at: Utc::now(),
        })
    }

    /// Slugs are non-empty, at most [`MAX_SLUG_LENGTH`] characters, and limited to
    /// latin letters, digits, hyphen and underscore.
    pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
        if slug.len() > MAX_SLUG_LENGTH {
            return Err(DomainError::Validation(format!(
                "Slug must be at most {MAX_SLUG_LENGTH} characters"
            )));
        }
        if slug.is_empty()
            || !slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::Validation(format!(
                "Invalid slug '{slug}': allowed characters are latin letters, digits, hyphen and underscore"
            )));
        }
        Ok(())
    }
}

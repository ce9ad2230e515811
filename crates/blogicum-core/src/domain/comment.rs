use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// Comment entity - a reader's reply attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment by `author_id` on `post_id`.
    pub fn new(post_id: Uuid, author_id: Uuid, text: String) -> Result<Self, DomainError> {
        Self::validate_text(&text)?;
        Ok(Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            text,
            created_at: Utc::now(),
        })
    }

    pub fn validate_text(text: &str) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation(
                "Comment text must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// Post entity - a blog publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Author-supplied fields of a post, used for both creation and editing.
///
/// The author is deliberately absent: it always comes from the authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub image: Option<String>,
    pub is_published: bool,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        super::validate_title("Title", &self.title)?;
        if self.text.trim().is_empty() {
            return Err(DomainError::Validation("Text must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(author_id: Uuid, draft: PostDraft) -> Result<Self, DomainError> {
        draft.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            author_id,
            category_id: draft.category_id,
            location_id: draft.location_id,
            title: draft.title,
            text: draft.text,
            pub_date: draft.pub_date,
            is_published: draft.is_published,
            image: draft.image,
            created_at: Utc::now(),
        })
    }

    /// Replace the author-editable fields. Identity, author and creation time are kept.
    pub fn apply(&mut self, draft: PostDraft) -> Result<(), DomainError> {
        draft.validate()?;
        self.title = draft.title;
        self.text = draft.text;
        self.pub_date = draft.pub_date;
        self.category_id = draft.category_id;
        self.location_id = draft.location_id;
        self.image = draft.image;
        self.is_published = draft.is_published;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            text: "Body".to_string(),
            pub_date: Utc::now(),
            category_id: None,
            location_id: None,
            image: None,
            is_published: true,
        }
    }

    #[test]
    fn test_title_length_limit() {
        let author = Uuid::new_v4();
        assert!(Post::new(author, draft(&"t".repeat(256))).is_ok());
        assert!(matches!(
            Post::new(author, draft(&"t".repeat(257))),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_apply_keeps_author_and_id() {
        let author = Uuid::new_v4();
        let mut post = Post::new(author, draft("First")).unwrap();
        let id = post.id;

        post.apply(draft("Second")).unwrap();

        assert_eq!(post.id, id);
        assert_eq!(post.author_id, author);
        assert_eq!(post.title, "Second");
    }
}

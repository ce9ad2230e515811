//! Domain entities - the core business objects.

mod category;
mod comment;
mod location;
mod post;
mod user;

pub use category::{Category, MAX_SLUG_LENGTH};
pub use comment::Comment;
pub use location::Location;
pub use post::{Post, PostDraft};
pub use user::{ProfileUpdate, User};

/// Maximum length of post titles, category titles and location names.
pub const MAX_TITLE_LENGTH: usize = 256;

/// Reject empty or over-long single-line text fields.
pub(crate) fn validate_title(field: &str, value: &str) -> Result<(), crate::DomainError> {
    if value.trim().is_empty() {
        return Err(crate::DomainError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    if value.chars().count() > MAX_TITLE_LENGTH {
        return Err(crate::DomainError::Validation(format!(
            "{field} must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

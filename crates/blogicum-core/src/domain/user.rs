use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// User entity - a registered author or commenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Usernames are 1..=150 characters of letters, digits and `@.+-_`.
    pub fn validate_username(username: &str) -> Result<(), DomainError> {
        if username.is_empty() || username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(DomainError::Validation(format!(
                "Username must be between 1 and {MAX_USERNAME_LENGTH} characters"
            )));
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
        {
            return Err(DomainError::Validation(
                "Username may contain only letters, digits and @/./+/-/_".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply a profile edit made by the user themselves.
    pub fn apply_profile(&mut self, update: ProfileUpdate) -> Result<(), DomainError> {
        Self::validate_username(&update.username)?;
        if !update.email.is_empty() && !update.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }
        self.username = update.username;
        self.email = update.email;
        self.first_name = update.first_name;
        self.last_name = update.last_name;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// The editable part of a user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_charset() {
        assert!(User::validate_username("anna.k+blog@home_1-2").is_ok());
        assert!(User::validate_username("").is_err());
        assert!(User::validate_username("with space").is_err());
        assert!(User::validate_username(&"a".repeat(151)).is_err());
    }

    #[test]
    fn test_apply_profile_rejects_bad_email() {
        let mut user = User::new("anna".to_string(), "hash".to_string());
        let result = user.apply_profile(ProfileUpdate {
            username: "anna".to_string(),
            email: "not-an-email".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        });

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(user.email, "");
    }
}

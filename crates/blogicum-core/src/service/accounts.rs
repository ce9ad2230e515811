use uuid::Uuid;

use super::BlogService;
use crate::access::{Route, Saved};
use crate::domain::{ProfileUpdate, User};
use crate::error::DomainError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A sign-up request.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
}

impl BlogService {
    /// Create an account and send the new user to the index page.
    pub async fn register(&self, registration: Registration) -> Result<Saved<User>, DomainError> {
        User::validate_username(&registration.username)?;
        if registration.password != registration.password_confirmation {
            return Err(DomainError::Validation(
                "Password confirmation does not match".to_string(),
            ));
        }
        if registration.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        if self
            .repos
            .users
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(DomainError::Duplicate(format!(
                "Username '{}' is already taken",
                registration.username
            )));
        }

        let password_hash = self
            .passwords
            .hash(&registration.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let user = self
            .repos
            .users
            .save(User::new(registration.username, password_hash))
            .await?;
        tracing::info!(user_id = %user.id, "User registered");

        Ok(Saved {
            record: user,
            next: Route::Index,
        })
    }

    /// Check a username/password pair.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .repos
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }
        Ok(user)
    }

    /// The actor's own profile record.
    pub async fn own_profile(&self, actor_id: Uuid) -> Result<User, DomainError> {
        self.user(actor_id).await
    }

    /// Edit the actor's own profile. No other user can be targeted.
    pub async fn edit_profile(
        &self,
        actor_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Saved<User>, DomainError> {
        let mut user = self.user(actor_id).await?;

        if update.username != user.username {
            let taken = self
                .repos
                .users
                .find_by_username(&update.username)
                .await?
                .is_some_and(|other| other.id != user.id);
            if taken {
                return Err(DomainError::Duplicate(format!(
                    "Username '{}' is already taken",
                    update.username
                )));
            }
        }

        user.apply_profile(update)?;
        let user = self.repos.users.save(user).await?;

        Ok(Saved {
            next: Route::Profile(user.username.clone()),
            record: user,
        })
    }
}

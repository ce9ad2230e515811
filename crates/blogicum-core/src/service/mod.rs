//! Application service - the blog's use cases on top of the repository ports.

mod accounts;
mod comments;
mod feeds;
mod posts;

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Category, Location, PostDraft, User};
use crate::error::DomainError;
use crate::feed::PageRequest;
use crate::ports::{PasswordService, Repositories};

pub use accounts::Registration;

/// Default number of posts per feed page.
pub const DEFAULT_POSTS_PER_PAGE: u64 = 10;

/// Entry point for every request handler.
pub struct BlogService {
    repos: Repositories,
    passwords: Arc<dyn PasswordService>,
    per_page: u64,
}

impl BlogService {
    pub fn new(repos: Repositories, passwords: Arc<dyn PasswordService>, per_page: u64) -> Self {
        Self {
            repos,
            passwords,
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    fn page(&self, page: u64) -> PageRequest {
        PageRequest::new(page, self.per_page)
    }

    async fn user(&self, id: Uuid) -> Result<User, DomainError> {
        self.repos
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", id))
    }

    /// Check that a draft only references existing categories and locations.
    async fn check_references(
        &self,
        draft: &PostDraft,
    ) -> Result<(Option<Category>, Option<Location>), DomainError> {
        let category = match draft.category_id {
            Some(id) => Some(self.repos.categories.find_by_id(id).await?.ok_or_else(|| {
                DomainError::Validation(format!("Unknown category {id}"))
            })?),
            None => None,
        };
        let location = match draft.location_id {
            Some(id) => Some(self.repos.locations.find_by_id(id).await?.ok_or_else(|| {
                DomainError::Validation(format!("Unknown location {id}"))
            })?),
            None => None,
        };
        Ok((category, location))
    }
}

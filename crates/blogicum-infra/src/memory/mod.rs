//! In-memory datastore - used when no database is configured, and in tests.
//!
//! Enforces the same unique keys, foreign keys and delete rules as the
//! PostgreSQL schema. Data is lost on process restart.

mod repository;
mod tables;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tokio::sync::RwLock;

use blogicum_core::ports::Repositories;

pub use repository::{
    InMemoryCategoryRepository, InMemoryCommentRepository, InMemoryLocationRepository,
    InMemoryPostRepository, InMemoryRepository, InMemoryUserRepository,
};
pub use tables::{Record, Tables};

/// Shared handle to one set of in-memory tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository for records of type `T` backed by this store.
    pub fn repository<T: Record>(&self) -> InMemoryRepository<T> {
        InMemoryRepository::new(self.tables.clone())
    }

    /// All repositories, sharing this store's tables.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(self.repository::<blogicum_core::domain::User>()),
            categories: Arc::new(self.repository::<blogicum_core::domain::Category>()),
            locations: Arc::new(self.repository::<blogicum_core::domain::Location>()),
            posts: Arc::new(self.repository::<blogicum_core::domain::Post>()),
            comments: Arc::new(self.repository::<blogicum_core::domain::Comment>()),
        }
    }
}

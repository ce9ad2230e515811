//! Application state - shared across all handlers.

use std::sync::Arc;

use blogicum_core::BlogService;
use blogicum_core::ports::{PasswordService, Repositories, TokenService};
use blogicum_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

#[cfg(feature = "postgres")]
use blogicum_infra::database::{connect, postgres_repositories};
#[cfg(feature = "postgres")]
use sea_orm::DbConn;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogService>,
    pub tokens: Arc<dyn TokenService>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DbConn>>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store
    /// when no database is configured or reachable.
    pub async fn new(config: &AppConfig) -> Self {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::default());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[cfg(feature = "postgres")]
        let (db, repos) = match &config.database {
            Some(db_config) => match connect(db_config).await {
                Ok(conn) => {
                    let conn = Arc::new(conn);
                    let repos = postgres_repositories(conn.clone());
                    (Some(conn), repos)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    (None, InMemoryStore::new().repositories())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, InMemoryStore::new().repositories())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos = {
            tracing::info!("Running without postgres feature - using in-memory store");
            InMemoryStore::new().repositories()
        };

        let state = Self::from_parts(repos, passwords, tokens, config.posts_per_page);
        tracing::info!(per_page = config.posts_per_page, "Application state initialized");

        #[cfg(feature = "postgres")]
        let state = Self { db, ..state };

        state
    }

    /// State over the given repositories, without a database handle.
    pub fn from_parts(
        repos: Repositories,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        per_page: u64,
    ) -> Self {
        Self {
            blog: Arc::new(BlogService::new(repos, passwords, per_page)),
            tokens,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}

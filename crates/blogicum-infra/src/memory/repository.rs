use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blogicum_core::domain::{Category, Comment, Location, Post, User};
use blogicum_core::error::RepoError;
use blogicum_core::feed::{CommentWithAuthor, FeedQuery, Page, PostSummary};
use blogicum_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, LocationRepository, PostRepository,
    UserRepository,
};

use super::tables::{Record, Tables};

/// Generic in-memory repository over one table of the shared store.
pub struct InMemoryRepository<T> {
    tables: Arc<RwLock<Tables>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> InMemoryRepository<T> {
    pub(super) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self {
            tables,
            _record: PhantomData,
        }
    }
}

/// In-memory user repository.
pub type InMemoryUserRepository = InMemoryRepository<User>;

/// In-memory category repository.
pub type InMemoryCategoryRepository = InMemoryRepository<Category>;

/// In-memory location repository.
pub type InMemoryLocationRepository = InMemoryRepository<Location>;

/// In-memory post repository.
pub type InMemoryPostRepository = InMemoryRepository<Post>;

/// In-memory comment repository.
pub type InMemoryCommentRepository = InMemoryRepository<Comment>;

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let tables = self.tables.read().await;
        Ok(T::table(&tables).get(&id).cloned())
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let mut tables = self.tables.write().await;
        entity.check(&tables)?;
        T::table_mut(&mut tables).insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if T::remove(&mut tables, id) {
            Ok(())
        } else {
            Err(RepoError::NotFound)
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.find_user_by_username(username).cloned())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.find_category_by_slug(slug).cloned())
    }
}

impl LocationRepository for InMemoryLocationRepository {}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_summary(&self, id: Uuid) -> Result<Option<PostSummary>, RepoError> {
        let tables = self.tables.read().await;
        Ok(Post::table(&tables)
            .get(&id)
            .and_then(|post| tables.summarize(post)))
    }

    async fn list(&self, query: &FeedQuery) -> Result<Page<PostSummary>, RepoError> {
        let tables = self.tables.read().await;

        let mut matching: Vec<&Post> = tables
            .posts()
            .filter(|post| query.in_scope(post))
            .filter(|post| {
                query
                    .visibility
                    .admits(post, tables.category_of(post), query.now)
            })
            .collect();
        matching.sort_by(|a, b| {
            b.pub_date
                .cmp(&a.pub_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len() as u64;
        if query.page.is_past_end(total) {
            return Ok(Page::new(Vec::new(), query.page, total));
        }

        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.per_page).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .filter_map(|post| tables.summarize(post))
            .collect();

        Ok(Page::new(items, query.page, total))
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments_for(post_id))
    }
}

//! PostgreSQL repository implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DbConn, EntityTrait, Iterable, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use blogicum_core::domain::{Category, Location, User};
use blogicum_core::error::RepoError;
use blogicum_core::feed::{CommentWithAuthor, FeedQuery, FeedScope, Page, PostSummary};
use blogicum_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, Repositories,
    UserRepository,
};
use blogicum_core::visibility::Visibility;

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::post::{self, Entity as PostEntity, WithCommentCount};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// All repositories sharing one connection pool.
pub fn postgres_repositories(db: Arc<DbConn>) -> Repositories {
    Repositories {
        users: Arc::new(PostgresUserRepository::new(db.clone())),
        categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
        locations: Arc::new(PostgresLocationRepository::new(db.clone())),
        posts: Arc::new(PostgresPostRepository::new(db.clone())),
        comments: Arc::new(PostgresCommentRepository::new(db)),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

impl LocationRepository for PostgresLocationRepository {}

/// Posts left-joined with comments (for the count) and categories (for filtering).
fn with_comment_count() -> Select<PostEntity> {
    PostEntity::find()
        .select_only()
        .columns(post::Column::iter())
        .column_as(
            Expr::col((CommentEntity, comment::Column::Id)).count(),
            "comment_count",
        )
        .join(JoinType::LeftJoin, post::Relation::Comments.def())
        .join(JoinType::LeftJoin, post::Relation::Category.def())
        .group_by(post::Column::Id)
}

fn scope_condition(scope: FeedScope) -> Condition {
    match scope {
        FeedScope::All => Condition::all(),
        FeedScope::Category(id) => Condition::all().add(post::Column::CategoryId.eq(id)),
        FeedScope::Author(id) => Condition::all().add(post::Column::AuthorId.eq(id)),
    }
}

/// SQL rendition of [`Visibility::admits`].
fn visibility_condition(visibility: Visibility, now: DateTime<Utc>) -> Condition {
    let released = Condition::all()
        .add(post::Column::IsPublished.eq(true))
        .add(post::Column::PubDate.lte(now));

    match visibility {
        Visibility::Public => released.add(
            Condition::any()
                .add(post::Column::CategoryId.is_null())
                .add(category::Column::IsPublished.eq(true)),
        ),
        Visibility::CategoryListing => released,
        Visibility::Unrestricted => Condition::all(),
    }
}

impl PostgresPostRepository {
    /// Eagerly load authors, categories and locations for a page of rows.
    async fn attach_related(
        &self,
        rows: Vec<WithCommentCount>,
    ) -> Result<Vec<PostSummary>, RepoError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<Uuid> = rows.iter().map(|r| r.author_id).collect();
        let category_ids: Vec<Uuid> = rows.iter().filter_map(|r| r.category_id).collect();
        let location_ids: Vec<Uuid> = rows.iter().filter_map(|r| r.location_id).collect();

        let authors: HashMap<Uuid, User> = UserEntity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(&*self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect();

        let categories: HashMap<Uuid, Category> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            CategoryEntity::find()
                .filter(category::Column::Id.is_in(category_ids))
                .all(&*self.db)
                .await
                .map_err(query_err)?
                .into_iter()
                .map(|m| (m.id, m.into()))
                .collect()
        };

        let locations: HashMap<Uuid, Location> = if location_ids.is_empty() {
            HashMap::new()
        } else {
            LocationEntity::find()
                .filter(location::Column::Id.is_in(location_ids))
                .all(&*self.db)
                .await
                .map_err(query_err)?
                .into_iter()
                .map(|m| (m.id, m.into()))
                .collect()
        };

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let Some(author) = authors.get(&row.author_id).cloned() else {
                    tracing::warn!(post_id = %row.id, "Post without author row skipped");
                    return None;
                };
                let category = row.category_id.and_then(|id| categories.get(&id).cloned());
                let location = row.location_id.and_then(|id| locations.get(&id).cloned());
                let comment_count = u64::try_from(row.comment_count).unwrap_or_default();

                Some(PostSummary {
                    post: row.into(),
                    author,
                    category,
                    location,
                    comment_count,
                })
            })
            .collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_summary(&self, id: Uuid) -> Result<Option<PostSummary>, RepoError> {
        let row = with_comment_count()
            .filter(post::Column::Id.eq(id))
            .into_model::<WithCommentCount>()
            .one(&*self.db)
            .await
            .map_err(query_err)?;

        match row {
            Some(row) => Ok(self.attach_related(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, query: &FeedQuery) -> Result<Page<PostSummary>, RepoError> {
        tracing::debug!(scope = ?query.scope, visibility = ?query.visibility, page = query.page.page, "Listing posts");

        let paginator = with_comment_count()
            .filter(scope_condition(query.scope))
            .filter(visibility_condition(query.visibility, query.now))
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .into_model::<WithCommentCount>()
            .paginate(&*self.db, query.page.per_page);

        let total = paginator.num_items().await.map_err(query_err)?;
        if query.page.is_past_end(total) {
            return Ok(Page::new(Vec::new(), query.page, total));
        }

        let rows = paginator
            .fetch_page(query.page.index())
            .await
            .map_err(query_err)?;

        let items = self.attach_related(rows).await?;
        Ok(Page::new(items, query.page, total))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .find_also_related(UserEntity)
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&*self.db)
            .await
            .map_err(query_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(comment, author)| {
                author.map(|author| CommentWithAuthor {
                    comment: comment.into(),
                    author: author.into(),
                })
            })
            .collect())
    }
}

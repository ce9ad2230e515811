use std::collections::HashMap;

use uuid::Uuid;

use blogicum_core::domain::{Category, Comment, Location, Post, User};
use blogicum_core::error::RepoError;
use blogicum_core::feed::{CommentWithAuthor, PostSummary};

/// All rows of the in-memory datastore.
#[derive(Debug, Default)]
pub struct Tables {
    users: HashMap<Uuid, User>,
    categories: HashMap<Uuid, Category>,
    locations: HashMap<Uuid, Location>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
}

impl Tables {
    pub(super) fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    pub(super) fn category_of(&self, post: &Post) -> Option<&Category> {
        post.category_id.and_then(|id| self.categories.get(&id))
    }

    pub(super) fn comment_count(&self, post_id: Uuid) -> u64 {
        self.comments
            .values()
            .filter(|c| c.post_id == post_id)
            .count() as u64
    }

    /// Join a post with its related rows. `None` if the author row is missing.
    pub(super) fn summarize(&self, post: &Post) -> Option<PostSummary> {
        let author = self.users.get(&post.author_id)?.clone();
        Some(PostSummary {
            post: post.clone(),
            author,
            category: self.category_of(post).cloned(),
            location: post
                .location_id
                .and_then(|id| self.locations.get(&id))
                .cloned(),
            comment_count: self.comment_count(post.id),
        })
    }

    pub(super) fn comments_for(&self, post_id: Uuid) -> Vec<CommentWithAuthor> {
        let mut comments: Vec<CommentWithAuthor> = self
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .filter_map(|c| {
                self.users.get(&c.author_id).map(|author| CommentWithAuthor {
                    comment: c.clone(),
                    author: author.clone(),
                })
            })
            .collect();
        comments.sort_by(|a, b| {
            a.comment
                .created_at
                .cmp(&b.comment.created_at)
                .then_with(|| a.comment.id.cmp(&b.comment.id))
        });
        comments
    }

    pub(super) fn find_user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|u| u.username == username)
    }

    pub(super) fn find_category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.values().find(|c| c.slug == slug)
    }

    fn remove_post(&mut self, id: Uuid) -> bool {
        let removed = self.posts.remove(&id).is_some();
        if removed {
            self.comments.retain(|_, c| c.post_id != id);
        }
        removed
    }
}

/// A row type stored in [`Tables`], with its constraints and delete rule.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    fn table(tables: &Tables) -> &HashMap<Uuid, Self>;

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self>;

    /// Unique and foreign key checks run before every save.
    fn check(&self, _tables: &Tables) -> Result<(), RepoError> {
        Ok(())
    }

    /// Remove the row and apply cascades. Returns false if it did not exist.
    fn remove(tables: &mut Tables, id: Uuid) -> bool {
        Self::table_mut(tables).remove(&id).is_some()
    }
}

fn missing(what: &str, id: Uuid) -> RepoError {
    RepoError::Constraint(format!("{what} {id} does not exist"))
}

impl Record for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.users
    }

    fn check(&self, tables: &Tables) -> Result<(), RepoError> {
        match tables.find_user_by_username(&self.username) {
            Some(other) if other.id != self.id => Err(RepoError::Constraint(format!(
                "Username '{}' already exists",
                self.username
            ))),
            _ => Ok(()),
        }
    }

    /// Deleting a user deletes their posts, comments on those posts, and their comments.
    fn remove(tables: &mut Tables, id: Uuid) -> bool {
        if tables.users.remove(&id).is_none() {
            return false;
        }
        let owned: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            tables.remove_post(post_id);
        }
        tables.comments.retain(|_, c| c.author_id != id);
        true
    }
}

impl Record for Category {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.categories
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.categories
    }

    fn check(&self, tables: &Tables) -> Result<(), RepoError> {
        match tables.find_category_by_slug(&self.slug) {
            Some(other) if other.id != self.id => Err(RepoError::Constraint(format!(
                "Slug '{}' already exists",
                self.slug
            ))),
            _ => Ok(()),
        }
    }

    /// Posts outlive their category.
    fn remove(tables: &mut Tables, id: Uuid) -> bool {
        if tables.categories.remove(&id).is_none() {
            return false;
        }
        for post in tables.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        true
    }
}

impl Record for Location {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.locations
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.locations
    }

    fn remove(tables: &mut Tables, id: Uuid) -> bool {
        if tables.locations.remove(&id).is_none() {
            return false;
        }
        for post in tables.posts.values_mut() {
            if post.location_id == Some(id) {
                post.location_id = None;
            }
        }
        true
    }
}

impl Record for Post {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.posts
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.posts
    }

    fn check(&self, tables: &Tables) -> Result<(), RepoError> {
        if !tables.users.contains_key(&self.author_id) {
            return Err(missing("User", self.author_id));
        }
        if let Some(id) = self.category_id.filter(|id| !tables.categories.contains_key(id)) {
            return Err(missing("Category", id));
        }
        if let Some(id) = self.location_id.filter(|id| !tables.locations.contains_key(id)) {
            return Err(missing("Location", id));
        }
        Ok(())
    }

    fn remove(tables: &mut Tables, id: Uuid) -> bool {
        tables.remove_post(id)
    }
}

impl Record for Comment {
    fn id(&self) -> Uuid {
        self.id
    }

    fn table(tables: &Tables) -> &HashMap<Uuid, Self> {
        &tables.comments
    }

    fn table_mut(tables: &mut Tables) -> &mut HashMap<Uuid, Self> {
        &mut tables.comments
    }

    fn check(&self, tables: &Tables) -> Result<(), RepoError> {
        if !tables.posts.contains_key(&self.post_id) {
            return Err(missing("Post", self.post_id));
        }
        if !tables.users.contains_key(&self.author_id) {
            return Err(missing("User", self.author_id));
        }
        Ok(())
    }
}

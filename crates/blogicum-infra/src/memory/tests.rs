use chrono::{Duration, Utc};
use uuid::Uuid;

use blogicum_core::domain::{Category, Comment, Location, Post, PostDraft, User};
use blogicum_core::error::RepoError;
use blogicum_core::feed::{FeedQuery, PageRequest};
use blogicum_core::ports::Repositories;
use blogicum_core::viewer::Viewer;

use super::InMemoryStore;

fn draft(title: &str, offset: Duration) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        text: "Text".to_string(),
        pub_date: Utc::now() + offset,
        category_id: None,
        location_id: None,
        image: None,
        is_published: true,
    }
}

async fn user(repos: &Repositories, username: &str) -> User {
    repos
        .users
        .save(User::new(username.to_string(), "hash".to_string()))
        .await
        .unwrap()
}

async fn post(repos: &Repositories, author: &User, draft: PostDraft) -> Post {
    repos
        .posts
        .save(Post::new(author.id, draft).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_username_is_unique() {
    let repos = InMemoryStore::new().repositories();
    user(&repos, "anna").await;

    let result = repos
        .users
        .save(User::new("anna".to_string(), "other".to_string()))
        .await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_post_requires_existing_author() {
    let repos = InMemoryStore::new().repositories();
    let orphan = Post::new(Uuid::new_v4(), draft("Orphan", -Duration::hours(1))).unwrap();

    assert!(matches!(
        repos.posts.save(orphan).await,
        Err(RepoError::Constraint(_))
    ));
}

#[tokio::test]
async fn test_deleting_user_cascades_to_posts_and_comments() {
    let repos = InMemoryStore::new().repositories();
    let anna = user(&repos, "anna").await;
    let boris = user(&repos, "boris").await;
    let annas_post = post(&repos, &anna, draft("Anna's", -Duration::hours(1))).await;
    let boris_post = post(&repos, &boris, draft("Boris'", -Duration::hours(1))).await;

    let on_annas = repos
        .comments
        .save(Comment::new(annas_post.id, boris.id, "Hi".to_string()).unwrap())
        .await
        .unwrap();
    let by_anna = repos
        .comments
        .save(Comment::new(boris_post.id, anna.id, "Hey".to_string()).unwrap())
        .await
        .unwrap();

    repos.users.delete(anna.id).await.unwrap();

    assert!(repos.posts.find_by_id(annas_post.id).await.unwrap().is_none());
    assert!(repos.comments.find_by_id(on_annas.id).await.unwrap().is_none());
    assert!(repos.comments.find_by_id(by_anna.id).await.unwrap().is_none());
    assert!(repos.posts.find_by_id(boris_post.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_deleting_category_and_location_keeps_posts() {
    let repos = InMemoryStore::new().repositories();
    let anna = user(&repos, "anna").await;
    let category = repos
        .categories
        .save(Category::new("News".to_string(), String::new(), "news".to_string()).unwrap())
        .await
        .unwrap();
    let location = repos
        .locations
        .save(Location::new("Moscow".to_string()).unwrap())
        .await
        .unwrap();

    let mut d = draft("Filed", -Duration::hours(1));
    d.category_id = Some(category.id);
    d.location_id = Some(location.id);
    let filed = post(&repos, &anna, d).await;

    repos.categories.delete(category.id).await.unwrap();
    repos.locations.delete(location.id).await.unwrap();

    let kept = repos.posts.find_by_id(filed.id).await.unwrap().unwrap();
    assert_eq!(kept.category_id, None);
    assert_eq!(kept.location_id, None);
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let repos = InMemoryStore::new().repositories();
    assert!(matches!(
        repos.posts.delete(Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_comments_listed_oldest_first() {
    let repos = InMemoryStore::new().repositories();
    let anna = user(&repos, "anna").await;
    let p = post(&repos, &anna, draft("Post", -Duration::hours(1))).await;

    let now = Utc::now();
    for (text, age) in [("second", 5), ("third", 1), ("first", 10)] {
        let mut comment = Comment::new(p.id, anna.id, text.to_string()).unwrap();
        comment.created_at = now - Duration::minutes(age);
        repos.comments.save(comment).await.unwrap();
    }

    let texts: Vec<String> = repos
        .comments
        .list_for_post(p.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.comment.text)
        .collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_same_instant_comments_ordered_by_id() {
    let repos = InMemoryStore::new().repositories();
    let anna = user(&repos, "anna").await;
    let p = post(&repos, &anna, draft("Post", -Duration::hours(1))).await;

    let at = Utc::now() - Duration::minutes(1);
    let mut ids = Vec::new();
    for text in ["a", "b", "c", "d"] {
        let mut comment = Comment::new(p.id, anna.id, text.to_string()).unwrap();
        comment.created_at = at;
        ids.push(repos.comments.save(comment).await.unwrap().id);
    }
    ids.sort();

    for _ in 0..3 {
        let listed: Vec<Uuid> = repos
            .comments
            .list_for_post(p.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.comment.id)
            .collect();
        assert_eq!(listed, ids);
    }
}

#[tokio::test]
async fn test_public_feed_filters_and_counts_comments() {
    let repos = InMemoryStore::new().repositories();
    let anna = user(&repos, "anna").await;

    let mut hidden_category =
        Category::new("Drafts".to_string(), String::new(), "drafts".to_string()).unwrap();
    hidden_category.is_published = false;
    let hidden_category = repos.categories.save(hidden_category).await.unwrap();

    let older = post(&repos, &anna, draft("Older", -Duration::days(2))).await;
    let newer = post(&repos, &anna, draft("Newer", -Duration::days(1))).await;
    post(&repos, &anna, draft("Scheduled", Duration::days(1))).await;
    let mut unpublished = draft("Unpublished", -Duration::days(1));
    unpublished.is_published = false;
    post(&repos, &anna, unpublished).await;
    let mut in_hidden = draft("In hidden category", -Duration::days(1));
    in_hidden.category_id = Some(hidden_category.id);
    post(&repos, &anna, in_hidden).await;

    for _ in 0..3 {
        repos
            .comments
            .save(Comment::new(older.id, anna.id, "Comment".to_string()).unwrap())
            .await
            .unwrap();
    }

    let page = repos
        .posts
        .list(&FeedQuery::global(Utc::now(), PageRequest::new(1, 10)))
        .await
        .unwrap();

    let ids: Vec<Uuid> = page.items.iter().map(|s| s.post.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert_eq!(page.total_items, 2);
    assert_eq!(page.items[0].comment_count, 0);
    assert_eq!(page.items[1].comment_count, 3);
    assert_eq!(page.items[1].author.username, "anna");
}

#[tokio::test]
async fn test_own_profile_feed_includes_everything() {
    let repos = InMemoryStore::new().repositories();
    let anna = user(&repos, "anna").await;
    post(&repos, &anna, draft("Scheduled", Duration::days(1))).await;
    post(&repos, &anna, draft("Live", -Duration::days(1))).await;

    let now = Utc::now();
    let page = PageRequest::new(1, 10);
    let own = repos
        .posts
        .list(&FeedQuery::profile(anna.id, &Viewer::User(anna.id), now, page))
        .await
        .unwrap();
    let public = repos
        .posts
        .list(&FeedQuery::profile(anna.id, &Viewer::Anonymous, now, page))
        .await
        .unwrap();

    assert_eq!(own.total_items, 2);
    assert_eq!(own.items[0].post.title, "Scheduled");
    assert_eq!(public.total_items, 1);
}

#[tokio::test]
async fn test_feed_pagination() {
    let repos = InMemoryStore::new().repositories();
    let anna = user(&repos, "anna").await;
    for i in 1..=5 {
        post(&repos, &anna, draft(&format!("Post {i}"), -Duration::hours(i))).await;
    }

    let second = repos
        .posts
        .list(&FeedQuery::global(Utc::now(), PageRequest::new(2, 2)))
        .await
        .unwrap();

    let titles: Vec<&str> = second.items.iter().map(|s| s.post.title.as_str()).collect();
    assert_eq!(titles, vec!["Post 3", "Post 4"]);
    assert_eq!(second.total_pages, 3);
    assert!(second.has_next());
    assert!(second.has_previous());
}

//! Data Transfer Objects - request bodies and JSON page contexts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sign-up form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// Post create/edit form. The author is never part of the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "published_by_default")]
    pub is_published: bool,
}

fn published_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// Profile edit form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRequest {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// `?page=N` on feed routes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

impl PageQuery {
    pub fn number(&self) -> u64 {
        self.page.unwrap_or(1)
    }
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// The signed-in user's own profile, as shown on the edit form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub author: UserResponse,
    pub category: Option<CategoryResponse>,
    pub location: Option<LocationResponse>,
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
}

/// A post as written, before author and category are resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecordResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub created_at: DateTime<Utc>,
}

/// One page of a listing plus navigation totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFeedResponse {
    pub category: CategoryResponse,
    pub page: PageResponse<PostResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileFeedResponse {
    pub profile: UserResponse,
    pub page: PageResponse<PostResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_request_defaults() {
        let request: PostRequest = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "text": "World",
            "pub_date": "2024-05-01T10:00:00Z",
        }))
        .unwrap();

        assert!(request.is_published);
        assert!(request.category_id.is_none());
        assert!(request.image.is_none());
    }

    #[test]
    fn post_request_ignores_author_field() {
        let request: PostRequest = serde_json::from_value(serde_json::json!({
            "title": "Hello",
            "text": "World",
            "pub_date": "2024-05-01T10:00:00Z",
            "author_id": "00000000-0000-0000-0000-000000000001",
            "is_published": false,
        }))
        .unwrap();

        assert!(!request.is_published);
    }

    #[test]
    fn page_query_defaults_to_first_page() {
        assert_eq!(PageQuery::default().number(), 1);
        assert_eq!(PageQuery { page: Some(3) }.number(), 3);
    }

    #[test]
    fn profile_response_flattens_user() {
        let profile = ProfileResponse {
            user: UserResponse {
                id: Uuid::nil(),
                username: "anna".to_string(),
                first_name: String::new(),
                last_name: String::new(),
                created_at: DateTime::UNIX_EPOCH,
            },
            email: "anna@example.com".to_string(),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["username"], "anna");
        assert_eq!(json["email"], "anna@example.com");
    }
}

//! Domain records rendered as JSON page contexts.

use blogicum_core::domain::{Category, Comment, Location, Post, User};
use blogicum_core::feed::{CommentWithAuthor, Page, PostSummary};
use blogicum_shared::dto::{
    CategoryResponse, CommentResponse, LocationResponse, PageResponse, PostRecordResponse,
    PostResponse, ProfileResponse, UserResponse,
};

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        created_at: user.created_at,
    }
}

/// Includes the email; only for the user's own eyes.
pub fn profile(user: &User) -> ProfileResponse {
    ProfileResponse {
        user: self::user(user),
        email: user.email.clone(),
    }
}

pub fn category(category: &Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        title: category.title.clone(),
        description: category.description.clone(),
        slug: category.slug.clone(),
    }
}

pub fn location(location: &Location) -> LocationResponse {
    LocationResponse {
        id: location.id,
        name: location.name.clone(),
    }
}

pub fn post(summary: PostSummary) -> PostResponse {
    let PostSummary {
        post,
        author,
        category,
        location,
        comment_count,
    } = summary;

    PostResponse {
        id: post.id,
        title: post.title,
        text: post.text,
        pub_date: post.pub_date,
        is_published: post.is_published,
        image: post.image,
        author: user(&author),
        category: category.as_ref().map(self::category),
        location: location.as_ref().map(self::location),
        comment_count,
        created_at: post.created_at,
    }
}

pub fn post_record(post: Post) -> PostRecordResponse {
    PostRecordResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        text: post.text,
        pub_date: post.pub_date,
        is_published: post.is_published,
        category_id: post.category_id,
        location_id: post.location_id,
        image: post.image,
        created_at: post.created_at,
    }
}

pub fn comment(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        text: comment.text,
        author: None,
        created_at: comment.created_at,
    }
}

pub fn comment_with_author(entry: CommentWithAuthor) -> CommentResponse {
    CommentResponse {
        author: Some(user(&entry.author)),
        ..comment(entry.comment)
    }
}

pub fn page(page: Page<PostSummary>) -> PageResponse<PostResponse> {
    let has_next = page.has_next();
    let has_previous = page.has_previous();
    let page = page.map(post);

    PageResponse {
        items: page.items,
        page: page.page,
        per_page: page.per_page,
        total_items: page.total_items,
        total_pages: page.total_pages,
        has_next,
        has_previous,
    }
}

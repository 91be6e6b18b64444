//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::api::{ApiError, Comment, Post, PostsApi};
use crate::core::action::{Action, update};
use crate::core::state::App;

pub fn post(id: u64, title: &str, body: &str) -> Post {
    Post {
        id,
        user_id: 100 + id,
        title: title.to_string(),
        body: body.to_string(),
    }
}

pub fn comment(id: u64, post_id: u64, name: &str, body: &str) -> Comment {
    Comment {
        id,
        post_id,
        name: name.to_string(),
        email: format!("commenter{id}@example.com"),
        body: body.to_string(),
    }
}

pub fn sample_posts() -> Vec<Post> {
    vec![post(1, "Post 1", "Body 1"), post(2, "Post 2", "Body 2")]
}

pub fn sample_comments() -> Vec<Comment> {
    vec![
        comment(1, 1, "Commenter 1", "This is a comment"),
        comment(2, 1, "Commenter 2", "This is another comment"),
    ]
}

/// Creates an App whose post list has already loaded `sample_posts()`.
pub fn loaded_app() -> App {
    let mut app = App::new();
    if let Some(fetch) = app.start() {
        update(
            &mut app,
            Action::PostsFetched {
                request: fetch.request,
                result: Ok(sample_posts()),
            },
        );
    }
    app
}

/// Canned `PostsApi` answers for exercising the fetch plumbing without HTTP.
pub struct StubApi {
    posts: Result<Vec<Post>, ApiError>,
    comments: Result<Vec<Comment>, ApiError>,
}

impl StubApi {
    pub fn with_posts(posts: Result<Vec<Post>, ApiError>) -> Self {
        Self {
            posts,
            comments: Ok(Vec::new()),
        }
    }

    pub fn with_comments(comments: Result<Vec<Comment>, ApiError>) -> Self {
        Self {
            posts: Ok(sample_posts()),
            comments,
        }
    }
}

#[async_trait]
impl PostsApi for StubApi {
    async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.posts.clone()
    }

    async fn fetch_comments(&self, post_id: u64) -> Result<Vec<Comment>, ApiError> {
        self.comments
            .clone()
            .map(|comments| comments.into_iter().filter(|c| c.post_id == post_id).collect())
    }
}

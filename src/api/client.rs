//! HTTP access to the posts API.
//!
//! `PostsApi` is the seam the rest of the app talks to. `HttpClient` is the
//! reqwest-backed implementation; tests swap in their own.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::types::{Comment, ErrorBody, Post};

pub const DEFAULT_BASE_URL: &str = "https://gorest.co.in/public/v2";

/// Errors that can occur while talking to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The server answered with a non-success status.
    Api { status: u16, message: String },
    /// The body could not be decoded into the expected records.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => write!(f, "HTTP {status}: {message}"),
            ApiError::Parse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// The carried message without the kind prefix `Display` adds.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network(msg) | ApiError::Parse(msg) => msg,
            ApiError::Api { message, .. } => message,
        }
    }
}

#[async_trait]
pub trait PostsApi: Send + Sync {
    /// `GET {base}/posts`
    async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// `GET {base}/posts/{post_id}/comments`
    async fn fetch_comments(&self, post_id: u64) -> Result<Vec<Comment>, ApiError>;
}

pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    pub fn comments_url(&self, post_id: u64) -> String {
        format!("{}/posts/{}/comments", self.base_url, post_id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            warn!("API error: {} - {}", status.as_u16(), message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Failed to decode response from {}: {}", url, e);
            ApiError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl PostsApi for HttpClient {
    async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        let posts: Vec<Post> = self.get_json(&self.posts_url()).await?;
        info!("Fetched {} posts", posts.len());
        Ok(posts)
    }

    async fn fetch_comments(&self, post_id: u64) -> Result<Vec<Comment>, ApiError> {
        let comments: Vec<Comment> = self.get_json(&self.comments_url(post_id)).await?;
        info!("Fetched {} comments for post {}", comments.len(), post_id);
        Ok(comments)
    }
}

/// Picks the most readable message for a failed response:
/// the API's `{"message": ...}` field, then the raw body, then the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && !parsed.message.trim().is_empty()
    {
        return parsed.message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

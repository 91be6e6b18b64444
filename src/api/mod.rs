pub mod client;
pub mod types;

pub use client::{ApiError, DEFAULT_BASE_URL, HttpClient, PostsApi};
pub use types::{Comment, Post};

use serde::{Deserialize, Serialize};

/// A post as returned by `GET {base}/posts`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// A comment as returned by `GET {base}/posts/{post_id}/comments`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub post_id: u64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub body: String,
}

/// Error payload the upstream API sends alongside non-success statuses.
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    pub message: String,
}

//! # Screens
//!
//! The two mounted screens and their state-to-view projections.
//!
//! ```text
//! PostsScreen        QueryStore<Post>     → PostsView
//!                                           Loading | Error | Ready { posts, refreshing }
//! PostDetailsScreen  QueryStore<Comment>  → PostDetailsView
//!                                           Loading | Error | Empty | Ready(comments)
//! ```
//!
//! Views are recomputed from the store every time they are drawn; nothing
//! about them is cached between frames.

use crate::api::{ApiError, Comment, Post};
use crate::core::navigation::{PostDetailsParams, Route};
use crate::core::query::{FetchRequest, QueryKey, QueryStatus, QueryStore, RequestId};

pub const EMPTY_COMMENTS_TEXT: &str = "There aren't any comments at the moment.";
pub const COMMENTS_HEADING: &str = "Comments";

/// Prefixes a request failure the way every screen shows it.
pub fn error_text(message: &str) -> String {
    format!("Error: {message}")
}

// ============================================================================
// Post list
// ============================================================================

#[derive(Debug, PartialEq)]
pub enum PostsView<'a> {
    Loading,
    /// `refreshing` is set while a retry runs with older posts still cached.
    Error { text: String, refreshing: bool },
    Ready { posts: &'a [Post], refreshing: bool },
}

#[derive(Default)]
pub struct PostsScreen {
    store: QueryStore<Post>,
}

impl PostsScreen {
    const KEY: QueryKey = QueryKey::Posts;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self) -> FetchRequest {
        self.fetch()
    }

    fn fetch(&mut self) -> FetchRequest {
        FetchRequest {
            key: Self::KEY,
            request: self.store.begin(Self::KEY),
        }
    }

    /// Re-issues the posts request. Ignored while the first load is still
    /// outstanding; otherwise always issues, superseding any refresh in flight.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        let first_load_pending = self
            .store
            .get(Self::KEY)
            .is_some_and(|state| state.is_loading);
        if first_load_pending {
            return None;
        }
        Some(self.fetch())
    }

    pub fn resolve(&mut self, request: RequestId, result: Result<Vec<Post>, ApiError>) -> bool {
        self.store.resolve(Self::KEY, request, result)
    }

    pub fn view(&self) -> PostsView<'_> {
        match self.store.status(Self::KEY) {
            QueryStatus::Loading => PostsView::Loading,
            QueryStatus::Error(message) => PostsView::Error {
                text: error_text(message),
                refreshing: self.store.is_refreshing(Self::KEY),
            },
            QueryStatus::Success(posts) => PostsView::Ready {
                posts,
                refreshing: self.store.is_refreshing(Self::KEY),
            },
        }
    }

    /// Posts currently shown, in server order. Empty unless the view is ready.
    pub fn posts(&self) -> &[Post] {
        match self.view() {
            PostsView::Ready { posts, .. } => posts,
            _ => &[],
        }
    }

    /// The route activating the item at `index` leads to.
    pub fn activate(&self, index: usize) -> Option<Route> {
        self.posts().get(index).map(|post| Route::post_details(post.id))
    }

    pub fn is_fetching(&self) -> bool {
        self.store.is_fetching(Self::KEY)
    }
}

// ============================================================================
// Post details
// ============================================================================

#[derive(Debug, PartialEq)]
pub enum PostDetailsView<'a> {
    Loading,
    Error(String),
    Empty,
    Ready(&'a [Comment]),
}

impl PostDetailsView<'_> {
    /// The "Comments" heading is only shown above a non-empty list.
    pub fn heading(&self) -> Option<&'static str> {
        match self {
            PostDetailsView::Ready(_) => Some(COMMENTS_HEADING),
            _ => None,
        }
    }
}

pub struct PostDetailsScreen {
    params: PostDetailsParams,
    store: QueryStore<Comment>,
}

impl PostDetailsScreen {
    pub fn new(params: PostDetailsParams) -> Self {
        Self {
            params,
            store: QueryStore::new(),
        }
    }

    pub fn post_id(&self) -> u64 {
        self.params.post_id
    }

    pub fn params(&self) -> PostDetailsParams {
        self.params
    }

    fn key(&self) -> QueryKey {
        QueryKey::Comments {
            post_id: self.params.post_id,
        }
    }

    pub fn mount(&mut self) -> FetchRequest {
        let key = self.key();
        FetchRequest {
            key,
            request: self.store.begin(key),
        }
    }

    pub fn resolve(&mut self, request: RequestId, result: Result<Vec<Comment>, ApiError>) -> bool {
        self.store.resolve(self.key(), request, result)
    }

    pub fn view(&self) -> PostDetailsView<'_> {
        match self.store.status(self.key()) {
            QueryStatus::Loading => PostDetailsView::Loading,
            QueryStatus::Error(message) => PostDetailsView::Error(error_text(message)),
            QueryStatus::Success([]) => PostDetailsView::Empty,
            QueryStatus::Success(comments) => PostDetailsView::Ready(comments),
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.store.is_fetching(self.key())
    }
}

// ============================================================================
// Mounted screen
// ============================================================================

pub enum Screen {
    Posts(PostsScreen),
    PostDetails(PostDetailsScreen),
}

impl Screen {
    /// Builds the screen for `route` and starts its query.
    pub fn mount(route: Route) -> (Self, FetchRequest) {
        match route {
            Route::Posts => {
                let mut screen = PostsScreen::new();
                let fetch = screen.mount();
                (Screen::Posts(screen), fetch)
            }
            Route::PostDetails(params) => {
                let mut screen = PostDetailsScreen::new(params);
                let fetch = screen.mount();
                (Screen::PostDetails(screen), fetch)
            }
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Screen::Posts(_) => Route::Posts,
            Screen::PostDetails(screen) => Route::PostDetails(screen.params()),
        }
    }

    pub fn is_fetching(&self) -> bool {
        match self {
            Screen::Posts(screen) => screen.is_fetching(),
            Screen::PostDetails(screen) => screen.is_fetching(),
        }
    }
}

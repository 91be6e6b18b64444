//! # Application State
//!
//! Core state for the post browser. No TUI types live here; presentation
//! state (selection, scroll offsets) belongs to the `tui` module.
//!
//! ```text
//! App
//! ├── navigation: NavigationStack   // mounted screens, each with its own query store
//! └── status_message: String        // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::navigation::{NavigationStack, Route};
use crate::core::query::FetchRequest;
use crate::core::screen::{PostDetailsScreen, PostsScreen, Screen};

pub struct App {
    pub navigation: NavigationStack,
    pub status_message: String,
    initial_fetch: Option<FetchRequest>,
}

impl App {
    /// Mounts the post list as the root screen. Its first request is handed
    /// out by [`App::start`].
    pub fn new() -> Self {
        let (navigation, fetch) = NavigationStack::new(Route::Posts);
        Self {
            navigation,
            status_message: String::from("Loading posts..."),
            initial_fetch: Some(fetch),
        }
    }

    /// The request the root screen issued on mount. Only returned once.
    pub fn start(&mut self) -> Option<FetchRequest> {
        self.initial_fetch.take()
    }

    pub fn current_screen(&self) -> &Screen {
        self.navigation.current()
    }

    pub fn posts_screen(&self) -> Option<&PostsScreen> {
        match self.navigation.current() {
            Screen::Posts(screen) => Some(screen),
            Screen::PostDetails(_) => None,
        }
    }

    pub fn details_screen(&self) -> Option<&PostDetailsScreen> {
        match self.navigation.current() {
            Screen::PostDetails(screen) => Some(screen),
            Screen::Posts(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.navigation.current().is_fetching()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::QueryKey;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new();
        assert_eq!(app.status_message, "Loading posts...");
        assert!(app.is_loading());
        assert!(app.posts_screen().is_some());
        assert!(app.details_screen().is_none());
    }

    #[test]
    fn test_start_hands_out_initial_fetch_once() {
        let mut app = App::new();
        let fetch = app.start().unwrap();
        assert_eq!(fetch.key, QueryKey::Posts);
        assert!(app.start().is_none());
    }
}

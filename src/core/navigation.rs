//! # Navigation
//!
//! A two-route stack: `Posts` at the root, `PostDetails { post_id }` on top.
//! Each entry is a mounted [`Screen`] that owns its query store, so popping a
//! screen also discards whatever it was waiting for.

use std::fmt;

use log::info;

use crate::core::query::FetchRequest;
use crate::core::screen::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Posts,
    PostDetails,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::Posts => "Posts",
            RouteName::PostDetails => "PostDetails",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostDetailsParams {
    pub post_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Posts,
    PostDetails(PostDetailsParams),
}

impl Route {
    pub fn post_details(post_id: u64) -> Self {
        Route::PostDetails(PostDetailsParams { post_id })
    }

    pub fn name(&self) -> RouteName {
        match self {
            Route::Posts => RouteName::Posts,
            Route::PostDetails(_) => RouteName::PostDetails,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Posts => write!(f, "Posts"),
            Route::PostDetails(params) => write!(f, "PostDetails {{ postId: {} }}", params.post_id),
        }
    }
}

pub struct NavigationStack {
    screens: Vec<Screen>,
}

impl NavigationStack {
    /// Creates a stack with `root` mounted, returning the fetch it needs.
    pub fn new(root: Route) -> (Self, FetchRequest) {
        let (screen, fetch) = Screen::mount(root);
        info!("Mounted root screen {}", root);
        (Self { screens: vec![screen] }, fetch)
    }

    /// Navigates like a stack navigator: a route whose name is already on the
    /// stack is returned to (and remounted if its params changed); anything
    /// else is pushed. Returns the fetch of the newly mounted screen, if any.
    pub fn navigate(&mut self, route: Route) -> Option<FetchRequest> {
        let existing = self
            .screens
            .iter()
            .position(|screen| screen.route().name() == route.name());

        match existing {
            Some(index) => {
                self.screens.truncate(index + 1);
                if self.screens[index].route() == route {
                    info!("Returned to {}", route);
                    return None;
                }
                let (screen, fetch) = Screen::mount(route);
                info!("Remounted {} with new params", route);
                self.screens[index] = screen;
                Some(fetch)
            }
            None => {
                let (screen, fetch) = Screen::mount(route);
                info!("Pushed {}", route);
                self.screens.push(screen);
                Some(fetch)
            }
        }
    }

    /// Pops the top screen. The root screen cannot be popped.
    pub fn back(&mut self) -> bool {
        if self.screens.len() <= 1 {
            return false;
        }
        if let Some(screen) = self.screens.pop() {
            info!("Popped {}", screen.route());
        }
        true
    }

    pub fn current(&self) -> &Screen {
        // The root is never popped, so the stack is never empty.
        &self.screens[self.screens.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Screen {
        let last = self.screens.len() - 1;
        &mut self.screens[last]
    }

    /// Route params of the screen on top.
    pub fn params(&self) -> Route {
        self.current().route()
    }

    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    pub fn screens_mut(&mut self) -> impl Iterator<Item = &mut Screen> {
        self.screens.iter_mut()
    }
}

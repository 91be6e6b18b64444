//! # Actions
//!
//! Everything that can happen in the app becomes an `Action`.
//! User presses `r`? That's `Action::Refresh`.
//! The API answers? That's `Action::PostsFetched { .. }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing the I/O the caller must perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::{ApiError, Comment, Post};
use crate::core::navigation::Route;
use crate::core::query::{FetchRequest, RequestId};
use crate::core::screen::{PostDetailsView, PostsView, Screen};
use crate::core::state::App;

#[derive(Debug, PartialEq)]
pub enum Action {
    /// Re-issue the posts request (list screen only).
    Refresh,
    Navigate(Route),
    Back,
    Quit,
    PostsFetched {
        request: RequestId,
        result: Result<Vec<Post>, ApiError>,
    },
    CommentsFetched {
        post_id: u64,
        request: RequestId,
        result: Result<Vec<Comment>, ApiError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Fetch(FetchRequest),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);

    let effect = match action {
        Action::Quit => return Effect::Quit,
        Action::Refresh => match app.navigation.current_mut() {
            Screen::Posts(screen) => screen.refresh().map_or(Effect::None, Effect::Fetch),
            Screen::PostDetails(_) => Effect::None,
        },
        Action::Navigate(route) => {
            info!("Navigate to {}", route);
            app.navigation.navigate(route).map_or(Effect::None, Effect::Fetch)
        }
        Action::Back => {
            app.navigation.back();
            Effect::None
        }
        Action::PostsFetched { request, result } => {
            let applied = app.navigation.screens_mut().any(|screen| match screen {
                Screen::Posts(posts) => posts.resolve(request, result.clone()),
                Screen::PostDetails(_) => false,
            });
            if !applied {
                warn!("Dropped posts response {:?}: no screen is waiting for it", request);
            }
            Effect::None
        }
        Action::CommentsFetched {
            post_id,
            request,
            result,
        } => {
            let applied = app.navigation.screens_mut().any(|screen| match screen {
                Screen::PostDetails(details) if details.post_id() == post_id => {
                    details.resolve(request, result.clone())
                }
                _ => false,
            });
            if !applied {
                warn!(
                    "Dropped comments response {:?} for post {}: no screen is waiting for it",
                    request, post_id
                );
            }
            Effect::None
        }
    };

    app.status_message = describe(app.navigation.current());
    effect
}

/// Title bar text for the screen on top.
fn describe(screen: &Screen) -> String {
    match screen {
        Screen::Posts(posts) => match posts.view() {
            PostsView::Loading => "Loading posts...".to_string(),
            PostsView::Error {
                refreshing: true, ..
            }
            | PostsView::Ready {
                refreshing: true, ..
            } => "Refreshing...".to_string(),
            PostsView::Error { .. } => "Request failed".to_string(),
            PostsView::Ready { posts, .. } => format!("{} posts", posts.len()),
        },
        Screen::PostDetails(details) => match details.view() {
            PostDetailsView::Loading => "Loading comments...".to_string(),
            PostDetailsView::Error(_) => "Request failed".to_string(),
            PostDetailsView::Empty => "No comments".to_string(),
            PostDetailsView::Ready(comments) => format!("{} comments", comments.len()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::PostDetailsParams;
    use crate::core::query::QueryKey;
    use crate::test_support::{loaded_app, sample_comments, sample_posts};

    fn fetch_of(effect: Effect) -> FetchRequest {
        match effect {
            Effect::Fetch(fetch) => fetch,
            other => panic!("expected fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_quit() {
        let mut app = App::new();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_posts_fetched_updates_status() {
        let mut app = App::new();
        let fetch = app.start().unwrap();
        update(
            &mut app,
            Action::PostsFetched {
                request: fetch.request,
                result: Ok(sample_posts()),
            },
        );
        assert_eq!(app.status_message, "2 posts");
        assert!(!app.is_loading());
    }

    #[test]
    fn test_refresh_issues_exactly_one_fetch_per_trigger() {
        let mut app = loaded_app();

        let first = fetch_of(update(&mut app, Action::Refresh));
        assert_eq!(first.key, QueryKey::Posts);
        assert_eq!(app.status_message, "Refreshing...");

        let second = fetch_of(update(&mut app, Action::Refresh));
        assert_ne!(first.request, second.request);

        // The superseded refresh no longer lands
        update(
            &mut app,
            Action::PostsFetched {
                request: first.request,
                result: Ok(vec![]),
            },
        );
        assert_eq!(app.posts_screen().unwrap().posts().len(), 2);

        update(
            &mut app,
            Action::PostsFetched {
                request: second.request,
                result: Ok(vec![]),
            },
        );
        assert!(app.posts_screen().unwrap().posts().is_empty());
    }

    #[test]
    fn test_refresh_is_ignored_on_details() {
        let mut app = loaded_app();
        update(&mut app, Action::Navigate(Route::post_details(1)));
        assert_eq!(update(&mut app, Action::Refresh), Effect::None);
    }

    #[test]
    fn test_navigate_pushes_details_and_fetches_comments() {
        let mut app = loaded_app();
        let route = app.posts_screen().unwrap().activate(0).unwrap();
        let fetch = fetch_of(update(&mut app, Action::Navigate(route)));

        assert_eq!(fetch.key, QueryKey::Comments { post_id: 1 });
        assert_eq!(
            app.navigation.params(),
            Route::PostDetails(PostDetailsParams { post_id: 1 })
        );
        assert_eq!(app.status_message, "Loading comments...");
    }

    #[test]
    fn test_comments_fetched_lands_on_matching_screen() {
        let mut app = loaded_app();
        let fetch = fetch_of(update(&mut app, Action::Navigate(Route::post_details(1))));
        update(
            &mut app,
            Action::CommentsFetched {
                post_id: 1,
                request: fetch.request,
                result: Ok(sample_comments()),
            },
        );
        assert_eq!(app.status_message, "2 comments");
        assert!(matches!(
            app.details_screen().unwrap().view(),
            PostDetailsView::Ready(comments) if comments.len() == 2
        ));
    }

    #[test]
    fn test_comments_for_popped_screen_are_dropped() {
        let mut app = loaded_app();
        let fetch = fetch_of(update(&mut app, Action::Navigate(Route::post_details(1))));
        update(&mut app, Action::Back);
        assert_eq!(app.status_message, "2 posts");

        update(
            &mut app,
            Action::CommentsFetched {
                post_id: 1,
                request: fetch.request,
                result: Ok(sample_comments()),
            },
        );
        assert!(app.details_screen().is_none());
        assert_eq!(app.navigation.depth(), 1);
    }

    #[test]
    fn test_stale_post_id_response_does_not_leak_into_new_screen() {
        let mut app = loaded_app();
        let stale = fetch_of(update(&mut app, Action::Navigate(Route::post_details(1))));
        let fresh = fetch_of(update(&mut app, Action::Navigate(Route::post_details(2))));

        update(
            &mut app,
            Action::CommentsFetched {
                post_id: 1,
                request: stale.request,
                result: Ok(sample_comments()),
            },
        );
        assert_eq!(app.details_screen().unwrap().view(), PostDetailsView::Loading);

        update(
            &mut app,
            Action::CommentsFetched {
                post_id: 2,
                request: fresh.request,
                result: Ok(vec![]),
            },
        );
        assert_eq!(app.details_screen().unwrap().view(), PostDetailsView::Empty);
        assert_eq!(app.status_message, "No comments");
    }

    #[test]
    fn test_posts_error_status() {
        let mut app = App::new();
        let fetch = app.start().unwrap();
        update(
            &mut app,
            Action::PostsFetched {
                request: fetch.request,
                result: Err(ApiError::Network("Failed to fetch".to_string())),
            },
        );
        assert_eq!(app.status_message, "Request failed");
        assert!(matches!(
            app.posts_screen().unwrap().view(),
            PostsView::Error { text, refreshing: false } if text.starts_with("Error: ")
        ));
    }
}

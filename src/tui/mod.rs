//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the screens,
//! translates keyboard and mouse events into `core::Action` values, and
//! performs the fetches the core asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Fetching**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on input, resize, or when a
//!   response arrives.
//!
//! ## Requests
//!
//! `Effect::Fetch` spawns a tokio task that calls the [`PostsApi`] and sends
//! the matching `*Fetched` action back over a channel. The loop drains that
//! channel every iteration; the core decides whether a response still
//! belongs to a mounted screen.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::api::{HttpClient, PostsApi};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::navigation::Route;
use crate::core::query::{FetchRequest, QueryKey};
use crate::core::screen::Screen;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{PostDetailsState, PostListEvent, PostListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    pub post_list: PostListState,
    pub post_details: PostDetailsState,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    info!("Using API at {}", config.base_url);
    let api: Arc<dyn PostsApi> = Arc::new(HttpClient::new(config.base_url));
    let mut app = App::new();
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable mouse capture: {}", e))
        .ok();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if let Some(fetch) = app.start() {
        spawn_fetch(api.clone(), fetch, tx.clone());
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut shown_route = app.navigation.params();

    'event_loop: loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = dispatch_event(&event, &app, &mut tui) else {
                continue;
            };
            if run_effect(update(&mut app, action), &api, &tx) {
                break 'event_loop;
            }
            sync_route(&app, &mut tui, &mut shown_route);
        }

        // Handle responses from fetch tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if run_effect(update(&mut app, action), &api, &tx) {
                break 'event_loop;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Performs an effect. Returns true if the app should exit.
fn run_effect(effect: Effect, api: &Arc<dyn PostsApi>, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::Quit => true,
        Effect::Fetch(fetch) => {
            spawn_fetch(api.clone(), fetch, tx.clone());
            false
        }
        Effect::None => false,
    }
}

/// Maps a terminal event to a core action for whichever screen is on top.
/// Presentation-only events (selection, scrolling) are absorbed here.
fn dispatch_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    match app.current_screen() {
        Screen::Posts(screen) => {
            if matches!(event, TuiEvent::Quit) {
                return Some(Action::Quit);
            }
            tui.post_list.set_item_count(screen.posts().len());
            match tui.post_list.handle_event(event)? {
                PostListEvent::Refresh => Some(Action::Refresh),
                PostListEvent::Open(index) => screen.activate(index).map(Action::Navigate),
            }
        }
        Screen::PostDetails(_) => match event {
            TuiEvent::Back | TuiEvent::Quit => Some(Action::Back),
            _ => {
                tui.post_details.handle_event(event);
                None
            }
        },
    }
}

/// Detail scroll position belongs to one post; start fresh when another is shown.
fn sync_route(app: &App, tui: &mut TuiState, shown_route: &mut Route) {
    let route = app.navigation.params();
    if route != *shown_route {
        debug!("Route changed: {} -> {}", shown_route, route);
        if matches!(route, Route::PostDetails(_)) {
            tui.post_details = PostDetailsState::new();
        }
        *shown_route = route;
    }
}

fn spawn_fetch(api: Arc<dyn PostsApi>, fetch: FetchRequest, tx: mpsc::Sender<Action>) {
    info!("Spawning fetch {:?} ({:?})", fetch.key, fetch.request);
    tokio::spawn(async move {
        let action = match fetch.key {
            QueryKey::Posts => Action::PostsFetched {
                request: fetch.request,
                result: api.fetch_posts().await,
            },
            QueryKey::Comments { post_id } => Action::CommentsFetched {
                post_id,
                request: fetch.request,
                result: api.fetch_comments(post_id).await,
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver {:?}: receiver dropped", fetch.key);
        }
    });
}

/// Renders into an in-memory terminal and returns the buffer as one string.
#[cfg(test)]
pub(crate) fn test_render(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::core::navigation::PostDetailsParams;
    use crate::test_support::{StubApi, loaded_app, sample_comments};

    #[test]
    fn test_force_quit_from_any_screen() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        assert_eq!(dispatch_event(&TuiEvent::ForceQuit, &app, &mut tui), Some(Action::Quit));

        update(&mut app, Action::Navigate(Route::post_details(1)));
        assert_eq!(dispatch_event(&TuiEvent::ForceQuit, &app, &mut tui), Some(Action::Quit));
    }

    #[test]
    fn test_enter_on_post_navigates_to_details_with_its_id() {
        let app = loaded_app();
        let mut tui = TuiState::new();

        dispatch_event(&TuiEvent::CursorDown, &app, &mut tui);
        let action = dispatch_event(&TuiEvent::Submit, &app, &mut tui);
        assert_eq!(
            action,
            Some(Action::Navigate(Route::PostDetails(PostDetailsParams { post_id: 2 })))
        );
    }

    #[test]
    fn test_refresh_key_maps_to_one_refresh_action() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        assert_eq!(dispatch_event(&TuiEvent::Refresh, &app, &mut tui), Some(Action::Refresh));
    }

    #[test]
    fn test_details_back_and_q_pop() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::Navigate(Route::post_details(1)));

        assert_eq!(dispatch_event(&TuiEvent::Back, &app, &mut tui), Some(Action::Back));
        assert_eq!(dispatch_event(&TuiEvent::Quit, &app, &mut tui), Some(Action::Back));
        assert_eq!(dispatch_event(&TuiEvent::Refresh, &app, &mut tui), None);
    }

    #[test]
    fn test_q_on_list_quits() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        assert_eq!(dispatch_event(&TuiEvent::Quit, &app, &mut tui), Some(Action::Quit));
    }

    #[test]
    fn test_sync_route_resets_details_scroll() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        let mut shown = app.navigation.params();

        update(&mut app, Action::Navigate(Route::post_details(1)));
        tui.post_details.cards.heights = vec![4, 4];
        sync_route(&app, &mut tui, &mut shown);
        assert_eq!(shown, Route::post_details(1));
        assert!(tui.post_details.cards.heights.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_spawn_fetch_delivers_comments_action() {
        let api: Arc<dyn PostsApi> = Arc::new(StubApi::with_comments(Ok(sample_comments())));
        let mut app = loaded_app();
        let Effect::Fetch(fetch) = update(&mut app, Action::Navigate(Route::post_details(1))) else {
            panic!("expected a fetch");
        };

        let (tx, rx) = mpsc::channel();
        spawn_fetch(api, fetch, tx);
        let action = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(
            action,
            Action::CommentsFetched {
                post_id: 1,
                request: fetch.request,
                result: Ok(sample_comments()),
            }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_spawn_fetch_delivers_posts_error() {
        let error = ApiError::Api {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        let api: Arc<dyn PostsApi> = Arc::new(StubApi::with_posts(Err(error.clone())));
        let mut app = App::new();
        let fetch = app.start().unwrap();

        let (tx, rx) = mpsc::channel();
        spawn_fetch(api, fetch, tx);
        let action = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(
            action,
            Action::PostsFetched { result: Err(ref e), .. } if *e == error
        ));
    }
}

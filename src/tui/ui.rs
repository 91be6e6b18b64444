use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::screen::Screen;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{PostDetails, PostList, TitleBar};

/// Projects the current state onto the terminal. Called on every change.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    let screen = app.current_screen();
    let spinner = app.is_loading().then_some(spinner_frame);
    TitleBar::new(route_title(screen), app.status_message.clone(), spinner).render(frame, title_area);

    match screen {
        Screen::Posts(posts) => {
            PostList::new(&mut tui.post_list, posts.view(), spinner_frame).render(frame, main_area);
        }
        Screen::PostDetails(details) => {
            PostDetails::new(
                &mut tui.post_details,
                details.post_id(),
                details.view(),
                spinner_frame,
            )
            .render(frame, main_area);
        }
    }
}

fn route_title(screen: &Screen) -> String {
    match screen {
        Screen::Posts(_) => "Posts".to_string(),
        Screen::PostDetails(details) => format!("Post #{}", details.post_id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::navigation::Route;
    use crate::test_support::loaded_app;
    use crate::tui::test_render;

    fn draw(app: &App) -> String {
        let mut tui = TuiState::new();
        test_render(80, 24, |f| draw_ui(f, app, &mut tui, 0))
    }

    #[test]
    fn test_draw_ui_initial_loading() {
        let app = App::new();
        let text = draw(&app);
        assert!(text.contains("PostList | Posts"));
        assert!(text.contains("Loading..."));
    }

    #[test]
    fn test_draw_ui_loaded_posts() {
        let app = loaded_app();
        let text = draw(&app);
        assert!(text.contains("2 posts"));
        assert!(text.contains("Post 1"));
        assert!(text.contains("Body 2"));
    }

    #[test]
    fn test_draw_ui_details_screen() {
        let mut app = loaded_app();
        update(&mut app, Action::Navigate(Route::post_details(2)));
        let text = draw(&app);
        assert!(text.contains("Post #2"));
        assert!(text.contains("Loading comments..."));
        assert!(!text.contains("Body 2"));
    }
}

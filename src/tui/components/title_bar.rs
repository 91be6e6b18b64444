//! # TitleBar Component
//!
//! Top status bar: app name, the route on screen, and the status message,
//! with a spinner while the current screen has a request in flight.
//!
//! Purely presentational. It receives all data as props and has no internal
//! state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new("Post #3".to_string(), "2 comments".to_string(), None);
//! title_bar.render(frame, area);
//! ```
//!
//! Formats:
//!
//! 1. **Fetching**: `"PostList | Posts | ⠋ Refreshing..."`
//! 2. **Status message**: `"PostList | Posts | 20 posts"`
//! 3. **Default**: `"PostList | Posts"`

use crate::tui::component::Component;
use crate::tui::components::status::spinner_glyph;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Human-readable name of the current route
    pub route_title: String,
    /// Status message (e.g., "Loading posts...", "20 posts")
    pub status_message: String,
    /// Spinner frame while a request is in flight
    pub spinner_frame: Option<usize>,
}

impl TitleBar {
    pub fn new(route_title: String, status_message: String, spinner_frame: Option<usize>) -> Self {
        Self {
            route_title,
            status_message,
            spinner_frame,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![
            Span::styled(
                "PostList",
                Style::default()
                    .fg(Color::Rgb(0xff, 0x6f, 0x61))
                    .add_modifier(Modifier::BOLD),
            ),
            separator.clone(),
            Span::raw(self.route_title.as_str()),
        ];

        if !self.status_message.is_empty() || self.spinner_frame.is_some() {
            spans.push(separator);
        }
        if let Some(index) = self.spinner_frame {
            spans.push(Span::styled(
                format!("{} ", spinner_glyph(index)),
                Style::default().fg(Color::Blue),
            ));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                self.status_message.as_str(),
                Style::default().fg(Color::Gray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

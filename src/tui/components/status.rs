//! # Status Components
//!
//! Full-area placeholders a screen shows instead of its list: a loading
//! indicator, an error message, and an empty-state message.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Renders `lines` vertically centered in `area`.
fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let height = (paragraph.line_count(area.width) as u16).min(area.height);
    let [centered] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(paragraph, centered);
}

/// Loading text with an optional spinner in front of it.
pub struct LoadingIndicator<'a> {
    pub label: &'a str,
    pub spinner_frame: Option<usize>,
}

impl Component for LoadingIndicator<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if let Some(index) = self.spinner_frame {
            spans.push(Span::styled(
                format!("{} ", spinner_glyph(index)),
                Style::default().fg(Color::Blue),
            ));
        }
        spans.push(Span::styled(self.label, Style::default().fg(Color::Gray)));
        render_centered(frame, area, vec![Line::from(spans)]);
    }
}

/// Request failure, already formatted as `Error: {message}`.
pub struct ErrorMessage<'a> {
    pub text: &'a str,
    /// Optional second line, e.g. how to retry.
    pub hint: Option<&'a str>,
}

impl Component for ErrorMessage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::styled(
            self.text,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )];
        if let Some(hint) = self.hint {
            lines.push(Line::default());
            lines.push(Line::styled(hint, Style::default().fg(Color::DarkGray)));
        }
        render_centered(frame, area, lines);
    }
}

pub struct EmptyState<'a> {
    pub text: &'a str,
}

impl Component for EmptyState<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        render_centered(
            frame,
            area,
            vec![Line::styled(self.text, Style::default().fg(Color::DarkGray))],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_render;

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_glyph(0), "⠋");
        assert_eq!(spinner_glyph(10), "⠋");
        assert_eq!(spinner_glyph(3), "⠸");
    }

    #[test]
    fn test_loading_indicator_renders_label() {
        let text = test_render(40, 5, |f| {
            let area = f.area();
            LoadingIndicator {
                label: "Loading...",
                spinner_frame: None,
            }
            .render(f, area);
        });
        assert!(text.contains("Loading..."));
        assert!(!text.contains("⠋"));
    }

    #[test]
    fn test_loading_indicator_with_spinner() {
        let text = test_render(40, 5, |f| {
            let area = f.area();
            LoadingIndicator {
                label: "Loading comments...",
                spinner_frame: Some(0),
            }
            .render(f, area);
        });
        assert!(text.contains("⠋ Loading comments..."));
    }

    #[test]
    fn test_error_message_with_hint() {
        let text = test_render(60, 6, |f| {
            let area = f.area();
            ErrorMessage {
                text: "Error: Failed to fetch",
                hint: Some("Press r to retry"),
            }
            .render(f, area);
        });
        assert!(text.contains("Error: Failed to fetch"));
        assert!(text.contains("Press r to retry"));
    }
}

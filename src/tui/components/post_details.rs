//! # PostDetails Component
//!
//! The detail screen: comments of one post, or a loading / error / empty
//! placeholder. Read-only; the only interaction is scrolling.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::screen::{EMPTY_COMMENTS_TEXT, PostDetailsView};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::card::Card;
use crate::tui::components::card_list::{CardList, CardListState};
use crate::tui::components::status::{EmptyState, ErrorMessage, LoadingIndicator};
use crate::tui::event::TuiEvent;

pub const LOADING_COMMENTS_TEXT: &str = "Loading comments...";

const COMMENT_ACCENT: Color = Color::Cyan;

/// Persistent state for the detail screen. Reset whenever a different post
/// is opened.
#[derive(Default)]
pub struct PostDetailsState {
    pub cards: CardListState,
}

impl PostDetailsState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for PostDetailsState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        self.cards.handle_event(event)
    }
}

/// Transient render wrapper for the detail screen.
pub struct PostDetails<'a> {
    state: &'a mut PostDetailsState,
    post_id: u64,
    view: PostDetailsView<'a>,
    spinner_frame: usize,
}

impl<'a> PostDetails<'a> {
    pub fn new(
        state: &'a mut PostDetailsState,
        post_id: u64,
        view: PostDetailsView<'a>,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            post_id,
            view,
            spinner_frame,
        }
    }
}

impl Component for PostDetails<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hints = match self.view {
            PostDetailsView::Ready(_) => " ↑↓ Scroll  Esc Back ",
            _ => " Esc Back ",
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Post #{} ", self.post_id))
            .title_bottom(Line::from(hints).centered());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let heading = self.view.heading();
        match &self.view {
            PostDetailsView::Loading => LoadingIndicator {
                label: LOADING_COMMENTS_TEXT,
                spinner_frame: Some(self.spinner_frame),
            }
            .render(frame, inner),
            PostDetailsView::Error(text) => ErrorMessage { text, hint: None }.render(frame, inner),
            PostDetailsView::Empty => EmptyState {
                text: EMPTY_COMMENTS_TEXT,
            }
            .render(frame, inner),
            PostDetailsView::Ready(comments) => {
                let [heading_area, _, list_area] = Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Length(1), // Spacer
                    Constraint::Min(0),
                ])
                .areas(inner);

                if let Some(heading) = heading {
                    let title = Line::styled(
                        heading,
                        Style::default().add_modifier(Modifier::BOLD),
                    )
                    .centered();
                    frame.render_widget(Paragraph::new(title), heading_area);
                }

                let cards = comments
                    .iter()
                    .map(|comment| {
                        let card = Card::new(&comment.name, &comment.body).accent(COMMENT_ACCENT);
                        if comment.email.is_empty() {
                            card
                        } else {
                            card.label(&comment.email)
                        }
                    })
                    .collect();
                CardList::new(&mut self.state.cards, cards).render(frame, list_area);
            }
        }
    }
}

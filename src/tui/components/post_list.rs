//! # PostList Component
//!
//! The list screen: loading text, an error message, or the posts as cards.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PostListState` lives in `TuiState` (selection, scroll, layout)
//! - `PostList` is created each frame with the current `PostsView`
//!
//! Events the user can trigger here are reported as `PostListEvent`s; the
//! event loop turns them into core actions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::screen::PostsView;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::card::Card;
use crate::tui::components::card_list::{CardList, CardListState};
use crate::tui::components::status::{EmptyState, ErrorMessage, LoadingIndicator, spinner_glyph};
use crate::tui::event::TuiEvent;

/// How many items Page Up / Page Down move the selection.
const PAGE_STEP: usize = 5;

pub const LOADING_TEXT: &str = "Loading...";
pub const REFRESHING_TEXT: &str = "Refreshing...";

/// Events emitted by the post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostListEvent {
    /// The item at this index was activated (Enter or click).
    Open(usize),
    /// The refresh control was triggered.
    Refresh,
}

/// Persistent state for the post list.
#[derive(Default)]
pub struct PostListState {
    pub cards: CardListState,
    pub selected: usize,
    item_count: usize,
    /// Keep the selected card in view on the next render. Cleared by free
    /// scrolling so the mouse wheel isn't fought.
    follow_selection: bool,
}

impl PostListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sync with the number of posts currently shown.
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    pub fn selected_index(&self) -> Option<usize> {
        (self.item_count > 0).then_some(self.selected)
    }

    fn select(&mut self, index: usize) {
        if self.item_count == 0 {
            return;
        }
        self.selected = index.min(self.item_count - 1);
        self.follow_selection = true;
    }
}

impl EventHandler for PostListState {
    type Event = PostListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Refresh => Some(PostListEvent::Refresh),
            TuiEvent::Submit => self.selected_index().map(PostListEvent::Open),
            TuiEvent::MouseClick(column, row) => {
                let index = self.cards.hit_test(*column, *row)?;
                self.select(index);
                Some(PostListEvent::Open(index))
            }
            TuiEvent::CursorUp => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.select(self.selected + 1);
                None
            }
            TuiEvent::ScrollPageUp => {
                self.select(self.selected.saturating_sub(PAGE_STEP));
                None
            }
            TuiEvent::ScrollPageDown => {
                self.select(self.selected + PAGE_STEP);
                None
            }
            TuiEvent::ScrollToTop => {
                self.select(0);
                None
            }
            TuiEvent::ScrollToBottom => {
                self.select(self.item_count.saturating_sub(1));
                None
            }
            TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
                self.follow_selection = false;
                self.cards.handle_event(event);
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the list screen.
pub struct PostList<'a> {
    state: &'a mut PostListState,
    view: PostsView<'a>,
    spinner_frame: usize,
}

impl<'a> PostList<'a> {
    pub fn new(state: &'a mut PostListState, view: PostsView<'a>, spinner_frame: usize) -> Self {
        Self {
            state,
            view,
            spinner_frame,
        }
    }

    fn key_hints(&self) -> &'static str {
        match self.view {
            PostsView::Loading => " q Quit ",
            PostsView::Error { .. } => " r Retry  q Quit ",
            PostsView::Ready { .. } => " ↑↓ Select  Enter Open  r Refresh  q Quit ",
        }
    }
}

impl Component for PostList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Posts ")
            .title_bottom(Line::from(self.key_hints()).centered());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.view {
            PostsView::Loading => {
                self.state.set_item_count(0);
                LoadingIndicator {
                    label: LOADING_TEXT,
                    spinner_frame: None,
                }
                .render(frame, inner);
            }
            PostsView::Error { text, refreshing } => {
                self.state.set_item_count(0);
                let hint = if *refreshing {
                    REFRESHING_TEXT
                } else {
                    "Press r to retry"
                };
                ErrorMessage {
                    text,
                    hint: Some(hint),
                }
                .render(frame, inner);
            }
            PostsView::Ready { posts, refreshing } => {
                self.state.set_item_count(posts.len());

                let list_area = if *refreshing {
                    let [indicator_area, list_area] =
                        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
                    let indicator = Line::from(vec![
                        Span::styled(
                            format!("{} ", spinner_glyph(self.spinner_frame)),
                            Style::default().fg(Color::Blue),
                        ),
                        Span::styled(REFRESHING_TEXT, Style::default().fg(Color::Gray)),
                    ])
                    .centered();
                    frame.render_widget(Paragraph::new(indicator), indicator_area);
                    list_area
                } else {
                    inner
                };

                if posts.is_empty() {
                    EmptyState { text: "No posts." }.render(frame, list_area);
                    return;
                }

                let labels: Vec<String> = posts.iter().map(|post| format!("#{}", post.id)).collect();
                let selected = self.state.selected;
                let cards = posts
                    .iter()
                    .zip(&labels)
                    .enumerate()
                    .map(|(i, (post, label))| {
                        Card::new(&post.title, &post.body)
                            .label(label)
                            .selected(i == selected)
                    })
                    .collect();

                let reveal = std::mem::take(&mut self.state.follow_selection).then_some(selected);
                CardList::new(&mut self.state.cards, cards)
                    .reveal(reveal)
                    .render(frame, list_area);
            }
        }
    }
}

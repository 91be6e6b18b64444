//! # CardList Component
//!
//! Vertical stack of [`Card`]s inside a `ScrollView`. Shared by the post list
//! and the comment list.
//!
//! ## Architecture
//!
//! `CardList` is a transient component (created each frame) that wraps
//! `&'a mut CardListState` (persistent state) and the cards to draw (props).
//! Heights are measured during the render pass and kept in the state so
//! scrolling and hit testing between frames use the last drawn layout.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::card::Card;
use crate::tui::event::TuiEvent;

/// Scroll position and last measured layout. Lives in `TuiState`.
#[derive(Default)]
pub struct CardListState {
    pub scroll_state: ScrollViewState,
    /// Height of each card at the last rendered width
    pub heights: Vec<u16>,
    /// Running sum of `heights`: `prefix_heights[i]` is the bottom edge of card `i`
    pub prefix_heights: Vec<u16>,
    /// Screen area the list was last drawn into
    pub viewport: Rect,
}

impl CardListState {
    pub fn new() -> Self {
        Self::default()
    }

    fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport.height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll so card `index` is fully visible. Cards taller than the
    /// viewport are aligned by their top edge.
    pub fn scroll_to(&mut self, index: usize) {
        if index >= self.prefix_heights.len() {
            return;
        }

        let item_top = if index == 0 {
            0
        } else {
            self.prefix_heights[index - 1]
        };
        let item_bottom = self.prefix_heights[index];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
        } else if item_bottom > offset_y.saturating_add(self.viewport.height) {
            let new_y = item_bottom
                .saturating_sub(self.viewport.height)
                .min(item_top);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    /// Which card, if any, is drawn at the given screen position.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        if !self.viewport.contains(Position { x: column, y: row }) {
            return None;
        }
        let content_y = (row - self.viewport.y).saturating_add(self.scroll_state.offset().y);
        let index = self
            .prefix_heights
            .partition_point(|&bottom| bottom <= content_y);
        (index < self.prefix_heights.len()).then_some(index)
    }
}

/// Handles free scrolling only; selection is the owner's business.
impl EventHandler for CardListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown | TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::ScrollToTop => self.scroll_state.scroll_to_top(),
            TuiEvent::ScrollToBottom => self.scroll_state.scroll_to_bottom(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

pub struct CardList<'a> {
    pub state: &'a mut CardListState,
    pub cards: Vec<Card<'a>>,
    /// Card to bring into view during this render
    pub reveal: Option<usize>,
}

impl<'a> CardList<'a> {
    pub fn new(state: &'a mut CardListState, cards: Vec<Card<'a>>) -> Self {
        Self {
            state,
            cards,
            reveal: None,
        }
    }

    pub fn reveal(mut self, index: Option<usize>) -> Self {
        self.reveal = index;
        self
    }
}

impl Component for CardList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Measure
        self.state.heights = self
            .cards
            .iter()
            .map(|card| Card::calculate_height(card.heading, card.body, content_width))
            .collect();
        self.state.rebuild_prefix_heights();
        self.state.viewport = area;

        // 2. Position
        match self.reveal {
            Some(index) => self.state.scroll_to(index),
            None => self.state.clamp_scroll(),
        }

        // 3. Draw
        let mut scroll_view = ScrollView::new(Size::new(content_width, self.state.total_height()))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (card, &height) in self.cards.iter().zip(&self.state.heights) {
            scroll_view.render_widget(*card, Rect::new(0, y_offset, content_width, height));
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

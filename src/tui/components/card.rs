use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A bordered block with a bold heading line followed by wrapped body text.
/// Used for both posts and comments.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` so the parent list can lay out its `ScrollView` canvas
/// before anything is drawn.
#[derive(Clone, Copy)]
pub struct Card<'a> {
    pub heading: &'a str,
    pub body: &'a str,
    /// Shown in the top border, e.g. `#12` or an email address.
    pub label: Option<&'a str>,
    pub is_selected: bool,
    pub accent: Color,
}

impl<'a> Card<'a> {
    pub fn new(heading: &'a str, body: &'a str) -> Self {
        Self {
            heading,
            body,
            label: None,
            is_selected: false,
            accent: Color::Rgb(0xff, 0x6f, 0x61),
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }

    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    /// Height needed to show the whole card at `width`.
    ///
    /// The wrapping options mirror `Paragraph`'s word wrapping so the
    /// prediction matches what gets drawn.
    pub fn calculate_height(heading: &str, body: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let count = |text: &str| -> u16 {
            let text = text.trim();
            if text.is_empty() {
                0
            } else {
                text.lines()
                    .map(|line| textwrap::wrap(line, &options).len().max(1) as u16)
                    .sum()
            }
        };

        (count(heading) + count(body)).max(1) + VERTICAL_OVERHEAD
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let border_style = if self.is_selected {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
        };

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        if let Some(label) = self.label {
            block = block.title(Line::styled(format!(" {label} "), border_style));
        }

        let inner_area = block.inner(area);
        block.render(area, buf);

        let heading_style = if self.is_selected {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let mut lines: Vec<Line> = self
            .heading
            .trim()
            .lines()
            .map(|line| Line::styled(line, heading_style))
            .collect();
        lines.extend(
            self.body
                .trim()
                .lines()
                .map(|line| Line::styled(line, Style::default().fg(Color::Gray))),
        );

        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

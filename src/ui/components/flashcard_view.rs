use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::flashcards::FlashcardDeck;
use crate::ui::theme::Theme;

pub struct FlashcardView<'a> {
    deck: &'a FlashcardDeck,
    theme: &'a Theme,
}

impl<'a> FlashcardView<'a> {
    pub fn new(deck: &'a FlashcardDeck, theme: &'a Theme) -> Self {
        Self { deck, theme }
    }
}

impl Widget for FlashcardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = format!(
            " Flashcards · {} · {} · {}/{} ",
            self.deck.category(),
            self.deck.mode().display(),
            self.deck.position() + 1,
            self.deck.len()
        );
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            self.deck.front().to_string(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        let back = if self.deck.is_flipped() {
            Span::styled(self.deck.back().to_string(), Style::default().fg(colors.fg()))
        } else {
            Span::styled("?", Style::default().fg(colors.text_pending()))
        };
        Paragraph::new(Line::from(back))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(layout[2], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  [Space] Flip  ", Style::default().fg(colors.accent())),
            Span::styled("[n] Next  ", Style::default().fg(colors.accent())),
            Span::styled("[m] Mode  ", Style::default().fg(colors.accent())),
            Span::styled("[a] All categories  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Menu", Style::default().fg(colors.accent())),
        ]))
        .render(layout[4], buf);
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::kanji::KanjiDrill;
use crate::ui::theme::Theme;

pub struct KanjiView<'a> {
    drill: &'a KanjiDrill,
    theme: &'a Theme,
}

impl<'a> KanjiView<'a> {
    pub fn new(drill: &'a KanjiDrill, theme: &'a Theme) -> Self {
        Self { drill, theme }
    }
}

impl Widget for KanjiView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let card = self.drill.current();

        let title = format!(
            " Kanji · {} · {} · {}/{} ",
            self.drill.level(),
            self.drill.mode().display(),
            self.drill.position() + 1,
            self.drill.len()
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
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(vec![
            Line::from(Span::styled(
                card.character.clone(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Grade {} · JLPT {}", card.grade, card.jlpt),
                Style::default().fg(colors.text_pending()),
            )),
        ])
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        let mut details: Vec<Line> = self
            .drill
            .details()
            .into_iter()
            .map(|d| Line::from(Span::styled(d, Style::default().fg(colors.fg()))))
            .collect();
        if !self.drill.is_revealed() {
            details.push(Line::from(Span::styled(
                "?",
                Style::default().fg(colors.text_pending()),
            )));
        }
        Paragraph::new(details)
            .alignment(Alignment::Center)
            .render(layout[2], buf);

        Paragraph::new(Line::from(Span::styled(
            "  [Space] Reveal  [n] Next  [m] Mode  [Tab] Level  [q] Menu",
            Style::default().fg(colors.accent()),
        )))
        .render(layout[4], buf);
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::grammar::GrammarBrowser;
use crate::ui::theme::Theme;

/// Topic list on the left, the selected topic's sections on the right.
pub struct GrammarView<'a> {
    browser: &'a GrammarBrowser,
    theme: &'a Theme,
}

impl<'a> GrammarView<'a> {
    pub fn new(browser: &'a GrammarBrowser, theme: &'a Theme) -> Self {
        Self { browser, theme }
    }
}

impl Widget for GrammarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Grammar · {} ", self.browser.level()))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(rows[0]);

        let topics: Vec<Line> = self
            .browser
            .topics()
            .iter()
            .enumerate()
            .map(|(i, topic)| {
                if i == self.browser.selected() {
                    Line::from(Span::styled(
                        format!(" > {}", topic.topic),
                        Style::default()
                            .fg(colors.accent())
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("   {}", topic.topic),
                        Style::default().fg(colors.fg()),
                    ))
                }
            })
            .collect();
        Paragraph::new(topics).render(columns[0], buf);

        let mut notes: Vec<Line> = Vec::new();
        for section in &self.browser.current().content {
            notes.push(Line::from(Span::styled(
                section.title.clone(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
            for example in &section.examples {
                notes.push(Line::from(vec![
                    Span::styled(format!("  {}", example.japanese), Style::default().fg(colors.fg())),
                    Span::styled(
                        format!("  {}", example.meaning),
                        Style::default().fg(colors.text_pending()),
                    ),
                ]));
            }
            notes.push(Line::from(""));
        }
        Paragraph::new(notes)
            .wrap(Wrap { trim: false })
            .render(columns[1], buf);

        Paragraph::new(Line::from(Span::styled(
            "  [j/k] Topic  [Tab] Level  [q] Menu",
            Style::default().fg(colors.accent()),
        )))
        .render(rows[1], buf);
    }
}

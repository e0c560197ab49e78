use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::quiz::{QuizSnapshot, QuizState};
use crate::ui::theme::Theme;

/// Verdict on the previous answer, shown above the next prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    pub correct_answer: String,
}

pub struct QuizArea<'a> {
    snapshot: &'a QuizSnapshot,
    input: &'a str,
    feedback: Option<&'a Feedback>,
    theme: &'a Theme,
}

impl<'a> QuizArea<'a> {
    pub fn new(
        snapshot: &'a QuizSnapshot,
        input: &'a str,
        feedback: Option<&'a Feedback>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            snapshot,
            input,
            feedback,
            theme,
        }
    }

    fn prompt_lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let Some(prompt) = self.snapshot.prompt.as_ref() else {
            return vec![Line::from("")];
        };

        let mut lines = Vec::new();
        if let Some(ref word) = prompt.word {
            lines.push(Line::from(Span::styled(
                word.clone(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(ref reading) = prompt.reading {
            lines.push(Line::from(Span::styled(
                reading.clone(),
                Style::default().fg(colors.fg()),
            )));
        }
        if let Some(ref meaning) = prompt.meaning {
            lines.push(Line::from(Span::styled(
                meaning.clone(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines
    }

    fn answer_lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;

        if self.snapshot.options.is_empty() {
            return vec![Line::from(vec![
                Span::styled("Reading: ", Style::default().fg(colors.text_pending())),
                Span::styled(self.input.to_string(), Style::default().fg(colors.fg())),
                Span::styled("_", Style::default().fg(colors.accent())),
            ])];
        }

        self.snapshot
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", i + 1),
                        Style::default().fg(colors.accent()),
                    ),
                    Span::styled(option.clone(), Style::default().fg(colors.fg())),
                ])
            })
            .collect()
    }

    fn feedback_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        if self.snapshot.state == QuizState::Paused {
            return Line::from(Span::styled(
                "Paused. Press [Tab] to resume",
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        match self.feedback {
            Some(fb) if fb.is_correct => Line::from(Span::styled(
                "Correct!",
                Style::default().fg(colors.text_correct()),
            )),
            Some(fb) => Line::from(Span::styled(
                format!("Incorrect. The answer was {}", fb.correct_answer),
                Style::default().fg(colors.text_incorrect()),
            )),
            None => Line::from(""),
        }
    }
}

impl Widget for QuizArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = format!(
            " {} · {} · {} ",
            self.snapshot.question_type.display(),
            self.snapshot.category,
            self.snapshot.difficulty.display()
        );
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(colors.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        let answer_height = self.snapshot.options.len().max(1) as u16;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(answer_height),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(self.feedback_line())
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        Paragraph::new(self.prompt_lines())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(layout[1], buf);

        Paragraph::new(self.answer_lines()).render(layout[3], buf);
    }
}

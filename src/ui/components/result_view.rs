use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::result::QuizResult;
use crate::ui::theme::Theme;

/// Summary of a finished quiz with the error review below it.
pub struct ResultView<'a> {
    pub result: &'a QuizResult,
    pub theme: &'a Theme,
    /// Best percentage recorded earlier for the same category.
    pub previous_best: Option<f64>,
}

impl<'a> ResultView<'a> {
    pub fn new(result: &'a QuizResult, theme: &'a Theme, previous_best: Option<f64>) -> Self {
        Self {
            result,
            theme,
            previous_best,
        }
    }
}

impl Widget for ResultView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Quiz Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                self.result.end_reason.describe(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  {} · {}",
                    self.result.category,
                    self.result.difficulty.display()
                ),
                Style::default().fg(colors.text_pending()),
            ),
        ]))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let pct_color = if self.result.percentage >= 80.0 {
            colors.text_correct()
        } else if self.result.percentage >= 50.0 {
            colors.warning()
        } else {
            colors.text_incorrect()
        };
        let mut score_spans = vec![
            Span::styled("  Score:      ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{:.1}%", self.result.percentage),
                Style::default().fg(pct_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({}/{} correct)", self.result.score, self.result.total),
                Style::default().fg(colors.text_pending()),
            ),
        ];
        if let Some(best) = self.previous_best {
            score_spans.push(Span::styled(
                format!("  best {best:.1}%"),
                Style::default().fg(colors.text_pending()),
            ));
        }
        Paragraph::new(Line::from(score_spans)).render(layout[1], buf);

        let time_line = Line::from(vec![
            Span::styled("  Time:       ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{}s", self.result.elapsed_secs),
                Style::default().fg(colors.fg()),
            ),
        ]);
        Paragraph::new(time_line).render(layout[2], buf);

        let streak_line = Line::from(vec![
            Span::styled("  Max streak: ", Style::default().fg(colors.fg())),
            Span::styled(
                self.result.max_streak.to_string(),
                Style::default().fg(colors.accent()),
            ),
        ]);
        Paragraph::new(streak_line).render(layout[3], buf);

        let review: Vec<Line> = if self.result.errors.is_empty() {
            vec![Line::from(Span::styled(
                "  No mistakes to review",
                Style::default().fg(colors.text_correct()),
            ))]
        } else {
            std::iter::once(Line::from(Span::styled(
                "  Review:",
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )))
            .chain(self.result.errors.iter().map(|err| {
                Line::from(vec![
                    Span::styled(
                        format!("    {} ", err.question.word),
                        Style::default().fg(colors.fg()),
                    ),
                    Span::styled(
                        format!("{} ", err.correct_answer),
                        Style::default().fg(colors.text_correct()),
                    ),
                    Span::styled(
                        format!("({}) ", err.question.meaning),
                        Style::default().fg(colors.text_pending()),
                    ),
                    Span::styled(
                        format!("you: {}", display_answer(&err.user_answer)),
                        Style::default().fg(colors.text_incorrect()),
                    ),
                ])
            }))
            .collect()
        };
        Paragraph::new(review).render(layout[5], buf);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [r] Retry  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Menu", Style::default().fg(colors.accent())),
        ]));
        help.render(layout[6], buf);
    }
}

fn display_answer(answer: &str) -> &str {
    if answer.trim().is_empty() {
        "(blank)"
    } else {
        answer
    }
}

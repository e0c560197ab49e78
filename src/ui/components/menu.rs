use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::question::{Difficulty, QuestionType};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Quiz(QuestionType),
    Flashcards,
    Kanji,
    Grammar,
    Settings,
}

pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub description: String,
    pub action: MenuAction,
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
    /// `category · difficulty · count` line under the title.
    pub selection: String,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: "1".to_string(),
                    label: "Typing Quiz".to_string(),
                    description: "Type the reading of each word".to_string(),
                    action: MenuAction::Quiz(QuestionType::Typing),
                },
                MenuItem {
                    key: "2".to_string(),
                    label: "Multiple Choice".to_string(),
                    description: "Pick the reading out of four".to_string(),
                    action: MenuAction::Quiz(QuestionType::MultipleChoice),
                },
                MenuItem {
                    key: "3".to_string(),
                    label: "Matching".to_string(),
                    description: "Match each word with its reading".to_string(),
                    action: MenuAction::Quiz(QuestionType::Matching),
                },
                MenuItem {
                    key: "f".to_string(),
                    label: "Flashcards".to_string(),
                    description: "Flip through a shuffled deck".to_string(),
                    action: MenuAction::Flashcards,
                },
                MenuItem {
                    key: "K".to_string(),
                    label: "Kanji Drill".to_string(),
                    description: "Characters with strokes, readings and meanings".to_string(),
                    action: MenuAction::Kanji,
                },
                MenuItem {
                    key: "g".to_string(),
                    label: "Grammar Notes".to_string(),
                    description: "Browse grammar topics with examples".to_string(),
                    action: MenuAction::Grammar,
                },
                MenuItem {
                    key: "c".to_string(),
                    label: "Settings".to_string(),
                    description: "Theme, session length, flashcard mode".to_string(),
                    action: MenuAction::Settings,
                },
            ],
            selected: 0,
            theme,
            selection: String::new(),
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        self.items[self.selected].action
    }

    pub fn set_selection(&mut self, category: &str, difficulty: Difficulty, question_count: usize) {
        self.selection = format!(
            "{category} · {} · {question_count} questions",
            difficulty.display()
        );
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "japvoc",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Japanese Vocabulary Quiz",
                Style::default().fg(colors.fg()),
            )),
            Line::from(Span::styled(
                &*self.selection,
                Style::default().fg(colors.text_pending()),
            )),
        ];

        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{key}] {label}", key = item.key, label = item.label);
            let desc_text = format!("     {}", item.description);

            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let lines = vec![
                Line::from(Span::styled(&*label_text, label_style)),
                Line::from(Span::styled(
                    &*desc_text,
                    Style::default().fg(colors.text_pending()),
                )),
            ];

            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let theme = Theme::default();
        let mut menu = Menu::new(&theme);
        menu.prev();
        assert_eq!(menu.selected_action(), MenuAction::Settings);
        menu.next();
        assert_eq!(
            menu.selected_action(),
            MenuAction::Quiz(QuestionType::Typing)
        );
    }

    #[test]
    fn test_selection_line() {
        let theme = Theme::default();
        let mut menu = Menu::new(&theme);
        menu.set_selection("animals", Difficulty::Hard, 15);
        assert_eq!(menu.selection, "animals · Hard · 15 questions");
    }

    #[test]
    fn test_drill_entries_listed() {
        let theme = Theme::default();
        let menu = Menu::new(&theme);
        let keys: Vec<(&str, MenuAction)> =
            menu.items.iter().map(|i| (i.key.as_str(), i.action)).collect();
        assert!(keys.contains(&("K", MenuAction::Kanji)));
        assert!(keys.contains(&("g", MenuAction::Grammar)));
    }
}

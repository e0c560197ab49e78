use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::engine::scoring;
use crate::ui::theme::Theme;

/// Question progress through a quiz, labelled `answered/total`.
pub struct QuizProgressBar<'a> {
    pub answered: usize,
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> QuizProgressBar<'a> {
    pub fn new(answered: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            answered: answered.min(total),
            total,
            theme,
        }
    }

    fn ratio(&self) -> f64 {
        scoring::progress(self.answered, self.total)
    }
}

impl Widget for QuizProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Progress ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio() * inner.width as f64) as u16;
        let label = format!("{}/{}", self.answered, self.total);

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            footer: vertical[2],
        }
    }
}

/// Greedily pack footer hints into lines no wider than `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    const SEPARATOR: &str = "  ";
    if width == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    for hint in hints.iter().filter(|h| !h.is_empty()) {
        match lines.last_mut() {
            Some(line) if line.chars().count() + SEPARATOR.len() + hint.chars().count() <= width => {
                line.push_str(SEPARATOR);
                line.push_str(hint);
            }
            _ => lines.push(format!(" {hint}")),
        }
    }
    lines
}

/// A `percent_x` by `percent_y` box centred in `area`, never smaller than
/// what the quiz and result panels need unless `area` itself is smaller.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_WIDTH: u16 = 56;
    const MIN_HEIGHT: u16 = 16;

    let scale = |extent: u16, percent: u16, min: u16| {
        let wanted = (u32::from(extent) * u32::from(percent.min(100)) / 100) as u16;
        wanted.max(min).min(extent)
    };
    let width = scale(area.width, percent_x, MIN_WIDTH);
    let height = scale(area.height, percent_y, MIN_HEIGHT);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

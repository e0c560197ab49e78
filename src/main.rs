use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use japvoc::app::{App, AppScreen, SETTINGS_ROWS};
use japvoc::bank::{RawVocabulary, WordBank};
use japvoc::config::Config;
use japvoc::event::{AppEvent, EventHandler};
use japvoc::logging;
use japvoc::session::flashcards::FlashcardMode;
use japvoc::session::question::{Difficulty, QuestionType};
use japvoc::session::quiz::QuizState;
use japvoc::store::json_store::JsonStore;
use japvoc::ui;
use japvoc::ui::components::flashcard_view::FlashcardView;
use japvoc::ui::components::grammar_view::GrammarView;
use japvoc::ui::components::kanji_view::KanjiView;
use japvoc::ui::components::progress_bar::QuizProgressBar;
use japvoc::ui::components::quiz_area::QuizArea;
use japvoc::ui::components::result_view::ResultView;
use japvoc::ui::layout::{AppLayout, pack_hint_lines};

#[derive(Parser)]
#[command(name = "japvoc", version, about = "Japanese vocabulary quiz for the terminal")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Vocabulary category to quiz")]
    category: Option<String>,

    #[arg(short, long, help = "Difficulty (easy, medium, hard)")]
    difficulty: Option<Difficulty>,

    #[arg(short = 'n', long, help = "Questions per quiz (5, 10 or 15)")]
    questions: Option<usize>,

    #[arg(long, help = "Flashcard mode (kanji, reading, meaning)")]
    flashcard_mode: Option<FlashcardMode>,

    #[arg(long, help = "Load vocabulary from a JSON file instead of the bundled table")]
    vocabulary: Option<PathBuf>,

    #[arg(long, help = "Print categories and levels, then exit")]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(category) = cli.category {
        config.category = category;
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(questions) = cli.questions {
        config.question_count = questions;
    }
    if let Some(mode) = cli.flashcard_mode {
        config.flashcard_mode = mode;
    }

    let _log_guard = if cli.list {
        logging::init_stderr_tracing(&config.log_level);
        None
    } else {
        logging::init_file_tracing(&config.log_level, &JsonStore::default_dir().join("logs"))
    };
    if let Some(err) = config_err {
        tracing::warn!(%err, path = %Config::config_path().display(), "config unreadable, using defaults");
    }

    let raw = match cli.vocabulary {
        Some(ref path) => RawVocabulary::from_path(path)
            .with_context(|| format!("loading vocabulary from {}", path.display()))?,
        None => RawVocabulary::bundled()?,
    };
    let bank = WordBank::build(&raw)?;
    config.validate(bank.categories());

    if cli.list {
        print_bank(&bank);
        return Ok(());
    }

    let store = match JsonStore::new() {
        Ok(store) => Some(store),
        Err(err) => {
            tracing::warn!(%err, "progress store unavailable, results will not be saved");
            None
        }
    };
    let mut app = App::new(bank, config, store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.save_config();

    if let Err(err) = result {
        tracing::error!(?err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn print_bank(bank: &WordBank) {
    println!("{} words", bank.len());
    for category in bank.categories() {
        let sizes: Vec<String> = bank
            .levels()
            .iter()
            .map(|level| format!("{level}: {}", bank.words(category, level).len()))
            .collect();
        println!("  {category:<12} {}", sizes.join(", "));
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => {
                handle_key(app, key);
                app.on_tick(Instant::now());
            }
            AppEvent::Tick(now) => app.on_tick(now),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::QuizResult => handle_result_key(app, key),
        AppScreen::Flashcards => handle_flashcard_key(app, key),
        AppScreen::Kanji => handle_kanji_key(app, key),
        AppScreen::Grammar => handle_grammar_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.start_quiz(QuestionType::Typing),
        KeyCode::Char('2') => app.start_quiz(QuestionType::MultipleChoice),
        KeyCode::Char('3') => app.start_quiz(QuestionType::Matching),
        KeyCode::Char('f') => app.start_flashcards(),
        KeyCode::Char('K') => app.start_kanji(),
        KeyCode::Char('g') => app.start_grammar(),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Tab => app.cycle_category(),
        KeyCode::Char('d') => app.cycle_difficulty(),
        KeyCode::Char('n') => app.cycle_question_count(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => app.activate_menu_item(),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    app.handle_quiz_key(key.code, Instant::now());
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.retry_quiz(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_flashcard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => app.flip_card(),
        KeyCode::Char('n') | KeyCode::Right | KeyCode::Char('l') => app.next_card(),
        KeyCode::Char('m') => app.cycle_flashcard_mode(),
        KeyCode::Char('a') => app.toggle_all_categories(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_kanji_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => app.kanji_reveal(),
        KeyCode::Char('n') | KeyCode::Right | KeyCode::Char('l') => app.kanji_next(),
        KeyCode::Char('m') => app.cycle_kanji_mode(),
        KeyCode::Tab => app.cycle_kanji_level(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_grammar_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.grammar_next(),
        KeyCode::Up | KeyCode::Char('k') => app.grammar_prev(),
        KeyCode::Tab => app.cycle_grammar_level(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.leave_settings(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected + 1 < SETTINGS_ROWS {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::QuizResult => render_result(frame, app),
        AppScreen::Flashcards => render_flashcards(frame, app),
        AppScreen::Kanji => render_kanji(frame, app),
        AppScreen::Grammar => render_grammar(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " japvoc ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.to_string(),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hints: &[&str]) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_pending()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let info = format!(
        " {} quizzes | best streak {} | {} words",
        app.progress.total_quizzes,
        app.progress.best_streak,
        app.bank.len()
    );
    render_header(frame, app, layout[0], &info);

    let menu_area = ui::layout::centered_rect(50, 80, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    if let Some(ref notice) = app.notice {
        let notice = Paragraph::new(Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(colors.warning()),
        )));
        frame.render_widget(notice, layout[2]);
    }

    render_footer(
        frame,
        app,
        layout[3],
        &[
            "[1-3] Quiz",
            "[f] Flashcards",
            "[K] Kanji",
            "[g] Grammar",
            "[Tab] Category",
            "[d] Difficulty",
            "[n] Questions",
            "[c] Settings",
            "[q] Quit",
        ],
    );
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let snapshot = app.session.snapshot();
    let app_layout = AppLayout::new(area);

    let paused = if snapshot.state == QuizState::Paused {
        " | PAUSED"
    } else {
        ""
    };
    let info = format!(
        " {}s left | Score {}/{} | Streak {} (best {}){paused}",
        snapshot.time_remaining_secs,
        snapshot.score,
        snapshot.total,
        snapshot.streak,
        snapshot.max_streak,
    );
    render_header(frame, app, app_layout.header, &info);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(app_layout.main);

    let quiz_area = QuizArea::new(&snapshot, &app.input, app.feedback.as_ref(), app.theme);
    frame.render_widget(quiz_area, main[0]);

    let bar = QuizProgressBar::new(snapshot.current_index, snapshot.total, app.theme);
    frame.render_widget(bar, main[1]);

    let hints: &[&str] = if snapshot.question_type.has_options() {
        &["[1-4] Answer", "[Tab] Pause", "[Esc] End quiz"]
    } else {
        &["[Enter] Submit", "[Tab] Pause", "[Esc] End quiz"]
    };
    render_footer(frame, app, app_layout.footer, hints);
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    if let Some(result) = app.session.result() {
        let centered = ui::layout::centered_rect(70, 80, frame.area());
        let view = ResultView::new(result, app.theme, app.previous_best);
        frame.render_widget(view, centered);
    }
}

fn render_flashcards(frame: &mut ratatui::Frame, app: &App) {
    if let Some(ref deck) = app.deck {
        let centered = ui::layout::centered_rect(60, 50, frame.area());
        frame.render_widget(FlashcardView::new(deck, app.theme), centered);
    }
}

fn render_kanji(frame: &mut ratatui::Frame, app: &App) {
    if let Some(ref drill) = app.drill {
        let centered = ui::layout::centered_rect(60, 50, frame.area());
        frame.render_widget(KanjiView::new(drill, app.theme), centered);
    }
}

fn render_grammar(frame: &mut ratatui::Frame, app: &App) {
    if let Some(ref browser) = app.grammar_browser {
        let centered = ui::layout::centered_rect(80, 80, frame.area());
        frame.render_widget(GrammarView::new(browser, app.theme), centered);
    }
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 80, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: [(&str, String); SETTINGS_ROWS] = [
        ("Theme", app.config.theme.clone()),
        ("Session Length", format!("{}s", app.config.session_seconds)),
        (
            "Flashcard Mode",
            app.config.flashcard_mode.display().to_string(),
        ),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.text_pending()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = if is_selected {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };
        let value_style = Style::default().fg(if is_selected {
            colors.accent()
        } else {
            colors.text_pending()
        });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(format!("  < {value} >"), value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flashcard_mode() {
        let cli = Cli::try_parse_from(["japvoc", "--flashcard-mode", "meaning"]).unwrap();
        assert_eq!(cli.flashcard_mode, Some(FlashcardMode::Meaning));
        assert!(Cli::try_parse_from(["japvoc", "--flashcard-mode", "audio"]).is_err());
    }
}

use std::time::Instant;

use crossterm::event::KeyCode;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::bank::WordBank;
use crate::config::{Config, MAX_SESSION_SECS, MIN_SESSION_SECS, QUESTION_COUNTS};
use crate::session::flashcards::{ALL_CATEGORIES, FlashcardDeck};
use crate::session::grammar::{GrammarBrowser, GrammarTable};
use crate::session::kanji::{ALL_LEVELS, KanjiDrill, KanjiMode, KanjiTable};
use crate::session::question::{Difficulty, QuestionType};
use crate::session::quiz::{QuizSession, QuizState};
use crate::session::result::EndReason;
use crate::session::timer::{SecondClock, TickOutcome};
use crate::session::QuizError;
use crate::store::json_store::JsonStore;
use crate::store::schema::ProgressData;
use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::components::quiz_area::Feedback;
use crate::ui::theme::Theme;

const SESSION_SECS_STEP: u32 = 10;
pub const SETTINGS_ROWS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Quiz,
    QuizResult,
    Flashcards,
    Kanji,
    Grammar,
    Settings,
}

pub struct App {
    pub screen: AppScreen,
    pub bank: WordBank,
    pub session: QuizSession,
    pub deck: Option<FlashcardDeck>,
    pub kanji: KanjiTable,
    pub drill: Option<KanjiDrill>,
    pub grammar: GrammarTable,
    pub grammar_browser: Option<GrammarBrowser>,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub progress: ProgressData,
    pub store: Option<JsonStore>,
    /// Typed answer for the current typing question.
    pub input: String,
    pub feedback: Option<Feedback>,
    /// One-line message for the menu footer, e.g. why a quiz couldn't start.
    pub notice: Option<String>,
    /// Best score for the finished quiz's category before it was recorded.
    pub previous_best: Option<f64>,
    pub should_quit: bool,
    pub settings_selected: usize,
    clock: Option<SecondClock>,
    rng: SmallRng,
}

impl App {
    pub fn new(bank: WordBank, config: Config, store: Option<JsonStore>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let mut menu = Menu::new(theme);
        menu.set_selection(&config.category, config.difficulty, config.question_count);

        let progress = store
            .as_ref()
            .map(JsonStore::load_progress_or_reset)
            .unwrap_or_default();
        let kanji = KanjiTable::bundled().unwrap_or_else(|err| {
            tracing::warn!(%err, "kanji table unavailable");
            KanjiTable::default()
        });
        let grammar = GrammarTable::bundled().unwrap_or_else(|err| {
            tracing::warn!(%err, "grammar notes unavailable");
            GrammarTable::default()
        });

        Self {
            screen: AppScreen::Menu,
            bank,
            session: QuizSession::with_budget(config.session_seconds),
            deck: None,
            kanji,
            drill: None,
            grammar,
            grammar_browser: None,
            menu,
            theme,
            config,
            progress,
            store,
            input: String::new(),
            feedback: None,
            notice: None,
            previous_best: None,
            should_quit: false,
            settings_selected: 0,
            clock: None,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn activate_menu_item(&mut self) {
        match self.menu.selected_action() {
            MenuAction::Quiz(question_type) => self.start_quiz(question_type),
            MenuAction::Flashcards => self.start_flashcards(),
            MenuAction::Kanji => self.start_kanji(),
            MenuAction::Grammar => self.start_grammar(),
            MenuAction::Settings => self.go_to_settings(),
        }
    }

    pub fn start_quiz(&mut self, question_type: QuestionType) {
        self.start_quiz_at(question_type, Instant::now());
    }

    pub fn start_quiz_at(&mut self, question_type: QuestionType, now: Instant) {
        self.config.question_type = question_type;
        self.session.set_budget(self.config.session_seconds);
        self.input.clear();
        self.feedback = None;
        self.notice = None;

        let started = self.session.start(
            &self.bank,
            &self.config.category,
            self.config.difficulty,
            question_type,
            self.config.question_count,
        );
        match started {
            Ok(_) => {
                self.clock = Some(SecondClock::start(now));
                self.screen = AppScreen::Quiz;
            }
            Err(QuizError::InsufficientOptions { .. })
                if self.session.state() == QuizState::Completed =>
            {
                self.on_quiz_completed();
            }
            Err(err) => {
                tracing::warn!(%err, "quiz not started");
                self.notice = Some(err.to_string());
                self.screen = AppScreen::Menu;
            }
        }
    }

    pub fn type_char(&mut self, ch: char) {
        if self.session.state() == QuizState::Running {
            self.input.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.session.state() == QuizState::Running {
            self.input.pop();
        }
    }

    pub fn submit_typed(&mut self) {
        let answer = std::mem::take(&mut self.input);
        self.submit(&answer);
    }

    /// Answer with the option at `index` (zero-based) of the current question.
    pub fn choose_option(&mut self, index: usize) {
        let Some(option) = self
            .session
            .current_question()
            .and_then(|q| q.options.get(index))
            .cloned()
        else {
            return;
        };
        self.submit(&option);
    }

    fn submit(&mut self, answer: &str) {
        match self.session.submit_answer(answer) {
            Ok(outcome) => {
                self.feedback = Some(Feedback {
                    is_correct: outcome.is_correct,
                    correct_answer: outcome.correct_answer,
                });
                if outcome.completed {
                    self.on_quiz_completed();
                }
            }
            Err(QuizError::InsufficientOptions { .. }) => self.on_quiz_completed(),
            Err(err) => tracing::debug!(%err, "answer ignored"),
        }
    }

    /// Feed wall-clock time into the quiz countdown, one tick per whole second.
    pub fn on_tick(&mut self, now: Instant) {
        if self.screen != AppScreen::Quiz {
            return;
        }
        let Some(clock) = self.clock.as_mut() else {
            return;
        };
        let ticks = clock.elapsed_ticks(now);
        for _ in 0..ticks {
            let Some(id) = self.session.timer_id() else {
                break;
            };
            if self.session.tick(id) == TickOutcome::Expired {
                self.on_quiz_completed();
                break;
            }
        }
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.session.state() {
            QuizState::Running => {
                let _ = self.session.pause();
            }
            QuizState::Paused => {
                if self.session.resume().is_ok() {
                    if let Some(clock) = self.clock.as_mut() {
                        clock.reset(now);
                    }
                }
            }
            _ => {}
        }
    }

    /// Quiz screen keys: Esc ends, Tab pauses or resumes, digits pick an
    /// option, anything else edits the typed answer.
    pub fn handle_quiz_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Esc => self.end_quiz(),
            KeyCode::Tab => self.toggle_pause(now),
            _ if self.session.question_type().has_options() => {
                if let KeyCode::Char(ch) = code {
                    if let Some(digit) = ch.to_digit(10).filter(|d| *d >= 1) {
                        self.choose_option(digit as usize - 1);
                    }
                }
            }
            KeyCode::Enter => self.submit_typed(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(ch) => self.type_char(ch),
            _ => {}
        }
    }

    /// Stop the running quiz and show what was scored so far.
    pub fn end_quiz(&mut self) {
        if self.session.abandon().is_ok() {
            self.on_quiz_completed();
        }
    }

    fn on_quiz_completed(&mut self) {
        self.clock = None;
        self.input.clear();
        let Some(result) = self.session.result().cloned() else {
            return;
        };

        self.previous_best = self.progress.best_percentage(&result.category);
        let archive =
            result.end_reason != EndReason::InsufficientOptions && result.answered > 0;
        if archive {
            match self.store {
                Some(ref store) => {
                    if let Err(err) = store.append_result(&mut self.progress, result) {
                        tracing::warn!(%err, "failed to save quiz result");
                    }
                }
                None => self.progress.record(result),
            }
        }
        self.screen = AppScreen::QuizResult;
    }

    pub fn retry_quiz(&mut self) {
        self.start_quiz(self.config.question_type);
    }

    pub fn go_to_menu(&mut self) {
        if self.session.state().is_active() {
            let _ = self.session.abandon();
        }
        self.clock = None;
        self.deck = None;
        self.drill = None;
        self.grammar_browser = None;
        self.input.clear();
        self.feedback = None;
        self.refresh_menu();
        self.screen = AppScreen::Menu;
    }

    fn refresh_menu(&mut self) {
        self.menu.set_selection(
            &self.config.category,
            self.config.difficulty,
            self.config.question_count,
        );
    }

    pub fn cycle_category(&mut self) {
        let categories = self.bank.categories();
        if categories.is_empty() {
            return;
        }
        let next = categories
            .iter()
            .position(|c| *c == self.config.category)
            .map_or(0, |i| (i + 1) % categories.len());
        self.config.category = categories[next].clone();
        self.notice = None;
        self.refresh_menu();
    }

    pub fn cycle_difficulty(&mut self) {
        let all = Difficulty::ALL;
        let idx = all
            .iter()
            .position(|d| *d == self.config.difficulty)
            .unwrap_or(0);
        self.config.difficulty = all[(idx + 1) % all.len()];
        self.notice = None;
        self.refresh_menu();
    }

    pub fn cycle_question_count(&mut self) {
        let idx = QUESTION_COUNTS
            .iter()
            .position(|n| *n == self.config.question_count)
            .unwrap_or(0);
        self.config.question_count = QUESTION_COUNTS[(idx + 1) % QUESTION_COUNTS.len()];
        self.refresh_menu();
    }

    pub fn start_flashcards(&mut self) {
        let category = self.config.category.clone();
        self.open_deck(&category);
    }

    fn open_deck(&mut self, category: &str) {
        match FlashcardDeck::new(&self.bank, category, self.config.flashcard_mode, &mut self.rng) {
            Ok(deck) => {
                self.deck = Some(deck);
                self.notice = None;
                self.screen = AppScreen::Flashcards;
            }
            Err(err) => {
                tracing::warn!(%err, "flashcards unavailable");
                self.notice = Some(err.to_string());
                self.screen = AppScreen::Menu;
            }
        }
    }

    pub fn flip_card(&mut self) {
        if let Some(ref mut deck) = self.deck {
            deck.flip();
        }
    }

    pub fn next_card(&mut self) {
        if let Some(ref mut deck) = self.deck {
            deck.next(&mut self.rng);
        }
    }

    pub fn cycle_flashcard_mode(&mut self) {
        self.config.flashcard_mode = self.config.flashcard_mode.next();
        let category = self
            .deck
            .as_ref()
            .map_or_else(|| self.config.category.clone(), |d| d.category().to_string());
        self.open_deck(&category);
    }

    /// Switch the deck between the selected category and every category.
    pub fn toggle_all_categories(&mut self) {
        let showing_all = self
            .deck
            .as_ref()
            .is_some_and(|d| d.category() == ALL_CATEGORIES);
        let category = if showing_all {
            self.config.category.clone()
        } else {
            ALL_CATEGORIES.to_string()
        };
        self.open_deck(&category);
    }

    /// Kanji drill at the level matching the selected difficulty.
    pub fn start_kanji(&mut self) {
        self.open_drill(self.config.difficulty.level(), KanjiMode::default());
    }

    fn open_drill(&mut self, level: &str, mode: KanjiMode) {
        match KanjiDrill::new(&self.kanji, level, mode, &mut self.rng) {
            Ok(drill) => {
                self.drill = Some(drill);
                self.notice = None;
                self.screen = AppScreen::Kanji;
            }
            Err(err) => {
                tracing::warn!(%err, "kanji drill unavailable");
                self.notice = Some(err.to_string());
                self.screen = AppScreen::Menu;
            }
        }
    }

    pub fn kanji_reveal(&mut self) {
        if let Some(ref mut drill) = self.drill {
            drill.reveal();
        }
    }

    pub fn kanji_next(&mut self) {
        if let Some(ref mut drill) = self.drill {
            drill.next(&mut self.rng);
        }
    }

    pub fn cycle_kanji_mode(&mut self) {
        if let Some(ref mut drill) = self.drill {
            drill.set_mode(drill.mode().next());
        }
    }

    /// Step through the table's levels, then every level at once.
    pub fn cycle_kanji_level(&mut self) {
        let Some(ref drill) = self.drill else {
            return;
        };
        let mut levels: Vec<&str> = self.kanji.levels().iter().map(String::as_str).collect();
        levels.push(ALL_LEVELS);
        let next = levels
            .iter()
            .position(|l| *l == drill.level())
            .map_or(0, |i| (i + 1) % levels.len());
        let (level, mode) = (levels[next].to_string(), drill.mode());
        self.open_drill(&level, mode);
    }

    /// Grammar notes for the level matching the selected difficulty.
    pub fn start_grammar(&mut self) {
        self.open_grammar(self.config.difficulty.level());
    }

    fn open_grammar(&mut self, level: &str) {
        match GrammarBrowser::new(&self.grammar, level) {
            Ok(browser) => {
                self.grammar_browser = Some(browser);
                self.notice = None;
                self.screen = AppScreen::Grammar;
            }
            Err(err) => {
                tracing::warn!(%err, "grammar notes unavailable");
                self.notice = Some(err.to_string());
                self.screen = AppScreen::Menu;
            }
        }
    }

    pub fn cycle_grammar_level(&mut self) {
        let Some(ref browser) = self.grammar_browser else {
            return;
        };
        let levels = self.grammar.levels();
        let next = levels
            .iter()
            .position(|l| *l == browser.level())
            .map_or(0, |i| (i + 1) % levels.len());
        let level = levels[next].to_string();
        self.open_grammar(&level);
    }

    pub fn grammar_next(&mut self) {
        if let Some(ref mut browser) = self.grammar_browser {
            browser.next();
        }
    }

    pub fn grammar_prev(&mut self) {
        if let Some(ref mut browser) = self.grammar_browser {
            browser.prev();
        }
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn leave_settings(&mut self) {
        self.save_config();
        self.go_to_menu();
    }

    pub fn save_config(&self) {
        if let Err(err) = self.config.save() {
            tracing::warn!(%err, "failed to save config");
        }
    }

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => self.cycle_theme(true),
            1 => {
                self.config.session_seconds =
                    (self.config.session_seconds + SESSION_SECS_STEP).min(MAX_SESSION_SECS);
            }
            2 => self.config.flashcard_mode = self.config.flashcard_mode.next(),
            _ => {}
        }
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => self.cycle_theme(false),
            1 => {
                self.config.session_seconds = self
                    .config
                    .session_seconds
                    .saturating_sub(SESSION_SECS_STEP)
                    .max(MIN_SESSION_SECS);
            }
            2 => {
                self.config.flashcard_mode = self.config.flashcard_mode.next().next();
            }
            _ => {}
        }
    }

    fn cycle_theme(&mut self, forward: bool) {
        let themes = Theme::available_themes();
        if themes.is_empty() {
            return;
        }
        let next = match themes.iter().position(|t| *t == self.config.theme) {
            Some(idx) if forward => (idx + 1) % themes.len(),
            Some(idx) => (idx + themes.len() - 1) % themes.len(),
            None => 0,
        };
        self.config.theme = themes[next].clone();
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
            self.menu.theme = theme;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::bank::{RawVocabulary, RawWord};

    fn bank() -> WordBank {
        let numbers = (0..6)
            .map(|i| RawWord::new(&format!("数{i}"), &format!("kazu{i}"), &format!("number {i}")))
            .collect();
        let animals = (0..3)
            .map(|i| RawWord::new(&format!("獣{i}"), &format!("kemono{i}"), &format!("beast {i}")))
            .collect();
        let raw = RawVocabulary::new()
            .with_words("beginner", "numbers", numbers)
            .with_words("beginner", "animals", animals);
        WordBank::build(&raw).unwrap()
    }

    fn app() -> App {
        let config = Config {
            question_count: 5,
            ..Config::default()
        };
        App::new(bank(), config, None)
    }

    fn answer_correctly(app: &mut App) {
        let reading = app.session.current_question().unwrap().entry.reading.clone();
        for ch in reading.chars() {
            app.type_char(ch);
        }
        app.submit_typed();
    }

    #[test]
    fn test_typing_quiz_to_result() {
        let mut app = app();
        app.start_quiz(QuestionType::Typing);
        assert_eq!(app.screen, AppScreen::Quiz);

        for _ in 0..5 {
            answer_correctly(&mut app);
        }
        assert_eq!(app.screen, AppScreen::QuizResult);
        assert_eq!(app.progress.total_quizzes, 1);
        assert_eq!(app.progress.history[0].score, 5);
        assert_eq!(app.progress.best_streak, 5);
        assert!(app.previous_best.is_none());
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_wrong_answer_feedback() {
        let mut app = app();
        app.start_quiz(QuestionType::Typing);
        app.type_char('x');
        app.backspace();
        app.type_char('z');
        app.submit_typed();
        let feedback = app.feedback.clone().unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(app.session.streak(), 0);
        assert_eq!(app.session.current_index(), 1);
    }

    #[test]
    fn test_choose_option_submits_reading() {
        let mut app = app();
        app.start_quiz(QuestionType::MultipleChoice);
        let question = app.session.current_question().unwrap().clone();
        let correct = question
            .options
            .iter()
            .position(|o| *o == question.entry.reading)
            .unwrap();
        app.choose_option(correct);
        assert!(app.feedback.as_ref().unwrap().is_correct);
        assert_eq!(app.session.score(), 1);
    }

    #[test]
    fn test_clock_expires_quiz() {
        let mut app = app();
        let t0 = Instant::now();
        app.start_quiz_at(QuestionType::Typing, t0);
        app.on_tick(t0 + Duration::from_millis(30_500));
        assert_eq!(app.session.time_remaining_secs(), 30);
        assert_eq!(app.screen, AppScreen::Quiz);

        app.on_tick(t0 + Duration::from_secs(61));
        assert_eq!(app.screen, AppScreen::QuizResult);
        assert_eq!(app.session.end_reason(), Some(EndReason::TimeExpired));
        // Nothing answered, so nothing archived.
        assert_eq!(app.progress.total_quizzes, 0);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut app = app();
        let t0 = Instant::now();
        app.start_quiz_at(QuestionType::Typing, t0);
        app.toggle_pause(t0);
        app.on_tick(t0 + Duration::from_secs(20));
        assert_eq!(app.session.time_remaining_secs(), 60);

        app.type_char('a');
        assert!(app.input.is_empty());

        let resumed = t0 + Duration::from_secs(20);
        app.toggle_pause(resumed);
        app.on_tick(resumed + Duration::from_secs(5));
        assert_eq!(app.session.time_remaining_secs(), 55);
    }

    #[test]
    fn test_tab_resumes_paused_quiz() {
        use ratatui::buffer::Buffer;
        use ratatui::layout::Rect;
        use ratatui::widgets::Widget;

        use crate::ui::components::quiz_area::QuizArea;

        let mut app = app();
        let t0 = Instant::now();
        app.start_quiz_at(QuestionType::Typing, t0);
        app.handle_quiz_key(KeyCode::Tab, t0);
        assert_eq!(app.session.state(), QuizState::Paused);

        let snapshot = app.session.snapshot();
        let area = Rect::new(0, 0, 60, 14);
        let mut buf = Buffer::empty(area);
        QuizArea::new(&snapshot, &app.input, None, app.theme).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Press [Tab] to resume"));

        app.handle_quiz_key(KeyCode::Tab, t0 + Duration::from_secs(3));
        assert_eq!(app.session.state(), QuizState::Running);
        app.handle_quiz_key(KeyCode::Char('p'), t0 + Duration::from_secs(3));
        assert_eq!(app.input, "p");
    }

    #[test]
    fn test_insufficient_options_shows_result_unarchived() {
        let mut app = app();
        app.config.category = "animals".to_string();
        app.start_quiz(QuestionType::MultipleChoice);
        assert_eq!(app.screen, AppScreen::QuizResult);
        assert_eq!(
            app.session.end_reason(),
            Some(EndReason::InsufficientOptions)
        );
        assert_eq!(app.progress.total_quizzes, 0);
    }

    #[test]
    fn test_empty_bucket_stays_on_menu_with_notice() {
        let mut app = app();
        app.config.difficulty = Difficulty::Hard;
        app.start_quiz(QuestionType::Typing);
        assert_eq!(app.screen, AppScreen::Menu);
        assert!(app.notice.as_deref().unwrap().contains("numbers"));
        assert_eq!(app.session.state(), QuizState::Idle);
    }

    #[test]
    fn test_end_quiz_archives_partial_run() {
        let mut app = app();
        app.start_quiz(QuestionType::Typing);
        answer_correctly(&mut app);
        app.end_quiz();
        assert_eq!(app.screen, AppScreen::QuizResult);
        let last = app.progress.history.last().unwrap();
        assert_eq!(last.end_reason, EndReason::Abandoned);
        assert_eq!(last.answered, 1);

        app.retry_quiz();
        assert_eq!(app.screen, AppScreen::Quiz);
        assert_eq!(app.session.current_index(), 0);
        let best = app.progress.best_percentage("numbers");
        assert_eq!(best, Some(20.0));
    }

    #[test]
    fn test_menu_cycles() {
        let mut app = app();
        app.cycle_category();
        assert_eq!(app.config.category, "animals");
        app.cycle_category();
        assert_eq!(app.config.category, "numbers");

        app.cycle_difficulty();
        assert_eq!(app.config.difficulty, Difficulty::Medium);

        app.cycle_question_count();
        assert_eq!(app.config.question_count, 10);
        assert!(app.menu.selection.contains("10 questions"));
    }

    #[test]
    fn test_flashcards_flow() {
        let mut app = app();
        app.start_flashcards();
        assert_eq!(app.screen, AppScreen::Flashcards);
        assert_eq!(app.deck.as_ref().unwrap().len(), 6);

        app.flip_card();
        assert!(app.deck.as_ref().unwrap().is_flipped());
        app.next_card();
        assert!(!app.deck.as_ref().unwrap().is_flipped());

        app.toggle_all_categories();
        assert_eq!(app.deck.as_ref().unwrap().len(), 9);
        app.toggle_all_categories();
        assert_eq!(app.deck.as_ref().unwrap().category(), "numbers");

        let mode = app.config.flashcard_mode;
        app.cycle_flashcard_mode();
        assert_eq!(app.deck.as_ref().unwrap().mode(), mode.next());

        app.go_to_menu();
        assert!(app.deck.is_none());
    }

    #[test]
    fn test_kanji_drill_flow() {
        let mut app = app();
        app.start_kanji();
        assert_eq!(app.screen, AppScreen::Kanji);
        let drill = app.drill.as_ref().unwrap();
        assert_eq!(drill.level(), "beginner");
        assert_eq!(drill.mode(), KanjiMode::Writing);
        let beginner = drill.len();

        app.kanji_reveal();
        assert!(app.drill.as_ref().unwrap().is_revealed());
        app.kanji_next();
        assert!(!app.drill.as_ref().unwrap().is_revealed());

        app.cycle_kanji_mode();
        assert_eq!(app.drill.as_ref().unwrap().mode(), KanjiMode::Reading);

        for expected in ["intermediate", "advanced", ALL_LEVELS, "beginner"] {
            app.cycle_kanji_level();
            let drill = app.drill.as_ref().unwrap();
            assert_eq!(drill.level(), expected);
            assert_eq!(drill.mode(), KanjiMode::Reading);
        }
        assert_eq!(app.drill.as_ref().unwrap().len(), beginner);

        app.go_to_menu();
        assert!(app.drill.is_none());
    }

    #[test]
    fn test_grammar_browser_flow() {
        let mut app = app();
        app.config.difficulty = Difficulty::Medium;
        app.start_grammar();
        assert_eq!(app.screen, AppScreen::Grammar);
        let browser = app.grammar_browser.as_ref().unwrap();
        assert_eq!(browser.level(), "intermediate");
        assert_eq!(browser.current().topic, "Verb Conjugations");

        app.grammar_next();
        assert_eq!(app.grammar_browser.as_ref().unwrap().selected(), 1);
        app.grammar_prev();
        app.grammar_prev();
        assert_eq!(app.grammar_browser.as_ref().unwrap().selected(), 1);

        app.cycle_grammar_level();
        assert_eq!(app.grammar_browser.as_ref().unwrap().level(), "advanced");
        app.go_to_menu();
        assert!(app.grammar_browser.is_none());
    }

    #[test]
    fn test_settings_clamp_session_seconds() {
        let mut app = app();
        app.go_to_settings();
        app.settings_selected = 1;
        for _ in 0..100 {
            app.settings_cycle_backward();
        }
        assert_eq!(app.config.session_seconds, MIN_SESSION_SECS);
        for _ in 0..100 {
            app.settings_cycle_forward();
        }
        assert_eq!(app.config.session_seconds, MAX_SESSION_SECS);

        app.start_quiz(QuestionType::Typing);
        assert_eq!(app.session.time_remaining_secs(), MAX_SESSION_SECS);
    }
}

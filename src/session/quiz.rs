use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::bank::{WordBank, WordEntry};
use crate::engine::scoring;
use crate::session::QuizError;
use crate::session::question::{self, Difficulty, Prompt, Question, QuestionType};
use crate::session::result::{AnswerRecord, EndReason, ErrorRecord, QuizResult};
use crate::session::timer::{Countdown, TickOutcome, TimerId};

pub const DEFAULT_SESSION_SECS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    Idle,
    Running,
    Paused,
    Completed,
}

impl QuizState {
    pub fn is_active(self) -> bool {
        matches!(self, QuizState::Running | QuizState::Paused)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub correct_answer: String,
    pub completed: bool,
}

/// Read-only view of a session for rendering.
#[derive(Clone, Debug, Serialize)]
pub struct QuizSnapshot {
    pub state: QuizState,
    pub category: String,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub prompt: Option<Prompt>,
    pub options: Vec<String>,
    pub score: usize,
    pub streak: usize,
    pub max_streak: usize,
    pub time_remaining_secs: u32,
    pub current_index: usize,
    pub total: usize,
    /// Only filled once the quiz is completed.
    pub errors: Vec<ErrorRecord>,
    pub end_reason: Option<EndReason>,
}

/// One quiz run: question sequencing, scoring, and the countdown.
///
/// Mutated only through its own transitions. The word bank is borrowed
/// for the duration of [`QuizSession::start`] and never stored.
pub struct QuizSession {
    state: QuizState,
    category: String,
    difficulty: Difficulty,
    question_type: QuestionType,
    question_count: usize,
    sampled_words: Vec<WordEntry>,
    current: Option<Question>,
    current_index: usize,
    score: usize,
    streak: usize,
    max_streak: usize,
    answer_log: Vec<AnswerRecord>,
    error_log: Vec<ErrorRecord>,
    timer: Countdown,
    budget_secs: u32,
    end_reason: Option<EndReason>,
    result: Option<QuizResult>,
    rng: SmallRng,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy(), DEFAULT_SESSION_SECS)
    }

    pub fn with_budget(budget_secs: u32) -> Self {
        Self::with_rng(SmallRng::from_entropy(), budget_secs)
    }

    /// Deterministic session for tests and replays.
    pub fn with_seed(seed: u64, budget_secs: u32) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed), budget_secs)
    }

    fn with_rng(rng: SmallRng, budget_secs: u32) -> Self {
        Self {
            state: QuizState::Idle,
            category: String::new(),
            difficulty: Difficulty::Easy,
            question_type: QuestionType::Typing,
            question_count: 0,
            sampled_words: Vec::new(),
            current: None,
            current_index: 0,
            score: 0,
            streak: 0,
            max_streak: 0,
            answer_log: Vec::new(),
            error_log: Vec::new(),
            timer: Countdown::new(),
            budget_secs,
            end_reason: None,
            result: None,
            rng,
        }
    }

    pub fn set_budget(&mut self, budget_secs: u32) {
        self.budget_secs = budget_secs;
    }

    /// Begin a fresh run. Rejected while another run is active; a completed
    /// run is discarded. Returns the id the caller must tick with.
    pub fn start(
        &mut self,
        bank: &WordBank,
        category: &str,
        difficulty: Difficulty,
        question_type: QuestionType,
        question_count: usize,
    ) -> Result<TimerId, QuizError> {
        if self.state.is_active() {
            return Err(QuizError::AlreadyActive);
        }

        let level = difficulty.level();
        let words = bank.get_words_for_quiz(category, level, question_count, &mut self.rng);
        if words.is_empty() {
            return Err(QuizError::InsufficientData {
                category: category.to_string(),
                level: level.to_string(),
            });
        }

        self.category = category.to_string();
        self.difficulty = difficulty;
        self.question_type = question_type;
        self.question_count = question_count;
        self.sampled_words = words;
        self.current = None;
        self.current_index = 0;
        self.score = 0;
        self.streak = 0;
        self.max_streak = 0;
        self.answer_log.clear();
        self.error_log.clear();
        self.end_reason = None;
        self.result = None;
        self.state = QuizState::Running;
        let id = self.timer.arm(self.budget_secs);

        tracing::info!(
            category,
            level,
            question_type = %question_type,
            questions = self.total(),
            "quiz started"
        );

        if let Err(err) = self.present_question() {
            self.finish(EndReason::InsufficientOptions);
            return Err(err);
        }
        Ok(id)
    }

    fn present_question(&mut self) -> Result<(), QuizError> {
        let entry = &self.sampled_words[self.current_index];
        let question = Question::build(
            entry,
            &self.sampled_words,
            self.difficulty,
            self.question_type,
            &mut self.rng,
        )?;
        self.current = Some(question);
        Ok(())
    }

    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerOutcome, QuizError> {
        if self.state != QuizState::Running {
            return Err(QuizError::NotRunning);
        }
        let Some(current) = self.current.take() else {
            return Err(QuizError::NotRunning);
        };

        let entry = current.entry;
        let is_correct = question::is_correct(&entry, answer);
        let correct_answer = entry.reading.to_lowercase();

        if is_correct {
            self.score += 1;
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
        } else {
            self.streak = 0;
            self.error_log.push(ErrorRecord {
                question: entry.clone(),
                user_answer: answer.to_string(),
                correct_answer: correct_answer.clone(),
            });
        }
        tracing::debug!(id = %entry.id, is_correct, "answer submitted");

        self.answer_log.push(AnswerRecord {
            question: entry,
            user_answer: answer.to_string(),
            is_correct,
        });
        self.current_index += 1;

        if self.current_index >= self.total() {
            self.finish(EndReason::Exhausted);
        } else if let Err(err) = self.present_question() {
            self.finish(EndReason::InsufficientOptions);
            return Err(err);
        }

        Ok(AnswerOutcome {
            is_correct,
            correct_answer,
            completed: self.state == QuizState::Completed,
        })
    }

    /// Advance the countdown by one second. Ticks from a retired timer
    /// never touch the session.
    pub fn tick(&mut self, id: TimerId) -> TickOutcome {
        let outcome = self.timer.tick(id);
        if outcome == TickOutcome::Expired {
            tracing::info!(answered = self.current_index, "quiz timed out");
            self.finish(EndReason::TimeExpired);
        }
        outcome
    }

    /// Freeze both the countdown and answer submission.
    pub fn pause(&mut self) -> Result<(), QuizError> {
        if self.state != QuizState::Running {
            return Err(QuizError::NotRunning);
        }
        self.timer.pause();
        self.state = QuizState::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), QuizError> {
        if self.state != QuizState::Paused {
            return Err(QuizError::NotPaused);
        }
        self.timer.resume();
        self.state = QuizState::Running;
        Ok(())
    }

    /// End an active run early, keeping what was scored.
    pub fn abandon(&mut self) -> Result<&QuizResult, QuizError> {
        if !self.state.is_active() {
            return Err(QuizError::NotRunning);
        }
        self.finish(EndReason::Abandoned);
        self.result.as_ref().ok_or(QuizError::NotRunning)
    }

    fn finish(&mut self, reason: EndReason) {
        self.timer.cancel();
        self.current = None;
        self.state = QuizState::Completed;
        self.end_reason = Some(reason);

        let elapsed = scoring::elapsed_secs(self.budget_secs, self.timer.remaining());
        let result = QuizResult::new(
            &self.category,
            self.difficulty,
            self.question_type,
            self.score,
            self.total(),
            self.current_index,
            elapsed,
            self.max_streak,
            self.error_log.clone(),
            reason,
        );
        tracing::info!(
            score = result.score,
            total = result.total,
            percentage = result.percentage,
            reason = ?reason,
            "quiz completed"
        );
        self.result = Some(result);
    }

    /// Number of questions this run will ask.
    pub fn total(&self) -> usize {
        self.sampled_words.len().min(self.question_count)
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn level(&self) -> &'static str {
        self.difficulty.level()
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn sampled_words(&self) -> &[WordEntry] {
        &self.sampled_words
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn streak(&self) -> usize {
        self.streak
    }

    pub fn max_streak(&self) -> usize {
        self.max_streak
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn budget_secs(&self) -> u32 {
        self.budget_secs
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.armed()
    }

    pub fn answer_log(&self) -> &[AnswerRecord] {
        &self.answer_log
    }

    pub fn error_log(&self) -> &[ErrorRecord] {
        &self.error_log
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        let completed = self.state == QuizState::Completed;
        QuizSnapshot {
            state: self.state,
            category: self.category.clone(),
            difficulty: self.difficulty,
            question_type: self.question_type,
            prompt: self.current.as_ref().map(|q| q.prompt.clone()),
            options: self
                .current
                .as_ref()
                .map(|q| q.options.clone())
                .unwrap_or_default(),
            score: self.score,
            streak: self.streak,
            max_streak: self.max_streak,
            time_remaining_secs: self.timer.remaining(),
            current_index: self.current_index,
            total: self.total(),
            errors: if completed {
                self.error_log.clone()
            } else {
                Vec::new()
            },
            end_reason: self.end_reason,
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

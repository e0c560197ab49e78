use serde::{Deserialize, Serialize};

use crate::session::result::QuizResult;

const SCHEMA_VERSION: u32 = 1;

/// Oldest entries are dropped past this many results.
pub const HISTORY_LIMIT: usize = 200;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressData {
    pub schema_version: u32,
    pub total_quizzes: u32,
    pub best_streak: usize,
    pub history: Vec<QuizResult>,
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            total_quizzes: 0,
            best_streak: 0,
            history: Vec::new(),
        }
    }
}

impl ProgressData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    pub fn record(&mut self, result: QuizResult) {
        self.total_quizzes += 1;
        self.best_streak = self.best_streak.max(result.max_streak);
        self.history.push(result);
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }

    /// Best percentage ever reached for a category, if it was ever quizzed.
    pub fn best_percentage(&self, category: &str) -> Option<f64> {
        self.history
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.percentage)
            .reduce(f64::max)
    }
}

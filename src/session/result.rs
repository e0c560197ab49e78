use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bank::WordEntry;
use crate::engine::scoring;
use crate::session::question::{Difficulty, QuestionType};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: WordEntry,
    pub user_answer: String,
    pub is_correct: bool,
}

/// An incorrect answer kept for review.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub question: WordEntry,
    pub user_answer: String,
    pub correct_answer: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Exhausted,
    TimeExpired,
    InsufficientOptions,
    Abandoned,
}

impl EndReason {
    pub fn describe(self) -> &'static str {
        match self {
            EndReason::Exhausted => "All questions answered",
            EndReason::TimeExpired => "Time's up",
            EndReason::InsufficientOptions => "Not enough words for multiple choice",
            EndReason::Abandoned => "Quiz ended early",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizResult {
    pub category: String,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub score: usize,
    pub total: usize,
    pub answered: usize,
    pub percentage: f64,
    pub elapsed_secs: u32,
    pub max_streak: usize,
    pub errors: Vec<ErrorRecord>,
    pub end_reason: EndReason,
    pub timestamp: DateTime<Utc>,
}

impl QuizResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        category: &str,
        difficulty: Difficulty,
        question_type: QuestionType,
        score: usize,
        total: usize,
        answered: usize,
        elapsed_secs: u32,
        max_streak: usize,
        errors: Vec<ErrorRecord>,
        end_reason: EndReason,
    ) -> Self {
        Self {
            category: category.to_string(),
            difficulty,
            question_type,
            score,
            total,
            answered,
            percentage: scoring::percentage(score, total),
            elapsed_secs,
            max_streak,
            errors,
            end_reason,
            timestamp: Utc::now(),
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.score == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_percentage_uses_total() {
        let result = QuizResult::new(
            "numbers",
            Difficulty::Easy,
            QuestionType::Typing,
            2,
            5,
            2,
            60,
            2,
            Vec::new(),
            EndReason::TimeExpired,
        );
        assert_eq!(result.percentage, 40.0);
        assert!(!result.is_perfect());
    }

    #[test]
    fn test_result_serializes_enum_tags() {
        let result = QuizResult::new(
            "food",
            Difficulty::Medium,
            QuestionType::MultipleChoice,
            4,
            4,
            4,
            12,
            4,
            Vec::new(),
            EndReason::Exhausted,
        );
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"difficulty\":\"medium\""));
        assert!(json.contains("\"question_type\":\"multiple-choice\""));
        assert!(json.contains("\"end_reason\":\"exhausted\""));
        assert!(result.is_perfect());
    }
}

pub mod flashcards;
pub mod grammar;
pub mod kanji;
pub mod question;
pub mod quiz;
pub mod result;
pub mod timer;

pub use question::{Difficulty, QuestionType};
pub use quiz::{QuizSession, QuizSnapshot, QuizState};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("no words available for {category} ({level})")]
    InsufficientData { category: String, level: String },
    #[error("multiple choice needs {required} words, only {available} available")]
    InsufficientOptions { available: usize, required: usize },
    #[error("a quiz is already in progress")]
    AlreadyActive,
    #[error("no quiz is running")]
    NotRunning,
    #[error("quiz is not paused")]
    NotPaused,
    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),
    #[error("unknown question type `{0}` (expected typing, multiple-choice or matching)")]
    UnknownQuestionType(String),
}

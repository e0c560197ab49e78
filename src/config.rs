use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::flashcards::FlashcardMode;
use crate::session::question::{Difficulty, QuestionType};
use crate::session::quiz::DEFAULT_SESSION_SECS;

pub const QUESTION_COUNTS: [usize; 3] = [5, 10, 15];
pub const MIN_SESSION_SECS: u32 = 10;
pub const MAX_SESSION_SECS: u32 = 600;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    #[serde(default = "default_question_type")]
    pub question_type: QuestionType,
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_session_seconds")]
    pub session_seconds: u32,
    #[serde(default = "default_flashcard_mode")]
    pub flashcard_mode: FlashcardMode,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme() -> String {
    "dark".to_string()
}
fn default_category() -> String {
    "numbers".to_string()
}
fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}
fn default_question_type() -> QuestionType {
    QuestionType::Typing
}
fn default_question_count() -> usize {
    10
}
fn default_session_seconds() -> u32 {
    DEFAULT_SESSION_SECS
}
fn default_flashcard_mode() -> FlashcardMode {
    FlashcardMode::Reading
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            category: default_category(),
            difficulty: default_difficulty(),
            question_type: default_question_type(),
            question_count: default_question_count(),
            session_seconds: default_session_seconds(),
            flashcard_mode: default_flashcard_mode(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("japvoc")
            .join("config.toml")
    }

    /// Clamp out-of-range values and drop a category the bank doesn't know.
    /// Call after deserialization and after CLI overrides.
    pub fn validate(&mut self, known_categories: &[String]) {
        self.question_count = nearest_question_count(self.question_count);
        self.session_seconds = self.session_seconds.clamp(MIN_SESSION_SECS, MAX_SESSION_SECS);
        if !known_categories.iter().any(|c| *c == self.category) {
            self.category = known_categories
                .first()
                .cloned()
                .unwrap_or_else(default_category);
        }
        if self.log_level.trim().is_empty() {
            self.log_level = default_log_level();
        }
    }
}

fn nearest_question_count(requested: usize) -> usize {
    QUESTION_COUNTS
        .into_iter()
        .min_by_key(|&n| n.abs_diff(requested))
        .unwrap_or_else(default_question_count)
}

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bank::DataValidationError;
use crate::session::QuizError;

#[derive(Embed)]
#[folder = "assets/grammar/"]
struct GrammarAssets;

const BUNDLED_FILE: &str = "grammar.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarExample {
    pub japanese: String,
    pub meaning: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarSection {
    pub title: String,
    pub examples: Vec<GrammarExample>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarTopic {
    pub id: String,
    pub topic: String,
    pub difficulty: String,
    pub content: Vec<GrammarSection>,
}

/// Grammar notes keyed by level, in document order.
#[derive(Clone, Debug, Default)]
pub struct GrammarTable {
    levels: Vec<(String, Vec<GrammarTopic>)>,
}

impl GrammarTable {
    pub fn bundled() -> Result<Self, DataValidationError> {
        let file = GrammarAssets::get(BUNDLED_FILE).ok_or_else(|| DataValidationError::Malformed {
            path: BUNDLED_FILE.to_string(),
            expected: "an embedded grammar table",
        })?;
        let json = std::str::from_utf8(file.data.as_ref()).map_err(|_| {
            DataValidationError::Malformed {
                path: BUNDLED_FILE.to_string(),
                expected: "UTF-8 text",
            }
        })?;
        Self::from_json(json)
    }

    pub fn from_json(json: &str) -> Result<Self, DataValidationError> {
        let root: Map<String, Value> = serde_json::from_str(json)?;
        let mut levels = Vec::with_capacity(root.len());
        for (level, list) in root {
            levels.push((level, serde_json::from_value(list)?));
        }
        Ok(Self { levels })
    }

    pub fn with_topics(mut self, level: &str, topics: Vec<GrammarTopic>) -> Self {
        match self.levels.iter_mut().find(|(name, _)| name == level) {
            Some((_, existing)) => existing.extend(topics),
            None => self.levels.push((level.to_string(), topics)),
        }
        self
    }

    pub fn levels(&self) -> Vec<&str> {
        self.levels.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn topics(&self, level: &str) -> &[GrammarTopic] {
        self.levels
            .iter()
            .find(|(name, _)| name == level)
            .map(|(_, topics)| topics.as_slice())
            .unwrap_or(&[])
    }
}

/// Read-only cursor over the topics of one level.
pub struct GrammarBrowser {
    level: String,
    topics: Vec<GrammarTopic>,
    selected: usize,
}

impl GrammarBrowser {
    pub fn new(table: &GrammarTable, level: &str) -> Result<Self, QuizError> {
        let topics = table.topics(level).to_vec();
        if topics.is_empty() {
            return Err(QuizError::InsufficientData {
                category: "grammar".to_string(),
                level: level.to_string(),
            });
        }
        Ok(Self {
            level: level.to_string(),
            topics,
            selected: 0,
        })
    }

    pub fn current(&self) -> &GrammarTopic {
        &self.topics[self.selected]
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.topics.len();
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.checked_sub(1).unwrap_or(self.topics.len() - 1);
    }

    pub fn topics(&self) -> &[GrammarTopic] {
        &self.topics
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn level(&self) -> &str {
        &self.level
    }
}

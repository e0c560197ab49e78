use std::fs;
use std::path::Path;

use rust_embed::Embed;
use serde_json::{Map, Value};

use crate::bank::DataValidationError;

#[derive(Embed)]
#[folder = "assets/vocabulary/"]
struct VocabularyAssets;

const BUNDLED_FILE: &str = "vocabulary.json";

/// One record as authored. Any of the fields may be missing; `WordBank::build`
/// decides what is required.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawWord {
    pub word: Option<String>,
    pub phrase: Option<String>,
    pub reading: Option<String>,
    pub meaning: Option<String>,
    pub kind: Option<String>,
}

impl RawWord {
    pub fn new(word: &str, reading: &str, meaning: &str) -> Self {
        Self {
            word: Some(word.to_string()),
            reading: Some(reading.to_string()),
            meaning: Some(meaning.to_string()),
            ..Self::default()
        }
    }

    pub fn phrase(phrase: &str, reading: &str, meaning: &str) -> Self {
        Self {
            phrase: Some(phrase.to_string()),
            reading: Some(reading.to_string()),
            meaning: Some(meaning.to_string()),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    /// `word` wins over `phrase` when both are present.
    pub fn surface(&self) -> Option<&str> {
        self.word.as_deref().or(self.phrase.as_deref())
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        let field = |name: &str| obj.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            word: field("word"),
            phrase: field("phrase"),
            reading: field("reading"),
            meaning: field("meaning"),
            kind: field("type"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCategory {
    pub name: String,
    pub words: Vec<RawWord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLevel {
    pub name: String,
    pub categories: Vec<RawCategory>,
}

/// The level -> category -> records table, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawVocabulary {
    pub levels: Vec<RawLevel>,
}

impl RawVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `words` under `level`/`category`, creating either on first sight.
    pub fn with_words(mut self, level: &str, category: &str, words: Vec<RawWord>) -> Self {
        let level_idx = match self.levels.iter().position(|l| l.name == level) {
            Some(i) => i,
            None => {
                self.levels.push(RawLevel {
                    name: level.to_string(),
                    categories: Vec::new(),
                });
                self.levels.len() - 1
            }
        };
        let categories = &mut self.levels[level_idx].categories;
        match categories.iter_mut().find(|c| c.name == category) {
            Some(existing) => existing.words.extend(words),
            None => categories.push(RawCategory {
                name: category.to_string(),
                words,
            }),
        }
        self
    }

    pub fn from_json(json: &str) -> Result<Self, DataValidationError> {
        let root: Value = serde_json::from_str(json)?;
        let levels = root
            .as_object()
            .ok_or_else(|| DataValidationError::Malformed {
                path: "$".to_string(),
                expected: "an object of levels",
            })?;

        let mut vocabulary = Self::new();
        for (level, categories) in levels {
            let categories =
                categories
                    .as_object()
                    .ok_or_else(|| DataValidationError::Malformed {
                        path: level.clone(),
                        expected: "an object of categories",
                    })?;

            let mut parsed = Vec::with_capacity(categories.len());
            for (category, records) in categories {
                let path = format!("{level}.{category}");
                let records = records
                    .as_array()
                    .ok_or_else(|| DataValidationError::Malformed {
                        path: path.clone(),
                        expected: "an array of word records",
                    })?;

                let mut words = Vec::with_capacity(records.len());
                for (index, record) in records.iter().enumerate() {
                    let obj = record
                        .as_object()
                        .ok_or_else(|| DataValidationError::Malformed {
                            path: format!("{path}[{index}]"),
                            expected: "a word record object",
                        })?;
                    words.push(RawWord::from_object(obj));
                }
                parsed.push(RawCategory {
                    name: category.clone(),
                    words,
                });
            }

            vocabulary.levels.push(RawLevel {
                name: level.clone(),
                categories: parsed,
            });
        }

        Ok(vocabulary)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let vocabulary = Self::from_json(&content)?;
        if vocabulary.record_count() == 0 {
            anyhow::bail!("{} contains no vocabulary records", path.display());
        }
        Ok(vocabulary)
    }

    /// The table compiled into the binary.
    pub fn bundled() -> Result<Self, DataValidationError> {
        let file =
            VocabularyAssets::get(BUNDLED_FILE).ok_or_else(|| DataValidationError::Malformed {
                path: BUNDLED_FILE.to_string(),
                expected: "a bundled vocabulary asset",
            })?;
        let content =
            std::str::from_utf8(file.data.as_ref()).map_err(|_| DataValidationError::Malformed {
                path: BUNDLED_FILE.to_string(),
                expected: "UTF-8 text",
            })?;
        Self::from_json(content)
    }

    pub fn record_count(&self) -> usize {
        self.levels
            .iter()
            .flat_map(|l| l.categories.iter())
            .map(|c| c.words.len())
            .sum()
    }
}

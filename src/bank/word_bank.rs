use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bank::DataValidationError;
use crate::bank::vocabulary::{RawVocabulary, RawWord};
use crate::engine::randomizer;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: String,
    /// Target-language surface form; phrases land here too.
    pub word: String,
    /// Romanized reading. Every quiz answer is graded against this.
    pub reading: String,
    pub meaning: String,
    #[serde(default)]
    pub kind: String,
    pub level: String,
    pub category: String,
}

impl WordEntry {
    fn from_raw(
        raw: &RawWord,
        level: &str,
        category: &str,
        index: usize,
    ) -> Result<Self, DataValidationError> {
        let missing = |field: &'static str| DataValidationError::MissingField {
            level: level.to_string(),
            category: category.to_string(),
            index,
            field,
        };

        let word = raw.surface().ok_or_else(|| missing("word"))?;
        let reading = raw.reading.as_deref().ok_or_else(|| missing("reading"))?;
        let meaning = raw.meaning.as_deref().ok_or_else(|| missing("meaning"))?;

        Ok(Self {
            id: format!("{level}_{category}_{index}"),
            word: word.to_string(),
            reading: reading.to_string(),
            meaning: meaning.to_string(),
            kind: raw.kind.clone().unwrap_or_default(),
            level: level.to_string(),
            category: category.to_string(),
        })
    }
}

/// Read-only vocabulary index: category -> level -> entries, plus a flat id lookup.
///
/// Entries live once in `entries` (build order); both indexes hold positions
/// into it, so an entry reachable one way is always reachable the other.
#[derive(Clone, Debug, Default)]
pub struct WordBank {
    entries: Vec<WordEntry>,
    by_id: HashMap<String, usize>,
    buckets: HashMap<String, HashMap<String, Vec<usize>>>,
    categories: Vec<String>,
    levels: Vec<String>,
}

impl WordBank {
    pub fn build(raw: &RawVocabulary) -> Result<Self, DataValidationError> {
        let mut bank = Self::default();

        for level in &raw.levels {
            if !bank.levels.contains(&level.name) {
                bank.levels.push(level.name.clone());
            }

            for category in &level.categories {
                if !bank.categories.contains(&category.name) {
                    bank.categories.push(category.name.clone());
                }

                let mut positions = Vec::with_capacity(category.words.len());
                for (index, word) in category.words.iter().enumerate() {
                    let entry = WordEntry::from_raw(word, &level.name, &category.name, index)?;
                    let pos = bank.entries.len();
                    if bank.by_id.insert(entry.id.clone(), pos).is_some() {
                        return Err(DataValidationError::DuplicateId(entry.id));
                    }
                    bank.entries.push(entry);
                    positions.push(pos);
                }

                bank.buckets
                    .entry(category.name.clone())
                    .or_default()
                    .entry(level.name.clone())
                    .or_default()
                    .extend(positions);
            }
        }

        tracing::info!(
            words = bank.entries.len(),
            categories = bank.categories.len(),
            levels = bank.levels.len(),
            "word bank built"
        );
        Ok(bank)
    }

    /// Replace the whole index with one built from `raw`. On error the
    /// current index is left exactly as it was.
    pub fn rebuild(&mut self, raw: &RawVocabulary) -> Result<(), DataValidationError> {
        *self = Self::build(raw)?;
        Ok(())
    }

    /// Up to `count` distinct entries from the bucket, randomly ordered.
    /// A missing or empty bucket yields an empty list rather than an error.
    pub fn get_words_for_quiz<R: Rng + ?Sized>(
        &self,
        category: &str,
        level: &str,
        count: usize,
        rng: &mut R,
    ) -> Vec<WordEntry> {
        let Some(positions) = self.bucket(category, level) else {
            tracing::warn!(category, level, "no words found for quiz");
            return Vec::new();
        };
        randomizer::sample(positions, count, rng)
            .into_iter()
            .map(|pos| self.entries[pos].clone())
            .collect()
    }

    /// The bucket in authored order.
    pub fn words(&self, category: &str, level: &str) -> Vec<&WordEntry> {
        self.bucket(category, level)
            .map(|positions| positions.iter().map(|&pos| &self.entries[pos]).collect())
            .unwrap_or_default()
    }

    pub fn word(&self, id: &str) -> Option<&WordEntry> {
        self.by_id.get(id).map(|&pos| &self.entries[pos])
    }

    pub fn all_words(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bucket(&self, category: &str, level: &str) -> Option<&Vec<usize>> {
        self.buckets
            .get(category)
            .and_then(|levels| levels.get(level))
            .filter(|positions| !positions.is_empty())
    }
}

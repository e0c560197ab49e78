use rand::Rng;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bank::DataValidationError;
use crate::engine::randomizer;
use crate::session::QuizError;

#[derive(Embed)]
#[folder = "assets/kanji/"]
struct KanjiAssets;

const BUNDLED_FILE: &str = "kanji.json";

/// Drill filter meaning every level.
pub const ALL_LEVELS: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiEntry {
    pub character: String,
    pub reading: String,
    pub meaning: String,
    pub stroke_count: u32,
    pub grade: u32,
    pub jlpt: String,
    #[serde(skip)]
    pub level: String,
}

/// Every kanji keyed by level, in document order.
#[derive(Clone, Debug, Default)]
pub struct KanjiTable {
    entries: Vec<KanjiEntry>,
    levels: Vec<String>,
}

impl KanjiTable {
    pub fn bundled() -> Result<Self, DataValidationError> {
        let file = KanjiAssets::get(BUNDLED_FILE).ok_or_else(|| DataValidationError::Malformed {
            path: BUNDLED_FILE.to_string(),
            expected: "an embedded kanji table",
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
        let mut table = Self::default();
        for (level, list) in root {
            let entries: Vec<KanjiEntry> = serde_json::from_value(list)?;
            table = table.with_entries(&level, entries);
        }
        Ok(table)
    }

    /// Append `entries` under `level`. A character already present in that
    /// level is skipped.
    pub fn with_entries(mut self, level: &str, entries: Vec<KanjiEntry>) -> Self {
        if !self.levels.iter().any(|l| l == level) {
            self.levels.push(level.to_string());
        }
        for mut entry in entries {
            let duplicate = self
                .entries
                .iter()
                .any(|e| e.level == level && e.character == entry.character);
            if duplicate {
                tracing::debug!(level, character = %entry.character, "skipping duplicate kanji");
                continue;
            }
            entry.level = level.to_string();
            self.entries.push(entry);
        }
        self
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

    /// Entries of `level`, or of the whole table for `"all"`.
    pub fn filter(&self, level: &str) -> Vec<KanjiEntry> {
        self.entries
            .iter()
            .filter(|e| level == ALL_LEVELS || e.level == level)
            .cloned()
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KanjiMode {
    /// Character with its stroke count; reading and meaning on reveal.
    #[default]
    Writing,
    /// Character first, then reading before meaning.
    Reading,
    /// Character first, then meaning before reading.
    Meaning,
}

impl KanjiMode {
    pub fn display(self) -> &'static str {
        match self {
            KanjiMode::Writing => "Writing",
            KanjiMode::Reading => "Reading",
            KanjiMode::Meaning => "Meaning",
        }
    }

    pub fn next(self) -> Self {
        match self {
            KanjiMode::Writing => KanjiMode::Reading,
            KanjiMode::Reading => KanjiMode::Meaning,
            KanjiMode::Meaning => KanjiMode::Writing,
        }
    }
}

pub struct KanjiDrill {
    cards: Vec<KanjiEntry>,
    position: usize,
    revealed: bool,
    mode: KanjiMode,
    level: String,
}

impl KanjiDrill {
    pub fn new<R: Rng + ?Sized>(
        table: &KanjiTable,
        level: &str,
        mode: KanjiMode,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        let cards = table.filter(level);
        if cards.is_empty() {
            return Err(QuizError::InsufficientData {
                category: "kanji".to_string(),
                level: level.to_string(),
            });
        }

        Ok(Self {
            cards: randomizer::shuffle(&cards, rng),
            position: 0,
            revealed: false,
            mode,
            level: level.to_string(),
        })
    }

    pub fn current(&self) -> &KanjiEntry {
        &self.cards[self.position]
    }

    /// Lines shown under the character. Hidden details stay out until
    /// `reveal`.
    pub fn details(&self) -> Vec<String> {
        let card = self.current();
        let reading = format!("Reading: {}", card.reading);
        let meaning = format!("Meaning: {}", card.meaning);
        match (self.mode, self.revealed) {
            (KanjiMode::Writing, false) => vec![format!("Strokes: {}", card.stroke_count)],
            (KanjiMode::Writing, true) => {
                vec![format!("Strokes: {}", card.stroke_count), reading, meaning]
            }
            (_, false) => Vec::new(),
            (KanjiMode::Reading, true) => vec![reading, meaning],
            (KanjiMode::Meaning, true) => vec![meaning, reading],
        }
    }

    pub fn reveal(&mut self) {
        self.revealed = !self.revealed;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Next character, hidden. Past the last one the drill reshuffles.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.revealed = false;
        self.position += 1;
        if self.position >= self.cards.len() {
            self.cards = randomizer::shuffle(&self.cards, rng);
            self.position = 0;
        }
    }

    pub fn set_mode(&mut self, mode: KanjiMode) {
        self.mode = mode;
        self.revealed = false;
    }

    pub fn mode(&self) -> KanjiMode {
        self.mode
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bank::{WordBank, WordEntry};
use crate::engine::randomizer;
use crate::session::QuizError;

/// Deck filter meaning every category.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashcardMode {
    /// Word on the front, reading on the back.
    Kanji,
    /// Reading on the front, word on the back.
    Reading,
    /// Word on the front, meaning on the back.
    Meaning,
}

impl FlashcardMode {
    pub const ALL: [FlashcardMode; 3] = [
        FlashcardMode::Kanji,
        FlashcardMode::Reading,
        FlashcardMode::Meaning,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FlashcardMode::Kanji => "kanji",
            FlashcardMode::Reading => "reading",
            FlashcardMode::Meaning => "meaning",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            FlashcardMode::Kanji => "Kanji → Reading",
            FlashcardMode::Reading => "Reading → Kanji",
            FlashcardMode::Meaning => "Kanji → Meaning",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FlashcardMode::Kanji => FlashcardMode::Reading,
            FlashcardMode::Reading => FlashcardMode::Meaning,
            FlashcardMode::Meaning => FlashcardMode::Kanji,
        }
    }
}

impl fmt::Display for FlashcardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlashcardMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown flashcard mode `{s}`"))
    }
}

pub struct FlashcardDeck {
    cards: Vec<WordEntry>,
    position: usize,
    flipped: bool,
    mode: FlashcardMode,
    category: String,
}

impl FlashcardDeck {
    /// Deck of every level of `category`, or of the whole bank for `"all"`.
    pub fn new<R: Rng + ?Sized>(
        bank: &WordBank,
        category: &str,
        mode: FlashcardMode,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        let cards: Vec<WordEntry> = bank
            .all_words()
            .iter()
            .filter(|w| category == ALL_CATEGORIES || w.category == category)
            .cloned()
            .collect();

        if cards.is_empty() {
            return Err(QuizError::InsufficientData {
                category: category.to_string(),
                level: "any".to_string(),
            });
        }

        Ok(Self {
            cards: randomizer::shuffle(&cards, rng),
            position: 0,
            flipped: false,
            mode,
            category: category.to_string(),
        })
    }

    pub fn current(&self) -> &WordEntry {
        &self.cards[self.position]
    }

    pub fn front(&self) -> &str {
        let card = self.current();
        match self.mode {
            FlashcardMode::Kanji | FlashcardMode::Meaning => &card.word,
            FlashcardMode::Reading => &card.reading,
        }
    }

    pub fn back(&self) -> &str {
        let card = self.current();
        match self.mode {
            FlashcardMode::Kanji => &card.reading,
            FlashcardMode::Reading => &card.word,
            FlashcardMode::Meaning => &card.meaning,
        }
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Move to the next card face down. Past the last card the deck is
    /// reshuffled and starts over.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.flipped = false;
        self.position += 1;
        if self.position >= self.cards.len() {
            self.cards = randomizer::shuffle(&self.cards, rng);
            self.position = 0;
        }
    }

    pub fn mode(&self) -> FlashcardMode {
        self.mode
    }

    pub fn category(&self) -> &str {
        &self.category
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

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bank::WordEntry;
use crate::engine::randomizer;
use crate::session::QuizError;

/// Multiple-choice always shows this many options.
pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Vocabulary level the quiz draws words from.
    pub fn level(self) -> &'static str {
        match self {
            Difficulty::Easy => "beginner",
            Difficulty::Medium => "intermediate",
            Difficulty::Hard => "advanced",
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }

    pub fn reveal(self) -> RevealPolicy {
        RevealPolicy::for_multiplier(self.multiplier())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QuizError::UnknownDifficulty(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Typing,
    MultipleChoice,
    /// Shares the multiple-choice data contract; only the presentation differs.
    Matching,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::Typing,
        QuestionType::MultipleChoice,
        QuestionType::Matching,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Typing => "typing",
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::Matching => "matching",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            QuestionType::Typing => "Typing",
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::Matching => "Matching",
        }
    }

    pub fn has_options(self) -> bool {
        !matches!(self, QuestionType::Typing)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QuizError::UnknownQuestionType(s.to_string()))
    }
}

/// Which fields of an entry the learner gets to see.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPolicy {
    WordAndReading,
    WordOnly,
    MeaningOnly,
}

impl RevealPolicy {
    pub fn for_multiplier(multiplier: f64) -> Self {
        if multiplier <= 1.0 {
            RevealPolicy::WordAndReading
        } else if multiplier <= 1.5 {
            RevealPolicy::WordOnly
        } else {
            RevealPolicy::MeaningOnly
        }
    }

    pub fn prompt(self, entry: &WordEntry) -> Prompt {
        match self {
            RevealPolicy::WordAndReading => Prompt {
                word: Some(entry.word.clone()),
                reading: Some(entry.reading.clone()),
                meaning: None,
            },
            RevealPolicy::WordOnly => Prompt {
                word: Some(entry.word.clone()),
                reading: None,
                meaning: None,
            },
            RevealPolicy::MeaningOnly => Prompt {
                word: None,
                reading: None,
                meaning: Some(entry.meaning.clone()),
            },
        }
    }
}

/// Display-ready prompt fields. Hidden fields are `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub word: Option<String>,
    pub reading: Option<String>,
    pub meaning: Option<String>,
}

/// A question as handed to the presenter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub entry: WordEntry,
    pub prompt: Prompt,
    /// Option readings in display order; empty for typing questions.
    pub options: Vec<String>,
}

impl Question {
    pub fn build<R: Rng + ?Sized>(
        entry: &WordEntry,
        pool: &[WordEntry],
        difficulty: Difficulty,
        question_type: QuestionType,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        let options = if question_type.has_options() {
            choice_options(entry, pool, rng)?
                .into_iter()
                .map(|w| w.reading)
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            entry: entry.clone(),
            prompt: difficulty.reveal().prompt(entry),
            options,
        })
    }
}

/// The correct entry plus three distractors from the rest of `pool`,
/// shuffled. `pool` is the quiz's sampled words and includes `correct`.
///
/// Options are shown by reading, so a distractor never shares a reading
/// (case-insensitively) with the answer or with another distractor. A pool
/// therefore needs four distinct readings, not just four words.
pub fn choice_options<R: Rng + ?Sized>(
    correct: &WordEntry,
    pool: &[WordEntry],
    rng: &mut R,
) -> Result<Vec<WordEntry>, QuizError> {
    if pool.len() < OPTION_COUNT {
        return Err(QuizError::InsufficientOptions {
            available: pool.len(),
            required: OPTION_COUNT,
        });
    }

    let mut seen = HashSet::from([correct.reading.to_lowercase()]);
    let others: Vec<WordEntry> = pool
        .iter()
        .filter(|w| w.id != correct.id && seen.insert(w.reading.to_lowercase()))
        .cloned()
        .collect();

    if others.len() < OPTION_COUNT - 1 {
        return Err(QuizError::InsufficientOptions {
            available: others.len() + 1,
            required: OPTION_COUNT,
        });
    }

    let mut options = vec![correct.clone()];
    options.extend(randomizer::sample(&others, OPTION_COUNT - 1, rng));

    Ok(randomizer::shuffle(&options, rng))
}

/// Trimmed, case-insensitive match against the entry's reading.
pub fn is_correct(entry: &WordEntry, answer: &str) -> bool {
    answer.trim().to_lowercase() == entry.reading.to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn entry(i: usize) -> WordEntry {
        WordEntry {
            id: format!("beginner_numbers_{i}"),
            word: format!("w{i}"),
            reading: format!("r{i}"),
            meaning: format!("m{i}"),
            kind: "number".to_string(),
            level: "beginner".to_string(),
            category: "numbers".to_string(),
        }
    }

    #[test]
    fn test_difficulty_maps_to_level() {
        assert_eq!(Difficulty::Easy.level(), "beginner");
        assert_eq!(Difficulty::Medium.level(), "intermediate");
        assert_eq!(Difficulty::Hard.level(), "advanced");
    }

    #[test]
    fn test_parse_difficulty_and_type() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(
            "multiple-choice".parse::<QuestionType>().unwrap(),
            QuestionType::MultipleChoice
        );
        assert!(matches!(
            "insane".parse::<Difficulty>(),
            Err(QuizError::UnknownDifficulty(_))
        ));
        assert!(matches!(
            "essay".parse::<QuestionType>(),
            Err(QuizError::UnknownQuestionType(_))
        ));
    }

    #[test]
    fn test_reveal_policy_by_multiplier() {
        let e = entry(0);
        let easy = Difficulty::Easy.reveal().prompt(&e);
        assert_eq!(easy.word.as_deref(), Some("w0"));
        assert_eq!(easy.reading.as_deref(), Some("r0"));
        assert!(easy.meaning.is_none());

        let medium = Difficulty::Medium.reveal().prompt(&e);
        assert!(medium.word.is_some());
        assert!(medium.reading.is_none() && medium.meaning.is_none());

        let hard = Difficulty::Hard.reveal().prompt(&e);
        assert!(hard.word.is_none() && hard.reading.is_none());
        assert_eq!(hard.meaning.as_deref(), Some("m0"));
    }

    #[test]
    fn test_options_are_four_distinct_and_include_answer() {
        let mut rng = SmallRng::seed_from_u64(21);
        let pool: Vec<WordEntry> = (0..10).map(entry).collect();
        let options = choice_options(&pool[3], &pool, &mut rng).unwrap();
        assert_eq!(options.len(), OPTION_COUNT);
        let ids: HashSet<&str> = options.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids.len(), OPTION_COUNT);
        assert!(ids.contains("beginner_numbers_3"));
    }

    #[test]
    fn test_four_words_is_enough_for_options() {
        let mut rng = SmallRng::seed_from_u64(2);
        let pool: Vec<WordEntry> = (0..4).map(entry).collect();
        let options = choice_options(&pool[0], &pool, &mut rng).unwrap();
        let mut ids: Vec<String> = options.into_iter().map(|w| w.id).collect();
        ids.sort();
        let mut expected: Vec<String> = pool.iter().map(|w| w.id.clone()).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_three_words_is_not_enough_for_options() {
        let mut rng = SmallRng::seed_from_u64(2);
        let pool: Vec<WordEntry> = (0..3).map(entry).collect();
        assert!(matches!(
            choice_options(&pool[0], &pool, &mut rng),
            Err(QuizError::InsufficientOptions { available: 3, required: 4 })
        ));
    }

    fn homophone(id: &str, word: &str, reading: &str) -> WordEntry {
        WordEntry {
            id: id.to_string(),
            word: word.to_string(),
            reading: reading.to_string(),
            ..entry(0)
        }
    }

    #[test]
    fn test_options_never_repeat_a_reading() {
        let pool = vec![
            homophone("hashi_chopsticks", "箸", "hashi"),
            homophone("hashi_bridge", "橋", "HASHI"),
            homophone("ame_rain", "雨", "ame"),
            homophone("ame_candy", "飴", "ame"),
            homophone("kami_paper", "紙", "kami"),
            homophone("kumo_cloud", "雲", "kumo"),
        ];
        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let options = choice_options(&pool[0], &pool, &mut rng).unwrap();
            let readings: HashSet<String> =
                options.iter().map(|w| w.reading.to_lowercase()).collect();
            assert_eq!(readings.len(), OPTION_COUNT);
            assert!(options.iter().any(|w| w.id == "hashi_chopsticks"));
            assert!(options.iter().all(|w| w.id != "hashi_bridge"));
        }
    }

    #[test]
    fn test_four_words_with_three_readings_is_not_enough() {
        let mut rng = SmallRng::seed_from_u64(4);
        let pool = vec![
            homophone("hashi_chopsticks", "箸", "hashi"),
            homophone("hashi_bridge", "橋", "hashi"),
            homophone("ame_rain", "雨", "ame"),
            homophone("ame_candy", "飴", "ame"),
            homophone("kami_paper", "紙", "kami"),
        ];
        assert!(matches!(
            choice_options(&pool[2], &pool, &mut rng),
            Err(QuizError::InsufficientOptions { available: 3, required: 4 })
        ));
    }

    #[test]
    fn test_typing_question_has_no_options() {
        let mut rng = SmallRng::seed_from_u64(2);
        let pool: Vec<WordEntry> = (0..2).map(entry).collect();
        let q = Question::build(&pool[0], &pool, Difficulty::Easy, QuestionType::Typing, &mut rng)
            .unwrap();
        assert!(q.options.is_empty());
    }

    #[test]
    fn test_answer_check_trims_and_ignores_case() {
        let mut e = entry(0);
        e.reading = "Miso Shiru".to_string();
        assert!(is_correct(&e, "  miso shiru "));
        assert!(is_correct(&e, "MISO SHIRU"));
        assert!(!is_correct(&e, "misoshiru"));
    }

    #[test]
    fn test_meaning_prompt_still_grades_reading() {
        let e = entry(5);
        let prompt = Difficulty::Hard.reveal().prompt(&e);
        assert_eq!(prompt.meaning.as_deref(), Some("m5"));
        assert!(!is_correct(&e, "m5"));
        assert!(is_correct(&e, "r5"));
    }
}

//! Property tests for the word bank and sampling helpers.
//!
//! - sampled quiz words are distinct members of the requested bucket
//! - sample size is min(count, bucket size)
//! - every indexed entry is reachable by id and by its bucket
//! - shuffle is a permutation

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use japvoc::bank::{RawVocabulary, RawWord, WordBank};
use japvoc::engine::randomizer;

const LEVELS: [&str; 3] = ["beginner", "intermediate", "advanced"];
const CATEGORIES: [&str; 3] = ["numbers", "animals", "food"];

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_bucket_sizes() -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    proptest::collection::vec((0..LEVELS.len(), 0..CATEGORIES.len(), 1usize..12), 1..8)
}

fn build_bank(buckets: &[(usize, usize, usize)]) -> WordBank {
    let mut raw = RawVocabulary::new();
    for &(level, category, size) in buckets {
        let words = (0..size)
            .map(|i| RawWord::new(&format!("w{level}{category}{i}"), &format!("r{i}"), "m"))
            .collect();
        raw = raw.with_words(LEVELS[level], CATEGORIES[category], words);
    }
    WordBank::build(&raw).unwrap()
}

proptest! {
    #[test]
    fn sampled_words_are_distinct_bucket_members(
        buckets in arb_bucket_sizes(),
        count in 0usize..20,
        seed in any::<u64>(),
    ) {
        let bank = build_bank(&buckets);
        let mut rng = SmallRng::seed_from_u64(seed);
        for category in CATEGORIES {
            for level in LEVELS {
                let bucket: HashSet<String> =
                    bank.words(category, level).iter().map(|w| w.id.clone()).collect();
                let sampled = bank.get_words_for_quiz(category, level, count, &mut rng);

                prop_assert_eq!(sampled.len(), count.min(bucket.len()));
                let ids: HashSet<String> = sampled.iter().map(|w| w.id.clone()).collect();
                prop_assert_eq!(ids.len(), sampled.len());
                prop_assert!(ids.is_subset(&bucket));
            }
        }
    }

    #[test]
    fn every_entry_is_reachable_both_ways(buckets in arb_bucket_sizes()) {
        let bank = build_bank(&buckets);
        let expected: usize = {
            let mut merged = std::collections::HashMap::new();
            for &(level, category, size) in &buckets {
                *merged.entry((level, category)).or_insert(0usize) += size;
            }
            merged.values().sum()
        };
        prop_assert_eq!(bank.len(), expected);

        for entry in bank.all_words() {
            prop_assert_eq!(bank.word(&entry.id), Some(entry));
            let bucket = bank.words(&entry.category, &entry.level);
            prop_assert!(bucket.iter().any(|w| w.id == entry.id));
        }
    }

    #[test]
    fn shuffle_is_a_permutation(items in proptest::collection::vec(any::<u16>(), 0..64), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut shuffled = randomizer::shuffle(&items, &mut rng);
        let mut original = items.clone();
        shuffled.sort_unstable();
        original.sort_unstable();
        prop_assert_eq!(shuffled, original);
    }
}

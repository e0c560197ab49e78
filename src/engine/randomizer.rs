use rand::Rng;
use rand::seq::SliceRandom;

/// Returns a Fisher–Yates shuffled copy of `items`. The input is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Up to `n` elements drawn without replacement, in random order.
/// `n` larger than the input clamps to the input length.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], n: usize, rng: &mut R) -> Vec<T> {
    let mut picked = shuffle(items, rng);
    picked.truncate(n.min(items.len()));
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_shuffle_keeps_every_element() {
        let mut rng = SmallRng::seed_from_u64(7);
        let input: Vec<u32> = (0..50).collect();
        let mut out = shuffle(&input, &mut rng);
        assert_eq!(out.len(), input.len());
        out.sort_unstable();
        assert_eq!(out, input);
    }

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let mut rng = SmallRng::seed_from_u64(1);
        let input = vec!["a", "b", "c", "d"];
        let _ = shuffle(&input, &mut rng);
        assert_eq!(input, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_shuffle_of_empty_is_empty() {
        let mut rng = SmallRng::seed_from_u64(1);
        let empty: Vec<u8> = Vec::new();
        assert!(shuffle(&empty, &mut rng).is_empty());
    }

    #[test]
    fn test_sample_clamps_to_input_length() {
        let mut rng = SmallRng::seed_from_u64(3);
        let input = vec![1, 2, 3];
        assert_eq!(sample(&input, 10, &mut rng).len(), 3);
        assert_eq!(sample(&input, 2, &mut rng).len(), 2);
        assert!(sample(&input, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_sample_has_no_duplicates() {
        let mut rng = SmallRng::seed_from_u64(11);
        let input: Vec<u32> = (0..20).collect();
        let mut picked = sample(&input, 8, &mut rng);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 8);
    }
}

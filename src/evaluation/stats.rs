//! Accuracy statistics across trials.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Returns `samples` in a deterministic order derived from `seed`.
///
/// The same seed always yields the same order for the same input.
pub fn shuffle<T>(mut samples: Vec<T>, seed: u64) -> Vec<T> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    samples.shuffle(&mut rng);
    samples
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; `0.0` for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_population_std() {
        let accuracies = [0.6, 0.8, 1.0];
        assert!((mean(&accuracies) - 0.8).abs() < 1e-12);
        assert!((std_dev(&accuracies) - 0.163_299_316).abs() < 1e-6);
    }

    #[test]
    fn test_single_trial_has_zero_std() {
        assert_eq!(std_dev(&[0.5]), 0.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let items: Vec<u32> = (0..50).collect();
        let a = shuffle(items.clone(), 9999);
        let b = shuffle(items.clone(), 9999);
        let c = shuffle(items.clone(), 1);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, items);
    }
}

// ============================================================
// Layer 4 — Train/Validation/Test Splitter
// ============================================================
// Shuffles a single list of records and cuts it into three
// parts for the `prepare` command:
//
//   [ ──── train ──── | ── val ── | ── test ── ]
//
// Sizes are rounded from the fractions; train takes the rest.
// The shuffle is seeded, so the same input and seed always
// produce the same three files.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: rand crate documentation

use anyhow::{ensure, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// The three parts of a split dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplits<T> {
    pub train: Vec<T>,
    pub val:   Vec<T>,
    pub test:  Vec<T>,
}

/// Shuffle `samples` with `seed` and split into (train, val, test).
///
/// # Errors
/// Fails if either fraction is outside `[0, 1]` or they sum to more than 1.
pub fn split_dataset<T>(
    mut samples:   Vec<T>,
    val_fraction:  f64,
    test_fraction: f64,
    seed:          u64,
) -> Result<DatasetSplits<T>> {
    ensure!(
        (0.0..=1.0).contains(&val_fraction) && (0.0..=1.0).contains(&test_fraction),
        "split fractions must be within [0, 1] (val={val_fraction}, test={test_fraction})"
    );
    ensure!(
        val_fraction + test_fraction <= 1.0,
        "val + test fractions must not exceed 1 (got {})",
        val_fraction + test_fraction
    );

    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total  = samples.len();
    let n_test = (((total as f64) * test_fraction).round() as usize).min(total);
    let n_val  = (((total as f64) * val_fraction).round() as usize).min(total - n_test);

    // split_off(n) keeps [0..n) and returns [n..)
    let test = samples.split_off(total - n_test);
    let val  = samples.split_off(samples.len() - n_val);

    tracing::debug!(
        "Dataset split: {} train, {} val, {} test",
        samples.len(),
        val.len(),
        test.len(),
    );

    Ok(DatasetSplits { train: samples, val, test })
}

//! Variant bucketing for first-time assignment.
//!
//! The draw runs exactly once per (installation, experiment); afterwards the
//! persisted assignment is authoritative. The RNG is a parameter so tests
//! can pin the outcome with a seeded generator.

use rand::Rng;

use crate::registry::ExperimentConfig;

/// Draw one variant from `config`.
///
/// - Without weights (or with a weight list whose length does not match the
///   variant list), the draw is uniform over all variants.
/// - With index-aligned weights, a single uniform draw `r` in `[0, 1)` walks
///   the cumulative weight sum and picks the first variant whose cumulative
///   mass reaches `r`. If the walk falls through — floating-point drift, or
///   weights summing below 1 — the first variant wins.
///
/// Returns `None` only for a config with no variants at all.
///
/// Weights are not validated for sign or sum; malformed tables degrade via
/// the rules above rather than erroring.
pub fn assign_variant<'a, R: Rng + ?Sized>(
    config: &'a ExperimentConfig,
    rng: &mut R,
) -> Option<&'a str> {
    let variants = config.variants();
    if variants.is_empty() {
        return None;
    }

    let weights = match config.weight_table() {
        Some(weights) if weights.len() == variants.len() => weights,
        _ => return Some(&variants[rng.gen_range(0..variants.len())]),
    };

    let r: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (variant, weight) in variants.iter().zip(weights) {
        cumulative += weight;
        if r <= cumulative {
            return Some(variant);
        }
    }

    // Walk fell through: weights under-sum 1.0.
    Some(&variants[0])
}

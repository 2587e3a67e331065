// Hit budgets and weighted hit selection.
//
// Turning a weight array into a hit mask happens in two steps. First a
// budget: how many hits this voice gets this bar, from the energy zone, the
// position within that zone, and a shape multiplier (the anchor thins out
// slightly as shape rises, the shimmer fills in). Then a selection: each
// eligible step gets a Gumbel-perturbed log-weight score and the top K
// scores win, greedily, subject to a circular minimum spacing. This is
// weighted sampling without replacement, but fully determined by the seed.
//
// If the spacing rule leaves the budget unfilled, it is relaxed to half and
// then dropped, so the budget is met whenever enough eligible steps exist.

use crate::types::{EnergyZone, MAX_STEPS, StepWeights, clamp_pattern_length, clamp_unit, length_mask};
use duopulse_hash::hash_to_open_unit;

const SCORE_EPSILON: f32 = 1e-6;
const EXCLUDED_SCORE: f32 = -1e9;

/// Anchor density multiplier from shape: 1.0 below 0.30, easing to 0.9 at
/// 0.70 and 0.8 at 1.0.
pub fn anchor_budget_multiplier(shape: f32) -> f32 {
    let s = clamp_unit(shape);
    if s < 0.30 {
        1.0
    } else if s < 0.70 {
        1.0 - (s - 0.30) / 0.40 * 0.10
    } else {
        0.90 - (s - 0.70) / 0.30 * 0.10
    }
}

/// Shimmer density multiplier from shape: 1.0 below 0.30, then 1.1 rising
/// to 1.3 at 0.70 and 1.5 at 1.0.
pub fn shimmer_budget_multiplier(shape: f32) -> f32 {
    let s = clamp_unit(shape);
    if s < 0.30 {
        1.0
    } else if s < 0.70 {
        1.10 + (s - 0.30) / 0.40 * 0.20
    } else {
        1.30 + (s - 0.70) / 0.30 * 0.20
    }
}

fn round_to_usize(x: f32) -> usize {
    (x.max(0.0) + 0.5) as usize
}

/// Anchor hits for one pattern.
pub fn anchor_budget(energy: f32, shape: f32, pattern_length: i32) -> usize {
    let len = clamp_pattern_length(pattern_length);
    let energy = clamp_unit(energy);
    let zone = EnergyZone::from_energy(energy);
    let mult = anchor_budget_multiplier(shape);
    let max_hits = (len / 3).max(1);

    let (min_hits, typical, progress) = match zone {
        EnergyZone::Minimal => (1, (len / 16).max(1), energy / 0.20),
        EnergyZone::Groove => (3, len / 6, (energy - 0.20) / 0.30),
        EnergyZone::Build => (4, len / 4, (energy - 0.50) / 0.25),
        EnergyZone::Peak => (6, len / 3, (energy - 0.75) / 0.25),
    };
    let typical = round_to_usize(typical as f32 * mult) as f32;
    let min_hits = round_to_usize(min_hits as f32 * mult).max(1) as f32;
    let progress = progress.clamp(0.0, 1.0);

    let budget = round_to_usize(min_hits + (typical - min_hits) * progress);
    budget.clamp(1, max_hits)
}

/// Shimmer hits for one pattern, relative to the anchor's budget.
///
/// `ratio` is the shimmer/anchor balance before shape correction; it is
/// capped at 1.0 in the two lowest energy zones.
pub fn shimmer_budget(anchor_hits: usize, energy: f32, shape: f32, pattern_length: i32, ratio: f32) -> usize {
    let len = clamp_pattern_length(pattern_length);
    let zone = EnergyZone::from_energy(energy);
    let mut ratio = ratio.max(0.0);
    if matches!(zone, EnergyZone::Minimal | EnergyZone::Groove) {
        ratio = ratio.min(1.0);
    }
    let correction = shimmer_budget_multiplier(shape) / anchor_budget_multiplier(shape);
    let hits = round_to_usize(anchor_hits as f32 * ratio * correction);
    if zone == EnergyZone::Minimal {
        hits.min(len / 8)
    } else {
        hits.clamp(1, (len / 4).max(1))
    }
}

/// Minimum circular distance between selected hits for an energy zone.
pub fn min_spacing_for_zone(zone: EnergyZone) -> usize {
    match zone {
        EnergyZone::Minimal => 4,
        EnergyZone::Groove => 2,
        EnergyZone::Build => 1,
        EnergyZone::Peak => 0,
    }
}

/// `ln(weight) + Gumbel noise` per step. `seed_for_step` lets the caller
/// lock some steps to one seed and let others evolve with another.
pub fn gumbel_scores<F>(weights: &StepWeights, pattern_length: i32, seed_for_step: F) -> StepWeights
where
    F: Fn(usize) -> u32,
{
    let len = clamp_pattern_length(pattern_length);
    let mut scores = [EXCLUDED_SCORE; MAX_STEPS];
    for (step, score) in scores.iter_mut().enumerate().take(len) {
        let w = weights[step];
        if w.is_nan() || w < SCORE_EPSILON {
            continue;
        }
        let u = hash_to_open_unit(seed_for_step(step), step as i32);
        *score = w.ln() - (-u.ln()).ln();
    }
    scores
}

fn circular_distance(a: usize, b: usize, len: usize) -> usize {
    let d = a.abs_diff(b);
    d.min(len - d)
}

fn spacing_ok(selected: u32, candidate: usize, min_spacing: usize, len: usize) -> bool {
    min_spacing == 0
        || (0..len)
            .filter(|&s| selected & (1 << s) != 0)
            .all(|s| circular_distance(s, candidate, len) >= min_spacing)
}

/// Greedy top-K over precomputed scores.
pub fn select_top_k(
    scores: &StepWeights,
    eligibility: u32,
    target: usize,
    pattern_length: i32,
    min_spacing: usize,
) -> u32 {
    let len = clamp_pattern_length(pattern_length);
    let eligible = eligibility & length_mask(len);
    let target = target.min(eligible.count_ones() as usize);
    let mut selected = 0u32;
    let mut count = 0;

    for spacing in [min_spacing, min_spacing / 2, 0] {
        while count < target {
            let best = (0..len)
                .filter(|&s| eligible & (1 << s) != 0 && selected & (1 << s) == 0)
                .filter(|&s| scores[s] > EXCLUDED_SCORE)
                .filter(|&s| spacing_ok(selected, s, spacing, len))
                .fold(None, |best: Option<usize>, s| match best {
                    Some(b) if scores[b] >= scores[s] => Some(b),
                    _ => Some(s),
                });
            match best {
                Some(step) => {
                    selected |= 1 << step;
                    count += 1;
                }
                None => break,
            }
        }
        if count >= target || spacing == 0 {
            break;
        }
    }
    selected
}

/// Pick `target` eligible steps by Gumbel top-K with one seed for every step.
pub fn select_hits_gumbel_top_k(
    weights: &StepWeights,
    eligibility: u32,
    target: usize,
    seed: u32,
    pattern_length: i32,
    min_spacing: usize,
) -> u32 {
    let scores = gumbel_scores(weights, pattern_length, |_| seed);
    select_top_k(&scores, eligibility, target, pattern_length, min_spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_at_boundaries() {
        assert_eq!(anchor_budget_multiplier(0.0), 1.0);
        assert!((anchor_budget_multiplier(0.70) - 0.9).abs() < 1e-5);
        assert!((anchor_budget_multiplier(1.0) - 0.8).abs() < 1e-5);
        assert_eq!(shimmer_budget_multiplier(0.29), 1.0);
        assert!((shimmer_budget_multiplier(0.30) - 1.1).abs() < 1e-5);
        assert!((shimmer_budget_multiplier(1.0) - 1.5).abs() < 1e-5);
    }

    #[test]
    fn anchor_budget_grows_with_energy() {
        let mut previous = 0;
        for i in 0..=20 {
            let b = anchor_budget(i as f32 / 20.0, 0.0, 32);
            assert!((1..=32 / 3).contains(&b), "energy {} budget {b}", i as f32 / 20.0);
            assert!(b + 1 >= previous, "budget dropped sharply at step {i}");
            previous = b;
        }
        assert!(anchor_budget(1.0, 0.0, 32) > anchor_budget(0.0, 0.0, 32));
    }

    #[test]
    fn anchor_budget_tiny_pattern() {
        assert_eq!(anchor_budget(1.0, 0.5, 1), 1);
        assert_eq!(anchor_budget(0.0, 0.0, -8), 1);
    }

    #[test]
    fn shimmer_budget_respects_zone_caps() {
        assert!(shimmer_budget(10, 0.0, 0.5, 32, 2.0) <= 4);
        assert!(shimmer_budget(10, 0.9, 0.5, 32, 2.0) <= 8);
        assert!(shimmer_budget(1, 0.9, 0.0, 32, 0.0) >= 1);
    }

    #[test]
    fn zone_spacing() {
        assert_eq!(min_spacing_for_zone(EnergyZone::Minimal), 4);
        assert_eq!(min_spacing_for_zone(EnergyZone::Groove), 2);
        assert_eq!(min_spacing_for_zone(EnergyZone::Build), 1);
        assert_eq!(min_spacing_for_zone(EnergyZone::Peak), 0);
    }

    #[test]
    fn selects_exact_count_within_eligibility() {
        let weights = [0.5; MAX_STEPS];
        for target in 0..=16 {
            let mask = select_hits_gumbel_top_k(&weights, 0xFFFF, target, 99, 16, 2);
            assert_eq!(mask.count_ones() as usize, target);
            assert_eq!(mask & !0xFFFF, 0);
        }
    }

    #[test]
    fn respects_eligibility() {
        let weights = [0.5; MAX_STEPS];
        let mask = select_hits_gumbel_top_k(&weights, 0x0F0F, 20, 1, 16, 0);
        assert_eq!(mask, 0x0F0F);
    }

    #[test]
    fn spacing_holds_when_satisfiable() {
        let weights = [0.5; MAX_STEPS];
        for seed in 0..32 {
            let mask = select_hits_gumbel_top_k(&weights, u32::MAX, 4, seed, 32, 4);
            let steps: Vec<usize> = (0..32).filter(|&s| mask & (1 << s) != 0).collect();
            assert_eq!(steps.len(), 4);
            for (i, &a) in steps.iter().enumerate() {
                for &b in &steps[i + 1..] {
                    assert!(circular_distance(a, b, 32) >= 2, "seed {seed}: {steps:?}");
                }
            }
        }
    }

    #[test]
    fn heavy_weights_usually_win() {
        let mut weights = [0.05; MAX_STEPS];
        weights[0] = 1.0;
        weights[8] = 1.0;
        let mut hits = 0;
        for seed in 0..100 {
            let mask = select_hits_gumbel_top_k(&weights, 0xFFFF, 2, seed, 16, 0);
            hits += (mask & 1 != 0) as u32 + (mask & (1 << 8) != 0) as u32;
        }
        assert!(hits > 150, "heavy steps only won {hits}/200 times");
    }

    #[test]
    fn zero_weights_are_never_picked() {
        let mut weights = [0.0; MAX_STEPS];
        weights[3] = 0.5;
        let mask = select_hits_gumbel_top_k(&weights, 0xFFFF, 4, 1, 16, 0);
        assert_eq!(mask, 1 << 3);
    }

    #[test]
    fn deterministic_for_seed() {
        let weights = [0.4; MAX_STEPS];
        let a = select_hits_gumbel_top_k(&weights, u32::MAX, 6, 5, 32, 2);
        let b = select_hits_gumbel_top_k(&weights, u32::MAX, 6, 5, 32, 2);
        assert_eq!(a, b);
    }
}

// Complementary voice placement.
//
// The shimmer voice fills the silences the anchor leaves. `find_gaps` scans
// the anchor mask for runs of empty steps (treating the pattern as a loop,
// so a run touching both ends is one gap), and
// `apply_complement_relationship` hands out the shimmer's hit budget across
// those gaps in proportion to their length. Where inside each gap a hit lands
// depends on drift: evenly spaced when drift is low, on the heaviest shimmer
// weights in the middle range, and seeded-random when drift is high.
//
// The shimmer mask never overlaps the anchor and always holds exactly
// min(target, empty steps) hits.

use crate::types::{MAX_STEPS, StepWeights, length_mask};
use duopulse_hash::StepRng;

/// A 32-step pattern holds at most 16 separate gaps.
pub const MAX_GAPS: usize = 16;

const EVEN_PLACEMENT_BELOW: f32 = 0.3;
const WEIGHTED_PLACEMENT_BELOW: f32 = 0.7;

/// A run of empty anchor steps. `start + length` may wrap past the end of
/// the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gap {
    pub start: usize,
    pub length: usize,
}

impl Gap {
    /// Pattern step at `offset` into the gap.
    fn step(&self, offset: usize, len: usize) -> usize {
        (self.start + offset) % len
    }
}

/// Fixed-capacity gap list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GapList {
    gaps: [Gap; MAX_GAPS],
    count: usize,
}

impl GapList {
    pub fn as_slice(&self) -> &[Gap] {
        &self.gaps[..self.count]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn push(&mut self, gap: Gap) {
        if self.count < MAX_GAPS {
            self.gaps[self.count] = gap;
            self.count += 1;
        }
    }

    pub fn total_length(&self) -> usize {
        self.as_slice().iter().map(|g| g.length).sum()
    }
}

/// Find the runs of empty steps in `anchor_mask`, merging the run that
/// wraps from the end of the pattern back to step 0.
pub fn find_gaps(anchor_mask: u32, pattern_length: i32) -> GapList {
    let mut list = GapList::default();
    if pattern_length <= 0 {
        return list;
    }
    let len = (pattern_length as usize).min(MAX_STEPS);
    let mask = anchor_mask & length_mask(len);

    if mask == 0 {
        list.push(Gap { start: 0, length: len });
        return list;
    }

    let mut run_start: Option<usize> = None;
    for step in 0..len {
        let hit = mask & (1 << step) != 0;
        match (hit, run_start) {
            (false, None) => run_start = Some(step),
            (true, Some(start)) => {
                list.push(Gap { start, length: step - start });
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        list.push(Gap { start, length: len - start });
    }

    if list.count > 1 {
        let first = list.gaps[0];
        let last = list.gaps[list.count - 1];
        if first.start == 0 && last.start + last.length == len {
            list.gaps[0] = Gap {
                start: last.start,
                length: first.length + last.length,
            };
            list.count -= 1;
        }
    }
    list
}

fn place_evenly(gap: &Gap, index: usize, share: usize, len: usize) -> usize {
    gap.step(gap.length * index / share.max(1), len)
}

fn place_weighted(
    gap: &Gap,
    weights: Option<&StepWeights>,
    used: u32,
    len: usize,
) -> Option<usize> {
    let mut free = (0..gap.length)
        .map(|offset| gap.step(offset, len))
        .filter(|&step| used & (1 << step) == 0);
    match weights {
        // Ties keep the earliest step.
        Some(w) => free.fold(None, |best: Option<usize>, step| match best {
            Some(b) if w[b] >= w[step] => Some(b),
            _ => Some(step),
        }),
        None => free.next(),
    }
}

fn place_seeded(gap: &Gap, rng: &mut StepRng, used: u32, len: usize) -> Option<usize> {
    let is_free = |offset: &usize| used & (1 << gap.step(*offset, len)) == 0;
    let available = (0..gap.length).filter(is_free).count();
    if available == 0 {
        return None;
    }
    let pick = rng.below(available as u32) as usize;
    (0..gap.length)
        .filter(is_free)
        .nth(pick)
        .map(|offset| gap.step(offset, len))
}

/// Shimmer mask complementing `anchor_mask`.
///
/// Returns 0 when `target_hits <= 0`, when `pattern_length` is negative,
/// or when the anchor leaves no empty step. Lengths above 32 clamp to 32
/// and a length of 0 is treated as 1.
pub fn apply_complement_relationship(
    anchor_mask: u32,
    shimmer_weights: Option<&StepWeights>,
    drift: f32,
    seed: u32,
    pattern_length: i32,
    target_hits: i32,
) -> u32 {
    if target_hits <= 0 || pattern_length < 0 {
        return 0;
    }
    let len = (pattern_length as usize).clamp(1, MAX_STEPS);
    let gaps = find_gaps(anchor_mask, len as i32);
    let mut remaining_gap_length = gaps.total_length();
    if remaining_gap_length == 0 {
        return 0;
    }

    let mut rng = StepRng::new(seed);
    let mut shimmer = 0u32;
    let mut remaining = target_hits as usize;

    for gap in gaps.as_slice() {
        if remaining == 0 {
            break;
        }
        let share = (gap.length * remaining / remaining_gap_length.max(1))
            .max(1)
            .min(remaining)
            .min(gap.length);
        remaining_gap_length -= gap.length;

        for j in 0..share {
            let position = if drift < EVEN_PLACEMENT_BELOW {
                Some(place_evenly(gap, j, share, len))
            } else if drift < WEIGHTED_PLACEMENT_BELOW {
                place_weighted(gap, shimmer_weights, shimmer, len)
            } else {
                place_seeded(gap, &mut rng, shimmer, len)
            };
            if let Some(step) = position.filter(|&s| shimmer & (1 << s) == 0) {
                shimmer |= 1 << step;
                remaining -= 1;
            }
        }
    }

    // Top up anything lost to rounding, gap by gap from each gap's start.
    for gap in gaps.as_slice() {
        for offset in 0..gap.length {
            if remaining == 0 {
                return shimmer;
            }
            let step = gap.step(offset, len);
            if shimmer & (1 << step) == 0 {
                shimmer |= 1 << step;
                remaining -= 1;
            }
        }
    }
    shimmer
}

/// Rotate a mask toward later steps, wrapping within the pattern.
pub fn shift_mask_left(mask: u32, shift: i32, pattern_length: i32) -> u32 {
    if shift <= 0 || pattern_length <= 0 {
        return mask;
    }
    let len = (pattern_length as u32).min(MAX_STEPS as u32);
    let lm = length_mask(len as usize);
    let s = shift as u32 % len;
    let m = mask & lm;
    if s == 0 {
        return m;
    }
    ((m << s) | (m >> (len - s))) & lm
}

/// Rotate a mask toward earlier steps, wrapping within the pattern.
pub fn shift_mask_right(mask: u32, shift: i32, pattern_length: i32) -> u32 {
    if shift <= 0 || pattern_length <= 0 {
        return mask;
    }
    let len = (pattern_length as u32).min(MAX_STEPS as u32);
    let s = shift as u32 % len;
    shift_mask_left(mask, ((len - s) % len) as i32, len as i32)
}

/// Length of the longest run of empty steps, counting wrap-around.
pub fn find_largest_gap(mask: u32, pattern_length: i32) -> usize {
    find_gaps(mask, pattern_length)
        .as_slice()
        .iter()
        .map(|g| g.length)
        .max()
        .unwrap_or(0)
}

/// First step that starts a wrap-around run of at least `min_gap` empty
/// steps, or `None`.
pub fn find_gap_start(mask: u32, min_gap: usize, pattern_length: i32) -> Option<usize> {
    if pattern_length <= 0 {
        return None;
    }
    let len = (pattern_length as usize).min(MAX_STEPS);
    let mask = mask & length_mask(len);
    if mask == 0 {
        return Some(0);
    }
    (0..len).find(|&start| (0..min_gap).all(|offset| mask & (1 << ((start + offset) % len)) == 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_anchor_is_one_gap() {
        let gaps = find_gaps(0, 16);
        assert_eq!(gaps.as_slice(), &[Gap { start: 0, length: 16 }]);
    }

    #[test]
    fn full_anchor_has_no_gaps() {
        assert!(find_gaps(0xFFFF, 16).is_empty());
        assert!(find_gaps(u32::MAX, 32).is_empty());
    }

    #[test]
    fn wrap_gap_is_merged() {
        // Hits on 2 and 10 of 16: gaps 3..10 and 11..16 + 0..2
        let gaps = find_gaps((1 << 2) | (1 << 10), 16);
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps.as_slice()[0], Gap { start: 11, length: 7 });
        assert_eq!(gaps.as_slice()[1], Gap { start: 3, length: 7 });
    }

    #[test]
    fn anchor_bits_past_length_ignored() {
        let gaps = find_gaps(1 << 20, 16);
        assert_eq!(gaps.as_slice(), &[Gap { start: 0, length: 16 }]);
    }

    #[test]
    fn exact_count_with_more_gaps_than_hits() {
        let anchor = 0b0101_0101;
        for drift in [0.0, 0.5, 0.9] {
            for seed in 0..32 {
                let shimmer = apply_complement_relationship(anchor, None, drift, seed, 8, 2);
                assert_eq!(shimmer.count_ones(), 2, "drift {drift} seed {seed}");
                assert_eq!(shimmer & anchor, 0);
                assert_eq!(shimmer & !0xFF, 0);
            }
        }
    }

    #[test]
    fn count_is_min_of_target_and_space() {
        let anchor = 0x1111;
        let weights = [0.5; MAX_STEPS];
        for target in 0..20 {
            for drift in [0.1, 0.5, 0.8] {
                let shimmer =
                    apply_complement_relationship(anchor, Some(&weights), drift, 7, 16, target);
                let expected = (target as u32).min(12);
                assert_eq!(shimmer.count_ones(), expected, "target {target} drift {drift}");
                assert_eq!(shimmer & anchor, 0);
            }
        }
    }

    #[test]
    fn full_anchor_gives_empty_shimmer() {
        let weights = [1.0; MAX_STEPS];
        assert_eq!(apply_complement_relationship(0xFFFF, Some(&weights), 0.5, 1, 16, 8), 0);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(apply_complement_relationship(0, None, 0.0, 1, -4, 3), 0);
        assert_eq!(apply_complement_relationship(0, None, 0.0, 1, 16, 0), 0);
        assert_eq!(apply_complement_relationship(0, None, 0.0, 1, 16, -2), 0);
        assert_eq!(apply_complement_relationship(0, None, 0.0, 1, 0, 4), 1);
        assert_eq!(apply_complement_relationship(0, None, 0.0, 1, 99, 40).count_ones(), 32);
    }

    #[test]
    fn empty_anchor_starts_at_zero() {
        let shimmer = apply_complement_relationship(0, None, 0.0, 1, 16, 4);
        assert_eq!(shimmer, (1 << 0) | (1 << 4) | (1 << 8) | (1 << 12));
    }

    #[test]
    fn weighted_placement_prefers_heavy_steps() {
        let mut weights = [0.1; MAX_STEPS];
        weights[6] = 0.9;
        let shimmer = apply_complement_relationship(1, Some(&weights), 0.5, 3, 8, 1);
        assert_eq!(shimmer, 1 << 6);
    }

    #[test]
    fn weighted_without_weights_uses_gap_start() {
        let shimmer = apply_complement_relationship(1, None, 0.5, 3, 8, 1);
        assert_eq!(shimmer, 1 << 1);
    }

    #[test]
    fn high_drift_seed_zero_is_valid_and_varies_from_other_seeds() {
        let anchor = 0x0101;
        let zero = apply_complement_relationship(anchor, None, 0.9, 0, 16, 5);
        assert_eq!(zero.count_ones(), 5);
        assert_eq!(zero & anchor, 0);
        let differs = (1..16u32)
            .any(|seed| apply_complement_relationship(anchor, None, 0.9, seed, 16, 5) != zero);
        assert!(differs, "seed 0 produced the same pattern as every other seed");
    }

    #[test]
    fn deterministic() {
        let a = apply_complement_relationship(0x1001, None, 0.85, 77, 16, 6);
        let b = apply_complement_relationship(0x1001, None, 0.85, 77, 16, 6);
        assert_eq!(a, b);
    }

    #[test]
    fn shifts_wrap_within_length() {
        assert_eq!(shift_mask_left(0b1000_0000, 1, 8), 0b0000_0001);
        assert_eq!(shift_mask_right(0b0000_0001, 1, 8), 0b1000_0000);
        assert_eq!(shift_mask_left(0x8000_0001, 1, 32), 0x0000_0003);
        assert_eq!(shift_mask_right(shift_mask_left(0x1234, 5, 16), 5, 16), 0x1234);
        assert_eq!(shift_mask_left(0b1, 0, 8), 0b1);
    }

    #[test]
    fn largest_gap_and_gap_start() {
        assert_eq!(find_largest_gap(0, 16), 16);
        assert_eq!(find_largest_gap(0x0101, 16), 7);
        assert_eq!(find_largest_gap(1, 16), 15);
        assert_eq!(find_gap_start(0x0101, 7, 16), Some(1));
        assert_eq!(find_gap_start(0xFFFF, 1, 16), None);
        assert_eq!(find_gap_start(0, 3, 16), Some(0));
    }
}

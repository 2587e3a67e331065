// Auxiliary hat bursts for fills.
//
// A burst is a short cluster of aux triggers inside a fill window. Energy
// sets how many (2 to 12), shape sets where they land:
//
//   shape < 0.30   straight divisions of the window
//   shape < 0.70   euclidean spacing with seeded jitter that grows with shape
//   otherwise      seeded random positions
//
// Two triggers never share a step: a collision moves the trigger to the
// nearest free step, looking left before right. Triggers that land on or
// next to a main-pattern hit are ducked so the burst sits under the anchor
// and shimmer instead of fighting them.
//
// `HatBurst` is a fixed-capacity record the caller owns and reuses.
// Trigger steps are offsets into the fill window, not pattern steps.

use crate::types::{MAX_STEPS, clamp_unit};
use duopulse_hash::hash_to_float;
use serde::{Deserialize, Serialize};

pub const MAX_BURST_TRIGGERS: usize = 12;
pub const MIN_BURST_TRIGGERS: usize = 2;

/// Velocity multiplier for triggers near a main-pattern hit.
pub const DUCK_MULTIPLIER: f32 = 0.30;

/// Steps either side of a trigger checked for main-pattern hits.
pub const DEFAULT_PROXIMITY_WINDOW: i32 = 1;

const BASE_VELOCITY_MIN: f32 = 0.65;
const BASE_VELOCITY_BONUS: f32 = 0.35;

const EVEN_ZONE_END: f32 = 0.30;
const EUCLID_ZONE_END: f32 = 0.70;

const JITTER_MAGIC: u32 = 0x4841_5431;
const RANDOM_MAGIC: u32 = 0x4841_5432;
const VELOCITY_MAGIC: u32 = 0x4841_5433;

/// One burst trigger.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BurstTrigger {
    /// Offset into the fill window.
    pub step: u8,
    pub velocity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HatBurst {
    triggers: [BurstTrigger; MAX_BURST_TRIGGERS],
    count: u8,
    pub fill_start: u8,
    pub fill_duration: u8,
}

impl HatBurst {
    /// Reset everything, including the fill window.
    pub fn init(&mut self) {
        *self = Self::default();
    }

    /// Drop the triggers but keep the fill window.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> usize {
        self.count as usize
    }

    pub fn triggers(&self) -> &[BurstTrigger] {
        &self.triggers[..self.count as usize]
    }

    fn push(&mut self, step: usize, velocity: f32) {
        if (self.count as usize) < MAX_BURST_TRIGGERS {
            self.triggers[self.count as usize] = BurstTrigger {
                step: step as u8,
                velocity,
            };
            self.count += 1;
        }
    }

    /// Trigger steps as a mask over fill-window offsets.
    pub fn step_mask(&self) -> u32 {
        self.triggers()
            .iter()
            .fold(0, |mask, t| mask | (1u32 << (t.step as u32 & 31)))
    }
}

/// Nearest free step to `step` within a window of `duration` steps.
///
/// The target wraps into the window first. Ties between left and right go
/// left. `None` when every step is taken or the window is empty.
pub fn find_nearest_empty(step: i32, duration: i32, used: u32) -> Option<usize> {
    if duration <= 0 {
        return None;
    }
    let duration = duration.min(MAX_STEPS as i32);
    let step = step.rem_euclid(duration);
    let free = |s: i32| used & (1u32 << s) == 0;
    if free(step) {
        return Some(step as usize);
    }
    for offset in 1..duration {
        let left = (step - offset).rem_euclid(duration);
        if free(left) {
            return Some(left as usize);
        }
        let right = (step + offset) % duration;
        if free(right) {
            return Some(right as usize);
        }
    }
    None
}

/// Whether a fill-relative `step` is within `window` steps of a hit in
/// `main_pattern`. Positions wrap at `pattern_length`.
pub fn check_proximity(
    step: i32,
    fill_start: i32,
    main_pattern: u32,
    window: i32,
    pattern_length: i32,
) -> bool {
    let len = pattern_length.clamp(1, MAX_STEPS as i32);
    let window = window.max(0);
    let center = (fill_start + step).rem_euclid(len);
    (-window..=window).any(|offset| {
        let s = (center + offset).rem_euclid(len);
        main_pattern & (1u32 << s) != 0
    })
}

/// Euclidean position of trigger `index` of `count` across `duration`
/// steps, nudged by up to about a step of seeded jitter as `shape` moves
/// through the euclidean zone.
pub fn euclidean_with_jitter(index: i32, count: i32, duration: i32, shape: f32, seed: u32) -> usize {
    if count <= 0 || duration <= 0 {
        return 0;
    }
    let base = index * duration / count;
    let norm = ((clamp_unit(shape) - EVEN_ZONE_END) / (EUCLID_ZONE_END - EVEN_ZONE_END)).clamp(0.0, 1.0);
    let jitter = hash_to_float(seed ^ JITTER_MAGIC, index) - 0.5;
    let amount = (jitter * norm * 2.5) as i32;
    (base + amount).rem_euclid(duration) as usize
}

/// Number of triggers a burst aims for at this energy and window.
pub fn burst_trigger_count(energy: f32, fill_duration: i32) -> usize {
    if fill_duration <= 0 {
        return 0;
    }
    let from_energy = MIN_BURST_TRIGGERS + (clamp_unit(energy) * 10.0) as usize;
    from_energy
        .min(MAX_BURST_TRIGGERS)
        .min(fill_duration.min(MAX_STEPS as i32) as usize)
}

/// Fill `burst` with triggers for one fill window.
///
/// `burst` is fully re-initialized. A non-positive `fill_duration` gives an
/// empty burst.
#[allow(clippy::too_many_arguments)]
pub fn generate_hat_burst(
    energy: f32,
    shape: f32,
    main_pattern: u32,
    fill_start: i32,
    fill_duration: i32,
    pattern_length: i32,
    seed: u32,
    proximity_window: i32,
    burst: &mut HatBurst,
) {
    burst.init();
    let energy = clamp_unit(energy);
    let shape = clamp_unit(shape);
    let len = pattern_length.clamp(1, MAX_STEPS as i32);
    let fill_start = fill_start.rem_euclid(len);
    let duration = fill_duration.clamp(0, MAX_STEPS as i32);
    burst.fill_start = fill_start as u8;
    burst.fill_duration = duration as u8;
    if duration == 0 {
        return;
    }

    let count = burst_trigger_count(energy, duration);
    let base_velocity = BASE_VELOCITY_MIN + BASE_VELOCITY_BONUS * energy;
    let mut used = 0u32;

    for i in 0..count as i32 {
        let target = if shape < EVEN_ZONE_END {
            (i * duration / count as i32) as usize
        } else if shape < EUCLID_ZONE_END {
            euclidean_with_jitter(i, count as i32, duration, shape, seed)
        } else {
            let r = hash_to_float(seed ^ RANDOM_MAGIC, i);
            ((r * duration as f32) as i32 % duration) as usize
        };

        let Some(step) = find_nearest_empty(target as i32, duration, used) else {
            continue;
        };
        used |= 1 << step;

        let mut velocity = base_velocity;
        if check_proximity(step as i32, fill_start, main_pattern, proximity_window, len) {
            velocity *= DUCK_MULTIPLIER;
        }
        let variation = hash_to_float(seed ^ VELOCITY_MAGIC, step as i32);
        velocity *= 0.95 + 0.1 * variation;
        burst.push(step, velocity.clamp(0.0, 1.0));
    }
}

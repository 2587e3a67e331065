// Seed lifecycle and stability-graded drift.
//
// A sequencer instance holds one `DriftState`: a long-lived pattern seed, a
// phrase seed that is re-derived at every phrase boundary, the phrase counter,
// and a pending-reseed flag. For each step, the step's metric stability is
// compared against the drift control: stable steps (downbeats first) keep
// using the pattern seed and so repeat bar after bar, while weaker steps
// switch to the phrase seed and evolve. Raising drift unlocks steps in order
// of decreasing metric importance instead of flipping the whole pattern at
// once.
//
// The record is plain data with serde derives so the host can snapshot and
// restore it across a hard reseed; this module never serializes on its own.
//
// See also: `duopulse_hash` for the mixers, `engine.rs` for the caller.

use crate::types::MAX_STEPS;
use duopulse_hash::{DEFAULT_SEED, generate_new_seed, hash_combine};
use log::debug;
use serde::{Deserialize, Serialize};

/// XOR applied to the pattern seed to derive the initial phrase seed.
pub const PHRASE_SEED_XOR: u32 = 0xDEAD_BEEF;

pub const STABILITY_BAR_DOWNBEAT: f32 = 1.0;
pub const STABILITY_HALF_BAR: f32 = 0.9;
pub const STABILITY_QUARTER: f32 = 0.7;
pub const STABILITY_EIGHTH: f32 = 0.5;
pub const STABILITY_SIXTEENTH: f32 = 0.3;
pub const STABILITY_WEAKEST: f32 = 0.1;

/// Metric stability of a step, one of the six `STABILITY_*` values.
///
/// Steps are placed on a 32-step reference grid (`step * 32 / len`) so that
/// shorter patterns keep their metric roles: step 8 of a 16-step pattern is
/// the half-bar, just like step 16 of a 32-step one. Negative steps and
/// steps at or beyond `pattern_length` get the weakest value.
pub fn step_stability(step: i32, pattern_length: i32) -> f32 {
    if step < 0 || pattern_length <= 0 || step >= pattern_length {
        return STABILITY_WEAKEST;
    }
    let pattern_length = pattern_length.min(MAX_STEPS as i32);
    if step >= pattern_length {
        return STABILITY_WEAKEST;
    }
    let normalized = if pattern_length == MAX_STEPS as i32 {
        step
    } else {
        step * MAX_STEPS as i32 / pattern_length
    };

    match normalized {
        0 => STABILITY_BAR_DOWNBEAT,
        16 => STABILITY_HALF_BAR,
        8 | 24 => STABILITY_QUARTER,
        n if n % 8 == 4 => STABILITY_EIGHTH,
        n if n % 2 == 0 => STABILITY_SIXTEENTH,
        _ => STABILITY_WEAKEST,
    }
}

/// Pure seed choice: the pattern seed wins only when stability strictly
/// exceeds drift.
#[inline]
pub fn select_seed_with_stability(
    drift: f32,
    stability: f32,
    pattern_seed: u32,
    phrase_seed: u32,
) -> u32 {
    if stability > drift { pattern_seed } else { phrase_seed }
}

/// Mask of steps whose stability is at least `threshold`.
pub fn stability_mask(pattern_length: i32, threshold: f32) -> u32 {
    let len = pattern_length.clamp(0, MAX_STEPS as i32);
    (0..len)
        .filter(|&step| step_stability(step, len) >= threshold)
        .fold(0u32, |mask, step| mask | (1 << step))
}

/// True when `step` keeps using the pattern seed at this drift.
#[inline]
pub fn is_step_locked(step: i32, pattern_length: i32, drift: f32) -> bool {
    step_stability(step, pattern_length) > drift
}

/// Fraction of steps that stay pattern-locked at this drift.
pub fn locked_ratio(drift: f32, pattern_length: i32) -> f32 {
    let len = pattern_length.clamp(0, MAX_STEPS as i32);
    if len == 0 {
        return 0.0;
    }
    let locked = (0..len).filter(|&s| is_step_locked(s, len, drift)).count();
    locked as f32 / len as f32
}

/// Seed state owned by one sequencer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftState {
    pattern_seed: u32,
    phrase_seed: u32,
    phrase_counter: u32,
    reseed_requested: bool,
}

impl Default for DriftState {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl DriftState {
    /// Initialize from a seed. Zero selects the built-in default.
    pub fn new(seed: u32) -> Self {
        let pattern_seed = if seed == 0 { DEFAULT_SEED } else { seed };
        Self {
            pattern_seed,
            phrase_seed: pattern_seed ^ PHRASE_SEED_XOR,
            phrase_counter: 0,
            reseed_requested: false,
        }
    }

    pub fn pattern_seed(&self) -> u32 {
        self.pattern_seed
    }

    pub fn phrase_seed(&self) -> u32 {
        self.phrase_seed
    }

    pub fn phrase_counter(&self) -> u32 {
        self.phrase_counter
    }

    pub fn reseed_requested(&self) -> bool {
        self.reseed_requested
    }

    /// Seed that governs `step` at the given drift.
    ///
    /// Drift below 0 locks every step; drift of 1 or more unlocks every step
    /// since no stability exceeds 1.0.
    pub fn select_seed(&self, drift: f32, step: i32, pattern_length: i32) -> u32 {
        select_seed_with_stability(
            drift,
            step_stability(step, pattern_length),
            self.pattern_seed,
            self.phrase_seed,
        )
    }

    /// Advance to the next phrase.
    pub fn on_phrase_boundary(&mut self) {
        if self.reseed_requested {
            self.pattern_seed = generate_new_seed(self.pattern_seed, self.phrase_counter);
            self.reseed_requested = false;
            debug!(
                "deferred reseed applied at phrase {}: pattern seed {:#010x}",
                self.phrase_counter, self.pattern_seed
            );
        }
        self.phrase_counter = self.phrase_counter.wrapping_add(1);
        self.phrase_seed = hash_combine(self.pattern_seed, self.phrase_counter);
        debug!(
            "phrase {} begins: phrase seed {:#010x}",
            self.phrase_counter, self.phrase_seed
        );
    }

    /// Ask for a new pattern seed at the next phrase boundary.
    pub fn request_reseed(&mut self) {
        self.reseed_requested = true;
    }

    /// Hard reseed, effective immediately.
    ///
    /// Zero derives a new pattern seed from the current one; any other value
    /// is used verbatim.
    pub fn reseed(&mut self, new_seed: u32) {
        self.pattern_seed = if new_seed == 0 {
            generate_new_seed(self.pattern_seed, self.phrase_counter)
        } else {
            new_seed
        };
        self.phrase_counter = 0;
        self.phrase_seed = hash_combine(self.pattern_seed, 0);
        self.reseed_requested = false;
        debug!("hard reseed: pattern seed {:#010x}", self.pattern_seed);
    }
}

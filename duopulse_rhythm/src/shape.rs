// Shape weight synthesis and axis bias.
//
// The shape control picks the generation method for a voice's per-step
// weights. It runs through seven zones with fixed boundaries:
//
//   [0.00, 0.28)  stable      metric grid scaled by energy, seeded humanizing
//                             that fades to a small floor at the zone end
//   [0.28, 0.32)  crossfade   stable -> syncopated
//   [0.32, 0.48)  syncopated  suppressed downbeats, boosted anticipations
//   [0.48, 0.52)  crossfade   syncopated -> displaced
//   [0.52, 0.68)  displaced   syncopation with an offset seed, pushed further
//                             onto weak offbeats
//   [0.68, 0.72)  crossfade   displaced -> wild
//   [0.72, 1.00]  wild        hash-driven weights, chaos grows toward 1.0
//
// Crossfades are per-step linear blends across the 4%-wide band, so a slow
// shape sweep never jumps. Every output weight is clamped to
// [MIN_STEP_WEIGHT, 1.0], and steps at or past the pattern length are filled
// with the floor so the whole buffer is always valid.
//
// `apply_axis_bias` is the second stage: axis X moves emphasis between
// downbeats and offbeats, axis Y thins or thickens weak positions, and a
// "broken" mode at high shape and high X knocks out some strong beats.
//
// All functions here are pure. Same inputs, same weights, bit for bit.

use crate::types::{MAX_STEPS, MIN_STEP_WEIGHT, StepWeights, clamp_pattern_length, clamp_unit};
use crate::velocity::metric_weight;
use duopulse_hash::hash_to_float;

pub const SHAPE_STABLE_END: f32 = 0.28;
pub const SHAPE_CROSSFADE_1_END: f32 = 0.32;
pub const SHAPE_SYNCOPATED_END: f32 = 0.48;
pub const SHAPE_CROSSFADE_2_END: f32 = 0.52;
pub const SHAPE_DISPLACED_END: f32 = 0.68;
pub const SHAPE_CROSSFADE_3_END: f32 = 0.72;

/// Seed offset that separates the displaced zone from plain syncopation.
const DISPLACED_SEED_OFFSET: u32 = 0x1234_5678;

/// Extra push onto weak offbeats in the displaced zone.
const DISPLACEMENT_AMOUNT: f32 = 0.15;

/// Anticipation steps never fall below this, whatever the energy.
const ANTICIPATION_FLOOR: f32 = 0.62;

/// Minimum max-min spread of the wild zone's weights.
const WILD_MIN_SPREAD: f32 = 0.3;

const BROKEN_MODE_SALT: u32 = 0xDEAD_BEEF;

/// Stable-zone humanizing at shape 0 and the least it fades to. The floor
/// keeps the seed audible through the first crossfade.
const STABLE_HUMANIZE_MAX: f32 = 0.05;
const STABLE_HUMANIZE_FLOOR: f32 = 0.01;

/// Which generation method a shape value selects. Crossfade zones carry the
/// blend position in [0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeZone {
    Stable,
    StableToSyncopated(f32),
    Syncopated,
    SyncopatedToDisplaced(f32),
    Displaced,
    DisplacedToWild(f32),
    Wild,
}

impl ShapeZone {
    pub fn from_shape(shape: f32) -> ShapeZone {
        let s = clamp_unit(shape);
        let band = |lo: f32, hi: f32| (s - lo) / (hi - lo);
        if s < SHAPE_STABLE_END {
            ShapeZone::Stable
        } else if s < SHAPE_CROSSFADE_1_END {
            ShapeZone::StableToSyncopated(band(SHAPE_STABLE_END, SHAPE_CROSSFADE_1_END))
        } else if s < SHAPE_SYNCOPATED_END {
            ShapeZone::Syncopated
        } else if s < SHAPE_CROSSFADE_2_END {
            ShapeZone::SyncopatedToDisplaced(band(SHAPE_SYNCOPATED_END, SHAPE_CROSSFADE_2_END))
        } else if s < SHAPE_DISPLACED_END {
            ShapeZone::Displaced
        } else if s < SHAPE_CROSSFADE_3_END {
            ShapeZone::DisplacedToWild(band(SHAPE_DISPLACED_END, SHAPE_CROSSFADE_3_END))
        } else {
            ShapeZone::Wild
        }
    }
}

#[inline]
pub fn lerp_weight(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

#[inline]
pub fn clamp_weight(weight: f32) -> f32 {
    if weight.is_nan() {
        MIN_STEP_WEIGHT
    } else {
        weight.clamp(MIN_STEP_WEIGHT, 1.0)
    }
}

#[inline]
fn is_bar_downbeat(step: usize) -> bool {
    step == 0 || step == 16
}

fn floor_buffer() -> StepWeights {
    [MIN_STEP_WEIGHT; MAX_STEPS]
}

/// Metric-grid weights: downbeats 1.0, quarters 0.85, eighths 0.5,
/// sixteenths 0.25, all scaled by `0.3 + 0.7 * energy`.
pub fn stable_weights(energy: f32, pattern_length: i32) -> StepWeights {
    let len = clamp_pattern_length(pattern_length);
    let scale = 0.3 + clamp_unit(energy) * 0.7;
    let mut out = floor_buffer();
    for (step, w) in out.iter_mut().enumerate().take(len) {
        let base = if is_bar_downbeat(step) {
            1.0
        } else if step % 4 == 0 {
            0.85
        } else if step % 2 == 0 {
            0.5
        } else {
            0.25
        };
        *w = clamp_weight(base * scale);
    }
    out
}

/// Syncopated weights with an optional displacement push.
///
/// The bar downbeat drops to 50-70% (seeded), anticipation steps just before
/// strong beats rise above 0.6, and weak offbeats get a seeded lift.
/// `displacement` > 0 moves more weight from downbeats onto offbeats.
pub fn syncopation_weights(
    energy: f32,
    seed: u32,
    pattern_length: i32,
    displacement: f32,
) -> StepWeights {
    let len = clamp_pattern_length(pattern_length);
    let scale = 0.4 + clamp_unit(energy) * 0.6;
    let displacement = clamp_unit(displacement);
    let suppression = 0.5 + hash_to_float(seed, 0) * 0.2;
    let mut out = floor_buffer();
    for (step, w) in out.iter_mut().enumerate().take(len) {
        let i = step as i32;
        let anticipation = step == len - 1 || matches!(step, 3 | 7 | 11 | 15 | 19 | 23 | 27);
        let weight = if is_bar_downbeat(step) {
            suppression * scale * (1.0 - displacement)
        } else if anticipation {
            let boost = 0.2 + hash_to_float(seed, i + 100) * 0.15;
            ((0.7 + boost) * scale).max(ANTICIPATION_FLOOR)
        } else if step % 2 == 1 {
            let boost = 0.1 + hash_to_float(seed, i + 200) * 0.2;
            (0.5 + boost + displacement) * scale
        } else if step % 4 == 0 {
            0.6 * scale * (1.0 - 0.5 * displacement)
        } else {
            (0.4 + 0.5 * displacement) * scale
        };
        *w = clamp_weight(weight);
    }
    out
}

/// Hash-driven weights around an energy-dependent level, with a small bias
/// toward downbeats and quarters.
pub fn wild_weights(energy: f32, seed: u32, pattern_length: i32) -> StepWeights {
    let len = clamp_pattern_length(pattern_length);
    let e = clamp_unit(energy);
    let base = 0.3 + e * 0.3;
    let variation = 0.3 + e * 0.4;
    let mut out = floor_buffer();
    for (step, w) in out.iter_mut().enumerate().take(len) {
        let mut weight = base + (hash_to_float(seed, step as i32) - 0.5) * variation * 2.0;
        if is_bar_downbeat(step) {
            weight += 0.15;
        } else if step % 4 == 0 {
            weight += 0.08;
        }
        *w = clamp_weight(weight);
    }
    out
}

/// Stretch the first `len` weights around their mean until max-min reaches
/// `min_spread`, then shift back into range.
fn enforce_min_spread(weights: &mut StepWeights, len: usize, min_spread: f32) {
    if len < 2 {
        return;
    }
    let active = &mut weights[..len];
    let (lo, hi) = active
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &w| (lo.min(w), hi.max(w)));
    let spread = hi - lo;
    if spread >= min_spread {
        return;
    }
    let mean = active.iter().sum::<f32>() / len as f32;
    if spread > 1e-6 {
        let k = min_spread / spread;
        for w in active.iter_mut() {
            *w = mean + (*w - mean) * k;
        }
    } else {
        for (i, w) in active.iter_mut().enumerate() {
            let side = if i % 2 == 0 { 0.5 } else { -0.5 };
            *w = mean + side * min_spread;
        }
    }
    let (lo, hi) = active
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &w| (lo.min(w), hi.max(w)));
    let shift = if lo < MIN_STEP_WEIGHT {
        MIN_STEP_WEIGHT - lo
    } else if hi > 1.0 {
        1.0 - hi
    } else {
        0.0
    };
    for w in active.iter_mut() {
        *w = clamp_weight(*w + shift);
    }
}

/// Stable weights with seeded jitter on everything but the bar downbeats.
fn humanized_stable_weights(
    shape: f32,
    energy: f32,
    seed: u32,
    pattern_length: i32,
) -> StepWeights {
    let len = clamp_pattern_length(pattern_length);
    let shape = clamp_unit(shape).min(SHAPE_STABLE_END);
    let humanize =
        (STABLE_HUMANIZE_MAX * (1.0 - shape / SHAPE_STABLE_END)).max(STABLE_HUMANIZE_FLOOR);
    let mut out = stable_weights(energy, pattern_length);
    for (step, w) in out.iter_mut().enumerate().take(len) {
        if is_bar_downbeat(step) {
            continue;
        }
        let jitter = (hash_to_float(seed, step as i32 + 300) - 0.5) * humanize * 2.0;
        *w = clamp_weight(*w + jitter);
    }
    out
}

fn blend(a: &StepWeights, b: &StepWeights, t: f32) -> StepWeights {
    let mut out = floor_buffer();
    for (o, (&x, &y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = clamp_weight(lerp_weight(x, y, t));
    }
    out
}

fn displaced_weights(energy: f32, seed: u32, pattern_length: i32) -> StepWeights {
    syncopation_weights(
        energy,
        seed.wrapping_add(DISPLACED_SEED_OFFSET),
        pattern_length,
        DISPLACEMENT_AMOUNT,
    )
}

/// Per-step weights for a voice from the shape and energy controls.
pub fn compute_shape_blended_weights(
    shape: f32,
    energy: f32,
    seed: u32,
    pattern_length: i32,
) -> StepWeights {
    let shape = clamp_unit(shape);
    let len = clamp_pattern_length(pattern_length);

    match ShapeZone::from_shape(shape) {
        ShapeZone::Stable => humanized_stable_weights(shape, energy, seed, pattern_length),
        ShapeZone::StableToSyncopated(t) => blend(
            &humanized_stable_weights(shape, energy, seed, pattern_length),
            &syncopation_weights(energy, seed, pattern_length, 0.0),
            t,
        ),
        ShapeZone::Syncopated => syncopation_weights(energy, seed, pattern_length, 0.0),
        ShapeZone::SyncopatedToDisplaced(t) => blend(
            &syncopation_weights(energy, seed, pattern_length, 0.0),
            &displaced_weights(energy, seed, pattern_length),
            t,
        ),
        ShapeZone::Displaced => displaced_weights(energy, seed, pattern_length),
        ShapeZone::DisplacedToWild(t) => blend(
            &displaced_weights(energy, seed, pattern_length),
            &wild_weights(energy, seed, pattern_length),
            t,
        ),
        ShapeZone::Wild => {
            let mut out = wild_weights(energy, seed, pattern_length);
            let chaos = (shape - SHAPE_CROSSFADE_3_END) / (1.0 - SHAPE_CROSSFADE_3_END) * 0.15;
            for (step, w) in out.iter_mut().enumerate().take(len) {
                let offset = (hash_to_float(seed, step as i32 + 500) - 0.5) * chaos * 2.0;
                *w = clamp_weight(*w + offset);
            }
            enforce_min_spread(&mut out, len, WILD_MIN_SPREAD);
            out
        }
    }
}

/// Bias weights in place by the two axis controls.
///
/// Axis X above 0.5 suppresses strong positions (by up to 45%) and boosts
/// weak ones (by up to 60%); below 0.5 it does the reverse. Axis Y scales
/// weak positions by up to +/-50%. Broken mode (shape > 0.6 and X > 0.7)
/// pulls roughly 60% of strong positions toward a quarter of their weight.
pub fn apply_axis_bias(
    weights: &mut StepWeights,
    axis_x: f32,
    axis_y: f32,
    shape: f32,
    seed: u32,
    pattern_length: i32,
) {
    let axis_x = clamp_unit(axis_x);
    let axis_y = clamp_unit(axis_y);
    let shape = clamp_unit(shape);
    let len = clamp_pattern_length(pattern_length);

    let x_bias = (axis_x - 0.5) * 2.0;
    let y_bias = (axis_y - 0.5) * 2.0;
    let broken = shape > 0.6 && axis_x > 0.7;
    let broken_intensity = if broken {
        ((shape - 0.6) * 2.5 * (axis_x - 0.7) * 3.33).min(1.0)
    } else {
        0.0
    };

    for (step, w) in weights.iter_mut().enumerate().take(len) {
        let i = step as i32;
        let metric = metric_weight(i, len as i32);
        // -1 on the strongest beat, +0.5 on the weakest.
        let position = 1.0 - 2.0 * metric;
        let mut weight = *w;

        if x_bias > 0.0 {
            if position < 0.0 {
                weight *= 1.0 - 0.45 * x_bias * -position;
            } else {
                weight *= 1.0 + 0.60 * x_bias * position;
            }
        } else if x_bias < 0.0 {
            let x = -x_bias;
            if position < 0.0 {
                weight *= 1.0 + 0.60 * x * -position;
            } else {
                weight *= 1.0 - 0.45 * x * position;
            }
        }

        let weakness = 1.0 - metric;
        weight *= 1.0 + 0.50 * y_bias * weakness;

        if broken && metric >= 0.75 && hash_to_float(seed ^ BROKEN_MODE_SALT, i) < 0.6 {
            weight = lerp_weight(weight, weight * 0.25, broken_intensity);
        }

        *w = clamp_weight(weight);
    }
}

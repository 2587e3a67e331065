// Velocity and accent computation.
//
// A hit's velocity starts from its metric weight: a canonical 16-step table
// (bar start, half-bar, quarters, eighths, sixteenths) that is rescaled onto
// other pattern lengths by position, so step 4 of an 8-step pattern lands on
// the half-bar entry. Steps that fall between table positions (the odd
// thirty-seconds of a 32-step pattern) are the weakest. The accent control
// sets the ceiling of the range metric weight maps into and, together with
// punch, its floor; punch also decides how often eligible hits accent and
// by how much. Build adds a phrase-arc boost toward the end of each phrase.
// A small hash-seeded variation humanizes the result.
//
// All parameter records are plain values derived from one or two scalars,
// recomputed whenever a control moves. Nothing here keeps history.

use crate::types::{MAX_STEPS, Voice, clamp_unit};
use duopulse_hash::hash_to_float;
use serde::{Deserialize, Serialize};

const ACCENT_HASH_MAGIC: u32 = 0x4143_4E54;
const VARIATION_HASH_MAGIC: u32 = 0x5641_5249;

/// Quietest velocity any hit may have.
pub const MIN_VELOCITY: f32 = 0.30;

/// Phrase progress at which the fill zone begins.
pub const FILL_ZONE_START: f32 = 0.80;

/// Phrase progress at which the build phase begins.
pub const BUILD_PHASE_START: f32 = 0.60;

const METRIC_WEIGHTS_16: [f32; 16] = [
    1.0, 0.25, 0.5, 0.25, 0.8, 0.25, 0.5, 0.25, 0.9, 0.25, 0.5, 0.25, 0.8, 0.25, 0.5, 0.25,
];

const OFF_GRID_METRIC_WEIGHT: f32 = 0.25;

/// Metric strength of a step in [0.25, 1.0].
///
/// Steps outside `[0, pattern_length)` wrap. A non-positive length has no
/// meter and returns the neutral 0.5. A step only inherits a table entry
/// when it lands exactly on one of the 16 canonical positions; everything
/// in between is as weak as an off-beat sixteenth.
pub fn metric_weight(step: i32, pattern_length: i32) -> f32 {
    if pattern_length <= 0 {
        return 0.5;
    }
    let len = pattern_length.min(MAX_STEPS as i32);
    let step = step.rem_euclid(len);
    let scaled = step * 16;
    if scaled % len != 0 {
        return OFF_GRID_METRIC_WEIGHT;
    }
    METRIC_WEIGHTS_16[(scaled / len).clamp(0, 15) as usize]
}

/// Default per-voice accent eligibility: quarter notes for the anchor,
/// half notes for the shimmer, offbeat eighths for the aux voice.
pub fn default_accent_mask(voice: Voice) -> u32 {
    match voice {
        Voice::Anchor => 0x1111_1111,
        Voice::Shimmer => 0x0101_0101,
        Voice::Aux => 0x4444_4444,
    }
}

/// Velocity range derived from the accent control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccentParams {
    pub velocity_floor: f32,
    pub velocity_ceiling: f32,
    pub variation: f32,
}

impl Default for AccentParams {
    fn default() -> Self {
        Self::from_accent(0.5)
    }
}

impl AccentParams {
    /// Accent 0 keeps everything in a flat 0.80..0.88 band; accent 1 opens
    /// it to 0.30..1.0.
    pub fn from_accent(accent: f32) -> Self {
        let a = clamp_unit(accent);
        Self {
            velocity_floor: 0.80 - a * 0.50,
            velocity_ceiling: 0.88 + a * 0.12,
            variation: 0.02 + a * 0.05,
        }
    }
}

/// Accent frequency and dynamics derived from the punch control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PunchParams {
    /// Chance an eligible hit accents (0.15..0.50).
    pub accent_probability: f32,
    /// Velocity for non-accented hits (0.70 down to 0.30).
    pub velocity_floor: f32,
    /// Extra velocity on accents (0.10..0.35).
    pub accent_boost: f32,
    /// Random spread (0.05..0.20).
    pub velocity_variation: f32,
}

impl Default for PunchParams {
    fn default() -> Self {
        Self {
            accent_probability: 0.25,
            velocity_floor: 0.55,
            accent_boost: 0.20,
            velocity_variation: 0.10,
        }
    }
}

impl PunchParams {
    pub fn from_punch(punch: f32) -> Self {
        let p = clamp_unit(punch);
        Self {
            accent_probability: 0.15 + p * 0.35,
            velocity_floor: 0.70 - p * 0.40,
            accent_boost: 0.10 + p * 0.25,
            velocity_variation: 0.05 + p * 0.15,
        }
    }
}

/// Where in the phrase arc we are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BuildPhase {
    #[default]
    Groove,
    Build,
    Fill,
}

/// Phrase-arc modifiers derived from the build control and phrase progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildModifiers {
    pub density_multiplier: f32,
    pub fill_intensity: f32,
    pub in_fill_zone: bool,
    pub phrase_progress: f32,
    pub phase: BuildPhase,
    pub velocity_boost: f32,
    pub force_accents: bool,
}

impl Default for BuildModifiers {
    fn default() -> Self {
        Self {
            density_multiplier: 1.0,
            fill_intensity: 0.0,
            in_fill_zone: false,
            phrase_progress: 0.0,
            phase: BuildPhase::Groove,
            velocity_boost: 0.0,
            force_accents: false,
        }
    }
}

impl BuildModifiers {
    /// Density stays at 1.0 until the fill zone, then eases up to
    /// `1 + 0.5 * build` at the end of the phrase. Velocity starts ramping
    /// earlier, from the build phase.
    pub fn from_build(build: f32, phrase_progress: f32) -> Self {
        let build = clamp_unit(build);
        let progress = clamp_unit(phrase_progress);

        let mut mods = Self {
            phrase_progress: progress,
            ..Self::default()
        };

        if progress < BUILD_PHASE_START {
            return mods;
        }

        if progress < FILL_ZONE_START {
            let t = (progress - BUILD_PHASE_START) / (FILL_ZONE_START - BUILD_PHASE_START);
            mods.phase = BuildPhase::Build;
            mods.velocity_boost = build * 0.15 * t;
            return mods;
        }

        let t = ((progress - FILL_ZONE_START) / (1.0 - FILL_ZONE_START)).clamp(0.0, 1.0);
        let eased = t * t * (3.0 - 2.0 * t);
        mods.phase = BuildPhase::Fill;
        mods.in_fill_zone = true;
        mods.fill_intensity = build * t;
        mods.density_multiplier = 1.0 + 0.5 * build * eased;
        mods.velocity_boost = 0.15 * build + 0.05 * build * t;
        mods.force_accents = build > 0.6;
        mods
    }
}

/// Whether a hit on `step` accents.
///
/// Forced accents win; otherwise the step must be eligible in
/// `accent_mask` and pass a seeded probability roll.
pub fn should_accent(
    step: i32,
    accent_mask: u32,
    accent_probability: f32,
    build: &BuildModifiers,
    seed: u32,
) -> bool {
    if build.force_accents {
        return true;
    }
    let eligible = accent_mask & (1u32 << (step & 31)) != 0;
    eligible && hash_to_float(seed ^ ACCENT_HASH_MAGIC, step) < accent_probability
}

fn humanize(seed: u32, step: i32, variation: f32) -> f32 {
    (hash_to_float(seed ^ VARIATION_HASH_MAGIC, step) - 0.5) * variation
}

/// Velocity from accent control and metric position alone.
pub fn compute_accent_velocity(accent: f32, step: i32, pattern_length: i32, seed: u32) -> f32 {
    let params = AccentParams::from_accent(accent);
    let metric = metric_weight(step, pattern_length);
    let v = params.velocity_floor + metric * (params.velocity_ceiling - params.velocity_floor);
    (v + humanize(seed, step, params.variation)).clamp(MIN_VELOCITY, 1.0)
}

/// Final velocity for one hit.
///
/// The floor of the metric range is the mean of the accent and punch
/// floors, so high punch lets unaccented hits drop further. Humanization
/// uses whichever of the two variation amounts is wider.
pub fn compute_velocity(
    accent: &AccentParams,
    punch: &PunchParams,
    build: &BuildModifiers,
    is_accent: bool,
    seed: u32,
    step: i32,
    pattern_length: i32,
) -> f32 {
    let metric = metric_weight(step, pattern_length);
    let floor = 0.5 * (accent.velocity_floor + punch.velocity_floor);
    let mut v = floor + metric * (accent.velocity_ceiling - floor);
    v += build.velocity_boost;
    if build.in_fill_zone {
        v += build.fill_intensity * 0.15;
    }
    if is_accent {
        v += punch.accent_boost;
    }
    let variation = accent.variation.max(punch.velocity_variation);
    if variation > 0.001 {
        v += humanize(seed, step, variation);
    }
    v.clamp(MIN_VELOCITY, 1.0)
}

// Shared vocabulary for the rhythm core: step limits, genres, energy zones,
// voices, and hit-mask helpers.
//
// A hit mask is a plain `u32` where bit i means "step i fires". Patterns are
// at most 32 steps long (two bars of sixteenths), so one word always holds a
// full pattern and masks can be passed by value on the per-step path.
//
// Step indices and pattern lengths are `i32` at the public boundary because
// the host may hand us negative or oversized values; every entry point clamps
// them with `clamp_pattern_length` before touching an array.

use serde::{Deserialize, Serialize};

/// Longest supported pattern, in steps.
pub const MAX_STEPS: usize = 32;

/// Archetypes per genre field (3x3 grid).
pub const ARCHETYPES_PER_GENRE: usize = 9;

/// Lower bound for every per-step weight handed to hit selection.
pub const MIN_STEP_WEIGHT: f32 = 0.05;

/// Fixed per-step weight buffer.
pub type StepWeights = [f32; MAX_STEPS];

/// Musical genre. Each genre owns one 3x3 archetype field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Genre {
    #[default]
    Techno = 0,
    Tribal = 1,
    Idm = 2,
}

impl Genre {
    pub const ALL: [Genre; 3] = [Genre::Techno, Genre::Tribal, Genre::Idm];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Out-of-range indices fall back to `Techno`.
    pub fn from_index(index: i32) -> Genre {
        match index {
            1 => Genre::Tribal,
            2 => Genre::Idm,
            _ => Genre::Techno,
        }
    }

    /// Case-insensitive name lookup, used by the CLI.
    pub fn from_name(name: &str) -> Option<Genre> {
        match name.to_ascii_lowercase().as_str() {
            "techno" => Some(Genre::Techno),
            "tribal" => Some(Genre::Tribal),
            "idm" => Some(Genre::Idm),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Genre::Techno => "techno",
            Genre::Tribal => "tribal",
            Genre::Idm => "idm",
        }
    }
}

/// Coarse energy band. Drives hit budgets and minimum hit spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyZone {
    /// energy < 0.20: sparse, well-spaced hits
    Minimal,
    /// energy < 0.50: the default groove
    Groove,
    /// energy < 0.75: denser, ghost notes appear
    Build,
    /// everything above: maximum density
    Peak,
}

impl EnergyZone {
    pub fn from_energy(energy: f32) -> EnergyZone {
        let e = clamp_unit(energy);
        if e < 0.20 {
            EnergyZone::Minimal
        } else if e < 0.50 {
            EnergyZone::Groove
        } else if e < 0.75 {
            EnergyZone::Build
        } else {
            EnergyZone::Peak
        }
    }
}

/// Output voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Voice {
    Anchor = 0,
    Shimmer = 1,
    Aux = 2,
}

impl Voice {
    pub const ALL: [Voice; 3] = [Voice::Anchor, Voice::Shimmer, Voice::Aux];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Voice::Anchor => "anchor",
            Voice::Shimmer => "shimmer",
            Voice::Aux => "aux",
        }
    }
}

/// Clamp a control scalar to [0, 1]. NaN maps to 0.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Clamp a host-supplied pattern length to `1..=MAX_STEPS`.
#[inline]
pub fn clamp_pattern_length(pattern_length: i32) -> usize {
    pattern_length.clamp(1, MAX_STEPS as i32) as usize
}

/// Mask with the low `len` bits set. `len >= 32` gives all ones.
#[inline]
pub fn length_mask(len: usize) -> u32 {
    if len >= MAX_STEPS {
        u32::MAX
    } else {
        (1u32 << len) - 1
    }
}

#[inline]
pub fn is_hit(mask: u32, step: usize) -> bool {
    step < MAX_STEPS && mask & (1 << step) != 0
}

#[inline]
pub fn count_hits(mask: u32) -> u32 {
    mask.count_ones()
}

/// Render a mask as `x`/`.` per step with a bar separator every 16 steps.
pub fn mask_summary(mask: u32, pattern_length: i32) -> String {
    let len = clamp_pattern_length(pattern_length);
    let mut out = String::with_capacity(len + len / 16);
    for step in 0..len {
        if step > 0 && step % 16 == 0 {
            out.push('|');
        }
        out.push(if is_hit(mask, step) { 'x' } else { '.' });
    }
    out
}

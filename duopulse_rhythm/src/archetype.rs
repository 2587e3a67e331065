// Archetype DNA and the per-genre 3x3 archetype field.
//
// An archetype is a reference pattern: per-step weights for the anchor and
// shimmer plus a handful of scalars (swing, voice coupling, fill density) and
// the accent-eligibility masks. Each genre arranges nine of them
// on a 3x3 grid. A continuous field position (x, y in [0, 1]) selects the
// four surrounding archetypes; their bilinear weights are sharpened with a
// temperature softmax and the archetypes are blended. Continuous properties
// are interpolated, discrete ones (masks, grid position) come from whichever
// archetype dominates the blend.
//
// Fields are immutable after construction. Integer lookups outside the grid
// clamp to the nearest edge archetype.
//
// See also: `archetype_data.rs` for the tables, `engine.rs` for how blended
// weights combine with the shape synthesizer's output.

use crate::archetype_data::{self, ArchetypeTable};
use crate::types::{Genre, MAX_STEPS, MIN_STEP_WEIGHT, StepWeights, Voice};
use serde::{Deserialize, Serialize};

/// Softmax temperature used when a caller has no preference.
pub const DEFAULT_SOFTMAX_TEMPERATURE: f32 = 0.5;

const MIN_TEMPERATURE: f32 = 0.01;
const MAX_TEMPERATURE: f32 = 10.0;

/// The aux voice has no archetype weights; it only plays fill bursts.
const FLOOR_WEIGHTS: StepWeights = [MIN_STEP_WEIGHT; MAX_STEPS];

/// One archetype's pattern DNA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeDna {
    pub anchor_weights: StepWeights,
    pub shimmer_weights: StepWeights,
    /// Steps where the anchor may accent.
    pub anchor_accent_mask: u32,
    /// Steps where the shimmer may accent.
    pub shimmer_accent_mask: u32,
    /// 0 = straight, 1 = full swing.
    pub swing_amount: f32,
    /// Default anchor/shimmer coupling strength.
    pub default_couple: f32,
    /// Density scale applied during fills.
    pub fill_density_multiplier: f32,
    pub grid_x: u8,
    pub grid_y: u8,
}

impl Default for ArchetypeDna {
    /// A plain four-on-the-floor placeholder with backbeat shimmer.
    fn default() -> Self {
        let mut anchor_weights = [0.0; MAX_STEPS];
        let mut shimmer_weights = [0.0; MAX_STEPS];
        for (step, (anchor, shimmer)) in anchor_weights
            .iter_mut()
            .zip(shimmer_weights.iter_mut())
            .enumerate()
        {
            *anchor = match step {
                0 | 16 => 1.0,
                8 | 24 => 0.85,
                s if s % 4 == 0 => 0.7,
                s if s % 2 == 0 => 0.3,
                _ => 0.15,
            };
            *shimmer = match step {
                8 | 24 => 1.0,
                s if s % 8 == 4 => 0.6,
                s if s % 2 == 0 => 0.3,
                _ => 0.15,
            };
        }
        Self {
            anchor_weights,
            shimmer_weights,
            anchor_accent_mask: 0x0101_0101,
            shimmer_accent_mask: 0x0100_0100,
            swing_amount: 0.0,
            default_couple: 0.4,
            fill_density_multiplier: 1.5,
            grid_x: 0,
            grid_y: 0,
        }
    }
}

impl ArchetypeDna {
    fn from_table(table: &ArchetypeTable, grid_x: u8, grid_y: u8) -> Self {
        Self {
            anchor_weights: table.anchor,
            shimmer_weights: table.shimmer,
            anchor_accent_mask: table.accent_mask,
            shimmer_accent_mask: table.accent_mask,
            swing_amount: table.swing_amount,
            default_couple: table.default_couple,
            fill_density_multiplier: table.fill_density_multiplier,
            grid_x,
            grid_y,
        }
    }

    pub fn weights(&self, voice: Voice) -> &StepWeights {
        match voice {
            Voice::Anchor => &self.anchor_weights,
            Voice::Shimmer => &self.shimmer_weights,
            Voice::Aux => &FLOOR_WEIGHTS,
        }
    }

    /// A voice's weights lifted into [MIN_STEP_WEIGHT, 1.0].
    pub fn clamped_weights(&self, voice: Voice) -> StepWeights {
        self.weights(voice).map(|w| {
            if w.is_nan() {
                MIN_STEP_WEIGHT
            } else {
                w.clamp(MIN_STEP_WEIGHT, 1.0)
            }
        })
    }
}

/// Nine archetypes for one genre, indexed `[y][x]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreField {
    genre: Genre,
    archetypes: [[ArchetypeDna; 3]; 3],
}

impl GenreField {
    /// Build the field for a genre from the built-in tables.
    pub fn for_genre(genre: Genre) -> Self {
        let tables: &[ArchetypeTable; 9] = match genre {
            Genre::Techno => &archetype_data::TECHNO,
            Genre::Tribal => &archetype_data::TRIBAL,
            Genre::Idm => &archetype_data::IDM,
        };
        let mut archetypes = [[ArchetypeDna::default(); 3]; 3];
        for (y, row) in archetypes.iter_mut().enumerate() {
            for (x, dna) in row.iter_mut().enumerate() {
                *dna = ArchetypeDna::from_table(&tables[y * 3 + x], x as u8, y as u8);
            }
        }
        Self { genre, archetypes }
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    /// Archetype at integer grid position; coordinates clamp to [0, 2].
    pub fn archetype(&self, x: i32, y: i32) -> &ArchetypeDna {
        let x = x.clamp(0, 2) as usize;
        let y = y.clamp(0, 2) as usize;
        &self.archetypes[y][x]
    }

    /// Name of the archetype at a grid position (clamped like `archetype`).
    pub fn archetype_name(&self, x: i32, y: i32) -> &'static str {
        let tables: &[ArchetypeTable; 9] = match self.genre {
            Genre::Techno => &archetype_data::TECHNO,
            Genre::Tribal => &archetype_data::TRIBAL,
            Genre::Idm => &archetype_data::IDM,
        };
        let x = x.clamp(0, 2) as usize;
        let y = y.clamp(0, 2) as usize;
        tables[y * 3 + x].name
    }

    /// Blend the four archetypes around a continuous field position.
    pub fn blended(&self, field_x: f32, field_y: f32, temperature: f32) -> ArchetypeDna {
        let mut grid = grid_weights(field_x, field_y);
        softmax_with_temperature(&mut grid.weights, temperature);
        let corners = [
            self.archetype(grid.x0, grid.y0),
            self.archetype(grid.x1, grid.y0),
            self.archetype(grid.x0, grid.y1),
            self.archetype(grid.x1, grid.y1),
        ];
        blend_archetypes(&corners, &grid.weights)
    }
}

/// Bilinear weights for the four grid cells around a field position.
///
/// Weight order is bottom-left, bottom-right, top-left, top-right; the
/// lower cell indices are always in [0, 1] so the upper ones stay on-grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridWeights {
    pub weights: [f32; 4],
    pub x0: i32,
    pub x1: i32,
    pub y0: i32,
    pub y1: i32,
}

pub fn grid_weights(field_x: f32, field_y: f32) -> GridWeights {
    let gx = crate::types::clamp_unit(field_x) * 2.0;
    let gy = crate::types::clamp_unit(field_y) * 2.0;
    let x0 = (gx.floor() as i32).clamp(0, 1);
    let y0 = (gy.floor() as i32).clamp(0, 1);
    let fx = (gx - x0 as f32).clamp(0.0, 1.0);
    let fy = (gy - y0 as f32).clamp(0.0, 1.0);
    GridWeights {
        weights: [
            (1.0 - fx) * (1.0 - fy),
            fx * (1.0 - fy),
            (1.0 - fx) * fy,
            fx * fy,
        ],
        x0,
        x1: x0 + 1,
        y0,
        y1: y0 + 1,
    }
}

/// Sharpen blend weights in place. Lower temperature favours the largest.
pub fn softmax_with_temperature(weights: &mut [f32; 4], temperature: f32) {
    let t = if temperature.is_nan() {
        DEFAULT_SOFTMAX_TEMPERATURE
    } else {
        temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
    };
    let max = weights.iter().copied().fold(f32::MIN, f32::max);
    let exps = weights.map(|w| ((w - max) / t).exp());
    let sum: f32 = exps.iter().sum();
    if sum > 1e-4 {
        for (w, e) in weights.iter_mut().zip(exps) {
            *w = e / sum;
        }
    } else {
        *weights = [0.25; 4];
    }
}

/// Index of the heaviest weight; ties go to the earliest.
pub fn dominant_index(weights: &[f32; 4]) -> usize {
    let mut best = 0;
    for i in 1..4 {
        if weights[i] > weights[best] {
            best = i;
        }
    }
    best
}

fn mix(values: [f32; 4], weights: &[f32; 4]) -> f32 {
    values.iter().zip(weights).map(|(v, w)| v * w).sum()
}

/// Weighted blend of four archetypes.
pub fn blend_archetypes(archetypes: &[&ArchetypeDna; 4], weights: &[f32; 4]) -> ArchetypeDna {
    let dominant = archetypes[dominant_index(weights)];
    let mut out = *dominant;
    for step in 0..MAX_STEPS {
        out.anchor_weights[step] = mix(archetypes.map(|a| a.anchor_weights[step]), weights);
        out.shimmer_weights[step] = mix(archetypes.map(|a| a.shimmer_weights[step]), weights);
    }
    out.swing_amount = mix(archetypes.map(|a| a.swing_amount), weights);
    out.default_couple = mix(archetypes.map(|a| a.default_couple), weights);
    out.fill_density_multiplier = mix(archetypes.map(|a| a.fill_density_multiplier), weights);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_clamps_out_of_range() {
        let field = GenreField::for_genre(Genre::Techno);
        assert_eq!(field.archetype(-3, -3), field.archetype(0, 0));
        assert_eq!(field.archetype(9, 1), field.archetype(2, 1));
        assert_eq!(field.archetype(1, 99), field.archetype(1, 2));
        assert_eq!(field.archetype_name(5, 5), "Chaos");
        assert_eq!(field.archetype_name(0, 0), "Minimal");
    }

    #[test]
    fn grid_positions_recorded() {
        let field = GenreField::for_genre(Genre::Idm);
        for y in 0..3 {
            for x in 0..3 {
                let dna = field.archetype(x, y);
                assert_eq!((dna.grid_x as i32, dna.grid_y as i32), (x, y));
            }
        }
    }

    #[test]
    fn every_genre_has_downbeat_anchor() {
        for genre in Genre::ALL {
            let field = GenreField::for_genre(genre);
            let dna = field.archetype(0, 0);
            assert!(
                dna.anchor_weights[0] >= 0.8,
                "{:?} minimal archetype lacks a downbeat",
                genre
            );
        }
    }

    #[test]
    fn grid_weights_sum_to_one() {
        for &(x, y) in &[(0.0, 0.0), (0.3, 0.7), (0.5, 0.5), (1.0, 1.0), (-1.0, 4.0)] {
            let g = grid_weights(x, y);
            let sum: f32 = g.weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "sum {sum} at ({x},{y})");
            assert!((0..=1).contains(&g.x0) && g.x1 == g.x0 + 1);
        }
    }

    #[test]
    fn grid_weights_at_corner_select_corner() {
        let g = grid_weights(1.0, 1.0);
        assert_eq!((g.x0, g.y0), (1, 1));
        assert_eq!(g.weights, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn softmax_sharpens_and_normalizes() {
        let mut w = [0.4, 0.3, 0.2, 0.1];
        softmax_with_temperature(&mut w, 0.1);
        let sum: f32 = w.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(w[0] > 0.4, "largest weight should grow, got {}", w[0]);
        assert!(w[3] < 0.1);
    }

    #[test]
    fn softmax_high_temperature_flattens() {
        let mut w = [1.0, 0.0, 0.0, 0.0];
        softmax_with_temperature(&mut w, 10.0);
        assert!(w[0] < 0.4, "high temperature should flatten, got {}", w[0]);
    }

    #[test]
    fn blend_at_grid_point_matches_archetype_weights() {
        let field = GenreField::for_genre(Genre::Tribal);
        let blended = field.blended(0.0, 0.0, DEFAULT_SOFTMAX_TEMPERATURE);
        let corner = field.archetype(0, 0);
        assert_eq!(blended.anchor_accent_mask, corner.anchor_accent_mask);
        assert_eq!((blended.grid_x, blended.grid_y), (0, 0));
        // Softmax leaves some mass on the neighbours, so the blend is close
        // but not identical.
        for step in 0..MAX_STEPS {
            let diff = (blended.anchor_weights[step] - corner.anchor_weights[step]).abs();
            assert!(diff < 0.6, "step {step} drifted by {diff}");
        }
    }

    #[test]
    fn blend_is_deterministic() {
        let field = GenreField::for_genre(Genre::Techno);
        assert_eq!(field.blended(0.37, 0.81, 0.5), field.blended(0.37, 0.81, 0.5));
    }

    #[test]
    fn clamped_weights_respect_floor() {
        let field = GenreField::for_genre(Genre::Techno);
        let w = field.archetype(0, 0).clamped_weights(Voice::Shimmer);
        assert!(w.iter().all(|&v| (MIN_STEP_WEIGHT..=1.0).contains(&v)));
        let aux = field.archetype(1, 1).clamped_weights(Voice::Aux);
        assert!(aux.iter().all(|&v| v == MIN_STEP_WEIGHT));
    }
}

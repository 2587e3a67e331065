// Per-bar generation pipeline.
//
// `PatternEngine` ties the modules together. For one bar it:
//
// 1. picks a seed per step from the drift controller (stable steps keep the
//    pattern seed, weak steps follow the phrase seed),
// 2. blends the genre's archetype field at (field X, field Y) and multiplies
//    the anchor weights by the shape synthesizer's output for each step's
//    seed,
// 3. applies the axis bias,
// 4. selects anchor hits with Gumbel top-K against the energy/shape budget,
// 5. places the shimmer in the anchor's gaps,
// 6. in the fill zone, adds an aux hat burst over the last quarter of the
//    pattern,
// 7. computes velocities for every hit.
//
// Everything below works on fixed arrays and bit masks, so a bar is
// generated without touching the heap. The only mutable state is the
// `DriftState`; `generate_bar` takes `&self` and is a pure function of the
// drift state, the controls and the phrase progress.
//
// See also: `drift.rs` for seed selection, `hit_budget.rs` for the budgets
// and Gumbel selection, `config.rs` for the tunables read here.

use crate::archetype::GenreField;
use crate::config::EngineConfig;
use crate::drift::{DriftState, is_step_locked};
use crate::hat_burst::{HatBurst, generate_hat_burst};
use crate::hit_budget::{
    anchor_budget, gumbel_scores, min_spacing_for_zone, select_top_k, shimmer_budget,
};
use crate::relation::apply_complement_relationship;
use crate::shape::{apply_axis_bias, clamp_weight, compute_shape_blended_weights};
use crate::types::{
    EnergyZone, Genre, MAX_STEPS, StepWeights, Voice, clamp_pattern_length, clamp_unit,
    count_hits, length_mask, mask_summary,
};
use crate::velocity::{
    AccentParams, BuildModifiers, PunchParams, compute_velocity, default_accent_mask,
    should_accent,
};
use duopulse_hash::hash_combine;
use log::debug;
use serde::{Deserialize, Serialize};

const SHIMMER_SALT: u32 = 0x5348_494D;
const AUX_SALT: u32 = 0x4155_5821;
const AXIS_SALT: u32 = 0x4158_4953;

/// The slowly varying performance controls, all in [0, 1] except `genre`
/// and `pattern_length`. Values are clamped on use, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlState {
    pub energy: f32,
    pub shape: f32,
    pub drift: f32,
    pub punch: f32,
    pub accent: f32,
    pub build: f32,
    pub field_x: f32,
    pub field_y: f32,
    pub axis_x: f32,
    pub axis_y: f32,
    pub genre: Genre,
    pub pattern_length: i32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            energy: 0.5,
            shape: 0.2,
            drift: 0.0,
            punch: 0.5,
            accent: 0.5,
            build: 0.0,
            field_x: 0.5,
            field_y: 0.5,
            axis_x: 0.5,
            axis_y: 0.5,
            genre: Genre::Techno,
            pattern_length: 16,
        }
    }
}

impl ControlState {
    /// Copy with every continuous control clamped to [0, 1] and the pattern
    /// length clamped to 1..=32.
    pub fn clamped(&self) -> Self {
        Self {
            energy: clamp_unit(self.energy),
            shape: clamp_unit(self.shape),
            drift: clamp_unit(self.drift),
            punch: clamp_unit(self.punch),
            accent: clamp_unit(self.accent),
            build: clamp_unit(self.build),
            field_x: clamp_unit(self.field_x),
            field_y: clamp_unit(self.field_y),
            axis_x: clamp_unit(self.axis_x),
            axis_y: clamp_unit(self.axis_y),
            genre: self.genre,
            pattern_length: clamp_pattern_length(self.pattern_length) as i32,
        }
    }
}

/// One generated bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPattern {
    pub anchor_mask: u32,
    pub shimmer_mask: u32,
    /// Absolute steps of the hat burst (the burst's offsets shifted by its
    /// fill start).
    pub aux_mask: u32,
    /// Accented anchor and shimmer hits.
    pub accent_mask: u32,
    pub anchor_velocity: StepWeights,
    pub shimmer_velocity: StepWeights,
    pub aux_velocity: StepWeights,
    pub hat_burst: HatBurst,
    pub pattern_length: usize,
    /// Blended archetype swing, 0 = straight. Applied by the output layer.
    pub swing_amount: f32,
    /// Blended archetype anchor/shimmer coupling, passed through for the host.
    pub couple: f32,
}

impl Default for BarPattern {
    fn default() -> Self {
        Self {
            anchor_mask: 0,
            shimmer_mask: 0,
            aux_mask: 0,
            accent_mask: 0,
            anchor_velocity: [0.0; MAX_STEPS],
            shimmer_velocity: [0.0; MAX_STEPS],
            aux_velocity: [0.0; MAX_STEPS],
            hat_burst: HatBurst::default(),
            pattern_length: 16,
            swing_amount: 0.0,
            couple: 0.0,
        }
    }
}

impl BarPattern {
    pub fn mask(&self, voice: Voice) -> u32 {
        match voice {
            Voice::Anchor => self.anchor_mask,
            Voice::Shimmer => self.shimmer_mask,
            Voice::Aux => self.aux_mask,
        }
    }

    pub fn velocities(&self, voice: Voice) -> &StepWeights {
        match voice {
            Voice::Anchor => &self.anchor_velocity,
            Voice::Shimmer => &self.shimmer_velocity,
            Voice::Aux => &self.aux_velocity,
        }
    }

    /// Velocity of `voice` at `step`, or 0.0 when the step is silent.
    pub fn velocity(&self, voice: Voice, step: usize) -> f32 {
        if step < self.pattern_length && self.mask(voice) & (1 << step) != 0 {
            self.velocities(voice)[step]
        } else {
            0.0
        }
    }

    /// Three lines of `x`/`.` rendering, one per voice.
    pub fn summary(&self) -> String {
        let len = self.pattern_length as i32;
        Voice::ALL
            .iter()
            .map(|&v| format!("{:<8}{}", v.name(), mask_summary(self.mask(v), len)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Owns everything that persists between bars.
#[derive(Debug, Clone)]
pub struct PatternEngine {
    drift: DriftState,
    fields: [GenreField; 3],
    config: EngineConfig,
}

impl PatternEngine {
    pub fn new(config: EngineConfig, seed: u32) -> Self {
        let drift = DriftState::new(seed);
        debug!(
            "pattern engine ready: pattern seed {:#010x}, temperature {}, proximity window {}",
            drift.pattern_seed(),
            config.softmax_temperature,
            config.proximity_window
        );
        Self {
            drift,
            fields: Genre::ALL.map(GenreField::for_genre),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn drift_state(&self) -> &DriftState {
        &self.drift
    }

    /// Replace the drift state, e.g. from a host snapshot.
    pub fn restore_drift_state(&mut self, state: DriftState) {
        self.drift = state;
    }

    pub fn field(&self, genre: Genre) -> &GenreField {
        &self.fields[genre.index()]
    }

    /// Controls with this engine's default pattern length.
    pub fn default_controls(&self) -> ControlState {
        ControlState {
            pattern_length: self.config.default_pattern_length,
            ..ControlState::default()
        }
    }

    pub fn on_phrase_boundary(&mut self) {
        self.drift.on_phrase_boundary();
    }

    pub fn request_reseed(&mut self) {
        self.drift.request_reseed();
    }

    pub fn reseed(&mut self, new_seed: u32) {
        self.drift.reseed(new_seed);
    }

    /// Generate one bar. `phrase_progress` is the position of this bar in
    /// the phrase, in [0, 1].
    pub fn generate_bar(&self, controls: &ControlState, phrase_progress: f32) -> BarPattern {
        let c = controls.clamped();
        let len = c.pattern_length as usize;
        let len_i = c.pattern_length;
        let all_steps = length_mask(len);
        let drift = &self.drift;
        let seed_for = |step: usize| drift.select_seed(c.drift, step as i32, len_i);

        let build = BuildModifiers::from_build(c.build, phrase_progress);
        let dna = self.fields[c.genre.index()].blended(
            c.field_x,
            c.field_y,
            self.config.softmax_temperature,
        );

        // Anchor weights: archetype DNA shaped per step by whichever seed
        // that step follows.
        let locked_shape =
            compute_shape_blended_weights(c.shape, c.energy, drift.pattern_seed(), len_i);
        let evolving_shape =
            compute_shape_blended_weights(c.shape, c.energy, drift.phrase_seed(), len_i);
        let archetype = dna.clamped_weights(Voice::Anchor);
        let mut anchor_weights = [0.0; MAX_STEPS];
        for (step, w) in anchor_weights.iter_mut().enumerate().take(len) {
            let shape_weight = if is_step_locked(step as i32, len_i, c.drift) {
                locked_shape[step]
            } else {
                evolving_shape[step]
            };
            *w = clamp_weight(archetype[step] * shape_weight);
        }
        apply_axis_bias(
            &mut anchor_weights,
            c.axis_x,
            c.axis_y,
            c.shape,
            drift.pattern_seed() ^ AXIS_SALT,
            len_i,
        );

        let zone = EnergyZone::from_energy(c.energy);
        let anchor_target = scaled_budget(
            anchor_budget(c.energy, c.shape, len_i),
            build.density_multiplier,
            len,
        );
        let spacing = if self.config.min_spacing {
            min_spacing_for_zone(zone)
        } else {
            0
        };
        let scores = gumbel_scores(&anchor_weights, len_i, seed_for);
        let anchor_mask = select_top_k(&scores, all_steps, anchor_target, len_i, spacing);

        // Shimmer: complement the anchor. Step 1 is a weak step, so its seed
        // follows the phrase seed as soon as drift leaves zero.
        let shimmer_target = scaled_budget(
            shimmer_budget(
                count_hits(anchor_mask) as usize,
                c.energy,
                c.shape,
                len_i,
                self.config.shimmer_ratio,
            ),
            build.density_multiplier,
            len,
        );
        let shimmer_weights = dna.clamped_weights(Voice::Shimmer);
        let shimmer_mask = apply_complement_relationship(
            anchor_mask,
            Some(&shimmer_weights),
            c.drift,
            hash_combine(seed_for(1.min(len - 1)), SHIMMER_SALT),
            len_i,
            shimmer_target as i32,
        );

        let mut bar = BarPattern {
            anchor_mask,
            shimmer_mask,
            pattern_length: len,
            swing_amount: clamp_unit(dna.swing_amount),
            couple: clamp_unit(dna.default_couple),
            ..BarPattern::default()
        };

        if build.in_fill_zone {
            let fill_duration = (len / 4).max(1);
            let fill_start = len - fill_duration;
            // Busier archetypes fill harder.
            let fill_energy = clamp_unit(c.energy * dna.fill_density_multiplier);
            generate_hat_burst(
                fill_energy,
                c.shape,
                anchor_mask | shimmer_mask,
                fill_start as i32,
                fill_duration as i32,
                len_i,
                hash_combine(drift.phrase_seed(), AUX_SALT),
                self.config.proximity_window,
                &mut bar.hat_burst,
            );
            for trigger in bar.hat_burst.triggers() {
                let step = fill_start + trigger.step as usize;
                if step < len {
                    bar.aux_mask |= 1 << step;
                    bar.aux_velocity[step] = trigger.velocity;
                }
            }
        }

        let accent = AccentParams::from_accent(c.accent);
        let punch = PunchParams::from_punch(c.punch);
        for (mask, accent_mask, salt, velocities) in [
            (
                anchor_mask,
                accent_mask_or_default(dna.anchor_accent_mask, Voice::Anchor),
                0,
                &mut bar.anchor_velocity,
            ),
            (
                shimmer_mask,
                accent_mask_or_default(dna.shimmer_accent_mask, Voice::Shimmer),
                SHIMMER_SALT,
                &mut bar.shimmer_velocity,
            ),
        ] {
            for step in (0..len).filter(|&s| mask & (1 << s) != 0) {
                let seed = seed_for(step) ^ salt;
                let i = step as i32;
                let is_accent =
                    should_accent(i, accent_mask, punch.accent_probability, &build, seed);
                if is_accent {
                    bar.accent_mask |= 1 << step;
                }
                velocities[step] =
                    compute_velocity(&accent, &punch, &build, is_accent, seed, i, len_i);
            }
        }

        bar
    }
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), duopulse_hash::DEFAULT_SEED)
    }
}

/// An archetype without accent eligibility falls back to the voice default.
fn accent_mask_or_default(mask: u32, voice: Voice) -> u32 {
    if mask == 0 {
        default_accent_mask(voice)
    } else {
        mask
    }
}

fn scaled_budget(budget: usize, density: f32, len: usize) -> usize {
    ((budget as f32 * density + 0.5) as usize).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(seed: u32) -> PatternEngine {
        PatternEngine::new(EngineConfig::default(), seed)
    }

    #[test]
    fn bar_is_deterministic() {
        let e = engine(42);
        let controls = ControlState {
            shape: 0.6,
            drift: 0.5,
            ..ControlState::default()
        };
        assert_eq!(e.generate_bar(&controls, 0.3), e.generate_bar(&controls, 0.3));
    }

    #[test]
    fn masks_stay_inside_pattern() {
        let e = engine(7);
        for length in [1, 5, 12, 16, 24, 31, 32] {
            for energy in [0.0, 0.4, 0.9] {
                let controls = ControlState {
                    energy,
                    pattern_length: length,
                    build: 1.0,
                    ..ControlState::default()
                };
                let bar = e.generate_bar(&controls, 0.95);
                let lm = length_mask(length as usize);
                for voice in Voice::ALL {
                    assert_eq!(bar.mask(voice) & !lm, 0, "{voice:?} spills past {length}");
                }
                assert!(bar.anchor_mask != 0, "no anchor at length {length}");
            }
        }
    }

    #[test]
    fn shimmer_never_doubles_anchor() {
        let e = engine(99);
        for shape in [0.0, 0.3, 0.5, 0.7, 1.0] {
            for drift in [0.0, 0.5, 1.0] {
                let controls = ControlState {
                    shape,
                    drift,
                    energy: 0.8,
                    ..ControlState::default()
                };
                let bar = e.generate_bar(&controls, 0.0);
                assert_eq!(bar.anchor_mask & bar.shimmer_mask, 0);
            }
        }
    }

    #[test]
    fn every_hit_has_a_velocity_in_range() {
        let e = engine(3);
        let controls = ControlState {
            energy: 1.0,
            build: 1.0,
            punch: 1.0,
            accent: 1.0,
            ..ControlState::default()
        };
        let bar = e.generate_bar(&controls, 0.9);
        for voice in [Voice::Anchor, Voice::Shimmer] {
            for step in 0..bar.pattern_length {
                let v = bar.velocity(voice, step);
                if bar.mask(voice) & (1 << step) != 0 {
                    assert!((0.30..=1.0).contains(&v), "{voice:?} step {step}: {v}");
                } else {
                    assert_eq!(v, 0.0);
                }
            }
        }
    }

    #[test]
    fn hat_burst_only_in_fill_zone() {
        let e = engine(11);
        let controls = ControlState {
            energy: 0.9,
            build: 0.8,
            ..ControlState::default()
        };
        assert_eq!(e.generate_bar(&controls, 0.2).aux_mask, 0);
        let fill = e.generate_bar(&controls, 0.9);
        assert!(fill.aux_mask != 0);
        // Burst lives in the last quarter of a 16-step pattern.
        assert_eq!(fill.aux_mask & 0x0FFF, 0);
        assert_eq!(count_hits(fill.aux_mask) as usize, fill.hat_burst.count());
    }

    #[test]
    fn more_energy_more_anchor_hits() {
        let e = engine(5);
        let low = ControlState {
            energy: 0.05,
            ..ControlState::default()
        };
        let high = ControlState {
            energy: 0.95,
            pattern_length: 16,
            ..ControlState::default()
        };
        let hits = |c: &ControlState| count_hits(e.generate_bar(c, 0.0).anchor_mask);
        assert!(hits(&high) > hits(&low));
    }

    #[test]
    fn busy_archetypes_fill_harder() {
        use crate::hat_burst::burst_trigger_count;
        let e = engine(21);
        let controls = ControlState {
            energy: 0.4,
            build: 0.8,
            field_x: 1.0,
            field_y: 1.0,
            pattern_length: 32,
            ..ControlState::default()
        };
        let dna = e
            .field(Genre::Techno)
            .blended(1.0, 1.0, e.config().softmax_temperature);
        assert!(dna.fill_density_multiplier > 1.5, "{}", dna.fill_density_multiplier);
        let bar = e.generate_bar(&controls, 0.95);
        let scaled = burst_trigger_count(clamp_unit(0.4 * dna.fill_density_multiplier), 8);
        assert_eq!(bar.hat_burst.count(), scaled);
        assert!(scaled > burst_trigger_count(0.4, 8));
    }

    #[test]
    fn bar_carries_archetype_feel() {
        let e = engine(4);
        let controls = ControlState {
            field_x: 1.0,
            field_y: 1.0,
            ..ControlState::default()
        };
        let dna = e
            .field(Genre::Techno)
            .blended(1.0, 1.0, e.config().softmax_temperature);
        let bar = e.generate_bar(&controls, 0.0);
        assert_eq!(bar.swing_amount, clamp_unit(dna.swing_amount));
        assert_eq!(bar.couple, clamp_unit(dna.default_couple));
    }

    #[test]
    fn empty_accent_mask_uses_voice_default() {
        assert_eq!(
            accent_mask_or_default(0, Voice::Anchor),
            default_accent_mask(Voice::Anchor)
        );
        assert_eq!(
            accent_mask_or_default(0, Voice::Shimmer),
            default_accent_mask(Voice::Shimmer)
        );
        assert_eq!(accent_mask_or_default(0x8001, Voice::Anchor), 0x8001);
    }

    #[test]
    fn zero_drift_repeats_across_phrases() {
        let mut e = engine(1234);
        let controls = ControlState {
            shape: 0.5,
            drift: 0.0,
            ..ControlState::default()
        };
        let first = e.generate_bar(&controls, 0.0);
        for _ in 0..4 {
            e.on_phrase_boundary();
        }
        assert_eq!(first.anchor_mask, e.generate_bar(&controls, 0.0).anchor_mask);
    }

    #[test]
    fn full_drift_evolves_across_phrases() {
        let mut e = engine(1234);
        let controls = ControlState {
            shape: 0.8,
            drift: 1.0,
            energy: 0.6,
            pattern_length: 32,
            ..ControlState::default()
        };
        let mut masks = vec![e.generate_bar(&controls, 0.0).anchor_mask];
        for _ in 0..6 {
            e.on_phrase_boundary();
            masks.push(e.generate_bar(&controls, 0.0).anchor_mask);
        }
        masks.sort_unstable();
        masks.dedup();
        assert!(masks.len() > 1, "anchor never changed at full drift");
    }

    #[test]
    fn reseed_changes_pattern_seed() {
        let mut e = engine(1);
        let before = e.drift_state().pattern_seed();
        e.request_reseed();
        assert_eq!(e.drift_state().pattern_seed(), before);
        e.on_phrase_boundary();
        assert_ne!(e.drift_state().pattern_seed(), before);
        e.reseed(77);
        assert_eq!(e.drift_state().pattern_seed(), 77);
        assert_eq!(e.drift_state().phrase_counter(), 0);
    }

    #[test]
    fn out_of_range_controls_are_clamped() {
        let e = engine(8);
        let wild = ControlState {
            energy: 4.0,
            shape: -1.0,
            drift: f32::NAN,
            pattern_length: 100,
            ..ControlState::default()
        };
        let bar = e.generate_bar(&wild, 2.0);
        assert_eq!(bar.pattern_length, 32);
        assert!(bar.anchor_mask != 0);
    }

    #[test]
    fn summary_has_a_line_per_voice() {
        let bar = engine(2).generate_bar(&ControlState::default(), 0.0);
        assert_eq!(bar.summary().lines().count(), 3);
    }

    #[test]
    fn default_controls_follow_config() {
        let config = EngineConfig {
            default_pattern_length: 24,
            ..EngineConfig::default()
        };
        let e = PatternEngine::new(config, 1);
        assert_eq!(e.default_controls().pattern_length, 24);
    }
}

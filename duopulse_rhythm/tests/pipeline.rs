// End-to-end tests for the bar pipeline.
//
// Each test drives a `PatternEngine` over several phrases the way a host
// would: one `generate_bar` per bar, `on_phrase_boundary` between phrases,
// reseeds from outside. They check properties that only show up across bars
// (repetition at zero drift, deferred reseeds, snapshot/restore) plus the
// MIDI export of a whole run.

use duopulse_rhythm::config::EngineConfig;
use duopulse_rhythm::drift::DriftState;
use duopulse_rhythm::engine::{BarPattern, ControlState, PatternEngine};
use duopulse_rhythm::midi::render_midi;
use duopulse_rhythm::types::{Genre, Voice, length_mask};

const BARS_PER_PHRASE: u32 = 4;

/// Run `phrases` phrases and return every bar.
fn run(engine: &mut PatternEngine, controls: &ControlState, phrases: u32) -> Vec<BarPattern> {
    let mut bars = Vec::new();
    for phrase in 0..phrases {
        if phrase > 0 {
            engine.on_phrase_boundary();
        }
        for bar in 0..BARS_PER_PHRASE {
            let progress = bar as f32 / (BARS_PER_PHRASE - 1) as f32;
            bars.push(engine.generate_bar(controls, progress));
        }
    }
    bars
}

fn anchors(bars: &[BarPattern]) -> Vec<u32> {
    bars.iter().map(|b| b.anchor_mask).collect()
}

// ---------------------------------------------------------------------------
// Determinism and drift
// ---------------------------------------------------------------------------

#[test]
fn same_seed_same_run() {
    let controls = ControlState {
        shape: 0.55,
        drift: 0.4,
        build: 0.7,
        ..ControlState::default()
    };
    let mut a = PatternEngine::new(EngineConfig::default(), 2024);
    let mut b = PatternEngine::new(EngineConfig::default(), 2024);
    assert_eq!(run(&mut a, &controls, 3), run(&mut b, &controls, 3));
}

#[test]
fn different_seeds_differ_somewhere() {
    let controls = ControlState {
        shape: 0.6,
        energy: 0.7,
        pattern_length: 32,
        ..ControlState::default()
    };
    let mut a = PatternEngine::new(EngineConfig::default(), 1);
    let mut b = PatternEngine::new(EngineConfig::default(), 2);
    assert_ne!(
        anchors(&run(&mut a, &controls, 2)),
        anchors(&run(&mut b, &controls, 2))
    );
}

#[test]
fn zero_drift_loops_every_phrase() {
    let controls = ControlState {
        shape: 0.45,
        drift: 0.0,
        build: 0.0,
        ..ControlState::default()
    };
    let mut engine = PatternEngine::new(EngineConfig::default(), 77);
    let bars = run(&mut engine, &controls, 4);
    let first = bars[0];
    for (i, bar) in bars.iter().enumerate() {
        assert_eq!(bar.anchor_mask, first.anchor_mask, "bar {i} anchor drifted");
        assert_eq!(bar.shimmer_mask, first.shimmer_mask, "bar {i} shimmer drifted");
    }
}

// ---------------------------------------------------------------------------
// Reseeding and snapshots
// ---------------------------------------------------------------------------

#[test]
fn requested_reseed_waits_for_phrase_boundary() {
    let controls = ControlState {
        shape: 0.7,
        ..ControlState::default()
    };
    let mut engine = PatternEngine::new(EngineConfig::default(), 31337);
    let before = engine.generate_bar(&controls, 0.0);

    engine.request_reseed();
    assert_eq!(engine.generate_bar(&controls, 0.0), before);

    engine.on_phrase_boundary();
    assert_ne!(engine.drift_state().pattern_seed(), 31337);
}

#[test]
fn drift_snapshot_restores_output() {
    let controls = ControlState {
        shape: 0.85,
        drift: 0.8,
        energy: 0.8,
        ..ControlState::default()
    };
    let mut engine = PatternEngine::new(EngineConfig::default(), 9);
    engine.on_phrase_boundary();
    engine.on_phrase_boundary();
    let json = serde_json::to_string(engine.drift_state()).unwrap();
    let expected = engine.generate_bar(&controls, 0.5);

    engine.reseed(123);
    engine.on_phrase_boundary();
    assert_ne!(engine.generate_bar(&controls, 0.5), expected);

    let snapshot: DriftState = serde_json::from_str(&json).unwrap();
    engine.restore_drift_state(snapshot);
    assert_eq!(engine.generate_bar(&controls, 0.5), expected);
}

// ---------------------------------------------------------------------------
// Whole-run properties
// ---------------------------------------------------------------------------

#[test]
fn every_genre_and_length_produces_valid_bars() {
    let mut engine = PatternEngine::new(EngineConfig::default(), 5);
    for genre in Genre::ALL {
        for length in [8, 12, 16, 24, 32] {
            let controls = ControlState {
                genre,
                pattern_length: length,
                energy: 0.65,
                build: 1.0,
                ..ControlState::default()
            };
            for bar in run(&mut engine, &controls, 2) {
                let lm = length_mask(length as usize);
                assert!(bar.anchor_mask != 0, "{genre:?}/{length}: empty anchor");
                assert_eq!(bar.anchor_mask & bar.shimmer_mask, 0);
                for voice in Voice::ALL {
                    assert_eq!(bar.mask(voice) & !lm, 0, "{genre:?}/{length}: {voice:?}");
                }
            }
        }
    }
}

#[test]
fn fill_bars_get_hat_bursts() {
    let controls = ControlState {
        energy: 0.8,
        build: 0.9,
        ..ControlState::default()
    };
    let mut engine = PatternEngine::new(EngineConfig::default(), 66);
    let bars = run(&mut engine, &controls, 2);
    for (i, bar) in bars.iter().enumerate() {
        let last_in_phrase = i as u32 % BARS_PER_PHRASE == BARS_PER_PHRASE - 1;
        assert_eq!(bar.aux_mask != 0, last_in_phrase, "bar {i}");
    }
}

#[test]
fn build_raises_fill_bar_velocity() {
    let base = ControlState {
        energy: 0.6,
        accent: 0.3,
        ..ControlState::default()
    };
    let built = ControlState { build: 1.0, ..base };
    let engine = PatternEngine::new(EngineConfig::default(), 8);
    let mean = |bar: &BarPattern| {
        let hits = bar.anchor_mask.count_ones() as f32;
        (0..bar.pattern_length)
            .map(|s| bar.velocity(Voice::Anchor, s))
            .sum::<f32>()
            / hits
    };
    let plain = engine.generate_bar(&base, 1.0);
    let boosted = engine.generate_bar(&built, 1.0);
    assert!(mean(&boosted) > mean(&plain));
}

#[test]
fn run_exports_to_midi() {
    let mut engine = PatternEngine::new(EngineConfig::default(), 12);
    let controls = ControlState {
        build: 0.5,
        ..ControlState::default()
    };
    let bars = run(&mut engine, &controls, 2);
    let bytes = render_midi(&bars, 124).unwrap();
    assert_eq!(&bytes[..4], b"MThd");
}

#[test]
fn config_file_changes_behavior() {
    let path = std::env::temp_dir().join(format!("duopulse_cfg_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "min_spacing": false, "shimmer_ratio": 0.0 }"#).unwrap();
    let config = EngineConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(!config.min_spacing);

    let engine = PatternEngine::new(config, 3);
    let controls = ControlState {
        energy: 0.1,
        ..ControlState::default()
    };
    // Minimal zone with a zero ratio leaves the shimmer silent.
    assert_eq!(engine.generate_bar(&controls, 0.0).shimmer_mask, 0);
}

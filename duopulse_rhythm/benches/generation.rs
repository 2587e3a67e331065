// Benchmarks for the per-bar pipeline and its most expensive stage.
//
// A bar must be cheap enough to regenerate on every control change, so the
// numbers to watch are `generate_bar_*` at 32 steps and the shape
// synthesizer in the wild zone.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use duopulse_rhythm::config::EngineConfig;
use duopulse_rhythm::engine::{ControlState, PatternEngine};
use duopulse_rhythm::hit_budget::select_hits_gumbel_top_k;
use duopulse_rhythm::shape::compute_shape_blended_weights;

fn bench_generate_bar(c: &mut Criterion) {
    let engine = PatternEngine::new(EngineConfig::default(), 0xC0FFEE);
    let groove = ControlState {
        pattern_length: 16,
        ..ControlState::default()
    };
    let fill = ControlState {
        energy: 0.9,
        shape: 0.8,
        drift: 0.6,
        build: 1.0,
        pattern_length: 32,
        ..ControlState::default()
    };
    c.bench_function("generate_bar_groove_16", |b| {
        b.iter(|| engine.generate_bar(black_box(&groove), black_box(0.0)))
    });
    c.bench_function("generate_bar_fill_32", |b| {
        b.iter(|| engine.generate_bar(black_box(&fill), black_box(0.95)))
    });
}

fn bench_shape_weights(c: &mut Criterion) {
    for (name, shape) in [("stable", 0.1), ("displaced", 0.6), ("wild", 0.9)] {
        c.bench_function(&format!("shape_weights_{name}"), |b| {
            b.iter(|| compute_shape_blended_weights(black_box(shape), 0.7, black_box(42), 32))
        });
    }
}

fn bench_gumbel(c: &mut Criterion) {
    let weights = compute_shape_blended_weights(0.5, 0.7, 42, 32);
    c.bench_function("gumbel_top_k_8_of_32", |b| {
        b.iter(|| select_hits_gumbel_top_k(&weights, u32::MAX, 8, black_box(7), 32, 2))
    });
}

criterion_group!(benches, bench_generate_bar, bench_shape_weights, bench_gumbel);
criterion_main!(benches);

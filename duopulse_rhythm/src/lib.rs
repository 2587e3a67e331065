// DuoPulse rhythm engine
//
// Generates two-voice percussion patterns (an anchor, usually the kick, and
// a shimmer, usually the snare or clap) plus an aux hat burst for fills.
// Patterns are built one bar at a time from a handful of slowly varying
// controls. There is no stored sequence: every bar is recomputed from the
// seeds, so the same seeds and controls always give the same bar.
//
// Architecture:
// - types.rs: Step masks, weight arrays, genres, energy zones, voices
// - drift.rs: Pattern/phrase seeds and stability-graded drift
// - archetype.rs + archetype_data.rs: The 3x3 archetype field per genre and
//   softmax blending between neighbours
// - shape.rs: Shape-driven weight synthesis (stable → syncopated →
//   displaced → wild) and the axis bias
// - hit_budget.rs: Hit counts per voice and Gumbel top-K selection
// - relation.rs: Shimmer placement in the anchor's gaps
// - hat_burst.rs: Pattern-aware fill bursts for the aux voice
// - velocity.rs: Accent and punch dynamics, phrase build modifiers
// - engine.rs: The per-bar pipeline that chains the above
// - config.rs / error.rs: JSON engine config and the error type for the
//   non-real-time surfaces
// - midi.rs: MIDI preview output
//
// Hashing and seed derivation live in the `duopulse_hash` crate.

pub mod archetype;
mod archetype_data;
pub mod config;
pub mod drift;
pub mod engine;
pub mod error;
pub mod hat_burst;
pub mod hit_budget;
pub mod midi;
pub mod relation;
pub mod shape;
pub mod types;
pub mod velocity;

// Deterministic hash mixing and seed derivation.
//
// Every random-looking decision in the rhythm core is a pure function of a
// 32-bit seed and an index, computed here. There is no hidden generator state
// that advances between calls: asking for `hash_to_float(seed, 7)` twice gives
// the same value twice, and the order in which steps are evaluated never
// changes the result, so a bar can be regenerated from its seed at any time.
//
// The mixers are built from the golden-ratio increment (0x9E3779B9) and the
// murmur3 32-bit finalizer constants. `StepRng` is the one stateful helper: a
// tiny LCG for loops that need a short stream of draws from a single seed
// (e.g. picking among candidate steps). It is `Copy` and never allocates.
//
// **Critical constraint: determinism.** All arithmetic here is wrapping u32
// integer math. Floats only appear at the final conversion step, so output is
// bit-identical on every platform and optimization level.

use serde::{Deserialize, Serialize};

/// Golden-ratio increment used to spread sequential indices across the
/// 32-bit space.
pub const GOLDEN_RATIO: u32 = 0x9E37_79B9;

/// First murmur3 finalizer multiplier.
pub const MIX_MUL_1: u32 = 0x85EB_CA6B;

/// Second murmur3 finalizer multiplier.
pub const MIX_MUL_2: u32 = 0xC2B2_AE35;

/// Seed substituted whenever a caller supplies (or a mixer produces) zero.
pub const DEFAULT_SEED: u32 = 0x1234_5678;

/// Combine a seed with a value, boost-style.
///
/// Non-commutative: `hash_combine(a, b) != hash_combine(b, a)` for almost all
/// pairs, because `seed` is shifted into the result while `value` is not.
#[inline]
pub fn hash_combine(seed: u32, value: u32) -> u32 {
    seed ^ value
        .wrapping_add(GOLDEN_RATIO)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

/// Full murmur3 32-bit finalizer.
#[inline]
pub fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(MIX_MUL_1);
    h ^= h >> 13;
    h = h.wrapping_mul(MIX_MUL_2);
    h ^= h >> 16;
    h
}

/// Mix a seed with a step index into a well-distributed `u32`.
///
/// Negative steps are reinterpreted as their two's-complement bit pattern, so
/// every `i32` is a valid input.
#[inline]
pub fn hash_to_int(seed: u32, step: i32) -> u32 {
    fmix32(seed ^ (step as u32).wrapping_mul(GOLDEN_RATIO))
}

/// Mix a seed with a step index into an `f32` in [0, 1].
///
/// Uses the low 16 bits of `hash_to_int`, so the result is quantized to
/// 1/65535. Both endpoints are reachable.
#[inline]
pub fn hash_to_float(seed: u32, step: i32) -> f32 {
    (hash_to_int(seed, step) & 0xFFFF) as f32 / 65535.0
}

/// Mix a seed with a step index into an `f32` strictly inside (0, 1).
///
/// Uses 24 bits of the hash and clamps away from both endpoints, so the
/// result is safe to pass through `ln`. Used for Gumbel noise.
#[inline]
pub fn hash_to_open_unit(seed: u32, step: i32) -> f32 {
    let u = (hash_to_int(seed, step) >> 8) as f32 / 16_777_216.0;
    u.clamp(1e-6, 1.0 - 1e-6)
}

/// Derive a fresh seed from a base seed and a counter.
///
/// Never returns zero: a zero mix result is replaced with `DEFAULT_SEED`.
/// Distinct counters with the same base give distinct seeds, because the
/// counter is spread by an odd multiplier and the finalizer is a bijection.
#[inline]
pub fn generate_new_seed(base: u32, counter: u32) -> u32 {
    let s = fmix32(base ^ counter.wrapping_mul(GOLDEN_RATIO));
    if s == 0 { DEFAULT_SEED } else { s }
}

/// Short-stream generator for loops that need several draws from one seed.
///
/// Seeding is multiplicative (Knuth's 2654435761) followed by a high-half
/// fold, so nearby seeds and seed zero all start from distinct, non-zero
/// states. The step function is the classic ANSI C LCG; draws are 15-bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRng {
    state: u32,
}

impl StepRng {
    /// Create a generator from a seed. Seed 0 is valid.
    pub fn new(seed: u32) -> Self {
        let mut state = seed.wrapping_mul(2_654_435_761) ^ (seed >> 16);
        if state == 0 {
            state = 1;
        }
        Self { state }
    }

    /// Next draw in [0, 32767].
    #[inline]
    pub fn next_u15(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (self.state >> 16) & 0x7FFF
    }

    /// Uniform index in `[0, n)`. Returns 0 when `n == 0`.
    #[inline]
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 { 0 } else { self.next_u15() % n }
    }
}

// Built-in archetype tables for the three genre fields.
//
// Each genre has nine archetypes laid out on a 3x3 grid, row-major by
// `y * 3 + x`: x runs from straight to displaced, y from sparse to busy.
// Weights are raw per-step hit likelihoods for a 32-step (two-bar) pattern;
// zero means "never on its own", which the blending code lifts to the
// minimum step weight. Metadata (swing, couple, fill multiplier, accents) sits
// alongside the weights so one row fully describes an archetype.
//
// Regenerate by hand if the musical content changes; nothing here is derived
// at runtime.

use crate::types::MAX_STEPS;

/// Raw data for one archetype, before it is placed on a `GenreField`.
pub(crate) struct ArchetypeTable {
    pub name: &'static str,
    pub anchor: [f32; MAX_STEPS],
    pub shimmer: [f32; MAX_STEPS],
    pub swing_amount: f32,
    pub default_couple: f32,
    pub fill_density_multiplier: f32,
    pub accent_mask: u32,
}

pub(crate) const TECHNO: [ArchetypeTable; 9] = [
    ArchetypeTable {
        name: "Minimal",
        anchor: [
            1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ],
        swing_amount: 0.0,
        default_couple: 0.2,
        fill_density_multiplier: 1.2,
        accent_mask: 0x0101_0101,
    },
    ArchetypeTable {
        name: "Steady",
        anchor: [
            1.0, 0.0, 0.2, 0.0, 0.7, 0.0, 0.2, 0.0,
            0.9, 0.0, 0.2, 0.0, 0.7, 0.0, 0.2, 0.0,
            1.0, 0.0, 0.2, 0.0, 0.7, 0.0, 0.2, 0.0,
            0.9, 0.0, 0.2, 0.0, 0.7, 0.0, 0.3, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0,
        ],
        swing_amount: 0.1,
        default_couple: 0.3,
        fill_density_multiplier: 1.3,
        accent_mask: 0x0101_0101,
    },
    ArchetypeTable {
        name: "Displaced",
        anchor: [
            1.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.0,
            0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.4, 0.0,
            1.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.4, 0.0,
            0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.4, 0.0,
            0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ],
        swing_amount: 0.2,
        default_couple: 0.4,
        fill_density_multiplier: 1.4,
        accent_mask: 0x0101_0101,
    },
    ArchetypeTable {
        name: "Driving",
        anchor: [
            1.0, 0.0, 0.5, 0.0, 0.8, 0.0, 0.5, 0.0,
            0.9, 0.0, 0.5, 0.0, 0.8, 0.0, 0.5, 0.0,
            1.0, 0.0, 0.5, 0.0, 0.8, 0.0, 0.5, 0.0,
            0.9, 0.0, 0.5, 0.0, 0.8, 0.0, 0.5, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0,
        ],
        swing_amount: 0.0,
        default_couple: 0.3,
        fill_density_multiplier: 1.3,
        accent_mask: 0x0101_0101,
    },
    ArchetypeTable {
        name: "Groovy",
        anchor: [
            1.0, 0.0, 0.3, 0.4, 0.7, 0.0, 0.3, 0.4,
            0.9, 0.0, 0.3, 0.4, 0.7, 0.0, 0.3, 0.4,
            1.0, 0.0, 0.3, 0.4, 0.7, 0.0, 0.3, 0.4,
            0.9, 0.0, 0.3, 0.4, 0.7, 0.0, 0.3, 0.4,
        ],
        shimmer: [
            0.0, 0.0, 0.0, 0.3, 0.3, 0.0, 0.0, 0.3,
            1.0, 0.0, 0.0, 0.3, 0.3, 0.0, 0.0, 0.3,
            0.0, 0.0, 0.0, 0.3, 0.3, 0.0, 0.0, 0.3,
            1.0, 0.0, 0.0, 0.3, 0.3, 0.0, 0.0, 0.3,
        ],
        swing_amount: 0.3,
        default_couple: 0.4,
        fill_density_multiplier: 1.5,
        accent_mask: 0x1111_1111,
    },
    ArchetypeTable {
        name: "Broken",
        anchor: [
            0.8, 0.0, 0.0, 0.6, 0.0, 0.0, 0.5, 0.0,
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.5, 0.0,
            0.8, 0.0, 0.0, 0.6, 0.0, 0.0, 0.5, 0.0,
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.5, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.0, 0.4,
            0.9, 0.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0,
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.0, 0.4,
            0.9, 0.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0,
        ],
        swing_amount: 0.4,
        default_couple: 0.5,
        fill_density_multiplier: 1.6,
        accent_mask: 0x5555_5555,
    },
    ArchetypeTable {
        name: "Busy",
        anchor: [
            1.0, 0.3, 0.6, 0.3, 0.8, 0.3, 0.6, 0.3,
            0.9, 0.3, 0.6, 0.3, 0.8, 0.3, 0.6, 0.3,
            1.0, 0.3, 0.6, 0.3, 0.8, 0.3, 0.6, 0.3,
            0.9, 0.3, 0.6, 0.4, 0.8, 0.4, 0.6, 0.4,
        ],
        shimmer: [
            0.0, 0.0, 0.3, 0.0, 0.5, 0.0, 0.3, 0.0,
            1.0, 0.0, 0.3, 0.0, 0.5, 0.0, 0.3, 0.0,
            0.0, 0.0, 0.3, 0.0, 0.5, 0.0, 0.3, 0.0,
            1.0, 0.0, 0.3, 0.0, 0.5, 0.0, 0.3, 0.0,
        ],
        swing_amount: 0.0,
        default_couple: 0.4,
        fill_density_multiplier: 1.5,
        accent_mask: 0x1111_1111,
    },
    ArchetypeTable {
        name: "Polyrhythm",
        anchor: [
            1.0, 0.0, 0.0, 0.7, 0.0, 0.0, 0.7, 0.0,
            0.0, 0.0, 0.7, 0.0, 0.0, 0.7, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.7, 0.0, 0.0, 0.7, 0.0,
            0.0, 0.0, 0.7, 0.0, 0.0, 0.7, 0.0, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.0,
            0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.0, 0.0,
            1.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.0,
        ],
        swing_amount: 0.2,
        default_couple: 0.5,
        fill_density_multiplier: 1.7,
        accent_mask: 0x5555_5555,
    },
    ArchetypeTable {
        name: "Chaos",
        anchor: [
            1.0, 0.4, 0.0, 0.6, 0.0, 0.5, 0.0, 0.4,
            0.0, 0.0, 0.5, 0.0, 0.6, 0.0, 0.4, 0.5,
            0.9, 0.4, 0.0, 0.0, 0.6, 0.0, 0.5, 0.0,
            0.0, 0.5, 0.0, 0.4, 0.0, 0.6, 0.4, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.4, 0.0, 0.5, 0.0, 0.4, 0.0,
            0.9, 0.0, 0.0, 0.4, 0.0, 0.4, 0.0, 0.0,
            0.0, 0.0, 0.4, 0.5, 0.0, 0.4, 0.0, 0.4,
            0.9, 0.0, 0.4, 0.0, 0.4, 0.0, 0.0, 0.0,
        ],
        swing_amount: 0.5,
        default_couple: 0.6,
        fill_density_multiplier: 2.0,
        accent_mask: 0xFFFF_FFFF,
    },
];

pub(crate) const TRIBAL: [ArchetypeTable; 9] = [
    ArchetypeTable {
        name: "Minimal",
        anchor: [
            1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0,
            0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.0, 0.0,
            0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ],
        swing_amount: 0.2,
        default_couple: 0.3,
        fill_density_multiplier: 1.3,
        accent_mask: 0x0101_0101,
    },
    ArchetypeTable {
        name: "Steady",
        anchor: [
            1.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.4, 0.0,
            0.0, 0.0, 0.5, 0.0, 0.0, 0.4, 0.0, 0.0,
            0.9, 0.0, 0.0, 0.5, 0.0, 0.0, 0.4, 0.0,
            0.0, 0.0, 0.5, 0.0, 0.0, 0.4, 0.0, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.9, 0.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.9, 0.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0,
        ],
        swing_amount: 0.3,
        default_couple: 0.4,
        fill_density_multiplier: 1.4,
        accent_mask: 0x1111_1111,
    },
    ArchetypeTable {
        name: "Displaced",
        anchor: [
            0.9, 0.0, 0.0, 0.6, 0.0, 0.0, 0.0, 0.4,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0,
            0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0,
            0.0, 0.4, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.0, 0.4,
            0.8, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0,
        ],
        swing_amount: 0.4,
        default_couple: 0.5,
        fill_density_multiplier: 1.5,
        accent_mask: 0x1111_1111,
    },
    ArchetypeTable {
        name: "Driving",
        anchor: [
            1.0, 0.0, 0.0, 0.5, 0.7, 0.0, 0.0, 0.5,
            0.0, 0.0, 0.5, 0.0, 0.7, 0.0, 0.0, 0.5,
            1.0, 0.0, 0.0, 0.5, 0.7, 0.0, 0.0, 0.5,
            0.0, 0.0, 0.5, 0.0, 0.7, 0.0, 0.0, 0.5,
        ],
        shimmer: [
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.4, 0.0,
            0.9, 0.0, 0.0, 0.4, 0.0, 0.0, 0.4, 0.0,
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.4, 0.0,
            0.9, 0.0, 0.0, 0.4, 0.0, 0.0, 0.4, 0.0,
        ],
        swing_amount: 0.2,
        default_couple: 0.4,
        fill_density_multiplier: 1.4,
        accent_mask: 0x1111_1111,
    },
    ArchetypeTable {
        name: "Groovy",
        anchor: [
            1.0, 0.0, 0.0, 0.7, 0.0, 0.0, 0.0, 0.6,
            0.0, 0.0, 0.7, 0.0, 0.0, 0.0, 0.6, 0.0,
            1.0, 0.0, 0.0, 0.7, 0.0, 0.0, 0.0, 0.6,
            0.0, 0.0, 0.7, 0.0, 0.0, 0.0, 0.6, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0,
            0.9, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0,
            0.9, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0,
        ],
        swing_amount: 0.4,
        default_couple: 0.5,
        fill_density_multiplier: 1.6,
        accent_mask: 0x5555_5555,
    },
    ArchetypeTable {
        name: "Broken",
        anchor: [
            0.9, 0.0, 0.0, 0.6, 0.0, 0.5, 0.0, 0.0,
            0.0, 0.0, 0.5, 0.0, 0.6, 0.0, 0.0, 0.5,
            0.9, 0.0, 0.0, 0.0, 0.0, 0.5, 0.6, 0.0,
            0.0, 0.5, 0.0, 0.0, 0.6, 0.0, 0.0, 0.5,
        ],
        shimmer: [
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.4, 0.0,
            0.8, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.4, 0.0, 0.0, 0.4, 0.0, 0.0,
            0.8, 0.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0,
        ],
        swing_amount: 0.5,
        default_couple: 0.6,
        fill_density_multiplier: 1.7,
        accent_mask: 0x5555_5555,
    },
    ArchetypeTable {
        name: "Busy",
        anchor: [
            1.0, 0.3, 0.0, 0.6, 0.4, 0.0, 0.5, 0.3,
            0.0, 0.3, 0.6, 0.0, 0.4, 0.3, 0.0, 0.5,
            0.9, 0.3, 0.0, 0.6, 0.4, 0.0, 0.5, 0.3,
            0.0, 0.3, 0.6, 0.0, 0.4, 0.3, 0.0, 0.5,
        ],
        shimmer: [
            0.0, 0.0, 0.4, 0.0, 0.0, 0.4, 0.0, 0.0,
            0.9, 0.0, 0.0, 0.4, 0.0, 0.0, 0.4, 0.0,
            0.0, 0.0, 0.4, 0.0, 0.0, 0.4, 0.0, 0.0,
            0.9, 0.0, 0.0, 0.4, 0.0, 0.0, 0.4, 0.0,
        ],
        swing_amount: 0.3,
        default_couple: 0.5,
        fill_density_multiplier: 1.6,
        accent_mask: 0x5555_5555,
    },
    ArchetypeTable {
        name: "Polyrhythm",
        anchor: [
            1.0, 0.0, 0.0, 0.7, 0.0, 0.6, 0.0, 0.0,
            0.0, 0.0, 0.7, 0.0, 0.6, 0.0, 0.0, 0.7,
            0.9, 0.0, 0.0, 0.0, 0.0, 0.6, 0.7, 0.0,
            0.0, 0.7, 0.0, 0.0, 0.6, 0.0, 0.0, 0.7,
        ],
        shimmer: [
            0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.5, 0.0,
            0.9, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.0, 0.0,
            0.9, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0,
        ],
        swing_amount: 0.4,
        default_couple: 0.6,
        fill_density_multiplier: 1.8,
        accent_mask: 0xAAAA_AAAA,
    },
    ArchetypeTable {
        name: "Chaos",
        anchor: [
            1.0, 0.4, 0.0, 0.6, 0.0, 0.5, 0.4, 0.0,
            0.0, 0.0, 0.6, 0.0, 0.5, 0.0, 0.4, 0.5,
            0.9, 0.0, 0.4, 0.0, 0.5, 0.0, 0.6, 0.0,
            0.0, 0.5, 0.0, 0.4, 0.0, 0.6, 0.0, 0.5,
        ],
        shimmer: [
            0.0, 0.0, 0.4, 0.0, 0.5, 0.0, 0.0, 0.4,
            0.8, 0.0, 0.0, 0.4, 0.0, 0.5, 0.0, 0.0,
            0.0, 0.4, 0.0, 0.5, 0.0, 0.0, 0.4, 0.0,
            0.8, 0.0, 0.5, 0.0, 0.0, 0.0, 0.4, 0.0,
        ],
        swing_amount: 0.6,
        default_couple: 0.7,
        fill_density_multiplier: 2.0,
        accent_mask: 0xFFFF_FFFF,
    },
];

pub(crate) const IDM: [ArchetypeTable; 9] = [
    ArchetypeTable {
        name: "Minimal",
        anchor: [
            1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0,
            0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.3,
            0.7, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ],
        swing_amount: 0.3,
        default_couple: 0.4,
        fill_density_multiplier: 1.4,
        accent_mask: 0x1111_1111,
    },
    ArchetypeTable {
        name: "Steady",
        anchor: [
            0.9, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.4,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0,
            0.9, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.4,
            0.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.0, 0.0,
            0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.0,
        ],
        swing_amount: 0.4,
        default_couple: 0.5,
        fill_density_multiplier: 1.5,
        accent_mask: 0x5555_5555,
    },
    ArchetypeTable {
        name: "Displaced",
        anchor: [
            0.8, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.6, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.6,
        ],
        shimmer: [
            0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0,
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.0, 0.0,
            0.7, 0.0, 0.0, 0.0, 0.0, 0.0, 0.4, 0.0,
        ],
        swing_amount: 0.5,
        default_couple: 0.6,
        fill_density_multiplier: 1.6,
        accent_mask: 0x5555_5555,
    },
    ArchetypeTable {
        name: "Driving",
        anchor: [
            1.0, 0.0, 0.4, 0.0, 0.7, 0.0, 0.4, 0.0,
            0.8, 0.0, 0.4, 0.0, 0.7, 0.0, 0.4, 0.0,
            1.0, 0.0, 0.4, 0.0, 0.7, 0.0, 0.4, 0.0,
            0.8, 0.0, 0.4, 0.0, 0.7, 0.0, 0.5, 0.3,
        ],
        shimmer: [
            0.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.3,
            0.9, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.3,
            0.0, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.3,
            0.9, 0.0, 0.0, 0.3, 0.0, 0.0, 0.0, 0.3,
        ],
        swing_amount: 0.3,
        default_couple: 0.5,
        fill_density_multiplier: 1.5,
        accent_mask: 0x5555_5555,
    },
    ArchetypeTable {
        name: "Groovy",
        anchor: [
            1.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.4, 0.0,
            0.0, 0.3, 0.0, 0.0, 0.6, 0.0, 0.0, 0.4,
            0.9, 0.0, 0.0, 0.5, 0.0, 0.0, 0.4, 0.0,
            0.0, 0.3, 0.0, 0.0, 0.6, 0.0, 0.0, 0.4,
        ],
        shimmer: [
            0.0, 0.0, 0.3, 0.0, 0.0, 0.3, 0.0, 0.0,
            0.8, 0.0, 0.0, 0.3, 0.0, 0.0, 0.3, 0.0,
            0.0, 0.0, 0.3, 0.0, 0.0, 0.3, 0.0, 0.0,
            0.8, 0.0, 0.0, 0.3, 0.0, 0.0, 0.3, 0.0,
        ],
        swing_amount: 0.5,
        default_couple: 0.6,
        fill_density_multiplier: 1.7,
        accent_mask: 0xAAAA_AAAA,
    },
    ArchetypeTable {
        name: "Broken",
        anchor: [
            0.9, 0.0, 0.0, 0.5, 0.0, 0.0, 0.0, 0.4,
            0.0, 0.0, 0.5, 0.0, 0.0, 0.4, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.5, 0.8, 0.0, 0.0, 0.0,
            0.0, 0.4, 0.0, 0.0, 0.5, 0.0, 0.0, 0.4,
        ],
        shimmer: [
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.4, 0.0,
            0.7, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.0, 0.4,
            0.7, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.0,
        ],
        swing_amount: 0.6,
        default_couple: 0.7,
        fill_density_multiplier: 1.8,
        accent_mask: 0xAAAA_AAAA,
    },
    ArchetypeTable {
        name: "Busy",
        anchor: [
            1.0, 0.4, 0.5, 0.4, 0.7, 0.4, 0.5, 0.4,
            0.8, 0.4, 0.5, 0.4, 0.7, 0.4, 0.5, 0.4,
            1.0, 0.4, 0.5, 0.4, 0.7, 0.4, 0.5, 0.4,
            0.8, 0.4, 0.5, 0.5, 0.7, 0.5, 0.5, 0.5,
        ],
        shimmer: [
            0.0, 0.0, 0.4, 0.0, 0.5, 0.0, 0.4, 0.0,
            0.9, 0.0, 0.4, 0.0, 0.5, 0.0, 0.4, 0.0,
            0.0, 0.0, 0.4, 0.0, 0.5, 0.0, 0.4, 0.0,
            0.9, 0.0, 0.4, 0.0, 0.5, 0.0, 0.4, 0.0,
        ],
        swing_amount: 0.4,
        default_couple: 0.6,
        fill_density_multiplier: 1.7,
        accent_mask: 0xAAAA_AAAA,
    },
    ArchetypeTable {
        name: "Polyrhythm",
        anchor: [
            1.0, 0.0, 0.0, 0.6, 0.0, 0.5, 0.0, 0.0,
            0.6, 0.0, 0.0, 0.0, 0.0, 0.5, 0.6, 0.0,
            0.0, 0.0, 0.5, 0.0, 0.9, 0.0, 0.0, 0.6,
            0.0, 0.0, 0.0, 0.5, 0.0, 0.6, 0.0, 0.0,
        ],
        shimmer: [
            0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.4, 0.0,
            0.0, 0.0, 0.0, 0.4, 0.8, 0.0, 0.0, 0.0,
            0.0, 0.4, 0.0, 0.0, 0.0, 0.0, 0.4, 0.0,
            0.8, 0.0, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0,
        ],
        swing_amount: 0.5,
        default_couple: 0.7,
        fill_density_multiplier: 1.9,
        accent_mask: 0xFFFF_FFFF,
    },
    ArchetypeTable {
        name: "Chaos",
        anchor: [
            1.0, 0.5, 0.0, 0.5, 0.0, 0.0, 0.5, 0.0,
            0.0, 0.0, 0.5, 0.0, 0.6, 0.0, 0.0, 0.5,
            0.0, 0.5, 0.0, 0.0, 0.9, 0.0, 0.5, 0.0,
            0.6, 0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.6,
        ],
        shimmer: [
            0.0, 0.0, 0.4, 0.0, 0.5, 0.0, 0.0, 0.4,
            0.7, 0.0, 0.0, 0.4, 0.0, 0.5, 0.0, 0.0,
            0.0, 0.0, 0.4, 0.5, 0.0, 0.0, 0.0, 0.4,
            0.0, 0.5, 0.0, 0.0, 0.7, 0.0, 0.4, 0.0,
        ],
        swing_amount: 0.7,
        default_couple: 0.8,
        fill_density_multiplier: 2.2,
        accent_mask: 0xFFFF_FFFF,
    },
];

// DuoPulse pattern generator: CLI entry point.
//
// Runs the bar pipeline over a few phrases with fixed controls, prints each
// bar as text, and writes a MIDI preview.
//
// Usage:
//   cargo run -p duopulse_rhythm -- [output.mid] [--bars N] [--seed N]
//     [--genre G] [--energy F] [--shape F] [--drift F] [--punch F]
//     [--build F] [--field-x F] [--field-y F] [--length N] [--tempo BPM]
//     [--config PATH]
//
// Genres: techno, tribal, idm

use duopulse_rhythm::config::EngineConfig;
use duopulse_rhythm::engine::{ControlState, PatternEngine};
use duopulse_rhythm::midi::write_midi;
use duopulse_rhythm::types::Genre;
use std::path::Path;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().collect();

    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("duopulse.mid");
    let num_bars: u32 = parse_flag(&args, "--bars").unwrap_or(8);
    let seed: u32 = parse_flag(&args, "--seed").unwrap_or(duopulse_hash::DEFAULT_SEED);
    let tempo: u16 = parse_flag(&args, "--tempo").unwrap_or(128);
    let genre_name: String = parse_flag(&args, "--genre").unwrap_or_else(|| "techno".to_string());
    let config_path: Option<String> = parse_flag(&args, "--config");

    let genre = Genre::from_name(&genre_name).unwrap_or_else(|| {
        eprintln!("Unknown genre '{}'. Using techno.", genre_name);
        Genre::Techno
    });

    println!("=== DuoPulse Pattern Generator ===");
    println!("Output: {}", output_path);
    println!("Genre: {}", genre.name());
    println!("Seed: {:#010x}", seed);
    println!("Tempo: {} BPM", tempo);
    println!();

    println!("[1/3] Loading config...");
    let config = match config_path {
        Some(path) => match EngineConfig::load(Path::new(&path)) {
            Ok(c) => {
                println!("  Loaded {}.", path);
                c
            }
            Err(e) => {
                eprintln!("  Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            println!("  Using default config.");
            EngineConfig::default()
        }
    };

    let mut engine = PatternEngine::new(config, seed);
    let defaults = engine.default_controls();
    let controls = ControlState {
        energy: parse_flag(&args, "--energy").unwrap_or(defaults.energy),
        shape: parse_flag(&args, "--shape").unwrap_or(defaults.shape),
        drift: parse_flag(&args, "--drift").unwrap_or(defaults.drift),
        punch: parse_flag(&args, "--punch").unwrap_or(defaults.punch),
        build: parse_flag(&args, "--build").unwrap_or(defaults.build),
        field_x: parse_flag(&args, "--field-x").unwrap_or(defaults.field_x),
        field_y: parse_flag(&args, "--field-y").unwrap_or(defaults.field_y),
        pattern_length: parse_flag(&args, "--length").unwrap_or(defaults.pattern_length),
        genre,
        ..defaults
    };

    let phrase_bars = engine.config().phrase_length_bars.max(1);
    let field = engine.field(genre);
    println!(
        "  Field ({:.2}, {:.2}) nearest archetype: {}",
        controls.field_x,
        controls.field_y,
        field.archetype_name(
            (controls.field_x * 2.0).round() as i32,
            (controls.field_y * 2.0).round() as i32
        )
    );

    println!("[2/3] Generating {} bars ({} per phrase)...", num_bars, phrase_bars);
    let mut bars = Vec::with_capacity(num_bars as usize);
    for bar_index in 0..num_bars {
        let bar_in_phrase = bar_index % phrase_bars;
        if bar_index > 0 && bar_in_phrase == 0 {
            engine.on_phrase_boundary();
        }
        let progress = if phrase_bars > 1 {
            bar_in_phrase as f32 / (phrase_bars - 1) as f32
        } else {
            1.0
        };
        let bar = engine.generate_bar(&controls, progress);
        println!(
            "  Bar {} (phrase {}, progress {:.2}):",
            bar_index + 1,
            engine.drift_state().phrase_counter() + 1,
            progress
        );
        for line in bar.summary().lines() {
            println!("    {}", line);
        }
        bars.push(bar);
    }

    println!("[3/3] Writing MIDI to {}...", output_path);
    match write_midi(&bars, tempo, Path::new(output_path)) {
        Ok(()) => {
            let steps: usize = bars.iter().map(|b| b.pattern_length).sum();
            let duration_seconds = steps as f64 / (tempo as f64 / 60.0 * 4.0);
            println!("  Done! Duration: {:.1}s ({} bars)", duration_seconds, bars.len());
        }
        Err(e) => {
            eprintln!("  Error writing MIDI: {}", e);
            std::process::exit(1);
        }
    }

    println!();
    println!("Play with: timidity {} (or any MIDI player)", output_path);
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

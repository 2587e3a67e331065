// MIDI preview of generated bars.
//
// Renders a run of `BarPattern`s as a Standard MIDI File (SMF Format 1): a
// tempo track plus one General MIDI drum track on channel 10. Anchor plays
// the kick, shimmer the snare, aux the closed hat. Every step is a
// sixteenth note; bars of any pattern length are laid end to end. A bar's
// swing delays its off-beat sixteenths by up to half a step.
//
// Uses the `midly` crate for MIDI writing. Only the CLI calls this.

use crate::engine::BarPattern;
use crate::error::{PulseError, PulseResult};
use crate::types::Voice;
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

const TICKS_PER_SIXTEENTH: u32 = TICKS_PER_QUARTER as u32 / 4;

/// Drum hits are short; release half a step after the attack.
const GATE_TICKS: u32 = TICKS_PER_SIXTEENTH / 2;

/// Off-beat delay at full swing. Attack plus gate still ends inside the step.
const MAX_SWING_TICKS: u32 = TICKS_PER_SIXTEENTH - GATE_TICKS;

/// Channel 10 in 1-based numbering.
const DRUM_CHANNEL: u8 = 9;

pub const KICK_NOTE: u8 = 36;
pub const SNARE_NOTE: u8 = 38;
pub const CLOSED_HAT_NOTE: u8 = 42;

fn note_for(voice: Voice) -> u8 {
    match voice {
        Voice::Anchor => KICK_NOTE,
        Voice::Shimmer => SNARE_NOTE,
        Voice::Aux => CLOSED_HAT_NOTE,
    }
}

/// Map a [0, 1] velocity onto MIDI 1..=127. Any hit stays audible.
pub fn midi_velocity(velocity: f32) -> u8 {
    if velocity.is_nan() {
        return 1;
    }
    ((velocity * 127.0).round() as i32).clamp(1, 127) as u8
}

/// Delay applied to `step` for a bar with the given swing amount.
fn swing_offset(step: usize, swing: f32) -> u32 {
    if step % 2 == 0 || !swing.is_finite() {
        return 0;
    }
    (swing.clamp(0.0, 1.0) * MAX_SWING_TICKS as f32).round() as u32
}

/// Render `bars` and write them to `path`.
pub fn write_midi(bars: &[BarPattern], tempo_bpm: u16, path: &Path) -> PulseResult<()> {
    let buf = render_midi(bars, tempo_bpm)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Render `bars` to SMF bytes in memory.
pub fn render_midi(bars: &[BarPattern], tempo_bpm: u16) -> PulseResult<Vec<u8>> {
    if tempo_bpm == 0 {
        return Err(PulseError::Midi("tempo must be at least 1 BPM".to_string()));
    }
    let smf = bars_to_smf(bars, tempo_bpm);
    let mut buf = Vec::new();
    smf.write(&mut buf)
        .map_err(|e| PulseError::Midi(e.to_string()))?;
    Ok(buf)
}

fn bars_to_smf(bars: &[BarPattern], tempo_bpm: u16) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo track
    let tempo_microseconds = 60_000_000 / tempo_bpm as u32;
    smf.tracks.push(vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_microseconds))),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        },
    ]);

    let channel = u4::new(DRUM_CHANNEL);
    let mut track: Track<'static> = vec![TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(b"DuoPulse")),
    }];

    let mut last_event_tick: u32 = 0;
    let mut bar_start_tick: u32 = 0;
    let mut push = |track: &mut Track<'static>, tick: u32, message: MidiMessage| {
        track.push(TrackEvent {
            delta: u28::new(tick - last_event_tick),
            kind: TrackEventKind::Midi { channel, message },
        });
        last_event_tick = tick;
    };

    for bar in bars {
        for step in 0..bar.pattern_length {
            let step_tick = bar_start_tick
                + step as u32 * TICKS_PER_SIXTEENTH
                + swing_offset(step, bar.swing_amount);
            let sounding: Vec<Voice> = Voice::ALL
                .into_iter()
                .filter(|&v| bar.mask(v) & (1 << step) != 0)
                .collect();
            for &voice in &sounding {
                push(
                    &mut track,
                    step_tick,
                    MidiMessage::NoteOn {
                        key: u7::new(note_for(voice)),
                        vel: u7::new(midi_velocity(bar.velocity(voice, step))),
                    },
                );
            }
            for &voice in &sounding {
                push(
                    &mut track,
                    step_tick + GATE_TICKS,
                    MidiMessage::NoteOff {
                        key: u7::new(note_for(voice)),
                        vel: u7::new(0),
                    },
                );
            }
        }
        bar_start_tick += bar.pattern_length as u32 * TICKS_PER_SIXTEENTH;
    }

    track.push(TrackEvent {
        delta: u28::new(bar_start_tick.saturating_sub(last_event_tick)),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf
}

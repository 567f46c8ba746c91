// Pitch mapping - pitch index to playback ratio
// The grid spans two octaves in semitone steps around a reference pitch

use crate::sequencer::note::PitchIndex;

/// Pitch index played at the sample's original rate (ratio 1.0)
pub const CENTER_PITCH: PitchIndex = 12;

/// Default number of pitch rows: two octaves plus the top octave note
pub const DEFAULT_PITCH_RANGE: u16 = 25;

const SEMITONES_PER_OCTAVE: f64 = 12.0;

/// Playback rate multiplier for a pitch index: `2^((pitch - 12) / 12)`
///
/// Index 12 maps to 1.0, index 0 to 0.5 and index 24 to 2.0.
pub fn pitch_ratio(pitch: PitchIndex) -> f64 {
    let semitones = f64::from(pitch) - f64::from(CENTER_PITCH);
    (semitones / SEMITONES_PER_OCTAVE).exp2()
}

/// Signed semitone offset from the reference pitch
pub fn semitone_offset(pitch: PitchIndex) -> i16 {
    i16::from(pitch) - i16::from(CENTER_PITCH)
}

/// Row label for a pitch index: `0` for the reference, `+n` / `-n` otherwise
pub fn pitch_label(pitch: PitchIndex) -> String {
    match semitone_offset(pitch) {
        0 => "0".to_string(),
        offset => format!("{:+}", offset),
    }
}

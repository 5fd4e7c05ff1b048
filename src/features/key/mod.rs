//! Key inference and scale quantization modules
//!
//! Pick a scale root from the earliest confident pitch estimate, then snap
//! arbitrary pitches to the nearest note of the root's major scale.

pub mod inference;
pub mod quantize;

pub use inference::infer_root;
pub use quantize::nearest_in_scale;

/// Convert a frequency in Hz to a (fractional) MIDI note number
///
/// `midi = 69 + 12·log2(f / 440)`
pub fn hz_to_midi(frequency: f32) -> f32 {
    69.0 + 12.0 * (frequency / 440.0).log2()
}

/// Convert a MIDI note number to a frequency in Hz
pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * 2.0f32.powf((midi - 69.0) / 12.0)
}

/// Reduce a MIDI note number to its pitch class (0 = C .. 11 = B)
pub fn pitch_class(midi: i32) -> u8 {
    midi.rem_euclid(12) as u8
}

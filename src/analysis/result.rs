//! Correction result types

use serde::{Deserialize, Serialize};

/// Note names indexed by pitch class (0 = C .. 11 = B)
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A major scale anchored at a root pitch class
///
/// Derived once per correction pass from the first confident pitch estimate
/// (or a caller-supplied override) and shared read-only by every downstream
/// frame in that pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    /// Root pitch class (0 = C, 1 = C#, ..., 11 = B)
    pub root_pitch_class: u8,
}

impl Scale {
    /// Major scale intervals in semitones relative to the root
    pub const MAJOR_INTERVALS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

    /// Create a major scale on the given root pitch class (reduced mod 12)
    pub fn major(root_pitch_class: u8) -> Self {
        Self {
            root_pitch_class: root_pitch_class % 12,
        }
    }

    /// Root note name in musical notation (e.g., "A", "F#")
    ///
    /// # Example
    ///
    /// ```
    /// use retune_dsp::Scale;
    ///
    /// assert_eq!(Scale::major(9).root_name(), "A");
    /// assert_eq!(Scale::major(6).root_name(), "F#");
    /// ```
    pub fn root_name(&self) -> &'static str {
        NOTE_NAMES[self.root_pitch_class as usize % 12]
    }

    /// True if the given MIDI note belongs to this scale
    pub fn contains_midi(&self, midi: i32) -> bool {
        let interval = (midi - self.root_pitch_class as i32).rem_euclid(12) as u8;
        Self::MAJOR_INTERVALS.contains(&interval)
    }
}

/// Per-frame diagnostic record
///
/// Produced for every frame of the pass, voiced or not. Display/logging only,
/// never consulted for control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDiagnostic {
    /// Frame start offset in samples
    pub start_offset: usize,

    /// Estimated fundamental frequency in Hz (`None` when unvoiced)
    pub frequency_hz: Option<f32>,

    /// Estimate confidence (0.0-1.0)
    pub confidence: f32,

    /// Pitch-shift ratio applied to this frame (1.0 when unvoiced)
    pub shift_ratio: f32,

    /// Quantized target MIDI note (`None` when unvoiced)
    pub target_midi: Option<i32>,

    /// True if the frame passed the voicing gate with an in-bounds estimate
    pub voiced: bool,
}

/// Per-pass diagnostic record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassDiagnostics {
    /// Scale used for quantization
    pub scale: Scale,

    /// Root note name (e.g., "A")
    pub root_name: String,

    /// One diagnostic per frame, in temporal order
    pub frames: Vec<FrameDiagnostic>,

    /// Number of voiced frames
    pub voiced_frames: usize,

    /// Total number of frames
    pub total_frames: usize,

    /// Input duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Engine version
    pub engine_version: String,
}

/// Complete correction result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionResult {
    /// Corrected sample buffer, same length and sample rate as the input
    pub output: Vec<f32>,

    /// Diagnostics for the pass
    pub diagnostics: PassDiagnostics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_names() {
        assert_eq!(Scale::major(0).root_name(), "C");
        assert_eq!(Scale::major(1).root_name(), "C#");
        assert_eq!(Scale::major(9).root_name(), "A");
        assert_eq!(Scale::major(11).root_name(), "B");
    }

    #[test]
    fn test_major_reduces_mod_12() {
        assert_eq!(Scale::major(12).root_pitch_class, 0);
        assert_eq!(Scale::major(21).root_pitch_class, 9);
    }

    #[test]
    fn test_c_major_membership() {
        let scale = Scale::major(0);
        // C D E F G A B in scale, chromatic neighbors out
        for midi in [60, 62, 64, 65, 67, 69, 71, 72] {
            assert!(scale.contains_midi(midi), "MIDI {} should be in C major", midi);
        }
        for midi in [61, 63, 66, 68, 70] {
            assert!(!scale.contains_midi(midi), "MIDI {} should not be in C major", midi);
        }
    }

    #[test]
    fn test_a_major_membership() {
        let scale = Scale::major(9);
        // A3 = 57 and B3 = 59 are in A major, A#3 = 58 is not
        assert!(scale.contains_midi(57));
        assert!(scale.contains_midi(59));
        assert!(!scale.contains_midi(58));
    }

    #[test]
    fn test_membership_for_negative_midi() {
        let scale = Scale::major(0);
        // -12 and 0 share pitch class C
        assert!(scale.contains_midi(-12));
        assert!(!scale.contains_midi(-11));
    }
}

//! Scale quantization
//!
//! Map an arbitrary (fractional) MIDI pitch to the nearest note of a major
//! scale. The search widens outward from the rounded target, testing the
//! upward candidate before the downward one at each distance, so equidistant
//! in-scale notes deterministically resolve upward.

use crate::analysis::result::Scale;

/// Snap a fractional MIDI pitch to the nearest in-scale MIDI note
///
/// Rounds `target_midi` to the nearest integer `center`, then searches
/// outward by increasing distance `d = 0, 1, ..., 12`, testing `center + d`
/// then `center - d`. A full octave always contains an in-scale note, so the
/// search terminates within the bound.
///
/// # Example
///
/// ```
/// use retune_dsp::features::key::nearest_in_scale;
/// use retune_dsp::Scale;
///
/// let c_major = Scale::major(0);
/// // 6.5 is midway between F# (out of scale) and G (in scale): G wins
/// assert_eq!(nearest_in_scale(6.5, &c_major), 7);
/// ```
pub fn nearest_in_scale(target_midi: f32, scale: &Scale) -> i32 {
    let center = target_midi.round() as i32;

    for d in 0..=12 {
        let up = center + d;
        if scale.contains_midi(up) {
            return up;
        }
        if d > 0 {
            let down = center - d;
            if scale.contains_midi(down) {
                return down;
            }
        }
    }

    // Unreachable: every octave contains in-scale notes
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_scale_values_are_fixed_points() {
        let scale = Scale::major(0);
        for octave in -2..8 {
            for interval in Scale::MAJOR_INTERVALS {
                let midi = octave * 12 + interval as i32;
                assert_eq!(
                    nearest_in_scale(midi as f32, &scale),
                    midi,
                    "In-scale MIDI {} must quantize to itself",
                    midi
                );
            }
        }
    }

    #[test]
    fn test_out_of_scale_snaps_to_neighbor() {
        let scale = Scale::major(0);
        // C#4 (61) resolves upward to D4 (62): both neighbors are in scale
        // and equidistant, upward wins
        assert_eq!(nearest_in_scale(61.0, &scale), 62);
        // F#4 (66) resolves upward to G4 (67)
        assert_eq!(nearest_in_scale(66.0, &scale), 67);
    }

    #[test]
    fn test_tie_break_resolves_upward() {
        let scale = Scale::major(0);
        // 6.5 sits between F# (6, out of scale) and G (7, in scale)
        assert_eq!(nearest_in_scale(6.5, &scale), 7);
    }

    #[test]
    fn test_boundedness() {
        let scale = Scale::major(4);
        let mut x = -30.0f32;
        while x < 130.0 {
            let snapped = nearest_in_scale(x, &scale);
            assert!(
                (snapped as f32 - x).abs() <= 12.0,
                "Quantization moved {:.2} by more than an octave to {}",
                x,
                snapped
            );
            assert!(scale.contains_midi(snapped));
            x += 0.37;
        }
    }

    #[test]
    fn test_a_major_around_a3() {
        let scale = Scale::major(9);
        // A#3 (58) is out of A major; neighbors A3 (57) and B3 (59) are in.
        // Equidistant, so upward wins
        assert_eq!(nearest_in_scale(58.0, &scale), 59);
        // Slightly below the midpoint resolves down to A3
        assert_eq!(nearest_in_scale(57.4, &scale), 57);
        // Slightly above resolves up to B3
        assert_eq!(nearest_in_scale(58.6, &scale), 59);
    }

    #[test]
    fn test_fractional_rounding_feeds_search() {
        let scale = Scale::major(0);
        // 60.4 rounds to 60 (C, in scale)
        assert_eq!(nearest_in_scale(60.4, &scale), 60);
        // 60.6 rounds to 61 (C#, out), then resolves upward to 62 (D)
        assert_eq!(nearest_in_scale(60.6, &scale), 62);
    }
}

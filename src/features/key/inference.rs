//! Scale root inference
//!
//! The root is seeded by the earliest estimate the tracker actually trusts,
//! on the assumption that a monophonic performance opens on or near its
//! tonal center. When nothing qualifies the pass still completes: a fixed
//! fallback root keeps correction a no-op-safe operation, and callers that
//! need strictness check the voiced-frame count in the diagnostics instead.

use super::{hz_to_midi, pitch_class};
use crate::features::pitch::PitchEstimate;

/// Fallback root when no estimate meets the confidence threshold: A (pitch class 9)
pub const FALLBACK_ROOT: u8 = 9;

/// Infer the scale root pitch class from a sequence of estimates
///
/// Scans in temporal order and returns the pitch class of the first voiced
/// estimate whose confidence meets `confidence_threshold`.
///
/// # Arguments
///
/// * `estimates` - Per-frame estimates in temporal order
/// * `confidence_threshold` - Minimum confidence to seed the root (0.0-1.0)
pub fn infer_root(estimates: &[PitchEstimate], confidence_threshold: f32) -> u8 {
    for estimate in estimates {
        if let Some(frequency) = estimate.frequency_hz {
            if estimate.confidence >= confidence_threshold {
                let midi = hz_to_midi(frequency).round() as i32;
                let root = pitch_class(midi);
                log::debug!(
                    "Root inferred from {:.1} Hz (confidence {:.2}): pitch class {}",
                    frequency,
                    estimate.confidence,
                    root
                );
                return root;
            }
        }
    }

    log::warn!(
        "No estimate met confidence threshold {:.2}, falling back to root A",
        confidence_threshold
    );
    FALLBACK_ROOT
}

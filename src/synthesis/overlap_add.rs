//! Overlap-add reconstruction
//!
//! Drives the injected pitch-shift primitive once per plan entry, in
//! temporal order, and stitches the shifted frames into one continuous
//! buffer. Each frame's leading overlap is crossfaded against the previous
//! frame's tail; the remainder is written directly, since frames are
//! non-overlapping beyond the crossfade region by construction of
//! `hop = chunk_length - overlap_length`. A soft limiter caps constructive
//! overlap without touching silence.
//!
//! Reconstruction is strictly sequential: frame *k*'s crossfade reads frame
//! *k-1*'s completed output, so this stage cannot be reordered.

use serde::{Deserialize, Serialize};

use super::plan::ChunkPlanEntry;
use super::shifter::PitchShifter;
use crate::error::CorrectionError;
use crate::preprocessing::framing::slice_frame;

/// Soft limiter ceiling as a linear amplitude
const LIMITER_CEILING: f32 = 0.98;

/// Crossfade curve applied over chunk overlaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrossfadeCurve {
    /// Linear ramp (constant-gain)
    #[default]
    Linear,
    /// Sine/cosine ramp (constant-power)
    EqualPower,
}

impl CrossfadeCurve {
    /// Fade-in weight at normalized position `t` in [0, 1]
    ///
    /// The outgoing side uses `fade_in(1 - t)`, which for both curves is the
    /// complementary weight.
    pub fn fade_in(&self, t: f32) -> f32 {
        match self {
            CrossfadeCurve::Linear => t,
            CrossfadeCurve::EqualPower => (t * std::f32::consts::FRAC_PI_2).sin(),
        }
    }
}

/// Reconstruct the corrected buffer from a plan
///
/// For each entry in order: extract the (zero-padded) frame, invoke the
/// shift primitive, coerce its output back to the nominal frame length, and
/// write it into the accumulator at the entry's start offset — crossfading
/// the first `overlap_length` samples against the previous frame's tail.
/// Writes past the end of the input are discarded, so the output length
/// always equals the input length. The soft limiter
/// `y = x / (1 + |x| / 0.98)` is applied to the finished buffer.
///
/// # Errors
///
/// Returns `CorrectionError::ShiftPrimitive` when the primitive fails or
/// returns an empty buffer for a non-empty frame; the whole pass aborts with
/// no partial output.
pub fn reconstruct(
    samples: &[f32],
    entries: &[ChunkPlanEntry],
    shifter: &dyn PitchShifter,
    crossfade: CrossfadeCurve,
) -> Result<Vec<f32>, CorrectionError> {
    let mut output = vec![0.0f32; samples.len()];

    for (index, entry) in entries.iter().enumerate() {
        let frame = slice_frame(samples, entry.start_offset, entry.length)?;
        let shifted = shifter.shift(&frame, entry.shift_ratio)?;
        let shifted = coerce_length(shifted, entry.length)?;

        for n in 0..entry.length {
            let position = entry.start_offset + n;
            if position >= output.len() {
                break;
            }

            if index > 0 && n < entry.overlap_length {
                let t = if entry.overlap_length > 1 {
                    n as f32 / (entry.overlap_length - 1) as f32
                } else {
                    1.0
                };
                let previous = output[position];
                output[position] =
                    previous * crossfade.fade_in(1.0 - t) + shifted[n] * crossfade.fade_in(t);
            } else {
                output[position] = shifted[n];
            }
        }
    }

    soft_limit(&mut output);
    Ok(output)
}

/// Coerce a shifted frame back to the nominal length
///
/// Truncates or zero-pads small deviations; an empty result for a non-empty
/// nominal length is unusable and aborts the pass.
fn coerce_length(mut shifted: Vec<f32>, length: usize) -> Result<Vec<f32>, CorrectionError> {
    if shifted.len() == length {
        return Ok(shifted);
    }

    if shifted.is_empty() {
        return Err(CorrectionError::ShiftPrimitive(format!(
            "Primitive returned an empty buffer for a {}-sample frame",
            length
        )));
    }

    log::warn!(
        "Coercing shifted frame from {} to {} samples",
        shifted.len(),
        length
    );
    shifted.resize(length, 0.0);
    Ok(shifted)
}

/// Soft limiter: `y = x / (1 + |x| / ceiling)`
///
/// Asymptotically bounds the output below the ceiling; zero stays exactly
/// zero, so silent passages are untouched.
fn soft_limit(buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample /= 1.0 + sample.abs() / LIMITER_CEILING;
    }
}

//! Pitch-shift primitive interface
//!
//! The time-domain shift synthesis is an external collaborator: the engine
//! only requires a duration-preserving primitive that can shift a
//! fixed-length frame by a ratio. It is injected once at setup time as a
//! capability object; resolution failures belong to the caller's setup
//! phase, never to a running pass.
//!
//! Two reference implementations live here for tests and offline use. A
//! production shifter (PSOLA, phase vocoder, granular) plugs in through the
//! same trait.

use crate::error::CorrectionError;

/// A duration-preserving pitch-shift primitive
///
/// `ratio > 1` raises pitch, `ratio < 1` lowers it, `1.0` is a pass-through.
/// Implementations should return a buffer of the same nominal length as the
/// input frame; small deviations are coerced by the reconstructor, but an
/// empty or wildly wrong result aborts the pass.
pub trait PitchShifter {
    /// Shift the pitch of `frame` by `ratio`, preserving its duration
    ///
    /// # Errors
    ///
    /// Returns `CorrectionError::ShiftPrimitive` on any internal failure;
    /// the engine aborts the pass without partial output.
    fn shift(&self, frame: &[f32], ratio: f32) -> Result<Vec<f32>, CorrectionError>;
}

/// Identity shifter: returns the frame unchanged regardless of ratio
///
/// Useful as a baseline and for exercising the reconstruction path in
/// isolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughShifter;

impl PitchShifter for PassthroughShifter {
    fn shift(&self, frame: &[f32], _ratio: f32) -> Result<Vec<f32>, CorrectionError> {
        Ok(frame.to_vec())
    }
}

/// Naive resampling shifter: linear-interpolation read at `ratio` speed,
/// wrapping cyclically over the frame to preserve duration
///
/// Transposes all content of the frame (not just the fundamental) and
/// introduces a splice where the read position wraps; adequate for tests and
/// offline experiments, not a production voice shifter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResampleShifter;

impl PitchShifter for ResampleShifter {
    fn shift(&self, frame: &[f32], ratio: f32) -> Result<Vec<f32>, CorrectionError> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(CorrectionError::ShiftPrimitive(format!(
                "Shift ratio must be positive and finite, got {}",
                ratio
            )));
        }

        let n = frame.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        if n == 1 || ratio == 1.0 {
            return Ok(frame.to_vec());
        }

        let mut output = Vec::with_capacity(n);
        for i in 0..n {
            let position = i as f64 * ratio as f64;
            let index = position.floor() as usize;
            let frac = (position - index as f64) as f32;

            let s0 = frame[index % n];
            let s1 = frame[(index + 1) % n];
            output.push(s0 + frac * (s1 - s0));
        }

        Ok(output)
    }
}

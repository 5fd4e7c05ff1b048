//! Pitch estimation modules
//!
//! Estimate the fundamental frequency of a single frame with a confidence
//! score, using one of two interchangeable lag-search strategies:
//! - Autocorrelation (robust, FFT-accelerated)
//! - Average magnitude difference (lower cost)
//!
//! Both strategies share the same contract: DC removal, Hann windowing, an
//! RMS voicing gate, a bounded lag search with sub-sample parabolic
//! refinement, and a final frequency-bounds check. The estimator never
//! returns NaN or infinite frequencies; degenerate numerics fall back to
//! unrefined or unvoiced results.

pub mod amdf;
pub mod autocorrelation;

use serde::{Deserialize, Serialize};

use crate::preprocessing::windowing::{hann_window, remove_dc, rms};

/// Fixed voicing threshold on windowed-frame RMS, as a fraction of full scale
pub const VOICING_RMS_THRESHOLD: f32 = 0.01;

/// A single-frame pitch estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchEstimate {
    /// Estimated fundamental frequency in Hz (`None` = unvoiced or undetermined)
    pub frequency_hz: Option<f32>,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,
}

impl PitchEstimate {
    /// An unvoiced estimate with zero confidence
    pub fn unvoiced() -> Self {
        Self {
            frequency_hz: None,
            confidence: 0.0,
        }
    }

    /// True if a frequency was determined
    pub fn is_voiced(&self) -> bool {
        self.frequency_hz.is_some()
    }
}

/// Pitch estimation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EstimatorMethod {
    /// Unnormalized autocorrelation with an arg-max lag search (robust)
    #[default]
    Autocorrelation,
    /// Average magnitude difference with an arg-min lag search (lower cost)
    Amdf,
}

/// Estimate the fundamental frequency of one frame
///
/// Dispatches to the selected strategy. Both strategies expose the identical
/// contract described in the module documentation.
///
/// # Arguments
///
/// * `frame` - One fixed-length frame of samples
/// * `sample_rate` - Sample rate in Hz
/// * `min_frequency` - Lower frequency bound in Hz
/// * `max_frequency` - Upper frequency bound in Hz
/// * `method` - Lag-search strategy to use
pub fn estimate(
    frame: &[f32],
    sample_rate: u32,
    min_frequency: f32,
    max_frequency: f32,
    method: EstimatorMethod,
) -> PitchEstimate {
    match method {
        EstimatorMethod::Autocorrelation => {
            autocorrelation::estimate(frame, sample_rate, min_frequency, max_frequency)
        }
        EstimatorMethod::Amdf => amdf::estimate(frame, sample_rate, min_frequency, max_frequency),
    }
}

/// Remove DC and apply a Hann window; returns the windowed frame and its RMS
pub(crate) fn prepare_frame(frame: &[f32]) -> (Vec<f32>, f32) {
    let mut windowed = frame.to_vec();
    remove_dc(&mut windowed);

    let window = hann_window(windowed.len());
    for (sample, w) in windowed.iter_mut().zip(window.iter()) {
        *sample *= w;
    }

    let energy = rms(&windowed);
    (windowed, energy)
}

/// Convert frequency bounds to an inclusive lag search range, clipped to
/// `[1, n - 2]` so parabolic refinement always has both neighbors
///
/// Returns `None` when the frame is too short to hold the requested range.
pub(crate) fn lag_range(
    sample_rate: u32,
    min_frequency: f32,
    max_frequency: f32,
    n: usize,
) -> Option<(usize, usize)> {
    if n < 3 || min_frequency <= 0.0 || max_frequency <= 0.0 {
        return None;
    }

    let min_lag = ((sample_rate as f32 / max_frequency).floor() as usize).max(1);
    let max_lag = ((sample_rate as f32 / min_frequency).floor() as usize).min(n - 2);

    if min_lag > max_lag {
        return None;
    }

    Some((min_lag, max_lag))
}

/// Sub-sample peak offset by parabolic interpolation over three points
///
/// `shift = 0.5 * (y0 - y2) / (y0 - 2*y1 + y2)`, or 0 when the denominator
/// vanishes. The same vertex formula locates minima as well as maxima.
pub(crate) fn parabolic_shift(y0: f32, y1: f32, y2: f32) -> f32 {
    let denom = y0 - 2.0 * y1 + y2;
    if denom.abs() < f32::EPSILON {
        return 0.0;
    }

    0.5 * (y0 - y2) / denom
}

//! Autocorrelation pitch estimation
//!
//! Finds the fundamental period of a frame by searching for the lag that
//! maximizes the unnormalized autocorrelation of the windowed signal.
//!
//! # Algorithm
//!
//! 1. Remove DC offset and apply a Hann window
//! 2. Gate on windowed RMS (below threshold = unvoiced, confidence 0)
//! 3. Convert the frequency bounds to a lag range:
//!    `min_lag = floor(sample_rate / max_frequency)`,
//!    `max_lag = floor(sample_rate / min_frequency)`, clipped to `[1, N-2]`
//! 4. Compute `ac(lag) = Σ w[i]·w[i+lag]` for every lag and select the
//!    arg-max in range. The ACF is computed FFT-accelerated as
//!    `ACF = IFFT(|FFT(w)|²)` with zero-padding, which equals the
//!    time-domain sum over the valid overlap; complexity O(n log n)
//! 5. Refine the winning lag with parabolic interpolation over its
//!    neighbors
//! 6. `frequency = sample_rate / refined_lag`,
//!    `confidence = ac(lag) / ac(0)` clamped to [0, 1]
//! 7. A frequency outside the bounds is demoted to unvoiced at one tenth of
//!    the computed confidence (unreliable, kept for diagnostics)
//!
//! Larger frames give more stable low-frequency estimates at the cost of
//! temporal resolution; the chunk duration bound keeps that trade-off inside
//! a usable range.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use super::{PitchEstimate, VOICING_RMS_THRESHOLD};

const EPSILON: f32 = 1e-10;

/// Estimate the fundamental frequency of one frame via autocorrelation
///
/// # Arguments
///
/// * `frame` - One fixed-length frame of samples
/// * `sample_rate` - Sample rate in Hz
/// * `min_frequency` - Lower frequency bound in Hz
/// * `max_frequency` - Upper frequency bound in Hz
///
/// # Returns
///
/// A [`PitchEstimate`]; unvoiced with confidence 0 when the frame fails the
/// voicing gate or the lag range is degenerate.
pub fn estimate(
    frame: &[f32],
    sample_rate: u32,
    min_frequency: f32,
    max_frequency: f32,
) -> PitchEstimate {
    let n = frame.len();
    if n < 3 || sample_rate == 0 {
        return PitchEstimate::unvoiced();
    }

    let (windowed, energy) = super::prepare_frame(frame);
    if energy < VOICING_RMS_THRESHOLD {
        return PitchEstimate::unvoiced();
    }

    let Some((min_lag, max_lag)) = super::lag_range(sample_rate, min_frequency, max_frequency, n)
    else {
        return PitchEstimate::unvoiced();
    };

    let acf = compute_autocorrelation_fft(&windowed);

    let total_energy = acf[0];
    if total_energy < EPSILON {
        return PitchEstimate::unvoiced();
    }

    let mut best_lag = min_lag;
    let mut best_value = f32::MIN;
    for (lag, &value) in acf.iter().enumerate().take(max_lag + 1).skip(min_lag) {
        if value > best_value {
            best_value = value;
            best_lag = lag;
        }
    }

    let confidence = (best_value / total_energy).clamp(0.0, 1.0);

    // best_lag is in [1, n-2], so both neighbors exist
    let shift = super::parabolic_shift(acf[best_lag - 1], acf[best_lag], acf[best_lag + 1]);
    let refined_lag = best_lag as f32 + shift;
    let refined_lag = if refined_lag.is_finite() && refined_lag > 0.0 {
        refined_lag
    } else {
        best_lag as f32
    };

    let frequency = sample_rate as f32 / refined_lag;
    if frequency < min_frequency || frequency > max_frequency {
        return PitchEstimate {
            frequency_hz: None,
            confidence: 0.1 * confidence,
        };
    }

    PitchEstimate {
        frequency_hz: Some(frequency),
        confidence,
    }
}

/// Compute the unnormalized linear autocorrelation using FFT acceleration
///
/// Uses the identity `ACF = IFFT(|FFT(signal)|²)` with the signal zero-padded
/// to at least twice its length, so `acf[lag]` equals the time-domain
/// `Σ signal[i]·signal[i+lag]` over the valid overlap.
fn compute_autocorrelation_fft(signal: &[f32]) -> Vec<f32> {
    let n = signal.len();

    // FFT size: next power of 2 >= 2*n (zero-padding keeps the correlation linear)
    let fft_size = (2 * n).next_power_of_two();

    let mut fft_input: Vec<Complex<f32>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    fft_input.resize(fft_size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut fft_input);

    for x in &mut fft_input {
        *x = *x * x.conj();
    }

    let ifft = planner.plan_fft_inverse(fft_size);
    ifft.process(&mut fft_input);

    let scale = 1.0 / (fft_size as f32);
    fft_input[..n].iter().map(|x| x.re * scale).collect()
}

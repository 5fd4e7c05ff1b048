//! Windowing and energy measurement utilities

use std::f32::consts::PI;

/// Generate a Hann window: `w[i] = 0.5 * (1 - cos(2π i / (N - 1)))`
///
/// A window of length 0 or 1 degenerates to all-ones.
pub fn hann_window(length: usize) -> Vec<f32> {
    if length < 2 {
        return vec![1.0; length];
    }

    (0..length)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / (length - 1) as f32).cos()))
        .collect()
}

/// Subtract the mean from a frame in place (DC offset removal)
pub fn remove_dc(frame: &mut [f32]) {
    if frame.is_empty() {
        return;
    }

    let mean = frame.iter().copied().sum::<f32>() / frame.len() as f32;
    for sample in frame.iter_mut() {
        *sample -= mean;
    }
}

/// Root-mean-square amplitude of a frame (0.0 for an empty frame)
pub fn rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }

    let sum_sq = frame.iter().map(|&x| x * x).sum::<f32>();
    (sum_sq / frame.len() as f32).sqrt()
}

/// Convert a dB value to a linear amplitude: `10^(db / 20)`
pub fn db_to_linear(db: f32) -> f32 {
    10.0f32.powf(db / 20.0)
}

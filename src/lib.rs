//! # Retune DSP
//!
//! A chunk-based pitch correction engine for monophonic audio: tracks the
//! fundamental frequency of successive short frames, infers a diatonic key
//! from the earliest confident pitch, snaps each frame to the nearest note
//! of that key's major scale, and resynthesizes a continuous signal by
//! overlap-adding per-frame pitch-shifted audio with crossfades at chunk
//! boundaries.
//!
//! ## Features
//!
//! - **Pitch tracking**: autocorrelation (FFT-accelerated) or AMDF lag
//!   search with sub-sample parabolic refinement and confidence scoring
//! - **Key inference**: scale root seeded by the first confident estimate,
//!   with a never-fail fallback
//! - **Scale quantization**: nearest-note snapping with a deterministic
//!   upward tie-break
//! - **Overlap-add resynthesis**: pluggable crossfade curve and a soft
//!   limiter, driving an injected pitch-shift primitive
//!
//! ## Quick Start
//!
//! ```no_run
//! use retune_dsp::{process, CorrectionConfig, ResampleShifter};
//!
//! // Mono samples, normalized to [-1.0, 1.0]
//! let samples: Vec<f32> = vec![]; // Your audio data
//! let sample_rate = 48_000;
//!
//! let result = process(&samples, sample_rate, CorrectionConfig::default(), &ResampleShifter)?;
//!
//! println!(
//!     "Root: {} ({} of {} frames voiced)",
//!     result.diagnostics.root_name,
//!     result.diagnostics.voiced_frames,
//!     result.diagnostics.total_frames
//! );
//! # Ok::<(), retune_dsp::CorrectionError>(())
//! ```
//!
//! ## Architecture
//!
//! The correction pipeline follows this flow:
//!
//! ```text
//! Samples → Framing → Pitch Estimation (+ Key Inference) → Chunk Plan
//!         → Overlap-Add Reconstruction (injected shifter) → Output + Diagnostics
//! ```
//!
//! The pass is synchronous and single-threaded: reconstruction is a
//! sequential dependency chain (each crossfade reads the previous frame's
//! completed output). Callers wanting async or threaded operation layer it
//! on top of [`process`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod preprocessing;
pub mod synthesis;

// Re-export main types
pub use analysis::result::{CorrectionResult, FrameDiagnostic, PassDiagnostics, Scale};
pub use config::CorrectionConfig;
pub use error::CorrectionError;
pub use features::pitch::{EstimatorMethod, PitchEstimate};
pub use synthesis::overlap_add::CrossfadeCurve;
pub use synthesis::shifter::{PassthroughShifter, PitchShifter, ResampleShifter};

/// Run one complete correction pass
///
/// Validates the configuration, plans the correction (pitch estimates, key
/// inference, per-frame shift ratios), reconstructs the output through the
/// injected shift primitive, and assembles per-pass diagnostics.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `config` - Correction configuration parameters
/// * `shifter` - Duration-preserving pitch-shift primitive
///
/// # Returns
///
/// `CorrectionResult` with the corrected buffer (same length as the input)
/// and the pass diagnostics. An input where every frame fails the voicing
/// gate degrades to pass-through audio with `voiced_frames == 0` in the
/// diagnostics rather than an error.
///
/// # Errors
///
/// Returns `CorrectionError` on an out-of-bounds configuration, a zero
/// sample rate, or a shift primitive failure (which aborts the pass with no
/// partial output).
///
/// # Example
///
/// ```no_run
/// use retune_dsp::{process, CorrectionConfig, PassthroughShifter};
///
/// let samples = vec![0.0f32; 48_000]; // 1 second of silence
/// let result = process(&samples, 48_000, CorrectionConfig::default(), &PassthroughShifter)?;
/// assert_eq!(result.output.len(), samples.len());
/// # Ok::<(), retune_dsp::CorrectionError>(())
/// ```
pub fn process(
    samples: &[f32],
    sample_rate: u32,
    config: CorrectionConfig,
    shifter: &dyn PitchShifter,
) -> Result<CorrectionResult, CorrectionError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!(
        "Starting correction pass: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let plan = synthesis::plan::build_plan(samples, sample_rate, &config)?;
    let output = synthesis::overlap_add::reconstruct(samples, &plan.entries, shifter, config.crossfade)?;

    let voiced_frames = plan.frames.iter().filter(|f| f.voiced).count();
    let total_frames = plan.frames.len();
    if total_frames > 0 && voiced_frames == 0 {
        log::warn!("No voiced frames: output is the input passed through unchanged");
    }

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
    log::debug!(
        "Pass complete: root {} ({}), {}/{} frames voiced, {:.2} ms",
        plan.scale.root_pitch_class,
        plan.scale.root_name(),
        voiced_frames,
        total_frames,
        processing_time_ms
    );

    Ok(CorrectionResult {
        output,
        diagnostics: PassDiagnostics {
            scale: plan.scale,
            root_name: plan.scale.root_name().to_string(),
            frames: plan.frames,
            voiced_frames,
            total_frames,
            duration_seconds: samples.len() as f32 / sample_rate as f32,
            sample_rate,
            processing_time_ms,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}

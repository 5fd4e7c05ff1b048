//! Chunk planning
//!
//! Combine framing, pitch estimation, key inference, and scale quantization
//! into one plan entry per frame: a voiced flag and a target pitch-shift
//! ratio, consumed exactly once by the reconstructor.
//!
//! Frame boundaries are uniformly spaced at the hop and never adapt to zero
//! crossings or pitch periods; on sustained voiced passages this is a known
//! source of boundary artifacts that the crossfade only softens.

use crate::analysis::result::{FrameDiagnostic, Scale};
use crate::config::CorrectionConfig;
use crate::error::CorrectionError;
use crate::features::key::{hz_to_midi, infer_root, midi_to_hz, nearest_in_scale};
use crate::features::pitch::{self, PitchEstimate};
use crate::preprocessing::framing::slice_frame;
use crate::preprocessing::windowing::rms;

/// One frame's worth of correction plan
///
/// Invariant: `shift_ratio == 1.0` whenever `voiced == false`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkPlanEntry {
    /// Frame start offset in samples
    pub start_offset: usize,

    /// Frame length in samples (constant across the plan)
    pub length: usize,

    /// Overlap with the previous frame in samples
    pub overlap_length: usize,

    /// True if the frame passed the voicing gate with an in-bounds estimate
    pub voiced: bool,

    /// Target pitch-shift ratio (1.0 when unvoiced)
    pub shift_ratio: f32,
}

/// Complete plan for one correction pass
#[derive(Debug, Clone)]
pub struct ChunkPlan {
    /// One entry per frame, in temporal order
    pub entries: Vec<ChunkPlanEntry>,

    /// Scale used for quantization
    pub scale: Scale,

    /// Per-frame diagnostics mirroring `entries`
    pub frames: Vec<FrameDiagnostic>,
}

/// Build the correction plan for a buffer
///
/// Runs the pitch estimator once per hop position, infers the scale root
/// from the earliest confident estimate (unless the configuration pins one),
/// and assigns every frame a voiced flag and shift ratio:
/// `shift_ratio = target_frequency / estimated_frequency` where the target
/// is the estimate snapped to the nearest in-scale note. Unvoiced or
/// out-of-range frames pass through at ratio 1.0.
///
/// # Errors
///
/// Returns `CorrectionError::InvalidConfig` if the configuration violates
/// its bounds, `CorrectionError::InvalidInput` for a zero sample rate.
pub fn build_plan(
    samples: &[f32],
    sample_rate: u32,
    config: &CorrectionConfig,
) -> Result<ChunkPlan, CorrectionError> {
    config.validate()?;
    if sample_rate == 0 {
        return Err(CorrectionError::InvalidInput(
            "Invalid sample rate: 0".to_string(),
        ));
    }

    let chunk_length = config.chunk_samples(sample_rate);
    let overlap_length = config.overlap_samples(sample_rate).min(chunk_length / 2);
    let hop = chunk_length - overlap_length;
    let gate = config.gate_linear();

    log::debug!(
        "Planning: chunk={} overlap={} hop={} samples, gate={:.4} linear",
        chunk_length,
        overlap_length,
        hop,
        gate
    );

    // One estimation pass per hop position; the same estimates seed key
    // inference and the per-frame voicing decisions below
    let mut starts = Vec::new();
    let mut estimates: Vec<PitchEstimate> = Vec::new();
    let mut start = 0usize;
    while start < samples.len() {
        let frame = slice_frame(samples, start, chunk_length)?;
        estimates.push(pitch::estimate(
            &frame,
            sample_rate,
            config.min_frequency,
            config.max_frequency,
            config.estimator,
        ));
        starts.push(start);
        start += hop;
    }

    let root = match config.root_override {
        Some(root) => {
            log::debug!("Scale root pinned by configuration: pitch class {}", root);
            root % 12
        }
        None => infer_root(&estimates, config.confidence_threshold),
    };
    let scale = Scale::major(root);

    let mut entries = Vec::with_capacity(starts.len());
    let mut frames = Vec::with_capacity(starts.len());

    for (&start_offset, estimate) in starts.iter().zip(estimates.iter()) {
        let frame = slice_frame(samples, start_offset, chunk_length)?;
        let gate_open = rms(&frame) >= gate;

        let (voiced, shift_ratio, target_midi) = match estimate.frequency_hz {
            Some(frequency) if gate_open => {
                let target = nearest_in_scale(hz_to_midi(frequency), &scale);
                let target_frequency = midi_to_hz(target as f32);
                (true, target_frequency / frequency, Some(target))
            }
            _ => (false, 1.0, None),
        };

        entries.push(ChunkPlanEntry {
            start_offset,
            length: chunk_length,
            overlap_length,
            voiced,
            shift_ratio,
        });
        frames.push(FrameDiagnostic {
            start_offset,
            frequency_hz: estimate.frequency_hz,
            confidence: estimate.confidence,
            shift_ratio,
            target_midi,
            voiced,
        });
    }

    let voiced_count = entries.iter().filter(|e| e.voiced).count();
    log::debug!(
        "Plan: {} frames, {} voiced, root {} ({})",
        entries.len(),
        voiced_count,
        scale.root_pitch_class,
        scale.root_name()
    );

    Ok(ChunkPlan {
        entries,
        scale,
        frames,
    })
}

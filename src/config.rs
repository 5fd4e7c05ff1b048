//! Configuration parameters for pitch correction

use serde::{Deserialize, Serialize};

use crate::error::CorrectionError;
use crate::features::pitch::EstimatorMethod;
use crate::synthesis::overlap_add::CrossfadeCurve;

/// Correction configuration parameters
///
/// All fields are validated against their declared bounds by [`validate`]
/// before any processing starts; an out-of-range field fails the whole pass
/// with no partial output.
///
/// [`validate`]: CorrectionConfig::validate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionConfig {
    // Framing
    /// Chunk duration in milliseconds, bounds [50, 200] (default: 120.0)
    pub chunk_ms: f32,

    /// Overlap duration in milliseconds, bounds [5, chunk_ms / 2] (default: 12.0)
    pub overlap_ms: f32,

    // Voicing
    /// Voicing gate threshold in dB, bounds [-80, -10] (default: -45.0)
    /// Frames with RMS below this threshold are treated as unvoiced
    pub gate_db: f32,

    // Pitch search
    /// Minimum fundamental frequency in Hz, bounds [40, 200] (default: 70.0)
    pub min_frequency: f32,

    /// Maximum fundamental frequency in Hz, bounds [200, 1200] (default: 900.0)
    pub max_frequency: f32,

    // Key inference
    /// Confidence required of an estimate before it may seed the scale root,
    /// bounds [0, 1] (default: 0.4)
    pub confidence_threshold: f32,

    /// Pitch estimation strategy (default: Autocorrelation)
    pub estimator: EstimatorMethod,

    /// Crossfade curve applied over chunk overlaps (default: Linear)
    pub crossfade: CrossfadeCurve,

    /// Pin the scale root to this pitch class (0 = C .. 11 = B) instead of
    /// inferring it from the first confident estimate (default: None)
    pub root_override: Option<u8>,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            chunk_ms: 120.0,
            overlap_ms: 12.0,
            gate_db: -45.0,
            min_frequency: 70.0,
            max_frequency: 900.0,
            confidence_threshold: 0.4,
            estimator: EstimatorMethod::Autocorrelation,
            crossfade: CrossfadeCurve::Linear,
            root_override: None,
        }
    }
}

impl CorrectionConfig {
    /// Validate all fields against their declared bounds
    ///
    /// # Errors
    ///
    /// Returns `CorrectionError::InvalidConfig` naming the offending field if
    /// any bound is violated.
    pub fn validate(&self) -> Result<(), CorrectionError> {
        if !(50.0..=200.0).contains(&self.chunk_ms) {
            return Err(CorrectionError::InvalidConfig(format!(
                "chunk_ms must be in [50, 200], got {:.1}",
                self.chunk_ms
            )));
        }

        if self.overlap_ms < 5.0 || self.overlap_ms > self.chunk_ms / 2.0 {
            return Err(CorrectionError::InvalidConfig(format!(
                "overlap_ms must be in [5, chunk_ms / 2 = {:.1}], got {:.1}",
                self.chunk_ms / 2.0,
                self.overlap_ms
            )));
        }

        if !(-80.0..=-10.0).contains(&self.gate_db) {
            return Err(CorrectionError::InvalidConfig(format!(
                "gate_db must be in [-80, -10], got {:.1}",
                self.gate_db
            )));
        }

        if !(40.0..=200.0).contains(&self.min_frequency) {
            return Err(CorrectionError::InvalidConfig(format!(
                "min_frequency must be in [40, 200], got {:.1}",
                self.min_frequency
            )));
        }

        if !(200.0..=1200.0).contains(&self.max_frequency) {
            return Err(CorrectionError::InvalidConfig(format!(
                "max_frequency must be in [200, 1200], got {:.1}",
                self.max_frequency
            )));
        }

        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(CorrectionError::InvalidConfig(format!(
                "confidence_threshold must be in [0, 1], got {:.2}",
                self.confidence_threshold
            )));
        }

        if let Some(root) = self.root_override {
            if root > 11 {
                return Err(CorrectionError::InvalidConfig(format!(
                    "root_override must be a pitch class in [0, 11], got {}",
                    root
                )));
            }
        }

        Ok(())
    }

    /// Voicing gate threshold as a linear amplitude: `10^(gate_db / 20)`
    pub fn gate_linear(&self) -> f32 {
        crate::preprocessing::windowing::db_to_linear(self.gate_db)
    }

    /// Chunk length in samples at the given sample rate (at least 1)
    pub fn chunk_samples(&self, sample_rate: u32) -> usize {
        ((self.chunk_ms / 1000.0 * sample_rate as f32).round() as usize).max(1)
    }

    /// Overlap length in samples at the given sample rate
    pub fn overlap_samples(&self, sample_rate: u32) -> usize {
        (self.overlap_ms / 1000.0 * sample_rate as f32).round() as usize
    }
}

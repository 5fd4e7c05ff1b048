//! Chunk planning and overlap-add resynthesis modules
//!
//! Turn per-frame pitch estimates into a correction plan, then stitch
//! pitch-shifted frames back into one continuous buffer:
//! - Chunk planning (per-frame voiced flags and target shift ratios)
//! - Overlap-add reconstruction with boundary crossfades and a soft limiter
//! - The injected pitch-shift primitive interface

pub mod overlap_add;
pub mod plan;
pub mod shifter;

pub use overlap_add::{reconstruct, CrossfadeCurve};
pub use plan::{build_plan, ChunkPlan, ChunkPlanEntry};
pub use shifter::{PassthroughShifter, PitchShifter, ResampleShifter};

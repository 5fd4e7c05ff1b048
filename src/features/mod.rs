//! Feature extraction modules
//!
//! This module contains the analysis algorithms of the pipeline:
//! - Pitch estimation (two strategies behind one contract)
//! - Key inference and scale quantization

pub mod key;
pub mod pitch;

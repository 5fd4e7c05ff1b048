//! Sample preprocessing modules
//!
//! Utilities for preparing audio frames for analysis:
//! - Fixed-length frame extraction with tail zero-padding
//! - Windowing, DC removal, and energy measurement

pub mod framing;
pub mod windowing;

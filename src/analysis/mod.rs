//! Correction result and diagnostics modules
//!
//! Types returned from a correction pass: the corrected buffer, the inferred
//! scale, and per-frame diagnostics for display and logging.

pub mod result;

//! Fixed-length frame extraction
//!
//! Frames are transient views over the sample buffer: created for one
//! estimation or shift call, never persisted. A frame that runs past the end
//! of the buffer is zero-filled to its nominal length so every downstream
//! stage sees a constant frame size.

use crate::error::CorrectionError;

/// Extract a fixed-length frame starting at `start_offset`
///
/// The remainder is zero-filled if `start_offset + length` exceeds the
/// buffer. A `start_offset` at or past the end of the buffer yields an
/// all-zero frame.
///
/// # Errors
///
/// Returns `CorrectionError::InvalidInput` if `length` is zero.
pub fn slice_frame(
    buffer: &[f32],
    start_offset: usize,
    length: usize,
) -> Result<Vec<f32>, CorrectionError> {
    if length == 0 {
        return Err(CorrectionError::InvalidInput(
            "Frame length must be greater than zero".to_string(),
        ));
    }

    let mut frame = vec![0.0f32; length];
    if start_offset < buffer.len() {
        let available = (buffer.len() - start_offset).min(length);
        frame[..available].copy_from_slice(&buffer[start_offset..start_offset + available]);
    }

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_within_buffer() {
        let buffer = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let frame = slice_frame(&buffer, 1, 3).unwrap();
        assert_eq!(frame, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_slice_pads_tail_with_zeros() {
        let buffer = vec![1.0, 2.0, 3.0];
        let frame = slice_frame(&buffer, 2, 4).unwrap();
        assert_eq!(frame, vec![3.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_slice_past_end_is_all_zeros() {
        let buffer = vec![1.0, 2.0];
        let frame = slice_frame(&buffer, 10, 4).unwrap();
        assert_eq!(frame, vec![0.0; 4]);
    }

    #[test]
    fn test_slice_empty_buffer() {
        let frame = slice_frame(&[], 0, 3).unwrap();
        assert_eq!(frame, vec![0.0; 3]);
    }

    #[test]
    fn test_zero_length_rejected() {
        let buffer = vec![1.0, 2.0];
        assert!(slice_frame(&buffer, 0, 0).is_err());
    }
}

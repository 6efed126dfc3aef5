//! Error types for the painting engine.
//!
//! Every variant is raised before the first pixel write, so a failed call
//! leaves the destination buffer untouched.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, PaintError>;

/// Errors that can occur while painting into a pixel buffer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaintError {
    /// Byte length does not match `width * height * 4`, or a side is zero.
    #[error("buffer of {len} bytes does not fit {width}x{height} RGBA pixels")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    /// Seed coordinate is negative, not a number, or past the buffer extents.
    #[error("point ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },

    /// Mask and destination do not cover the same pixel grid.
    #[error("mask is {mask_width}x{mask_height} but destination is {width}x{height}")]
    MaskSizeMismatch {
        mask_width: u32,
        mask_height: u32,
        width: u32,
        height: u32,
    },

    /// A drawing operation received a stroke path with no points.
    #[error("stroke path has no points")]
    EmptyStrokePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_geometry() {
        let e = PaintError::InvalidDimensions {
            width: 4,
            height: 4,
            len: 10,
        };
        assert_eq!(e.to_string(), "buffer of 10 bytes does not fit 4x4 RGBA pixels");

        let e = PaintError::OutOfBounds {
            x: -1.0,
            y: 2.0,
            width: 4,
            height: 3,
        };
        assert!(e.to_string().contains("(-1, 2)"));
        assert!(e.to_string().contains("4x3"));
    }
}

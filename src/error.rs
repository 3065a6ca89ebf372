//! Error types shared by the pixel, fill and rendering layers.

use thiserror::Error;

/// Errors raised while reading pixels or producing rendered output.
///
/// "Seed point out of bounds" and "fill is a no-op" are not errors; the fill
/// engine reports those as an unchanged image.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("pixel ({x}, {y}) lies outside the {width}x{height} buffer")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("pixel buffer of {len} bytes cannot hold {width}x{height} pixels with stride {stride}")]
    BufferTooSmall {
        len: usize,
        width: i32,
        height: i32,
        stride: usize,
    },

    #[error("render target allocation failed: {0}")]
    Allocation(#[from] cairo::Error),

    #[error("pixel data is not accessible: {0}")]
    PixelAccess(#[from] cairo::BorrowError),

    #[error("render target is not an image surface")]
    UnsupportedTarget,

    #[error("failed to load image: {0}")]
    ImageLoad(#[from] cairo::IoError),
}

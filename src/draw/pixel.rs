//! Bounds-checked access to raw ARGB32 pixel data.
//!
//! Cairo image surfaces store each pixel as a native-endian 32-bit word with
//! premultiplied alpha in the high byte. [`PixelBuffer`] wraps such a byte
//! slice (read-only or mutable) together with its geometry.

use super::Color;
use crate::error::SketchError;

const BYTES_PER_PIXEL: usize = 4;

/// View over a raw ARGB32 premultiplied pixel buffer.
///
/// `get`/`set` reject coordinates outside `[0, width) × [0, height)`; nothing
/// is clamped. Hot loops bounds-check with [`PixelBuffer::contains`] once and
/// then use the crate-internal unchecked accessors.
#[derive(Debug)]
pub struct PixelBuffer<B> {
    data: B,
    width: i32,
    height: i32,
    stride: usize,
}

impl<B: AsRef<[u8]>> PixelBuffer<B> {
    /// Wraps `data`, verifying it is large enough for the given geometry.
    pub fn new(data: B, width: i32, height: i32, stride: usize) -> Result<Self, SketchError> {
        let len = data.as_ref().len();
        let row_bytes = width.max(0) as usize * BYTES_PER_PIXEL;
        let required = if height <= 0 {
            0
        } else {
            stride * (height as usize - 1) + row_bytes
        };
        if width < 0 || height < 0 || stride < row_bytes || len < required {
            return Err(SketchError::BufferTooSmall {
                len,
                width,
                height,
                stride,
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns true when `(x, y)` addresses a pixel inside the buffer.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Reads the pixel at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Result<Color, SketchError> {
        self.check(x, y)?;
        Ok(self.read(x as usize, y as usize))
    }

    /// Reads a pixel without the public bounds check. Callers must have
    /// verified `(x, y)` with [`PixelBuffer::contains`].
    pub(crate) fn read(&self, x: usize, y: usize) -> Color {
        let offset = self.offset(x, y);
        let bytes = &self.data.as_ref()[offset..offset + BYTES_PER_PIXEL];
        Color::from_argb32(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width as usize && y < self.height as usize);
        y * self.stride + x * BYTES_PER_PIXEL
    }

    fn check(&self, x: i32, y: i32) -> Result<(), SketchError> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(SketchError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> PixelBuffer<B> {
    /// Writes `color` (already premultiplied) at `(x, y)`.
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> Result<(), SketchError> {
        self.check(x, y)?;
        self.write(x as usize, y as usize, color);
        Ok(())
    }

    /// Writes a pixel without the public bounds check.
    pub(crate) fn write(&mut self, x: usize, y: usize, color: Color) {
        let offset = self.offset(x, y);
        self.data.as_mut()[offset..offset + BYTES_PER_PIXEL]
            .copy_from_slice(&color.to_argb32().to_ne_bytes());
    }
}

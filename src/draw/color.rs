//! ARGB color type and predefined color constants.

use serde::{Deserialize, Serialize};

/// Represents a color with four 8-bit channels.
///
/// Colors are straight (non-premultiplied) unless they were read from a pixel
/// buffer, in which case they carry the buffer's premultiplied values.
///
/// # Examples
///
/// ```
/// use sketchpad::draw::Color;
/// let red = Color::rgb(255, 0, 0);
/// let half_blue = Color::argb(128, 0, 0, 255);
/// assert_eq!(red.a, 255);
/// assert_eq!(half_blue.premultiplied().b, 128);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Alpha (0 = fully transparent, 255 = fully opaque)
    pub a: u8,
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
}

impl Color {
    /// Creates a new color from ARGB components.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Replaces the alpha channel with `alpha` in `[0, 1]`, rounded to 8 bits.
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Multiplies the color channels by alpha, as stored in cairo image surfaces.
    pub fn premultiplied(self) -> Self {
        let scale = |channel: u8| ((channel as u32 * self.a as u32 + 127) / 255) as u8;
        Self {
            a: self.a,
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    /// Decodes a native-endian ARGB32 word (alpha in the high byte).
    pub const fn from_argb32(word: u32) -> Self {
        Self {
            a: (word >> 24) as u8,
            r: (word >> 16) as u8,
            g: (word >> 8) as u8,
            b: word as u8,
        }
    }

    /// Encodes the color as an ARGB32 word (alpha in the high byte).
    pub const fn to_argb32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Channel values scaled to `0.0..=1.0` for cairo's `set_source_rgba`.
    pub fn to_unit_rgb(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }

    /// Sets this color as the context source, using `alpha` instead of the stored channel.
    pub fn set_source(self, ctx: &cairo::Context, alpha: f64) {
        let (r, g, b) = self.to_unit_rgb();
        ctx.set_source_rgba(r, g, b, alpha.clamp(0.0, 1.0));
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Predefined red color
pub const RED: Color = Color::rgb(255, 0, 0);

/// Predefined green color
pub const GREEN: Color = Color::rgb(0, 255, 0);

/// Predefined blue color
pub const BLUE: Color = Color::rgb(0, 0, 255);

/// Predefined yellow color
pub const YELLOW: Color = Color::rgb(255, 255, 0);

/// Predefined orange color
pub const ORANGE: Color = Color::rgb(255, 128, 0);

/// Predefined pink/magenta color
pub const PINK: Color = Color::rgb(255, 0, 255);

/// Predefined white color
pub const WHITE: Color = Color::rgb(255, 255, 255);

/// Predefined black color
pub const BLACK: Color = Color::rgb(0, 0, 0);

/// Fully transparent color (the blank canvas)
pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);

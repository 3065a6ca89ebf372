//! Separable box blur used to approximate shadow blur for soft and neon pens.
//!
//! Cairo has no shadow primitive, so the pen draws its glow into an offscreen
//! surface and blurs that surface's premultiplied bytes. Three box passes give
//! a close approximation of a gaussian.

use cairo::ImageSurface;

use crate::error::SketchError;

const PASSES: usize = 3;
const CHANNELS: usize = 4;

/// Blurs an ARGB32 surface in place with an overall blur radius of `radius` pixels.
pub fn blur_surface(surface: &mut ImageSurface, radius: f64) -> Result<(), SketchError> {
    let box_radius = (radius / PASSES as f64).round() as usize;
    if box_radius == 0 {
        return Ok(());
    }

    surface.flush();
    let width = surface.width().max(0) as usize;
    let height = surface.height().max(0) as usize;
    let stride = surface.stride() as usize;
    let mut data = surface.data()?;

    for _ in 0..PASSES {
        blur_rows(&mut data, width, height, stride, box_radius);
        blur_columns(&mut data, width, height, stride, box_radius);
    }
    Ok(())
}

fn blur_rows(data: &mut [u8], width: usize, height: usize, stride: usize, radius: usize) {
    let mut line = vec![0u8; width * CHANNELS];
    for y in 0..height {
        let row = &mut data[y * stride..y * stride + width * CHANNELS];
        line.copy_from_slice(row);
        box_blur_line(&line, row, width, radius);
    }
}

fn blur_columns(data: &mut [u8], width: usize, height: usize, stride: usize, radius: usize) {
    let mut line = vec![0u8; height * CHANNELS];
    let mut blurred = vec![0u8; height * CHANNELS];
    for x in 0..width {
        for y in 0..height {
            let src = y * stride + x * CHANNELS;
            line[y * CHANNELS..(y + 1) * CHANNELS].copy_from_slice(&data[src..src + CHANNELS]);
        }
        box_blur_line(&line, &mut blurred, height, radius);
        for y in 0..height {
            let dst = y * stride + x * CHANNELS;
            data[dst..dst + CHANNELS].copy_from_slice(&blurred[y * CHANNELS..(y + 1) * CHANNELS]);
        }
    }
}

/// Running-sum box filter over `len` interleaved 4-byte pixels; edges are clamped.
fn box_blur_line(src: &[u8], dst: &mut [u8], len: usize, radius: usize) {
    if len == 0 {
        return;
    }
    let window = (radius * 2 + 1) as u32;
    let last = len - 1;
    let at = |index: isize, channel: usize| -> u32 {
        let clamped = index.clamp(0, last as isize) as usize;
        src[clamped * CHANNELS + channel] as u32
    };

    for channel in 0..CHANNELS {
        let mut sum: u32 = (-(radius as isize)..=radius as isize)
            .map(|offset| at(offset, channel))
            .sum();
        for i in 0..len {
            dst[i * CHANNELS + channel] = ((sum + window / 2) / window) as u8;
            let leaving = i as isize - radius as isize;
            let entering = i as isize + radius as isize + 1;
            sum = sum + at(entering, channel) - at(leaving, channel);
        }
    }
}

//! Scanline seed fill over ARGB32 pixel buffers.
//!
//! The fill repaints every pixel 4-connected to the seed through pixels that
//! the comparator considers the same as the seed's *original* color. Each
//! queue entry fills a whole horizontal span and only enqueues the start of
//! each matching run in the rows above and below, so the queue grows with the
//! number of spans rather than the number of pixels.

use std::collections::VecDeque;

use cairo::{Context, Format, ImageSurface, Operator};
use log::debug;

use super::{Color, PixelBuffer};
use crate::error::SketchError;
use crate::util::Point;

/// Channel-sum threshold used when no tolerance is configured.
pub const DEFAULT_TOLERANCE: u32 = 30;

/// Decides whether two colors belong to different fill regions.
pub trait ColorComparator {
    /// Returns true when `candidate` is different enough from `reference` to stop the fill.
    fn differs(&self, reference: Color, candidate: Color) -> bool;
}

impl<F> ColorComparator for F
where
    F: Fn(Color, Color) -> bool,
{
    fn differs(&self, reference: Color, candidate: Color) -> bool {
        self(reference, candidate)
    }
}

/// Default comparator: sum of absolute per-channel differences against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSumDistance {
    pub threshold: u32,
}

impl ChannelSumDistance {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// Sum of `|Δa| + |Δr| + |Δg| + |Δb|`.
    pub fn distance(reference: Color, candidate: Color) -> u32 {
        reference.a.abs_diff(candidate.a) as u32
            + reference.r.abs_diff(candidate.r) as u32
            + reference.g.abs_diff(candidate.g) as u32
            + reference.b.abs_diff(candidate.b) as u32
    }
}

impl Default for ChannelSumDistance {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl ColorComparator for ChannelSumDistance {
    fn differs(&self, reference: Color, candidate: Color) -> bool {
        Self::distance(reference, candidate) > self.threshold
    }
}

/// Fills the region around `seed` in place and returns the number of pixels painted.
///
/// `fill` must already be in the buffer's (premultiplied) representation.
/// Returns 0 without touching the buffer when the seed is outside the buffer
/// or when the seed pixel already matches `fill` under the comparator.
pub fn seed_fill<B, C>(buffer: &mut PixelBuffer<B>, seed: (i32, i32), fill: Color, compare: &C) -> usize
where
    B: AsRef<[u8]> + AsMut<[u8]>,
    C: ColorComparator + ?Sized,
{
    if !buffer.contains(seed.0, seed.1) {
        return 0;
    }

    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let origin = (seed.0 as usize, seed.1 as usize);
    let original = buffer.read(origin.0, origin.1);

    if !compare.differs(original, fill) {
        return 0;
    }

    // Painted pixels hold `fill`, which differs from `original`, so they act
    // as boundaries for every later scan.
    let same = |candidate: Color| !compare.differs(original, candidate);

    let mut queue = VecDeque::from([origin]);
    let mut painted = 0;

    while let Some((x, y)) = queue.pop_front() {
        if !same(buffer.read(x, y)) {
            continue;
        }

        let mut left = x;
        while left > 0 && same(buffer.read(left - 1, y)) {
            left -= 1;
        }

        let mut above_run = false;
        let mut below_run = false;
        let mut cursor = left;

        while cursor < width && same(buffer.read(cursor, y)) {
            if y > 0 {
                let matches = same(buffer.read(cursor, y - 1));
                above_run = track_run(&mut queue, matches, (cursor, y - 1), above_run);
            }
            if y + 1 < height {
                let matches = same(buffer.read(cursor, y + 1));
                below_run = track_run(&mut queue, matches, (cursor, y + 1), below_run);
            }

            buffer.write(cursor, y, fill);
            painted += 1;
            cursor += 1;
        }
    }

    painted
}

/// Enqueues `point` when a matching run starts there; returns whether a run is open.
fn track_run(
    queue: &mut VecDeque<(usize, usize)>,
    matches: bool,
    point: (usize, usize),
    run_open: bool,
) -> bool {
    if matches && !run_open {
        queue.push_back(point);
    }
    matches
}

/// Flood-fills a private copy of `source` starting at `seed`.
///
/// `color` is straight (non-premultiplied); it is premultiplied before being
/// written. Returns `Ok(None)` when the fill is a no-op (seed outside the
/// image or already matching), in which case the caller keeps `source`.
/// `source` itself is never modified.
pub fn fill_surface<C>(
    source: &ImageSurface,
    seed: Point,
    color: Color,
    compare: &C,
) -> Result<Option<ImageSurface>, SketchError>
where
    C: ColorComparator + ?Sized,
{
    let width = source.width();
    let height = source.height();
    let (x, y) = (seed.x.floor() as i32, seed.y.floor() as i32);

    if x < 0 || y < 0 || x >= width || y >= height {
        debug!("Fill seed ({x}, {y}) outside {width}x{height} image; skipping");
        return Ok(None);
    }

    let mut working = ImageSurface::create(Format::ARgb32, width, height)?;
    {
        let ctx = Context::new(&working)?;
        ctx.set_operator(Operator::Source);
        ctx.set_source_surface(source, 0.0, 0.0)?;
        ctx.paint()?;
    }
    working.flush();

    let stride = working.stride() as usize;
    let painted = {
        let mut data = working.data()?;
        let mut pixels = PixelBuffer::new(&mut data[..], width, height, stride)?;
        seed_fill(&mut pixels, (x, y), color.premultiplied(), compare)
    };

    if painted == 0 {
        debug!("Fill at ({x}, {y}) is a no-op");
        return Ok(None);
    }

    debug!("Filled {painted} pixels from seed ({x}, {y})");
    Ok(Some(working))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, BLUE, RED, WHITE};

    fn buffer_of(width: i32, height: i32, color: Color) -> Vec<u8> {
        let word = color.to_argb32().to_ne_bytes();
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&word);
        }
        data
    }

    fn pixels(data: &mut [u8], width: i32, height: i32) -> PixelBuffer<&mut [u8]> {
        PixelBuffer::new(data, width, height, width as usize * 4).unwrap()
    }

    #[test]
    fn fills_uniform_buffer_completely() {
        let mut data = buffer_of(10, 10, WHITE);
        let mut buffer = pixels(&mut data, 10, 10);
        let painted = seed_fill(&mut buffer, (5, 5), BLACK, &ChannelSumDistance::default());
        assert_eq!(painted, 100);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(buffer.get(x, y).unwrap(), BLACK);
            }
        }
    }

    #[test]
    fn refilling_with_same_color_is_noop() {
        let mut data = buffer_of(6, 4, BLUE);
        let before = data.clone();
        let mut buffer = pixels(&mut data, 6, 4);
        assert_eq!(seed_fill(&mut buffer, (2, 2), BLUE, &ChannelSumDistance::default()), 0);
        assert_eq!(data, before);
    }

    #[test]
    fn fill_within_tolerance_of_seed_is_noop() {
        let mut data = buffer_of(4, 4, Color::rgb(250, 250, 250));
        let before = data.clone();
        let mut buffer = pixels(&mut data, 4, 4);
        assert_eq!(seed_fill(&mut buffer, (0, 0), WHITE, &ChannelSumDistance::default()), 0);
        assert_eq!(data, before);
    }

    #[test]
    fn out_of_bounds_seed_is_noop() {
        let mut data = buffer_of(4, 4, WHITE);
        let mut buffer = pixels(&mut data, 4, 4);
        assert_eq!(seed_fill(&mut buffer, (4, 0), RED, &ChannelSumDistance::default()), 0);
        assert_eq!(seed_fill(&mut buffer, (0, -1), RED, &ChannelSumDistance::default()), 0);
    }

    #[test]
    fn fill_stops_at_boundary_and_respects_connectivity() {
        // Vertical wall at x = 3 splits the 8x5 buffer; a gap-free wall keeps
        // the right half untouched.
        let (w, h) = (8, 5);
        let mut data = buffer_of(w, h, WHITE);
        {
            let mut buffer = pixels(&mut data, w, h);
            for y in 0..h {
                buffer.set(3, y, BLACK).unwrap();
            }
        }
        let mut buffer = pixels(&mut data, w, h);
        let painted = seed_fill(&mut buffer, (1, 2), RED, &ChannelSumDistance::default());
        assert_eq!(painted, 3 * 5);
        for y in 0..h {
            for x in 0..w {
                let expected = match x {
                    0..=2 => RED,
                    3 => BLACK,
                    _ => WHITE,
                };
                assert_eq!(buffer.get(x, y).unwrap(), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn fill_follows_winding_corridor() {
        // A U-shaped corridor: the fill has to go down, across and back up.
        //   . # .
        //   . # .
        //   . . .
        let (w, h) = (3, 3);
        let mut data = buffer_of(w, h, WHITE);
        {
            let mut buffer = pixels(&mut data, w, h);
            buffer.set(1, 0, BLACK).unwrap();
            buffer.set(1, 1, BLACK).unwrap();
        }
        let mut buffer = pixels(&mut data, w, h);
        assert_eq!(seed_fill(&mut buffer, (0, 0), BLUE, &ChannelSumDistance::default()), 7);
        assert_eq!(buffer.get(2, 0).unwrap(), BLUE);
        assert_eq!(buffer.get(1, 1).unwrap(), BLACK);
    }

    #[test]
    fn fill_never_touches_pixels_beyond_threshold() {
        let (w, h) = (5, 1);
        let mut data = buffer_of(w, h, WHITE);
        {
            let mut buffer = pixels(&mut data, w, h);
            // Distance 40 from white: outside the default tolerance of 30.
            buffer.set(2, 0, Color::rgb(245, 240, 245)).unwrap();
            // Distance 15: inside tolerance, filled along with white.
            buffer.set(1, 0, Color::rgb(250, 250, 250)).unwrap();
        }
        let mut buffer = pixels(&mut data, w, h);
        assert_eq!(seed_fill(&mut buffer, (0, 0), BLACK, &ChannelSumDistance::default()), 2);
        assert_eq!(buffer.get(1, 0).unwrap(), BLACK);
        assert_eq!(buffer.get(2, 0).unwrap(), Color::rgb(245, 240, 245));
        assert_eq!(buffer.get(3, 0).unwrap(), WHITE);
    }

    #[test]
    fn injected_comparator_controls_tolerance() {
        let (w, h) = (4, 1);
        let mut data = buffer_of(w, h, WHITE);
        {
            let mut buffer = pixels(&mut data, w, h);
            buffer.set(2, 0, Color::rgb(200, 200, 200)).unwrap();
        }
        let mut buffer = pixels(&mut data, w, h);
        let lenient = |a: Color, b: Color| ChannelSumDistance::distance(a, b) > 500;
        assert_eq!(seed_fill(&mut buffer, (0, 0), RED, &lenient), 4);
    }

    #[test]
    fn fill_surface_leaves_source_untouched() {
        let source = ImageSurface::create(Format::ARgb32, 6, 6).unwrap();
        {
            let ctx = Context::new(&source).unwrap();
            ctx.set_source_rgb(1.0, 1.0, 1.0);
            ctx.paint().unwrap();
        }
        let mut before = Vec::new();
        source.with_data(|data| before.extend_from_slice(data)).unwrap();

        let filled = fill_surface(&source, Point::new(2.5, 3.5), RED, &ChannelSumDistance::default())
            .unwrap()
            .expect("white region should be filled");

        let mut after = Vec::new();
        source.with_data(|data| after.extend_from_slice(data)).unwrap();
        assert_eq!(before, after);

        let stride = filled.stride() as usize;
        filled
            .with_data(|data| {
                let buffer = PixelBuffer::new(data, 6, 6, stride).unwrap();
                assert_eq!(buffer.get(0, 0).unwrap(), RED);
                assert_eq!(buffer.get(5, 5).unwrap(), RED);
            })
            .unwrap();
    }

    #[test]
    fn fill_surface_reports_noop_outside_image() {
        let source = ImageSurface::create(Format::ARgb32, 4, 4).unwrap();
        let result = fill_surface(&source, Point::new(-1.0, 2.0), RED, &ChannelSumDistance::default());
        assert!(result.unwrap().is_none());
        let result = fill_surface(&source, Point::new(1.0, 4.0), RED, &ChannelSumDistance::default());
        assert!(result.unwrap().is_none());
    }
}

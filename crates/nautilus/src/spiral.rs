//! Candidate search paths walked outward from a sector's centroid.

use crate::geom::{Point, lerp};
use crate::sector::Sector;

#[derive(Debug, Clone)]
pub struct SpiralOptions {
    /// Rings sampled inside the sector, interpolating from the centroid to the wedge outline.
    pub resolution: usize,
    /// Overflow rings past the outer arc, as a multiple of `resolution`.
    pub padding_multiplier: f64,
    /// Rings below this index subsample the wedge outline with stride `sparsity - ring`.
    pub sparsity: usize,
    /// Number of wedge outline samples taken from the sector.
    pub sector_resolution: usize,
}

impl Default for SpiralOptions {
    fn default() -> Self {
        Self {
            resolution: 20,
            padding_multiplier: 1.2,
            sparsity: 0,
            sector_resolution: 100,
        }
    }
}

impl SpiralOptions {
    pub fn padding_resolution(&self) -> usize {
        (self.resolution as f64 * self.padding_multiplier) as usize
    }
}

/// Builds the candidate path for one sector.
///
/// The interpolation factor `t` grows with every emitted point: over the first `resolution`
/// rings it climbs from `0` (the centroid) to `1` (the wedge outline), then the padding rings
/// keep stepping it past `1` along the outer arc only.
pub fn spiral(sector: &Sector, opts: &SpiralOptions) -> Spiral {
    let samples = sector.points(opts.sector_resolution);
    let center = sector.centroid(1.0);
    let padding_resolution = opts.padding_resolution();

    let mut points = Vec::with_capacity(
        samples.points.len() * opts.resolution + samples.arc.len() * padding_resolution,
    );
    let mut t = 0.0;
    for ring in 0..opts.resolution {
        let leap = opts.sparsity.saturating_sub(ring).max(1);
        let step = leap as f64 / (opts.sector_resolution as f64 * opts.resolution as f64);
        for p in samples.points.iter().step_by(leap) {
            points.push(lerp(center, *p, t));
            t += step;
        }
    }

    let step = 1.0 / padding_resolution as f64;
    for _ in 0..padding_resolution {
        for p in samples.arc() {
            points.push(lerp(center, *p, t));
        }
        t += step;
    }

    Spiral::new(points)
}

/// Ordered candidate points with a consumed prefix.
///
/// `points()[..consumed()]` have been tested and rejected for good; the rest is the remaining
/// path. Erasing swaps a point into the consumed prefix in O(1).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spiral {
    data: Vec<Point>,
    consumed: usize,
}

impl Spiral {
    pub fn new(data: Vec<Point>) -> Self {
        Self { data, consumed: 0 }
    }

    /// Every point, consumed or not, in storage order.
    pub fn points(&self) -> &[Point] {
        &self.data
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> &[Point] {
        &self.data[self.consumed..]
    }

    pub fn front(&self) -> Option<Point> {
        self.remaining().first().copied()
    }

    pub fn len(&self) -> usize {
        self.data.len() - self.consumed
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the point at storage position `pos` by exchanging it with the first
    /// unconsumed point and advancing the boundary past it.
    pub fn erase(&mut self, pos: usize) {
        assert!(
            (self.consumed..self.data.len()).contains(&pos),
            "erase position {pos} outside remaining range {}..{}",
            self.consumed,
            self.data.len()
        );
        self.data.swap(pos, self.consumed);
        self.consumed += 1;
    }

    /// Forward walk over the remaining points.
    pub fn cursor(&mut self) -> Cursor<'_> {
        let pos = self.consumed;
        Cursor { spiral: self, pos }
    }
}

/// Forward cursor over a spiral's remaining points that can erase as it goes.
///
/// Every point between the consumed boundary and the cursor has been visited by this walk, so
/// the point swapped into the cursor's slot by an erase is skipped, and points ahead of the
/// cursor keep their order.
#[derive(Debug)]
pub struct Cursor<'a> {
    spiral: &'a mut Spiral,
    pos: usize,
}

impl Cursor<'_> {
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<Point> {
        self.spiral.data.get(self.pos).copied()
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Consumes the current point and moves to the next untested one.
    pub fn erase(&mut self) {
        self.spiral.erase(self.pos);
        self.pos += 1;
    }
}

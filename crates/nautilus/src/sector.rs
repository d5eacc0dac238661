//! Circles split into weighted angular sectors.

use crate::geom::{Point, lerp};
use std::f64::consts::TAU;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Splits the full turn into one contiguous sector per weight, in input order.
    ///
    /// Sector `i` spans `2π * w_i / Σw`; the first starts at `0` and the last ends at exactly `2π`.
    pub fn split(&self, weights: &[f64]) -> Vec<Sector> {
        assert!(!weights.is_empty(), "cannot split a circle into zero sectors");

        let total: f64 = weights.iter().sum();
        let mut sectors = Vec::with_capacity(weights.len());
        let mut theta = 0.0;
        for (i, w) in weights.iter().enumerate() {
            let start_angle = theta;
            theta = if i + 1 == weights.len() {
                TAU
            } else {
                theta + w / total * TAU
            };
            sectors.push(Sector {
                circle: *self,
                start_angle,
                end_angle: theta,
            });
        }
        sectors
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub circle: Circle,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Pie-wedge samples of a sector: radial ramp out, outer arc, radial ramp back.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorPoints {
    pub points: Vec<Point>,
    /// Range of `points` lying on the outer arc, from the start tip to the end tip inclusive.
    pub arc: Range<usize>,
}

impl SectorPoints {
    pub fn arc(&self) -> &[Point] {
        &self.points[self.arc.clone()]
    }
}

impl Sector {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    fn tip(&self, angle: f64) -> Point {
        self.circle.center + Point::from_polar(self.circle.radius, angle)
    }

    /// Samples about `resolution` points along the wedge outline.
    ///
    /// The arc receives a share of the samples proportional to its length within the wedge's
    /// perimeter (rounded up to an even count, at least two); the two radial ramps split the rest.
    pub fn points(&self, resolution: usize) -> SectorPoints {
        assert!(
            self.start_angle < self.end_angle,
            "sector must have a positive span: {}..{}",
            self.start_angle,
            self.end_angle
        );

        let Circle { center, radius } = self.circle;
        let arc_len = self.span() * radius;
        let perimeter = 2.0 * radius + arc_len;
        let mut arc_res = ((arc_len / perimeter) * resolution as f64).floor() as usize;
        if arc_res % 2 != 0 {
            arc_res += 1;
        }
        let arc_res = arc_res.clamp(2, resolution.max(2));
        let ramp_res = (resolution - arc_res.min(resolution)) / 2;
        let arc_steps = arc_res - 1;

        let start_tip = self.tip(self.start_angle);
        let end_tip = self.tip(self.end_angle);

        let mut points = Vec::with_capacity(resolution.max(arc_res + 2));
        points.push(center);
        for i in 1..ramp_res {
            points.push(lerp(center, start_tip, i as f64 / ramp_res as f64));
        }

        let arc_start = points.len();
        points.push(start_tip);
        for i in 1..arc_steps {
            let t = i as f64 / arc_steps as f64;
            let alpha = self.start_angle + (self.end_angle - self.start_angle) * t;
            points.push(self.tip(alpha));
        }
        points.push(end_tip);
        let arc = arc_start..points.len();

        for i in 1..ramp_res {
            points.push(lerp(end_tip, center, i as f64 / ramp_res as f64));
        }
        points.push(center);

        SectorPoints { points, arc }
    }

    /// Area centroid of the sector, optionally pushed outward by `radius_multiplier`.
    pub fn centroid(&self, radius_multiplier: f64) -> Point {
        let alpha = self.span();
        let r = self.circle.radius;

        let xbar = (2.0 / 3.0) * (r / alpha) * alpha.sin();
        let ybar = (-2.0 / 3.0) * (r / alpha) * (alpha.cos() - 1.0);

        let (sin, cos) = self.start_angle.sin_cos();
        let rotated = Point::new(xbar * cos - ybar * sin, ybar * cos + xbar * sin);
        self.circle.center + rotated * radius_multiplier
    }

    /// Wedge boundary for display: the center, arc samples every `step` radians, the end tip.
    pub fn outline(&self, step: f64) -> Vec<Point> {
        assert!(step > 0.0, "outline step must be positive");

        let mut points = vec![self.circle.center];
        let mut angle = self.start_angle;
        while angle < self.end_angle {
            points.push(self.tip(angle));
            angle += step;
        }
        points.push(self.tip(self.end_angle));
        points
    }
}

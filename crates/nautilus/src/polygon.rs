//! Rectangle-cluster footprints and their traced outlines.

use crate::error::{Error, Result};
use crate::geom::{Point, Rect, Segment};
use serde::{Deserialize, Serialize};

/// A connected footprint approximated by rectangles ordered left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub rects: Vec<Rect>,
}

impl Polygon {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    pub fn area(&self) -> f64 {
        self.rects.iter().map(Rect::area).sum()
    }

    pub fn simplified(mut self, threshold: f64) -> Self {
        self.simplify(threshold);
        self
    }

    /// Merges neighbouring rectangles whose top and bottom edges are both within `threshold`.
    ///
    /// A run of rectangles matching the first one of the run collapses into a single rectangle
    /// spanning the run, with the lowest top and the highest bottom. When only one edge matches,
    /// the left rectangle is widened on that edge and both are kept. The last pair is checked once
    /// more at the end, widening the last rectangle instead.
    ///
    /// Widening can bring an earlier pair into alignment, so scans repeat until one changes
    /// nothing. Edges only ever move to values already present, which bounds the repetition.
    pub fn simplify(&mut self, threshold: f64) {
        while self.simplify_pass(threshold) {}
    }

    /// One left-to-right scan. Returns whether any rectangle changed.
    fn simplify_pass(&mut self, threshold: f64) -> bool {
        let within = |a: f64, b: f64| (a - b).abs() < threshold;
        let top_eq = |a: &Rect, b: &Rect| within(a.top, b.top);
        let bot_eq = |a: &Rect, b: &Rect| within(a.bottom, b.bottom);
        let mut changed = false;

        let mut i = 0;
        while i + 1 < self.rects.len() {
            let r1 = self.rects[i];
            let r2 = self.rects[i + 1];
            let teq = top_eq(&r1, &r2);
            let beq = bot_eq(&r1, &r2);

            if teq && beq {
                let mut min_top = r1.top.min(r2.top);
                let mut max_bottom = r1.bottom.max(r2.bottom);
                let mut last = i + 1;
                while let Some(r3) = self.rects.get(last + 1) {
                    if !(top_eq(&r1, r3) && bot_eq(&r1, r3)) {
                        break;
                    }
                    min_top = min_top.min(r3.top);
                    max_bottom = max_bottom.max(r3.bottom);
                    last += 1;
                }
                let right = self.rects[last].right;
                let merged = &mut self.rects[i];
                merged.top = min_top;
                merged.bottom = max_bottom;
                merged.right = right;
                self.rects.drain(i + 1..=last);
                changed = true;
            } else if teq {
                changed |= widen(&mut self.rects[i].top, r1.top.min(r2.top));
            } else if beq {
                changed |= widen(&mut self.rects[i].bottom, r1.bottom.max(r2.bottom));
            }
            i += 1;
        }

        if let [.., r1, r2] = self.rects.as_mut_slice() {
            if top_eq(&*r1, &*r2) {
                let top = r1.top.min(r2.top);
                changed |= widen(&mut r2.top, top);
            }
            if bot_eq(&*r1, &*r2) {
                let bottom = r1.bottom.max(r2.bottom);
                changed |= widen(&mut r2.bottom, bottom);
            }
        }
        changed
    }

    /// Traces the outer boundary as a closed loop, starting at the first rectangle's top-left
    /// corner and ending at its bottom-left corner.
    ///
    /// The walk runs clockwise on screen: along the tops left to right, down the last rectangle,
    /// and back along the bottoms right to left. A trace that fails to close within four steps
    /// per rectangle means the input is malformed.
    pub fn outside_edge_points(&self) -> Result<Vec<Point>> {
        let Some(front) = self.rects.first() else {
            return Ok(Vec::new());
        };

        let first = front.bottom_left();
        let mut tracer = OutlineTracer {
            rects: &self.rects,
            index: 0,
            corner: Corner::TopLeft,
            point: front.top_left(),
        };
        let mut points = vec![tracer.point];

        let limit = 4 * self.rects.len() + 4;
        let mut steps = 0;
        while tracer.point != first {
            if steps == limit {
                return Err(Error::UnclosedOutline { steps });
            }
            points.push(tracer.step());
            steps += 1;
        }
        Ok(points)
    }
}

/// Moves `edge` to `value`, reporting whether it moved.
fn widen(edge: &mut f64, value: f64) -> bool {
    let moved = *edge != value;
    *edge = value;
    moved
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

struct OutlineTracer<'a> {
    rects: &'a [Rect],
    index: usize,
    corner: Corner,
    point: Point,
}

impl OutlineTracer<'_> {
    /// Moves to the next outline vertex and returns it.
    ///
    /// | from          | condition             | to                             |
    /// |---------------|-----------------------|--------------------------------|
    /// | `TopLeft`     | -                     | `TopRight` of the last rect with the same top |
    /// | `TopRight`    | a rect follows        | `TopLeft` `(right, next.top)` on the next rect |
    /// | `TopRight`    | last rect             | `BottomRight` of this rect     |
    /// | `BottomRight` | -                     | `BottomLeft` of the first rect (going left) with the same bottom |
    /// | `BottomLeft`  | a rect precedes       | `BottomRight` `(left, prev.bottom)` on the previous rect |
    /// | `BottomLeft`  | first rect            | `TopLeft` of this rect         |
    fn step(&mut self) -> Point {
        let rects = self.rects;
        let (point, corner) = match self.corner {
            Corner::TopLeft => {
                while self.index + 1 < rects.len()
                    && rects[self.index].top == rects[self.index + 1].top
                {
                    self.index += 1;
                }
                (rects[self.index].top_right(), Corner::TopRight)
            }
            Corner::TopRight => match rects.get(self.index + 1) {
                Some(next) => {
                    let p = Point::new(rects[self.index].right, next.top);
                    self.index += 1;
                    (p, Corner::TopLeft)
                }
                None => (rects[self.index].bottom_right(), Corner::BottomRight),
            },
            Corner::BottomRight => {
                while self.index > 0 && rects[self.index].bottom == rects[self.index - 1].bottom {
                    self.index -= 1;
                }
                (rects[self.index].bottom_left(), Corner::BottomLeft)
            }
            Corner::BottomLeft => match self.index.checked_sub(1) {
                Some(prev) => {
                    let p = Point::new(rects[self.index].left, rects[prev].bottom);
                    self.index = prev;
                    (p, Corner::BottomRight)
                }
                None => (rects[self.index].top_left(), Corner::TopLeft),
            },
        };
        self.point = point;
        self.corner = corner;
        point
    }
}

/// Shoelace area enclosed by a closed loop of points (the last point connects to the first).
pub fn outline_area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

fn signed_area(points: &[Point]) -> f64 {
    closed_pairs(points)
        .map(|(p, q)| p.x * q.y - q.x * p.y)
        .sum::<f64>()
        / 2.0
}

/// Area centroid of a closed loop of points.
pub fn outline_centroid(points: &[Point]) -> Result<Point> {
    let area = signed_area(points);
    if area == 0.0 || area.is_nan() {
        return Err(Error::DegenerateOutline { area });
    }
    let sum = closed_pairs(points).fold(Point::default(), |acc, (p, q)| {
        acc + (p + q) * (p.x * q.y - q.x * p.y)
    });
    let a6 = 6.0 * area;
    Ok(Point::new(sum.x / a6, sum.y / a6))
}

/// `(points[n - 1], points[0]), (points[0], points[1]), ...`
fn closed_pairs(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let prev = points.last().into_iter().chain(points.iter());
    prev.zip(points.iter()).map(|(p, q)| (*p, *q))
}

/// A polygon with its outline and centroid cached.
///
/// Translation shifts the rectangles and both caches together; nothing is re-traced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedPolygon {
    polygon: Polygon,
    outline: Vec<Point>,
    center: Point,
    offset: Point,
}

impl ExtendedPolygon {
    pub fn new(polygon: Polygon) -> Result<Self> {
        let outline = polygon.outside_edge_points()?;
        let center = outline_centroid(&outline)?;
        Ok(Self {
            polygon,
            outline,
            center,
            offset: Point::default(),
        })
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn rects(&self) -> &[Rect] {
        &self.polygon.rects
    }

    pub fn outline(&self) -> &[Point] {
        &self.outline
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Total translation applied since construction.
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    pub fn move_by(&mut self, v: Point) {
        for r in &mut self.polygon.rects {
            r.translate(v);
        }
        for p in &mut self.outline {
            *p += v;
        }
        self.center += v;
        self.offset += v;
    }

    /// Translates the polygon so that its centroid lands on `target`.
    pub fn center_on(&mut self, target: Point) {
        self.move_by(target - self.center);
    }

    /// Nearest outline point hit by a ray cast from the centroid at angle `theta`.
    pub fn closest_isect(&self, theta: f64) -> Option<Point> {
        let reach = self.ray_length();
        let ray = Segment::new(
            self.center,
            self.center + Point::from_polar(reach, theta),
        );

        closed_pairs(&self.outline)
            .filter_map(|(p, q)| Segment::new(p, q).intersection(&ray))
            .map(|isect| (isect.distance(self.center), isect))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, isect)| isect)
    }

    fn ray_length(&self) -> f64 {
        let (mut lo, mut hi) = (self.center, self.center);
        for p in &self.outline {
            lo = Point::new(lo.x.min(p.x), lo.y.min(p.y));
            hi = Point::new(hi.x.max(p.x), hi.y.max(p.y));
        }
        2.0 * lo.distance(hi) + 1.0
    }
}

//! Placement orchestration: sector split, group anchoring, dependent search.

use crate::error::{Error, Result};
use crate::geom::{Point, Rect, Size};
use crate::polygon::{ExtendedPolygon, Polygon};
use crate::qtree::QuadTree;
use crate::sector::Circle;
use crate::spiral::{Spiral, SpiralOptions, spiral};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Polygon `dst` is placed next to the anchor of group `src`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub src: usize,
    pub dst: usize,
}

impl Dependency {
    pub const fn new(src: usize, dst: usize) -> Self {
        Self { src, dst }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlaceOptions {
    pub spiral: SpiralOptions,
}

/// Outcome of [`pack`]. Group-indexed vectors have one entry per group `0..=max(src)`.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub placed_count: usize,
    /// One flag per polygon.
    pub placed: Vec<bool>,
    pub anchors: Vec<Option<Point>>,
    /// Partially consumed search path of every group.
    pub spirals: Vec<Spiral>,
}

#[derive(Debug, Clone)]
pub struct Placement {
    /// Translation of every input polygon, `(0, 0)` for polygons left unplaced.
    pub offsets: Vec<Point>,
    pub placed: Vec<bool>,
    pub placed_count: usize,
    pub anchors: Vec<Option<Point>>,
    pub spirals: Vec<Spiral>,
}

/// Places every polygon and returns its translation vector, in input order.
pub fn place(
    polygons: &[Polygon],
    dependencies: &[Dependency],
    tolerances: &[f64],
    board: Size,
) -> Result<Vec<Point>> {
    place_with_options(
        polygons,
        dependencies,
        tolerances,
        board,
        &PlaceOptions::default(),
    )
    .map(|p| p.offsets)
}

pub fn place_with_options(
    polygons: &[Polygon],
    dependencies: &[Dependency],
    tolerances: &[f64],
    board: Size,
    opts: &PlaceOptions,
) -> Result<Placement> {
    let _span = tracing::debug_span!(
        "place",
        polygons = polygons.len(),
        dependencies = dependencies.len()
    )
    .entered();

    if tolerances.len() != polygons.len() {
        return Err(Error::ToleranceCount {
            expected: polygons.len(),
            actual: tolerances.len(),
        });
    }
    let invalid = |v: f64| v.is_nan() || v <= 0.0;
    if invalid(board.width) || invalid(board.height) {
        return Err(Error::InvalidBoard {
            width: board.width,
            height: board.height,
        });
    }

    let mut shapes = Vec::with_capacity(polygons.len());
    for (index, (polygon, &tolerance)) in polygons.iter().zip(tolerances).enumerate() {
        if polygon.rects.is_empty() {
            return Err(Error::EmptyPolygon { index });
        }
        shapes.push(ExtendedPolygon::new(polygon.clone().simplified(tolerance))?);
    }

    let cluster = pack(&mut shapes, dependencies, board, opts)?;
    let offsets = shapes
        .iter()
        .zip(&cluster.placed)
        .map(|(shape, &placed)| if placed { shape.offset() } else { Point::default() })
        .collect();

    Ok(Placement {
        offsets,
        placed: cluster.placed,
        placed_count: cluster.placed_count,
        anchors: cluster.anchors,
        spirals: cluster.spirals,
    })
}

/// Per-group footprint weights: the group's own area plus the area of every dependent.
fn group_areas(polys: &[ExtendedPolygon], dependencies: &[Dependency]) -> Result<Vec<f64>> {
    let Some(max_src) = dependencies.iter().map(|d| d.src).max() else {
        return Err(Error::EmptyDependencies);
    };
    let len = polys.len();
    let group_count = max_src + 1;

    let mut is_dependent = vec![false; len];
    for &Dependency { src, dst } in dependencies {
        for index in [src, dst] {
            if index >= len {
                return Err(Error::IndexOutOfRange { index, len });
            }
        }
        if src == dst {
            return Err(Error::SelfDependency { index: src });
        }
        if dst < group_count {
            return Err(Error::DependentIsGroup { index: dst });
        }
        if std::mem::replace(&mut is_dependent[dst], true) {
            return Err(Error::DuplicateDependent { index: dst });
        }
    }

    let mut areas = vec![0.0; group_count];
    let mut seen = vec![false; group_count];
    for &Dependency { src, dst } in dependencies {
        if !std::mem::replace(&mut seen[src], true) {
            areas[src] += polys[src].area();
        }
        areas[src] += polys[dst].area();
    }

    for (group, (&area, &seen)) in areas.iter().zip(&seen).enumerate() {
        if !seen {
            return Err(Error::MissingGroup { group });
        }
        if area.is_nan() || area <= 0.0 {
            return Err(Error::ZeroAreaGroup { group });
        }
    }
    Ok(areas)
}

/// Whether `poly` can go where it is: fully inside the index bound and clear of everything
/// already placed. Rectangles outside the bound are invisible to the index, so a polygon
/// reaching past it is never accepted.
fn is_free(tree: &QuadTree, poly: &ExtendedPolygon) -> bool {
    let bound = tree.root_bound();
    poly.rects()
        .iter()
        .all(|r| bound.contains_rect(r) && !tree.rect_intersects(r))
}

fn insert(tree: &mut QuadTree, poly: &ExtendedPolygon) {
    for r in poly.rects() {
        tree.insert(*r);
    }
}

/// Moves `polys` into place, mutating them in order.
///
/// Groups are anchored first, in ascending index order; dependents follow in input order. Every
/// accepted polygon goes into one shared quadtree, so changing either order changes the result.
pub fn pack(
    polys: &mut [ExtendedPolygon],
    dependencies: &[Dependency],
    board: Size,
    opts: &PlaceOptions,
) -> Result<Cluster> {
    let areas = group_areas(polys, dependencies)?;

    let total_area: f64 = areas.iter().sum();
    let radius = (total_area / PI).sqrt();
    let center = board.center();
    let circle = Circle::new(center, radius);
    let mut spirals: Vec<Spiral> = circle
        .split(&areas)
        .iter()
        .map(|sector| spiral(sector, &opts.spiral))
        .collect();

    let padding = radius;
    let bounding_box = Rect::new(
        (center.x - radius - padding).max(0.0),
        (center.y - radius - padding).max(0.0),
        (center.x + radius + padding).min(board.width),
        (center.y + radius + padding).min(board.height),
    );
    let mut tree = QuadTree::new(bounding_box);
    tracing::debug!(
        groups = areas.len(),
        radius,
        ?bounding_box,
        "split board circle into group sectors"
    );

    let mut placed = vec![false; polys.len()];
    let mut anchors: Vec<Option<Point>> = vec![None; areas.len()];
    let mut placed_count = 0;

    for (group, spiral) in spirals.iter_mut().enumerate() {
        let poly = &mut polys[group];
        let hit = spiral.remaining().iter().position(|&candidate| {
            poly.center_on(candidate);
            is_free(&tree, poly)
        });
        let Some(offset) = hit else {
            tracing::debug!(group, candidates = spiral.len(), "group spiral exhausted");
            continue;
        };

        let pos = spiral.consumed() + offset;
        let anchor = spiral.points()[pos];
        insert(&mut tree, poly);
        spiral.erase(pos);
        anchors[group] = Some(anchor);
        placed[group] = true;
        placed_count += 1;
        tracing::debug!(group, ?anchor, position = pos, "anchored group");
    }

    for &Dependency { src, dst } in dependencies {
        let Some(anchor) = anchors[src] else {
            tracing::debug!(src, dst, "group has no anchor, dependent left unplaced");
            continue;
        };

        let poly = &mut polys[dst];
        let mut cursor = spirals[src].cursor();
        let mut tested = 0usize;
        while let Some(candidate) = cursor.peek() {
            if tree.point_intersects(candidate) {
                cursor.erase();
                continue;
            }
            tested += 1;

            let theta = candidate.angle_to(anchor);
            if let Some(boundary) = poly.closest_isect(theta) {
                poly.move_by(candidate - boundary);
                if is_free(&tree, poly) {
                    insert(&mut tree, poly);
                    placed[dst] = true;
                    placed_count += 1;
                    break;
                }
            }
            cursor.advance();
        }

        if placed[dst] {
            tracing::debug!(src, dst, tested, "placed dependent");
        } else {
            tracing::debug!(src, dst, tested, "dependent spiral exhausted");
        }
    }

    Ok(Cluster {
        placed_count,
        placed,
        anchors,
        spirals,
    })
}

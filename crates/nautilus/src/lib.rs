#![forbid(unsafe_code)]

//! Headless placement of rectangle-cluster footprints.
//!
//! Every group is anchored somewhere on an area-weighted sector of a circle centered on the
//! board, and its dependents are pushed outward along the group's spiral until they land on a
//! collision-free spot. The crate only computes translation vectors; drawing them is up to the
//! caller.

pub mod error;
pub mod geom;
pub mod place;
pub mod polygon;
pub mod qtree;
pub mod sector;
pub mod spiral;

pub use error::{Error, Result};
pub use geom::{Point, Rect, Segment, Size};
pub use place::{Cluster, Dependency, PlaceOptions, Placement, pack, place, place_with_options};
pub use polygon::{ExtendedPolygon, Polygon};
pub use qtree::QuadTree;
pub use sector::{Circle, Sector, SectorPoints};
pub use spiral::{Cursor, Spiral, SpiralOptions};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("dependency list is empty")]
    EmptyDependencies,
    #[error("polygon {index} has no rectangles")]
    EmptyPolygon { index: usize },
    #[error("expected {expected} tolerances (one per polygon), got {actual}")]
    ToleranceCount { expected: usize, actual: usize },
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidBoard { width: f64, height: f64 },
    #[error("dependency references polygon {index}, but only {len} polygons were given")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("polygon {index} depends on itself")]
    SelfDependency { index: usize },
    #[error("polygon {index} is a group and cannot also be placed as a dependent")]
    DependentIsGroup { index: usize },
    #[error("polygon {index} is listed as a dependent more than once")]
    DuplicateDependent { index: usize },
    #[error("group {group} never appears as a dependency source")]
    MissingGroup { group: usize },
    #[error("group {group} has no footprint area")]
    ZeroAreaGroup { group: usize },
    #[error("outline trace did not close after {steps} steps")]
    UnclosedOutline { steps: usize },
    #[error("outline encloses no area (signed area {area})")]
    DegenerateOutline { area: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

//! Types shared by endpoint and pathline records

// crate modules
use crate::error::Error;

// tracktools modules
use tracktools_format::f;

/// Direction particles were tracked in
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TrackingDirection {
    /// Downstream from the release point
    #[default]
    Forward,
    /// Upstream from the release point, e.g. capture zones of wells
    Backward,
}

impl TryFrom<i64> for TrackingDirection {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Forward),
            2 => Ok(Self::Backward),
            _ => Err(Error::InvalidHeaderLine {
                name: "tracking direction".to_string(),
                line: 2,
                content: f!("{value}"),
            }),
        }
    }
}

/// Simple coordinate triplet
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    /// x coordinate
    pub x: f64,
    /// y coordinate
    pub y: f64,
    /// z coordinate
    pub z: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in the horizontal plane
    pub fn planar_distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Position of a particle in the model grid
///
/// `node` and `layer` are 0-based.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Location {
    /// Cell number
    pub node: usize,
    /// Layer number
    pub layer: usize,
    /// Local coordinates within the cell, each in `[0, 1]`
    pub local: Point,
    /// Model coordinates
    pub global: Point,
    /// Zone of the cell
    pub zone: i32,
    /// Cell face the particle sits on, 0 for the interior
    pub face: i32,
}

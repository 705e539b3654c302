// standard library
use std::collections::BTreeMap;
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::particle::{Point, TrackingDirection};
use crate::reader::read_pathline_file;

// external crates
use serde::{Deserialize, Serialize};

/// Which pair of consecutive pathline samples gives the particle velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocitySampling {
    /// Samples `first` and `first + 1` of the time-sorted pathline
    Samples {
        /// Index of the first sample
        first: usize,
    },
    /// First sample at or after `reference`, and the one after it
    AfterTime {
        /// Tracking time to align on
        reference: f64,
    },
}

impl Default for VelocitySampling {
    fn default() -> Self {
        Self::Samples { first: 1 }
    }
}

/// Single sample of a pathline
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PathlinePoint {
    /// 0-based cell
    pub node: usize,
    /// Model coordinates
    pub position: Point,
    /// Tracking time
    pub time: f64,
    /// Local coordinates within the cell
    pub local: Point,
    /// 0-based layer
    pub layer: usize,
    /// Stress period
    pub stress_period: i32,
    /// Time step
    pub time_step: i32,
}

/// Time-ordered samples of a single particle
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Pathline {
    /// 0-based particle id, matching [Endpoint](crate::Endpoint)
    pub particle_id: usize,
    /// 0-based particle group
    pub group: usize,
    /// 1-based particle id within its group
    pub local_id: usize,
    /// Samples sorted by time, ties kept in file order
    pub points: Vec<PathlinePoint>,
}

impl Pathline {
    /// Pair of samples used for the velocity, if the pathline is long enough
    pub fn sample_pair(
        &self,
        sampling: VelocitySampling,
    ) -> Option<(&PathlinePoint, &PathlinePoint)> {
        let first = match sampling {
            VelocitySampling::Samples { first } => first,
            VelocitySampling::AfterTime { reference } => {
                self.points.iter().position(|p| p.time >= reference)?
            }
        };
        Some((self.points.get(first)?, self.points.get(first + 1)?))
    }

    /// Planar speed between the sampled pair
    ///
    /// `None` when there are not enough samples, or no time elapsed between
    /// them.
    pub fn velocity(&self, sampling: VelocitySampling) -> Option<f64> {
        let (a, b) = self.sample_pair(sampling)?;
        let dt = b.time - a.time;
        if dt.is_nan() || dt <= 0.0 {
            return None;
        }
        Some(a.position.planar_distance(&b.position) / dt)
    }

    /// Stable sort of the samples by tracking time
    pub(crate) fn sort_points(&mut self) {
        self.points.sort_by(|a, b| a.time.total_cmp(&b.time));
    }
}

/// Pathline file header
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PathlineHeader {
    /// File version and revision, e.g. `(7, 2)`
    pub version: (u32, u32),
    /// Tracking direction of the run
    pub direction: TrackingDirection,
    /// Reference time of the simulation
    pub reference_time: f64,
    /// Model x origin
    pub x_origin: f64,
    /// Model y origin
    pub y_origin: f64,
    /// Grid rotation angle in degrees
    pub rotation: f64,
}

/// Content of a MODPATH 7 pathline file
///
/// Pathlines are sorted by particle id, and segments written separately for
/// the same particle are merged.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PathlineFile {
    /// Header data
    pub header: PathlineHeader,
    /// One pathline per particle
    pub pathlines: Vec<Pathline>,
}

impl PathlineFile {
    /// Read a pathline file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_pathline_file(path)
    }

    /// Pathline of a particle
    pub fn get(&self, particle_id: usize) -> Option<&Pathline> {
        self.pathlines
            .binary_search_by_key(&particle_id, |p| p.particle_id)
            .ok()
            .map(|i| &self.pathlines[i])
    }

    /// Velocity of every particle, keyed by particle id
    pub fn velocities(&self, sampling: VelocitySampling) -> BTreeMap<usize, Option<f64>> {
        self.pathlines
            .iter()
            .map(|p| (p.particle_id, p.velocity(sampling)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pathline(samples: &[(f64, f64, f64)]) -> Pathline {
        Pathline {
            points: samples
                .iter()
                .map(|&(time, x, y)| PathlinePoint {
                    time,
                    position: Point::new(x, y, 0.0),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn samples_strategy() {
        let p = pathline(&[(0.0, 0.0, 0.0), (1.0, 3.0, 4.0), (3.0, 9.0, 12.0)]);
        assert_eq!(p.velocity(VelocitySampling::Samples { first: 0 }), Some(5.0));
        assert_eq!(p.velocity(VelocitySampling::Samples { first: 1 }), Some(5.0));
        assert_eq!(p.velocity(VelocitySampling::Samples { first: 2 }), None);
    }

    #[test]
    fn after_time_strategy() {
        let p = pathline(&[(0.0, 0.0, 0.0), (1.0, 0.0, 1.0), (2.0, 0.0, 4.0)]);
        let sampling = VelocitySampling::AfterTime { reference: 0.5 };
        assert_eq!(p.velocity(sampling), Some(3.0));
        let sampling = VelocitySampling::AfterTime { reference: 5.0 };
        assert_eq!(p.velocity(sampling), None);
    }

    #[test]
    fn zero_elapsed_time() {
        let p = pathline(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0), (1.0, 2.0, 0.0)]);
        assert_eq!(p.velocity(VelocitySampling::Samples { first: 1 }), None);
    }

    #[test]
    fn sort_is_stable() {
        let mut p = pathline(&[(2.0, 0.0, 0.0), (1.0, 1.0, 0.0), (1.0, 2.0, 0.0)]);
        p.sort_points();
        let xs: Vec<f64> = p.points.iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 0.0]);
    }
}

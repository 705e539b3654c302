// standard library
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::particle::{Location, TrackingDirection};
use crate::reader::read_endpoint_file;

// tracktools modules
use tracktools_format::{f, NumFormat};

/// Final state of a single particle
///
/// Particle ids, groups, cells and layers are all 0-based.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Endpoint {
    /// Unique particle id across the whole simulation
    pub particle_id: usize,
    /// Particle group index
    pub group: usize,
    /// 1-based particle id within its group
    pub local_id: usize,
    /// Termination status code (e.g. 2 for normal termination)
    pub status: i32,
    /// Release time
    pub initial_time: f64,
    /// Termination time
    pub final_time: f64,
    /// Release position
    pub initial: Location,
    /// Termination position
    pub terminal: Location,
}

impl Endpoint {
    /// Cell the particle terminated in
    pub fn node(&self) -> usize {
        self.terminal.node
    }

    /// Time between release and termination
    pub fn travel_time(&self) -> f64 {
        (self.final_time - self.initial_time).abs()
    }
}

/// Endpoint file header
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EndpointHeader {
    /// File version and revision, e.g. `(7, 2)`
    pub version: (u32, u32),
    /// Tracking direction of the run
    pub direction: TrackingDirection,
    /// Number of particles
    pub total_count: usize,
    /// Number of released particles
    pub release_count: usize,
    /// Largest particle id
    pub max_id: usize,
    /// Reference time of the simulation
    pub reference_time: f64,
    /// Model x origin
    pub x_origin: f64,
    /// Model y origin
    pub y_origin: f64,
    /// Grid rotation angle in degrees
    pub rotation: f64,
    /// Number of particles per status code
    pub status_counts: Vec<usize>,
    /// Particle group names in group order
    pub groups: Vec<String>,
}

/// Content of a MODPATH 7 endpoint file
///
/// Endpoints are sorted by particle id.
///
/// ```rust, no_run
/// # use tracktools_modpath::EndpointFile;
/// let endpoints = EndpointFile::from_file("path/to/mp.mpend").unwrap();
/// for e in &endpoints.endpoints {
///     println!("particle {} ended in cell {}", e.particle_id, e.node());
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EndpointFile {
    /// Header data
    pub header: EndpointHeader,
    /// One endpoint per particle
    pub endpoints: Vec<Endpoint>,
}

impl EndpointFile {
    /// Read an endpoint file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_endpoint_file(path)
    }

    /// Name given to a particle group in the header
    pub fn group_name(&self, group: usize) -> Option<&str> {
        self.header.groups.get(group).map(|g| g.as_str())
    }

    /// Distinct particle groups of the endpoints, ascending
    pub fn groups(&self) -> Vec<usize> {
        let mut groups: Vec<usize> = self.endpoints.iter().map(|e| e.group).collect();
        groups.sort();
        groups.dedup();
        groups
    }

    /// Number of endpoints
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// True if there are no endpoints
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl std::fmt::Display for EndpointFile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let h = &self.header;
        let mut s = "EndpointFile {\n".to_string();
        s += &f!("    version: {}.{}\n", h.version.0, h.version.1);
        s += &f!("    direction: {:?}\n", h.direction);
        s += &f!("    reference time: {}\n", h.reference_time.sci(5, 2));
        s += &f!("    particles: {}\n", self.endpoints.len());
        s += &f!("    groups: {:?}\n", h.groups);
        s += "}";
        write!(f, "{}", s)
    }
}

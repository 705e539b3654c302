//! Particles enriched with everything the mixing ratio needs

// crate modules
use crate::options::VelocityWeighting;

/// Residual category for everything that is not attributed to a source
pub const OTHERS: &str = "OTHERS";

/// Reported category of a particle
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Particle ended in a source cell, reported under this name
    Source(String),
    /// Particle ended anywhere else
    Others,
}

impl Category {
    /// Column name of the category
    pub fn name(&self) -> &str {
        match self {
            Self::Source(name) => name,
            Self::Others => OTHERS,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Single particle with its source classification, fraction and velocity
///
/// Built by [TrackingAnalyzer::particles()](crate::TrackingAnalyzer::particles).
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedParticle {
    /// 0-based particle id
    pub particle_id: usize,
    /// 0-based particle group
    pub group: usize,
    /// Name of the particle group
    pub group_name: String,
    /// 0-based terminal cell
    pub node: usize,
    /// True if the terminal cell holds a source boundary record
    pub ends_in_source: bool,
    /// Identity of the dominant source record, when resolved
    pub identity: Option<String>,
    /// Reported category
    pub category: Category,
    /// Net source flux into the terminal cell
    pub source_flux: f64,
    /// Inflow from neighbouring cells into the terminal cell
    pub cell_inflows: f64,
    /// Mixing fraction in `[0, 1]`
    pub alpha: f64,
    /// Velocity from the pathline, if defined
    pub velocity: Option<f64>,
}

impl TrackedParticle {
    /// Weight in the group average, `None` excludes the particle
    pub fn weight(&self, velocity: VelocityWeighting) -> Option<f64> {
        match velocity {
            VelocityWeighting::Off => Some(1.0),
            VelocityWeighting::On => self.velocity,
        }
    }
}

/// Share of the source in the total inflow of a cell
///
/// Negative source flux (a gaining reach) counts as no source inflow, and
/// a cell with no inflow at all gives 0.
///
/// ```rust
/// # use tracktools_mixing::mixing_fraction;
/// assert_eq!(mixing_fraction(1.0, 3.0), 0.25);
/// assert_eq!(mixing_fraction(0.0, 0.0), 0.0);
/// assert_eq!(mixing_fraction(-2.0, 3.0), 0.0);
/// ```
pub fn mixing_fraction(source_flux: f64, cell_inflows: f64) -> f64 {
    let source = source_flux.max(0.0);
    let total = source + cell_inflows.max(0.0);
    if total > 0.0 {
        source / total
    } else {
        0.0
    }
}

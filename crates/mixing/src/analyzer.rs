//! Source identification and the group mixing ratio calculation

// standard library
use std::collections::{BTreeMap, HashMap};

// crate modules
use crate::error::{Error, Result};
use crate::names::NameTable;
use crate::options::{MixingOptions, SourceResolution, VelocityWeighting, Weighting};
use crate::particle::{mixing_fraction, Category, TrackedParticle, OTHERS};
use crate::table::MixingTable;

// tracktools modules
use tracktools_budget::{BoundaryFluxes, BoundaryRecord, FlowConnectivity};
use tracktools_modpath::{EndpointFile, PathlineFile};

// external crates
use log::{debug, warn};

/// Mixing ratios of particle groups from tracking and budget results
///
/// Holds everything loaded from one simulation. Only the endpoints and the
/// source boundary fluxes are always needed, the rest depends on the
/// [MixingOptions] used:
///
/// | Option                        | Requires                                  |
/// | ----------------------------- | ----------------------------------------- |
/// | `Weighting::Budget`           | [with_connectivity()](Self::with_connectivity) |
/// | `VelocityWeighting::On`       | [with_pathlines()](Self::with_pathlines)  |
/// | `Detailed` or `Umbrella`      | [with_identity_names()](Self::with_identity_names) |
///
/// Without [with_group_names()](Self::with_group_names) groups are named by
/// their 0-based index.
///
/// ```rust, no_run
/// # use tracktools_budget::{CellBudget, FlowConnectivity};
/// # use tracktools_mixing::{MixingOptions, NameTable, TrackingAnalyzer};
/// # use tracktools_modpath::{EndpointFile, PathlineFile};
/// # let ia: Vec<usize> = Vec::new();
/// let budget = CellBudget::from_file("ml.cbc").unwrap();
/// let connectivity = FlowConnectivity::new(ia, budget.flowja(0).unwrap()).unwrap();
///
/// let analyzer = TrackingAnalyzer::new(
///     EndpointFile::from_file("mp.mpend").unwrap(),
///     budget.boundary_fluxes("RIV", 0).unwrap(),
/// )
/// .with_pathlines(PathlineFile::from_file("mp.mppth").unwrap())
/// .with_connectivity(connectivity)
/// .with_group_names(NameTable::from_csv("pgroups.csv").unwrap());
///
/// let table = analyzer.compute_mixing_ratio(&MixingOptions::default()).unwrap();
/// println!("{table}");
/// ```
#[derive(Debug, Clone)]
pub struct TrackingAnalyzer {
    endpoints: EndpointFile,
    sources: BoundaryFluxes,
    pathlines: Option<PathlineFile>,
    connectivity: Option<FlowConnectivity>,
    group_names: Option<NameTable>,
    identity_names: Option<NameTable>,
}

impl TrackingAnalyzer {
    /// Start from the particle endpoints and the source boundary fluxes
    pub fn new(endpoints: EndpointFile, sources: BoundaryFluxes) -> Self {
        Self {
            endpoints,
            sources,
            pathlines: None,
            connectivity: None,
            group_names: None,
            identity_names: None,
        }
    }

    /// Pathlines for particle velocities
    pub fn with_pathlines(mut self, pathlines: PathlineFile) -> Self {
        self.pathlines = Some(pathlines);
        self
    }

    /// Inter-cell fluxes for the budget mixing fraction
    pub fn with_connectivity(mut self, connectivity: FlowConnectivity) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    /// Names of the particle groups
    pub fn with_group_names(mut self, names: NameTable) -> Self {
        self.group_names = Some(names);
        self
    }

    /// Names of the source identities
    pub fn with_identity_names(mut self, names: NameTable) -> Self {
        self.identity_names = Some(names);
        self
    }

    /// Source categories in reporting order, excluding OTHERS
    pub fn categories(&self, options: &MixingOptions) -> Result<Vec<String>> {
        options.resolution.categories(self.identity_names.as_ref())
    }

    /// Every particle classified and weighted for the given options
    ///
    /// Fails on anything that would otherwise drop a particle silently, e.g.
    /// a group or identity without a name.
    pub fn particles(&self, options: &MixingOptions) -> Result<Vec<TrackedParticle>> {
        let connectivity = match options.weighting {
            Weighting::Budget => Some(
                self.connectivity
                    .as_ref()
                    .ok_or(Error::MissingConnectivity)?,
            ),
            Weighting::Indicator => None,
        };
        let pathlines = match options.velocity {
            VelocityWeighting::On => Some(self.pathlines.as_ref().ok_or(Error::MissingPathlines)?),
            VelocityWeighting::Off => None,
        };
        let identities = if options.resolution.needs_identities() {
            Some(
                self.identity_names
                    .as_ref()
                    .ok_or(Error::MissingIdentityNames)?,
            )
        } else {
            None
        };

        let mut n_clamped = 0;
        let mut n_undefined = 0;
        let mut n_missing = 0;
        let mut particles = Vec::with_capacity(self.endpoints.len());

        for endpoint in &self.endpoints.endpoints {
            let node = endpoint.node();
            let ends_in_source = self.sources.contains(node);

            // identities are resolved for every particle ending in a source cell
            let identity = match (self.sources.dominant(node), identities) {
                (Some(record), Some(names)) => {
                    Some(self.identity(record, &options.identity_field, names)?)
                }
                _ => None,
            };

            let category = match (&identity, &options.resolution) {
                _ if !ends_in_source => Category::Others,
                (_, SourceResolution::Aggregate { name }) => Category::Source(name.clone()),
                (Some(identity), SourceResolution::Detailed) => Category::Source(identity.clone()),
                (Some(identity), SourceResolution::Umbrella(map)) => {
                    Category::Source(map.category_of(identity).to_string())
                }
                (None, _) => Category::Others,
            };

            let source_flux = self.sources.total_flux(node);
            if source_flux < 0.0 {
                n_clamped += 1;
            }

            let cell_inflows = match (ends_in_source, connectivity) {
                (true, Some(connectivity)) => connectivity.cell_inflows(node)?,
                _ => 0.0,
            };

            let alpha = match (ends_in_source, options.weighting) {
                (false, _) => 0.0,
                (true, Weighting::Indicator) => 1.0,
                (true, Weighting::Budget) => mixing_fraction(source_flux, cell_inflows),
            };

            let velocity = match pathlines {
                Some(pathlines) => match pathlines.get(endpoint.particle_id) {
                    Some(pathline) => {
                        let velocity = pathline.velocity(options.sampling);
                        if velocity.is_none() {
                            debug!("Undefined velocity for particle {}", endpoint.particle_id);
                            n_undefined += 1;
                        }
                        velocity
                    }
                    None => {
                        debug!("No pathline for particle {}", endpoint.particle_id);
                        n_missing += 1;
                        None
                    }
                },
                None => None,
            };

            particles.push(TrackedParticle {
                particle_id: endpoint.particle_id,
                group: endpoint.group,
                group_name: self.group_name(endpoint.group)?,
                node,
                ends_in_source,
                identity,
                category,
                source_flux,
                cell_inflows,
                alpha,
                velocity,
            });
        }

        if n_clamped > 0 {
            warn!("Negative source flux treated as 0 for {n_clamped} particles");
        }
        if n_undefined > 0 {
            warn!("Undefined velocity for {n_undefined} particles, excluded from weighting");
        }
        if n_missing > 0 {
            warn!("No pathline for {n_missing} particles, excluded from weighting");
        }

        debug!("Classified {} particles", particles.len());
        Ok(particles)
    }

    /// Mixing ratio of every particle group to every category
    ///
    /// Rows are group names in ascending order, columns are the source
    /// categories followed by OTHERS.
    pub fn compute_mixing_ratio(&self, options: &MixingOptions) -> Result<MixingTable> {
        let categories = self.categories(options)?;
        let particles = self.particles(options)?;
        aggregate(&particles, &categories, options.velocity)
    }

    fn group_name(&self, group: usize) -> Result<String> {
        match &self.group_names {
            Some(names) => names
                .get(group as i64)
                .map(|n| n.to_string())
                .ok_or(Error::UnknownGroup(group as i64)),
            None => Ok(group.to_string()),
        }
    }

    /// Name of a source record from its identity field
    fn identity(&self, record: &BoundaryRecord, field: &str, names: &NameTable) -> Result<String> {
        let value = self.sources.aux_value(record, field)?;
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(Error::InvalidIdentity {
                field: field.to_string(),
                value,
            });
        }

        let id = value as i64;
        names
            .get(id)
            .map(|n| n.to_string())
            .ok_or(Error::UnknownIdentity(id))
    }
}

/// Weighted group averages of the particle mixing fractions
///
/// For every group the ratio to a source category is `Σ(α·w)` over the
/// particles in that category divided by `Σw` over every particle of the
/// group. OTHERS closes each row to 1. A group where every particle has an
/// undefined weight gets a row of NaN.
pub fn aggregate(
    particles: &[TrackedParticle],
    categories: &[String],
    velocity: VelocityWeighting,
) -> Result<MixingTable> {
    let index: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    // total weight and contribution per category
    let mut sums: BTreeMap<&str, (f64, Vec<f64>)> = BTreeMap::new();

    for particle in particles {
        let (weight, contributions) = sums
            .entry(particle.group_name.as_str())
            .or_insert_with(|| (0.0, vec![0.0; categories.len()]));

        let Some(w) = particle.weight(velocity) else {
            continue;
        };
        *weight += w;

        if let Category::Source(name) = &particle.category {
            let i = index
                .get(name.as_str())
                .ok_or_else(|| Error::UnknownCategory(name.clone()))?;
            contributions[*i] += particle.alpha * w;
        }
    }

    let mut groups = Vec::with_capacity(sums.len());
    let mut values = Vec::with_capacity(sums.len());
    for (group, (weight, contributions)) in sums {
        let mut row: Vec<f64> = if weight > 0.0 {
            contributions.iter().map(|c| c / weight).collect()
        } else {
            vec![f64::NAN; categories.len()]
        };
        let others = 1.0 - row.iter().sum::<f64>();
        row.push(others);

        groups.push(group.to_string());
        values.push(row);
    }

    let mut columns = categories.to_vec();
    columns.push(OTHERS.to_string());
    Ok(MixingTable::new(groups, columns, values))
}

//! Options selecting between the variants of the mixing ratio calculation

// standard library
use std::collections::HashSet;

// crate modules
use crate::error::{Error, Result};
use crate::names::NameTable;
use crate::particle::OTHERS;

// tracktools modules
use tracktools_modpath::VelocitySampling;

// external crates
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Mixing fraction assigned to each particle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// 1 if the particle ends in a source cell, 0 otherwise
    Indicator,
    /// Share of the source flux in the total inflow of the terminal cell
    #[default]
    Budget,
}

/// Weight given to each particle in the group average
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityWeighting {
    /// Every particle counts the same
    Off,
    /// Particles are weighted by their velocity
    #[default]
    On,
}

/// Named set of source identities reported together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Umbrella {
    /// Reported category
    pub name: String,
    /// Identity names covered by the umbrella
    pub members: Vec<String>,
}

/// Umbrellas over source identities, everything else goes to `complement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmbrellaMap {
    /// Umbrellas in reporting order
    pub umbrellas: Vec<Umbrella>,
    /// Category for identities under no umbrella
    pub complement: String,
}

impl UmbrellaMap {
    /// Category an identity is reported under
    pub fn category_of(&self, identity: &str) -> &str {
        self.umbrellas
            .iter()
            .find(|u| u.members.iter().any(|m| m == identity))
            .map(|u| u.name.as_str())
            .unwrap_or(self.complement.as_str())
    }

    /// Umbrella names followed by the complement
    pub fn categories(&self) -> Vec<String> {
        self.umbrellas
            .iter()
            .map(|u| u.name.clone())
            .chain(std::iter::once(self.complement.clone()))
            .collect()
    }

    /// Check the map against the known identities
    pub fn validate(&self, identities: &NameTable) -> Result<()> {
        let mut seen = HashSet::new();
        for member in self.umbrellas.iter().flat_map(|u| &u.members) {
            if !identities.contains_name(member) {
                return Err(Error::UnknownIdentityName(member.clone()));
            }
            if !seen.insert(member) {
                return Err(Error::OverlappingUmbrellas(member.clone()));
            }
        }
        unique_categories(&self.categories())
    }
}

/// How source particles are split into reported categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceResolution {
    /// A single category for the whole source domain
    Aggregate {
        /// Reported category, e.g. `river`
        name: String,
    },
    /// One category per source identity name
    Detailed,
    /// Identities grouped under umbrella names
    Umbrella(UmbrellaMap),
}

impl Default for SourceResolution {
    fn default() -> Self {
        Self::Aggregate {
            name: "river".to_string(),
        }
    }
}

impl SourceResolution {
    /// True if particles need their dominant source identity resolved
    pub fn needs_identities(&self) -> bool {
        !matches!(self, Self::Aggregate { .. })
    }

    /// Source categories in reporting order, excluding OTHERS
    pub fn categories(&self, identities: Option<&NameTable>) -> Result<Vec<String>> {
        let categories = match self {
            Self::Aggregate { name } => vec![name.clone()],
            Self::Detailed => identities
                .ok_or(Error::MissingIdentityNames)?
                .names()
                .unique()
                .map(|n| n.to_string())
                .collect(),
            Self::Umbrella(map) => {
                map.validate(identities.ok_or(Error::MissingIdentityNames)?)?;
                map.categories()
            }
        };
        unique_categories(&categories)?;
        Ok(categories)
    }
}

/// Every option of the mixing ratio calculation
///
/// Missing fields take their default when deserialised, so an empty JSON
/// object gives budget weighted, velocity weighted ratios to a single
/// `river` category.
///
/// ```rust
/// # use tracktools_mixing::{MixingOptions, Weighting, VelocityWeighting};
/// let options = MixingOptions {
///     weighting: Weighting::Indicator,
///     velocity: VelocityWeighting::Off,
///     ..Default::default()
/// };
/// assert_eq!(options.identity_field, "FID");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixingOptions {
    /// Particle mixing fraction
    pub weighting: Weighting,
    /// Particle weight
    pub velocity: VelocityWeighting,
    /// Pathline samples used for the velocity
    pub sampling: VelocitySampling,
    /// Reported source categories
    pub resolution: SourceResolution,
    /// Auxiliary variable of the source package holding the identity
    pub identity_field: String,
}

impl Default for MixingOptions {
    fn default() -> Self {
        Self {
            weighting: Weighting::default(),
            velocity: VelocityWeighting::default(),
            sampling: VelocitySampling::default(),
            resolution: SourceResolution::default(),
            identity_field: "FID".to_string(),
        }
    }
}

/// Fail on repeated names, including any clash with OTHERS
fn unique_categories(categories: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    seen.insert(OTHERS);
    for category in categories {
        if !seen.insert(category.as_str()) {
            return Err(Error::DuplicateCategory(category.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identities() -> NameTable {
        NameTable::from_pairs([(1, "north"), (2, "south"), (3, "canal"), (4, "north")]).unwrap()
    }

    fn umbrella_map(members: &[&str], complement: &str) -> UmbrellaMap {
        UmbrellaMap {
            umbrellas: vec![Umbrella {
                name: "main".to_string(),
                members: members.iter().map(|m| m.to_string()).collect(),
            }],
            complement: complement.to_string(),
        }
    }

    #[test]
    fn detailed_categories_are_unique() {
        let categories = SourceResolution::Detailed
            .categories(Some(&identities()))
            .unwrap();
        assert_eq!(categories, vec!["north", "south", "canal"]);
    }

    #[test]
    fn umbrella_categories() {
        let map = umbrella_map(&["north", "south"], "minor");
        assert_eq!(map.category_of("south"), "main");
        assert_eq!(map.category_of("canal"), "minor");

        let resolution = SourceResolution::Umbrella(map);
        let categories = resolution.categories(Some(&identities())).unwrap();
        assert_eq!(categories, vec!["main", "minor"]);
    }

    #[test]
    fn invalid_umbrellas() {
        let resolution = SourceResolution::Umbrella(umbrella_map(&["east"], "minor"));
        assert!(matches!(
            resolution.categories(Some(&identities())),
            Err(Error::UnknownIdentityName(_))
        ));

        let resolution = SourceResolution::Umbrella(umbrella_map(&["north", "north"], "minor"));
        assert!(matches!(
            resolution.categories(Some(&identities())),
            Err(Error::OverlappingUmbrellas(_))
        ));

        let resolution = SourceResolution::Umbrella(umbrella_map(&["north"], "main"));
        assert!(matches!(
            resolution.categories(Some(&identities())),
            Err(Error::DuplicateCategory(_))
        ));

        let resolution = SourceResolution::Umbrella(umbrella_map(&["north"], "minor"));
        assert!(matches!(
            resolution.categories(None),
            Err(Error::MissingIdentityNames)
        ));
    }

    #[test]
    fn others_is_reserved() {
        let resolution = SourceResolution::Aggregate {
            name: OTHERS.to_string(),
        };
        assert!(resolution.categories(None).is_err());
    }
}

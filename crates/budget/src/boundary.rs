//! Boundary package fluxes indexed by cell

// standard library
use std::collections::BTreeMap;

// crate modules
use crate::budget::ListData;
use crate::error::{Error, Result};

/// Single boundary entry of a list record
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRecord {
    /// 0-based model cell
    pub node: usize,
    /// 1-based bound number within the package
    pub bound: i32,
    /// Flux, positive into the model
    pub q: f64,
    /// Auxiliary values in the order of [BoundaryFluxes::aux_names]
    pub aux: Vec<f64>,
}

/// Boundary fluxes for a single budget term (e.g. `RIV`)
///
/// Records keep file order, and are also indexed by node since one cell may
/// hold several boundary entries.
#[derive(Debug, Clone, Default)]
pub struct BoundaryFluxes {
    /// Budget term
    pub text: String,
    /// Names of the auxiliary values
    pub aux_names: Vec<String>,
    /// Every record in file order
    pub records: Vec<BoundaryRecord>,
    by_node: BTreeMap<usize, Vec<usize>>,
}

impl BoundaryFluxes {
    /// Build from records that already use 0-based nodes
    pub fn new(text: &str, aux_names: Vec<String>, records: Vec<BoundaryRecord>) -> Self {
        let mut by_node: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, record) in records.iter().enumerate() {
            by_node.entry(record.node).or_default().push(i);
        }

        Self {
            text: text.to_string(),
            aux_names,
            records,
            by_node,
        }
    }

    /// Build from a list record, converting 1-based nodes to 0-based
    pub fn from_list(text: &str, list: &ListData) -> Result<Self> {
        let records = list
            .entries
            .iter()
            .map(|entry| {
                if entry.id1 < 1 {
                    return Err(Error::InvalidNode {
                        text: text.to_string(),
                        value: entry.id1,
                    });
                }
                Ok(BoundaryRecord {
                    node: (entry.id1 - 1) as usize,
                    bound: entry.id2,
                    q: entry.q,
                    aux: entry.aux.clone(),
                })
            })
            .collect::<Result<Vec<BoundaryRecord>>>()?;

        Ok(Self::new(text, list.aux_names.clone(), records))
    }

    /// True if any record sits on the node
    pub fn contains(&self, node: usize) -> bool {
        self.by_node.contains_key(&node)
    }

    /// Nodes with at least one record, in ascending order
    pub fn nodes(&self) -> Vec<usize> {
        self.by_node.keys().copied().collect()
    }

    /// Records on a node in file order, empty if there are none
    pub fn records_at(&self, node: usize) -> Vec<&BoundaryRecord> {
        self.by_node
            .get(&node)
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Net flux of every record on the node, 0.0 where there are none
    pub fn total_flux(&self, node: usize) -> f64 {
        self.records_at(node).iter().map(|r| r.q).sum()
    }

    /// Record with the largest flux magnitude on a node
    ///
    /// Ties keep the first record in file order.
    pub fn dominant(&self, node: usize) -> Option<&BoundaryRecord> {
        let mut dominant: Option<&BoundaryRecord> = None;
        for record in self.records_at(node) {
            match dominant {
                Some(d) if record.q.abs() <= d.q.abs() => (),
                _ => dominant = Some(record),
            }
        }
        dominant
    }

    /// Position of an auxiliary variable, ignoring case
    pub fn aux_index(&self, name: &str) -> Result<usize> {
        self.aux_names
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| Error::MissingAuxiliary {
                text: self.text.clone(),
                name: name.to_string(),
            })
    }

    /// Auxiliary value of a record
    pub fn aux_value(&self, record: &BoundaryRecord, name: &str) -> Result<f64> {
        let index = self.aux_index(name)?;
        record
            .aux
            .get(index)
            .copied()
            .ok_or_else(|| Error::MissingAuxiliary {
                text: self.text.clone(),
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(node: usize, q: f64, fid: f64) -> BoundaryRecord {
        BoundaryRecord {
            node,
            bound: 1,
            q,
            aux: vec![fid],
        }
    }

    #[test]
    fn dominant_uses_magnitude() {
        let fluxes = BoundaryFluxes::new(
            "RIV",
            vec!["FID".to_string()],
            vec![record(4, 2.0, 1.0), record(4, -5.0, 2.0), record(4, 3.0, 3.0)],
        );
        let dominant = fluxes.dominant(4).unwrap();
        assert_eq!(fluxes.aux_value(dominant, "fid").unwrap(), 2.0);
        assert_eq!(fluxes.total_flux(4), 0.0);
    }

    #[test]
    fn dominant_ties_keep_file_order() {
        let fluxes = BoundaryFluxes::new(
            "RIV",
            vec!["FID".to_string()],
            vec![record(0, 1.0, 7.0), record(0, -1.0, 8.0)],
        );
        assert_eq!(fluxes.dominant(0).unwrap().aux[0], 7.0);
        assert!(fluxes.dominant(1).is_none());
    }

    #[test]
    fn missing_auxiliary() {
        let fluxes = BoundaryFluxes::new("RIV", vec![], vec![record(0, 1.0, 1.0)]);
        assert!(matches!(
            fluxes.aux_index("FID"),
            Err(Error::MissingAuxiliary { .. })
        ));
    }
}

//! Compressed cell connectivity combined with inter-cell fluxes

// crate modules
use crate::error::{Error, Result};

// tracktools modules
use tracktools_format::f;

/// Inter-cell fluxes laid out by the compressed connectivity offsets
///
/// The fluxes of cell `n` occupy `flowja[ia[n]..ia[n + 1]]`, with the first
/// entry of every range being the cell itself. Both `ia` and the positions
/// in `flowja` are 0-based.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowConnectivity {
    ia: Vec<usize>,
    flowja: Vec<f64>,
}

impl FlowConnectivity {
    /// Combine 0-based offsets with the matching `FLOW-JA-FACE` values
    pub fn new(ia: Vec<usize>, flowja: Vec<f64>) -> Result<Self> {
        if ia.is_empty() {
            return Err(Error::InconsistentConnectivity(
                "no connectivity offsets".to_string(),
            ));
        }

        if ia.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::InconsistentConnectivity(
                "offsets are not monotonic".to_string(),
            ));
        }

        let last = ia[ia.len() - 1];
        if last != flowja.len() {
            return Err(Error::InconsistentConnectivity(f!(
                "offsets end at {last} but there are {} fluxes",
                flowja.len()
            )));
        }

        Ok(Self { ia, flowja })
    }

    /// Number of cells
    pub fn n_cells(&self) -> usize {
        self.ia.len() - 1
    }

    /// Fluxes between the cell and its neighbours, excluding the cell itself
    pub fn connections(&self, node: usize) -> Result<&[f64]> {
        if node >= self.n_cells() {
            return Err(Error::NodeOutOfRange {
                node,
                n_cells: self.n_cells(),
            });
        }

        let start = self.ia[node];
        let end = self.ia[node + 1];

        // an isolated cell may not even have the diagonal entry
        if end <= start {
            Ok(&[])
        } else {
            Ok(&self.flowja[start + 1..end])
        }
    }

    /// Total flow into the cell from its neighbours
    pub fn cell_inflows(&self, node: usize) -> Result<f64> {
        Ok(self.connections(node)?.iter().filter(|q| **q > 0.0).sum())
    }

    /// Total flow out of the cell to its neighbours, as a positive value
    pub fn cell_outflows(&self, node: usize) -> Result<f64> {
        Ok(-self
            .connections(node)?
            .iter()
            .filter(|q| **q < 0.0)
            .sum::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_is_excluded() {
        // cell 1 has a large diagonal term that must not count as inflow
        let connectivity =
            FlowConnectivity::new(vec![0, 2, 5, 7], vec![0.0, -2.0, 99.0, 2.0, -1.5, 0.0, 1.5])
                .unwrap();
        assert_eq!(connectivity.n_cells(), 3);
        assert_eq!(connectivity.connections(1).unwrap(), &[2.0, -1.5]);
        assert_eq!(connectivity.cell_inflows(1).unwrap(), 2.0);
        assert_eq!(connectivity.cell_outflows(1).unwrap(), 1.5);
        assert_eq!(connectivity.cell_inflows(0).unwrap(), 0.0);
    }

    #[test]
    fn isolated_cell_has_no_connections() {
        let connectivity = FlowConnectivity::new(vec![0, 1, 1], vec![0.0]).unwrap();
        assert!(connectivity.connections(1).unwrap().is_empty());
        assert_eq!(connectivity.cell_inflows(1).unwrap(), 0.0);
    }

    #[test]
    fn out_of_range_node() {
        let connectivity = FlowConnectivity::new(vec![0, 1], vec![0.0]).unwrap();
        assert!(matches!(
            connectivity.cell_inflows(1),
            Err(Error::NodeOutOfRange { .. })
        ));
    }

    #[test]
    fn mismatched_lengths() {
        assert!(FlowConnectivity::new(vec![0, 2], vec![0.0]).is_err());
        assert!(FlowConnectivity::new(vec![0, 2, 1], vec![0.0, 1.0]).is_err());
        assert!(FlowConnectivity::new(vec![], vec![]).is_err());
    }
}

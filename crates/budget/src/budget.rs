// standard library
use std::path::Path;

// crate modules
use crate::boundary::BoundaryFluxes;
use crate::error::{Error, Result};
use crate::reader::read_budget_file;

// tracktools modules
use tracktools_format::{f, NumFormat};

/// Budget term holding the inter-cell fluxes
pub const FLOW_JA_FACE: &str = "FLOW-JA-FACE";

/// Header common to every budget record
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordHeader {
    /// Time step number
    pub kstp: i32,
    /// Stress period number
    pub kper: i32,
    /// Budget term, trimmed (e.g. `FLOW-JA-FACE`, `RIV`)
    pub text: String,
    /// First dimension
    pub ndim1: i32,
    /// Second dimension
    pub ndim2: i32,
    /// Third dimension, negative for the compact format
    pub ndim3: i32,
    /// Storage method, 0 when the compact header is absent
    pub imeth: i32,
    /// Time step length
    pub delt: f64,
    /// Time in the stress period
    pub pertim: f64,
    /// Total simulation time
    pub totim: f64,
}

impl RecordHeader {
    /// Number of values in a full array record
    ///
    /// `None` if the dimensions of a corrupt header overflow.
    pub fn array_length(&self) -> Option<usize> {
        (self.ndim1.max(0) as usize)
            .checked_mul(self.ndim2.max(0) as usize)?
            .checked_mul(self.ndim3.unsigned_abs() as usize)
    }

    /// True if the term matches, ignoring case and padding
    pub fn is_term(&self, text: &str) -> bool {
        self.text.eq_ignore_ascii_case(text.trim())
    }
}

/// Single entry of a list record
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListEntry {
    /// 1-based node in the first model
    pub id1: i32,
    /// 1-based node or bound number in the second model/package
    pub id2: i32,
    /// Flux, positive into the model
    pub q: f64,
    /// Auxiliary values in the order of [ListData::aux_names]
    pub aux: Vec<f64>,
}

/// Content of a storage method 6 record
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListData {
    /// Model name for `id1`
    pub model: String,
    /// Package name for `id1`
    pub package: String,
    /// Model name for `id2`
    pub model2: String,
    /// Package name for `id2`
    pub package2: String,
    /// Names of the auxiliary values
    pub aux_names: Vec<String>,
    /// List entries in file order
    pub entries: Vec<ListEntry>,
}

/// Values of a budget record
#[derive(Debug, Clone, PartialEq)]
pub enum RecordData {
    /// Full array (storage methods 0 and 1)
    Array(Vec<f64>),
    /// List of entries (storage method 6)
    List(ListData),
}

/// Single record of a cell-by-cell budget file
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRecord {
    /// Record header
    pub header: RecordHeader,
    /// Record values
    pub data: RecordData,
}

impl BudgetRecord {
    /// Values of a full array record
    pub fn as_array(&self) -> Result<&[f64]> {
        match &self.data {
            RecordData::Array(values) => Ok(values),
            RecordData::List(_) => Err(Error::UnexpectedLayout {
                text: self.header.text.clone(),
                expected: "a full array".to_string(),
            }),
        }
    }

    /// Content of a list record
    pub fn as_list(&self) -> Result<&ListData> {
        match &self.data {
            RecordData::List(list) => Ok(list),
            RecordData::Array(_) => Err(Error::UnexpectedLayout {
                text: self.header.text.clone(),
                expected: "a list".to_string(),
            }),
        }
    }
}

/// Content of a MODFLOW 6 cell-by-cell budget file
///
/// Records are kept in file order. A term can be selected either by the
/// index of its occurrence (`0` for the first, which is all that is needed
/// for single-period simulations) or by its time step and stress period.
///
/// ```rust, no_run
/// # use tracktools_budget::CellBudget;
/// let budget = CellBudget::from_file("path/to/ml.cbc").unwrap();
///
/// // Inter-cell fluxes and river leakage for the first time step
/// let flowja = budget.flowja(0).unwrap();
/// let river = budget.boundary_fluxes("RIV", 0).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct CellBudget {
    /// Every record in file order
    pub records: Vec<BudgetRecord>,
}

impl CellBudget {
    /// Read a cell-by-cell budget file
    ///
    /// Convenience for [read_budget_file()].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_budget_file(path)
    }

    /// Distinct budget terms in order of first appearance
    pub fn texts(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = Vec::new();
        for record in &self.records {
            if !texts.contains(&record.header.text.as_str()) {
                texts.push(&record.header.text);
            }
        }
        texts
    }

    /// Distinct (time step, stress period) pairs in order of appearance
    pub fn kstpkper(&self) -> Vec<(i32, i32)> {
        let mut steps = Vec::new();
        for record in &self.records {
            let step = (record.header.kstp, record.header.kper);
            if !steps.contains(&step) {
                steps.push(step);
            }
        }
        steps
    }

    /// Every record of a term, failing if there are none
    pub fn records(&self, text: &str) -> Result<Vec<&BudgetRecord>> {
        let records: Vec<&BudgetRecord> = self
            .records
            .iter()
            .filter(|r| r.header.is_term(text))
            .collect();

        if records.is_empty() {
            Err(Error::MissingBudgetTerm(text.to_string()))
        } else {
            Ok(records)
        }
    }

    /// The `index`-th record of a term
    pub fn record(&self, text: &str, index: usize) -> Result<&BudgetRecord> {
        let records = self.records(text)?;
        let available = records.len();
        records
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::RecordOutOfRange {
                text: text.to_string(),
                index,
                available,
            })
    }

    /// Record of a term for a specific time step and stress period
    pub fn record_at(&self, text: &str, kstp: i32, kper: i32) -> Result<&BudgetRecord> {
        self.records(text)?
            .into_iter()
            .find(|r| r.header.kstp == kstp && r.header.kper == kper)
            .ok_or_else(|| Error::MissingTimeStep {
                text: text.to_string(),
                kstp,
                kper,
            })
    }

    /// Inter-cell fluxes of the `index`-th `FLOW-JA-FACE` record
    ///
    /// Values are aligned with the connectivity arrays of the grid, positive
    /// for flow into the cell.
    pub fn flowja(&self, index: usize) -> Result<Vec<f64>> {
        Ok(self.record(FLOW_JA_FACE, index)?.as_array()?.to_vec())
    }

    /// Boundary records of the `index`-th record of a list term (e.g. `RIV`)
    pub fn boundary_fluxes(&self, text: &str, index: usize) -> Result<BoundaryFluxes> {
        let record = self.record(text, index)?;
        BoundaryFluxes::from_list(&record.header.text, record.as_list()?)
    }
}

impl std::fmt::Display for CellBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "CellBudget {\n".to_string();
        for record in &self.records {
            let h = &record.header;
            let size = match &record.data {
                RecordData::Array(values) => f!("{} values", values.len()),
                RecordData::List(list) => f!("{} entries", list.entries.len()),
            };
            s += &f!(
                "    {:>16} kstp={} kper={} totim={} ({size})\n",
                h.text,
                h.kstp,
                h.kper,
                h.totim.sci(5, 2)
            );
        }
        s += "}";
        write!(f, "{}", s)
    }
}

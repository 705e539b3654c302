//! Case configuration

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// crate modules
use crate::error::Result;

// tracktools modules
use tracktools_budget::FLOW_JA_FACE;
use tracktools_mixing::{MixingOptions, OutputShape};

// external crates
use log::info;
use serde::{Deserialize, Serialize};

/// Everything needed to process a case directory
///
/// File names are relative to the case directory. Every field has a
/// default, so a JSON file only needs the values that differ:
///
/// ```rust
/// # use tracktools_forward::CaseConfig;
/// # use tracktools_mixing::SourceResolution;
/// let config: CaseConfig = serde_json::from_str(
///     r#"{ "budget_file": "model.cbc", "mixing": { "resolution": "detailed" } }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.budget_file, "model.cbc");
/// assert_eq!(config.grid_file, "ml.disv.grb");
/// assert_eq!(config.mixing.resolution, SourceResolution::Detailed);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseConfig {
    /// MODFLOW 6 binary grid file
    pub grid_file: String,
    /// MODFLOW 6 cell budget file
    pub budget_file: String,
    /// MODPATH 7 endpoint file
    pub endpoint_file: String,
    /// MODPATH 7 pathline file
    pub pathline_file: String,
    /// Particle group names, `id,name`
    pub group_names: Option<String>,
    /// Source identity names, `id,name`
    pub identity_names: Option<String>,
    /// Mixing ratio CSV written by the case
    pub output_file: String,
    /// Budget term of the inter-cell fluxes
    pub flow_term: String,
    /// Budget term of the source boundary package
    pub source_term: String,
    /// Occurrence of the budget terms to use, 0 for the first time step
    pub record_index: usize,
    /// Mixing ratio options
    pub mixing: MixingOptions,
    /// Layout of the output CSV
    pub output: OutputShape,
    /// Value patched into groups with no defined ratio, if any
    pub fill_undefined: Option<f64>,
    /// Command running the flow model in the case directory
    pub flow_command: String,
    /// Command running the particle tracking in the case directory
    pub tracking_command: String,
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            grid_file: "ml.disv.grb".to_string(),
            budget_file: "ml.cbc".to_string(),
            endpoint_file: "mp.mpend".to_string(),
            pathline_file: "mp.mppth".to_string(),
            group_names: Some("pgroups.csv".to_string()),
            identity_names: Some("riv_ids.csv".to_string()),
            output_file: "sim/mr.csv".to_string(),
            flow_term: FLOW_JA_FACE.to_string(),
            source_term: "RIV".to_string(),
            record_index: 0,
            mixing: MixingOptions::default(),
            output: OutputShape::default(),
            fill_undefined: None,
            flow_command: "mf6".to_string(),
            tracking_command: "mp7 mp".to_string(),
        }
    }
}

impl CaseConfig {
    /// Read a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Reading {:?}", path.as_ref());
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

//! Post-processing of case directories

// standard library
use std::path::Path;

// crate modules
use crate::case::Case;
use crate::config::CaseConfig;
use crate::error::{Error, Result};
use crate::program::run_program;

// tracktools modules
use tracktools_budget::{CellBudget, FlowConnectivity};
use tracktools_grid::BinaryGrid;
use tracktools_mixing::{MixingTable, NameTable, TrackingAnalyzer, VelocityWeighting, Weighting};
use tracktools_modpath::{EndpointFile, PathlineFile};

// external crates
use kdam::{par_tqdm, tqdm};
use log::{error, info, warn};
use rayon::prelude::*;

/// How a batch of cases is processed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Run the flow model and particle tracking before post-processing
    pub run_programs: bool,
    /// Process cases in parallel
    pub parallel: bool,
    /// Show a progress bar
    pub progress: bool,
}

/// Result of a single case in a batch
#[derive(Debug)]
pub struct CaseOutcome {
    /// Case processed
    pub case: Case,
    /// Mixing ratios written for the case, or the reason it failed
    pub result: Result<MixingTable>,
}

/// Load everything the configured mixing options need from a case
///
/// Only the files required by the options are read: the grid and
/// inter-cell fluxes for budget weighting, the pathlines for velocity
/// weighting, and the identity names for per-identity resolution. Any
/// failure names the file it came from.
pub fn load_analyzer(case: &Case, config: &CaseConfig) -> Result<TrackingAnalyzer> {
    let options = &config.mixing;

    let budget_path = case.input(&config.budget_file)?;
    let budget = CellBudget::from_file(&budget_path).map_err(in_file(&budget_path))?;
    let sources = budget
        .boundary_fluxes(&config.source_term, config.record_index)
        .map_err(in_file(&budget_path))?;

    let path = case.input(&config.endpoint_file)?;
    let endpoints = EndpointFile::from_file(&path).map_err(in_file(&path))?;
    let mut analyzer = TrackingAnalyzer::new(endpoints, sources);

    if options.weighting == Weighting::Budget {
        let path = case.input(&config.grid_file)?;
        let grid = BinaryGrid::from_file(&path).map_err(in_file(&path))?;
        let ia = grid.ia().map_err(in_file(&path))?;

        let flowja = budget
            .record(&config.flow_term, config.record_index)
            .and_then(|record| Ok(record.as_array()?.to_vec()))
            .map_err(in_file(&budget_path))?;
        let connectivity = FlowConnectivity::new(ia, flowja).map_err(in_file(&budget_path))?;
        analyzer = analyzer.with_connectivity(connectivity);
    }

    if options.velocity == VelocityWeighting::On {
        let path = case.input(&config.pathline_file)?;
        let pathlines = PathlineFile::from_file(&path).map_err(in_file(&path))?;
        analyzer = analyzer.with_pathlines(pathlines);
    }

    if let Some(file) = &config.group_names {
        let path = case.input(file)?;
        let names = NameTable::from_csv(&path).map_err(in_file(&path))?;
        analyzer = analyzer.with_group_names(names);
    }

    if let Some(file) = &config.identity_names {
        if options.resolution.needs_identities() {
            let path = case.input(file)?;
            let names = NameTable::from_csv(&path).map_err(in_file(&path))?;
            analyzer = analyzer.with_identity_names(names);
        }
    }

    Ok(analyzer)
}

/// Wrap an error with the input file it came from
fn in_file<E>(path: &Path) -> impl FnOnce(E) -> Error + '_
where
    Error: From<E>,
{
    move |e| Error::Read {
        path: path.to_path_buf(),
        source: Box::new(Error::from(e)),
    }
}

/// Compute and write the mixing ratios of a case
///
/// The case id goes in the `time` column of the output file.
pub fn postprocess_case(case: &Case, config: &CaseConfig) -> Result<MixingTable> {
    info!("Post-processing case {} in {:?}", case.id, case.dir);
    let analyzer = load_analyzer(case, config)?;
    let mut table = analyzer.compute_mixing_ratio(&config.mixing)?;

    let undefined = table.undefined_groups().join(", ");
    if !undefined.is_empty() {
        warn!("Case {}: no defined mixing ratio for {}", case.id, undefined);
        if let Some(value) = config.fill_undefined {
            table.fill_undefined(value);
        }
    }

    table.write_csv_file(case.path(&config.output_file), case.id, &config.output)?;
    Ok(table)
}

/// Optionally run the external programs, then post-process a case
pub fn run_case(case: &Case, config: &CaseConfig, run_programs: bool) -> Result<MixingTable> {
    if run_programs {
        run_program("flow", &config.flow_command, &case.dir)?;
        run_program("tracking", &config.tracking_command, &case.dir)?;
    }
    postprocess_case(case, config)
}

/// Process every case, collecting each outcome in case order
///
/// A failed case is logged and does not stop the others.
pub fn run_cases(cases: &[Case], config: &CaseConfig, options: RunOptions) -> Vec<CaseOutcome> {
    let process = |case: &Case| {
        let result = run_case(case, config, options.run_programs);
        if let Err(e) = &result {
            error!("Case {} failed: {}", case.id, e.report());
        }
        CaseOutcome {
            case: case.clone(),
            result,
        }
    };

    let mut outcomes: Vec<CaseOutcome> = if options.parallel {
        par_tqdm!(
            cases.par_iter().map(process),
            desc = "Cases",
            disable = !options.progress
        )
        .collect()
    } else {
        tqdm!(cases.iter().map(process), desc = "Cases", disable = !options.progress).collect()
    };

    if options.progress {
        eprintln!();
    }

    outcomes.sort_by(|a, b| a.case.cmp(&b.case));
    outcomes
}

//! Command line tool for particle tracking mixing ratio cases

// standard library
use std::path::PathBuf;

// tracktools modules
use tracktools_forward::{discover_cases, run_cases, CaseConfig, Error, Result, RunOptions};

// external crates
use clap::{Args, Parser, Subcommand};
use log::{error, info};

/// Mixing ratios of particle groups for every case of a forward run
///
/// Cases are directories named `<prefix><id>` under the root directory,
/// e.g. `ml_00`, `ml_01`. Each case writes its mixing ratios to its own
/// output file, with the case id in the `time` column.
#[derive(Parser, Debug)]
#[command(name = "tracktools", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Post-process existing tracking results only
    Pproc(CaseArgs),
    /// Run the flow model and particle tracking, then post-process
    Run(CaseArgs),
}

#[derive(Args, Debug)]
struct CaseArgs {
    /// Directory holding the case directories
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Prefix of the case directory names
    #[arg(short, long, default_value = "ml_")]
    prefix: String,

    /// JSON case configuration, defaults are used if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Process cases in parallel
    #[arg(short = 'j', long)]
    parallel: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() {
    let cli = Cli::parse();

    stderrlog::new()
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize + 2)
        .show_module_names(false)
        .init()
        .ok();

    if let Err(e) = run(cli.command) {
        error!("{}", e.report());
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    let (args, run_programs) = match command {
        Command::Pproc(args) => (args, false),
        Command::Run(args) => (args, true),
    };

    let config = match &args.config {
        Some(path) => CaseConfig::from_json_file(path)?,
        None => CaseConfig::default(),
    };

    let cases = discover_cases(&args.root, &args.prefix)?;
    info!("Processing {} cases", cases.len());

    let options = RunOptions {
        run_programs,
        parallel: args.parallel,
        progress: !args.no_progress,
    };

    let outcomes = run_cases(&cases, &config, options);
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();

    if failed > 0 {
        Err(Error::CasesFailed {
            failed,
            total: outcomes.len(),
        })
    } else {
        info!("Processed {} cases", outcomes.len());
        Ok(())
    }
}

//! External programs run inside a case directory

// standard library
use std::path::Path;
use std::process::Command;

// crate modules
use crate::error::{Error, Result};

// external crates
use log::{debug, info};

/// Run a command line in `dir`, failing on a non-zero exit status
///
/// The command is split on whitespace into the program and its arguments,
/// e.g. `mp7 mp`. Output goes straight to the terminal.
pub fn run_program(name: &str, command: &str, dir: &Path) -> Result<()> {
    let mut words = command.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| Error::EmptyCommand(name.to_string()))?;

    info!("Running {name} \"{command}\" in {:?}", dir);
    let status = Command::new(program).args(words).current_dir(dir).status()?;
    debug!("{program} exited with {status}");

    if status.success() {
        Ok(())
    } else {
        Err(Error::CommandFailed {
            command: command.to_string(),
            dir: dir.to_path_buf(),
            status,
        })
    }
}

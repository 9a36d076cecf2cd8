use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use svcpatch::file::DEFAULT_TARGET;

/// Svcpatch fixes up the generated GTFS service module in place.
#[derive(Debug, Parser, Clone)]
#[clap(version)]
pub struct CLIOpts {
    /// Service module to patch, relative to the working directory.
    #[clap(long, global = true, env = "SVCPATCH_FILE", default_value = DEFAULT_TARGET)]
    pub file: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Insert getArrivalTime right after the toRad helper.
    #[clap(name = "add-method")]
    AddMethod(AddMethodOpts),
    /// Remove the duplicated getArrivalTime method.
    #[clap(name = "remove-duplicate")]
    RemoveDuplicate(RemoveDuplicateOpts),
    /// Count the getArrivalTime methods, without writing.
    Count,
}

#[derive(Debug, Args, Clone)]
pub struct AddMethodOpts {
    /// Fail instead of rewriting the file unchanged when toRad is not found.
    #[clap(long, env = "SVCPATCH_STRICT")]
    pub strict: bool,
}

#[derive(Debug, Args, Clone)]
pub struct RemoveDuplicateOpts {
    /// Remove every copy after the first, not only the second one.
    #[clap(long)]
    pub all: bool,
}

mod logging;
mod transform;

fn main() -> ExitCode {
    let opts = CLIOpts::parse();
    logging::init();

    match transform::run(&opts) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "patch failed");
            eprintln!("Err: {e}");
            ExitCode::FAILURE
        }
    }
}

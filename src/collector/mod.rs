pub mod parse;
pub mod scan;

pub use parse::{parse_run_data, StatisticsLine, StatisticsParser};
pub use scan::{collect_dir, collect_runs, write_csv};

use std::error::Error;
use std::io;

use tracing::{info, span, Level};

use crate::config::Settings;
use crate::utils::init_tracing_and_env;

/// Builds the experiment CSV from solver output directories and prints it
pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env();
    let settings = Settings::from_env()?;

    let runs = {
        let span = span!(Level::INFO, "collect", pattern = %settings.runs_glob);
        let _guard = span.enter();
        collect_runs(&settings.runs_glob)?
    };

    write_csv(io::stdout().lock(), &runs)?;
    info!("Collected {} experiment runs", runs.len());
    Ok(())
}

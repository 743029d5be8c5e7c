use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;
use glob::glob;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::collector::parse::{parse_run_data, StatisticsParser};
use crate::config::constant::{RUN_DATA_FILE, STATISTICS_FILE};
use crate::domain::ExperimentRun;
use crate::error::Result;

/// Collects every output directory matching `pattern`, in glob order
pub fn collect_runs(pattern: &str) -> Result<Vec<ExperimentRun>> {
    let dirs = glob(pattern)?.collect::<std::result::Result<Vec<PathBuf>, _>>()?;
    info!("Found {} output directories matching '{}'", dirs.len(), pattern);

    let parser = StatisticsParser::new()?;
    let per_dir = dirs
        .par_iter()
        .map(|dir| collect_dir(dir, &parser))
        .collect::<Result<Vec<_>>>()?;

    Ok(per_dir.into_iter().flatten().collect())
}

/// One record per line of the directory's `statistics.txt`
pub fn collect_dir(dir: &Path, parser: &StatisticsParser) -> Result<Vec<ExperimentRun>> {
    let params = parse_run_data(&fs::read_to_string(dir.join(RUN_DATA_FILE))?)?;

    let statistics_path = dir.join(STATISTICS_FILE);
    let runtime = stat_run_seconds(&statistics_path);
    let lines = parser.parse(&fs::read_to_string(&statistics_path)?)?;
    debug!("{}: {} graphs, {}s", dir.display(), lines.len(), runtime);

    Ok(lines
        .into_iter()
        .map(|line| line.into_run(&params, runtime))
        .collect())
}

/// Seconds between creation and last modification of the statistics file
fn stat_run_seconds(path: &Path) -> u64 {
    let elapsed = fs::metadata(path).and_then(|m| {
        let created = m.created()?;
        let modified = m.modified()?;
        Ok(modified.duration_since(created).unwrap_or_default())
    });

    match elapsed {
        Ok(duration) => duration.as_secs(),
        Err(e) => {
            warn!("Cannot time {}: {}, recording 0", path.display(), e);
            0
        }
    }
}

pub fn write_csv<W: Write>(out: W, runs: &[ExperimentRun]) -> Result<()> {
    let mut wtr = Writer::from_writer(out);
    for run in runs {
        wtr.serialize(run)?;
    }
    wtr.flush()?;
    Ok(())
}

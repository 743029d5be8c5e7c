use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::debug;

use crate::config::constant::{RUN_DATA_FILE, STATISTICS_FILE};
use crate::domain::RunParameters;
use crate::error::Result;
use crate::solver::batch::BatchRunData;
use crate::utils::prepare_output_dir;

/// `output_<ants>_<iterations>_<evap>_<rand>_<pher>_<heur>`
pub fn output_dir_name(params: &RunParameters) -> String {
    format!(
        "output_{}_{}_{}_{}_{}_{}",
        params.ants, params.iterations, params.evap_coeff, params.rand_chance, params.pher_weight, params.heur_weight
    )
}

/// One solver output directory: `run_data.csv` with the parameters and a
/// `statistics.txt` that gains a line per solved graph. The statistics file is
/// created up front, so its creation-to-modification time spans the whole run.
#[derive(Debug)]
pub struct RunOutput {
    dir: PathBuf,
    statistics: File,
}

impl RunOutput {
    /// Recreates `dir` and writes the parameter file
    pub fn create(dir: &Path, params: &RunParameters) -> Result<Self> {
        prepare_output_dir(dir)?;

        let mut wtr = Writer::from_path(dir.join(RUN_DATA_FILE))?;
        wtr.serialize(params)?;
        wtr.flush()?;

        let statistics = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(STATISTICS_FILE))?;
        debug!("Writing solver output to {}", dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            statistics,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Appends and flushes the summary line of `graph_name`, returning it
    pub fn append(&mut self, graph_name: &str, batch: &BatchRunData) -> Result<String> {
        let line = batch.summary_line(graph_name);
        writeln!(self.statistics, "{}", line)?;
        self.statistics.flush()?;
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{collect_runs, parse_run_data};
    use std::fs;

    fn params() -> RunParameters {
        RunParameters {
            ants: 10,
            iterations: 1000,
            evap_coeff: 0.5,
            rand_chance: 0.3,
            pher_weight: 1.0,
            heur_weight: 2.0,
        }
    }

    fn batch(results: &[f64]) -> BatchRunData {
        let mut batch = BatchRunData::new();
        for &r in results {
            batch.add_run(r);
        }
        batch
    }

    #[test]
    fn directory_name_encodes_parameters() {
        assert_eq!(output_dir_name(&params()), "output_10_1000_0.5_0.3_1_2");
    }

    #[test]
    fn run_data_is_header_then_parameters() {
        let tmp = tempfile::tempdir().unwrap();
        let output = RunOutput::create(&tmp.path().join("output_a"), &params()).unwrap();

        let text = fs::read_to_string(output.dir().join(RUN_DATA_FILE)).unwrap();
        assert!(text.starts_with("ants,iterations,evap_coeff,rand_chance,pher_weight,heur_weight\n"));
        assert_eq!(parse_run_data(&text).unwrap(), params());
    }

    #[test]
    fn recreating_a_directory_starts_fresh_statistics() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("output_a");
        RunOutput::create(&dir, &params()).unwrap().append("old.txt", &batch(&[1.0])).unwrap();

        let mut output = RunOutput::create(&dir, &params()).unwrap();
        output.append("new.txt", &batch(&[2.0])).unwrap();

        let text = fs::read_to_string(dir.join(STATISTICS_FILE)).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("File new.txt: Finished 1 runs."));
    }

    #[test]
    fn collector_reads_what_the_solver_writes() {
        let tmp = tempfile::tempdir().unwrap();
        let mut output = RunOutput::create(&tmp.path().join(output_dir_name(&params())), &params()).unwrap();
        let a = batch(&[734.5, 578.25, 667.0]);
        let b = batch(&[410.0, 390.5]);
        output.append("A-n32-k5.txt", &a).unwrap();
        output.append("P-n16-k8.txt", &b).unwrap();

        let runs = collect_runs(&format!("{}/output_*/", tmp.path().display())).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].graph_name, "A-n32-k5.txt");
        assert_eq!(runs[0].ants, 10);
        assert_eq!(runs[0].heur_weight, 2.0);
        assert_eq!(runs[0].shortest_route, 578.25);
        assert_eq!(runs[0].longest_route, 734.5);
        assert_eq!(runs[0].average_route, a.average);
        assert_eq!(runs[1].graph_name, "P-n16-k8.txt");
        assert_eq!(runs[1].average_route, 400.25);
    }
}

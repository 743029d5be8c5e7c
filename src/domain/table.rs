use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::domain::types::{Column, ExperimentRun};
use crate::error::Result;

/// Ordered, immutable collection of experiment runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperimentTable {
    runs: Vec<ExperimentRun>,
}

impl ExperimentTable {
    pub fn new(runs: Vec<ExperimentRun>) -> Self {
        Self { runs }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading experiment table from {}", path.display());
        let file = File::open(path)?;
        let table = Self::from_reader(file)?;
        info!("Loaded {} experiment runs", table.len());
        Ok(table)
    }

    /// Reads a headed CSV; surrounding whitespace in fields is ignored
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut runs = Vec::new();
        for result in reader.deserialize() {
            let run: ExperimentRun = result?;
            runs.push(run);
        }
        debug!("Parsed {} rows", runs.len());

        Ok(Self { runs })
    }

    pub fn schema(&self) -> &'static [Column] {
        &Column::ALL
    }

    pub fn runs(&self) -> &[ExperimentRun] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn filter<F>(&self, predicate: F) -> ExperimentTable
    where
        F: Fn(&ExperimentRun) -> bool,
    {
        ExperimentTable {
            runs: self.runs.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }

    /// Runs of a single sweep cell
    pub fn with_ants_and_iterations(&self, ants: u32, iterations: u32) -> ExperimentTable {
        self.filter(|r| r.ants == ants && r.iterations == iterations)
    }
}
